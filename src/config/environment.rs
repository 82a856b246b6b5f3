// ABOUTME: Environment configuration for workout sessions and the backend connection
// ABOUTME: Parses tick period, backend URL/key, and HTTP timeouts with logged fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use pierre_workout_core::constants::{defaults, env_config};
use pierre_workout_core::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Connection settings for the hosted workout backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without the REST path, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// API key sent as `apikey` and as the bearer token
    pub api_key: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

/// Session and store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Period of the clock and rest drivers
    pub tick_interval: Duration,
    /// Hosted backend; `None` selects the in-memory store
    pub backend: Option<BackendConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            tick_interval: Duration::from_millis(defaults::TICK_MS),
            backend: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is zero or a backend URL is set
    /// without a key
    pub fn from_env() -> AppResult<Self> {
        info!("Loading session configuration from environment variables");

        let environment = env::var(env_config::ENVIRONMENT)
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();
        let tick_ms: u64 = env_parse_or(env_config::TICK_MS, defaults::TICK_MS);

        let backend = match env::var(env_config::BACKEND_URL) {
            Ok(url) if !url.trim().is_empty() => {
                let api_key = env::var(env_config::BACKEND_KEY).map_err(|_| {
                    AppError::new(
                        ErrorCode::ConfigMissing,
                        format!(
                            "{} is set but {} is missing",
                            env_config::BACKEND_URL,
                            env_config::BACKEND_KEY
                        ),
                    )
                })?;
                Some(BackendConfig {
                    url: url.trim().trim_end_matches('/').to_owned(),
                    api_key,
                    request_timeout: Duration::from_secs(env_parse_or(
                        env_config::HTTP_TIMEOUT_SECS,
                        defaults::HTTP_TIMEOUT_SECS,
                    )),
                    connect_timeout: Duration::from_secs(env_parse_or(
                        env_config::CONNECT_TIMEOUT_SECS,
                        defaults::CONNECT_TIMEOUT_SECS,
                    )),
                })
            }
            _ => None,
        };

        let config = Self {
            environment,
            tick_interval: Duration::from_millis(tick_ms),
            backend,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the tick interval
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is zero
    pub fn validate(&self) -> AppResult<()> {
        if self.tick_interval.is_zero() {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_config::TICK_MS
            )));
        }
        if let Some(backend) = &self.backend {
            if !(backend.url.starts_with("http://") || backend.url.starts_with("https://")) {
                return Err(AppError::config_invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    env_config::BACKEND_URL,
                    backend.url
                )));
            }
        }
        Ok(())
    }

    /// One-line description for startup logs; never includes the API key
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} tick_ms={} store={}",
            self.environment,
            self.tick_interval.as_millis(),
            self.backend
                .as_ref()
                .map_or_else(|| "memory".to_owned(), |b| format!("rest({})", b.url)),
        )
    }
}

/// Parse an environment variable, falling back to `default` with a warning
/// when it is set but unparseable
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value '{raw}', using default {default}");
            default
        }),
        Err(_) => default,
    }
}
