// ABOUTME: Unit tests for session configuration loaded from the environment
// ABOUTME: Validates defaults, backend selection, fallbacks, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use pierre_workout_tracker::config::{BackendConfig, Environment, SessionConfig};
use pierre_workout_tracker::constants::env_config;
use pierre_workout_tracker::errors::ErrorCode;
use pierre_workout_tracker::store::{store_from_config, WorkoutStore};
use serial_test::serial;
use uuid::Uuid;

const ALL_VARS: [&str; 6] = [
    env_config::TICK_MS,
    env_config::BACKEND_URL,
    env_config::BACKEND_KEY,
    env_config::HTTP_TIMEOUT_SECS,
    env_config::CONNECT_TIMEOUT_SECS,
    env_config::ENVIRONMENT,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    ); // Default fallback
    assert!(Environment::Production.is_production());
    assert_eq!(Environment::Testing.to_string(), "testing");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = SessionConfig::from_env().unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.tick_interval, Duration::from_secs(1));
    assert!(config.backend.is_none());
    assert_eq!(config.summary(), "environment=development tick_ms=1000 store=memory");
}

#[test]
#[serial]
fn test_backend_from_environment() {
    clear_env();
    env::set_var(env_config::BACKEND_URL, " https://example.supabase.co/ ");
    env::set_var(env_config::BACKEND_KEY, "anon-key");
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "5");
    env::set_var(env_config::ENVIRONMENT, "production");

    let config = SessionConfig::from_env().unwrap();
    let backend = config.backend.clone().unwrap();
    assert_eq!(backend.url, "https://example.supabase.co");
    assert_eq!(backend.api_key, "anon-key");
    assert_eq!(backend.request_timeout, Duration::from_secs(5));
    assert_eq!(backend.connect_timeout, Duration::from_secs(10));
    assert!(config.environment.is_production());

    let summary = config.summary();
    assert!(summary.contains("rest(https://example.supabase.co)"));
    assert!(!summary.contains("anon-key"));

    clear_env();
}

#[test]
#[serial]
fn test_backend_url_without_key_is_rejected() {
    clear_env();
    env::set_var(env_config::BACKEND_URL, "https://example.supabase.co");

    let err = SessionConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains(env_config::BACKEND_KEY));

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_tick_falls_back_to_default() {
    clear_env();
    env::set_var(env_config::TICK_MS, "fast");

    let config = SessionConfig::from_env().unwrap();
    assert_eq!(config.tick_interval, Duration::from_millis(1000));

    clear_env();
}

#[test]
#[serial]
fn test_zero_tick_is_invalid() {
    clear_env();
    env::set_var(env_config::TICK_MS, "0");

    let err = SessionConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}

#[test]
fn test_non_http_backend_is_invalid() {
    let config = SessionConfig {
        backend: Some(BackendConfig {
            url: "ftp://example.com".into(),
            api_key: "key".into(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }),
        ..SessionConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[tokio::test]
async fn test_store_selection_follows_backend() {
    let memory = store_from_config(&SessionConfig::default()).unwrap();
    assert!(memory.list_completed_workouts(Uuid::nil()).await.unwrap().is_empty());

    let config = SessionConfig {
        backend: Some(BackendConfig {
            url: "http://127.0.0.1:9".into(),
            api_key: "key".into(),
            request_timeout: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(1),
        }),
        ..SessionConfig::default()
    };
    let rest = store_from_config(&config).unwrap();
    let err = rest
        .list_completed_workouts(Uuid::nil())
        .await
        .unwrap_err();
    assert!(err.code.is_retryable());
}
