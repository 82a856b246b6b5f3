// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Line parser for commands typed during an interactive workout session
// ABOUTME: Exercises and sets are addressed by their 1-based position on screen

use std::str::FromStr;

use pierre_workout_tracker::errors::{AppError, AppResult};
use pierre_workout_tracker::session::SetField;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `reps <ex#> <set#> [value]` or `weight <ex#> <set#> [value]`
    Edit {
        exercise: usize,
        set: u32,
        field: SetField,
        value: String,
    },
    /// `done <ex#> <set#>`
    Done { exercise: usize, set: u32 },
    /// `skip`
    SkipRest,
    /// `status`
    Status,
    /// `finish [--force]`
    Finish { force: bool },
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl FromStr for SessionCommand {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Status);
        };
        let args: Vec<&str> = words.collect();

        match verb.to_lowercase().as_str() {
            "done" | "d" => {
                let (exercise, set) = position(&args)?;
                Ok(Self::Done { exercise, set })
            }
            "skip" | "s" => Ok(Self::SkipRest),
            "status" | "st" => Ok(Self::Status),
            "finish" | "f" => Ok(Self::Finish {
                force: args.iter().any(|a| *a == "--force" || *a == "-f"),
            }),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => {
                let field = SetField::from_str(other)
                    .map_err(|_| AppError::invalid_input(format!("Unknown command '{other}'")))?;
                let (exercise, set) = position(&args)?;
                Ok(Self::Edit {
                    exercise,
                    set,
                    field,
                    value: args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
                })
            }
        }
    }
}

fn position(args: &[&str]) -> AppResult<(usize, u32)> {
    let [exercise, set, ..] = args else {
        return Err(AppError::invalid_input(
            "Expected an exercise number and a set number",
        ));
    };
    let exercise = exercise
        .parse::<usize>()
        .map_err(|_| AppError::invalid_input(format!("Invalid exercise number '{exercise}'")))?;
    let set = set
        .parse::<u32>()
        .map_err(|_| AppError::invalid_input(format!("Invalid set number '{set}'")))?;
    Ok((exercise, set))
}

/// Help text for the session prompt
pub const HELP: &str = "\
Commands:
  reps <ex#> <set#> <value>     record reps for a set
  weight <ex#> <set#> <value>   record weight for a set
  done <ex#> <set#>             mark a set complete and start rest
  skip                          skip the current rest
  status                        show the workout
  finish [--force]              save the workout
  quit                          leave without saving";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edits_with_optional_value() {
        assert_eq!(
            "reps 1 2 12".parse::<SessionCommand>().unwrap(),
            SessionCommand::Edit {
                exercise: 1,
                set: 2,
                field: SetField::Reps,
                value: "12".into()
            }
        );
        assert_eq!(
            "w 2 1".parse::<SessionCommand>().unwrap(),
            SessionCommand::Edit {
                exercise: 2,
                set: 1,
                field: SetField::Weight,
                value: String::new()
            }
        );
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!(
            "done 1 3".parse::<SessionCommand>().unwrap(),
            SessionCommand::Done { exercise: 1, set: 3 }
        );
        assert_eq!(
            "finish --force".parse::<SessionCommand>().unwrap(),
            SessionCommand::Finish { force: true }
        );
        assert_eq!("".parse::<SessionCommand>().unwrap(), SessionCommand::Status);
    }

    #[test]
    fn rejects_unknown_and_malformed() {
        assert!("jump 1 1".parse::<SessionCommand>().is_err());
        assert!("done 1".parse::<SessionCommand>().is_err());
        assert!("done one 1".parse::<SessionCommand>().is_err());
    }
}
