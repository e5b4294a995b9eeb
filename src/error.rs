use std::path::PathBuf;

use crate::game::{GamePhase, PlayerIdentity};

/// Errors that can occur while playing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {column} is out of range")]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("{requested} moved out of turn (current turn: {holder})")]
    MoveOutOfTurn {
        requested: PlayerIdentity,
        holder: PlayerIdentity,
    },

    #[error("engine invariant violated: {0}")]
    InvariantViolation(String),

    #[error("game is not in progress (phase: {0:?})")]
    NotInProgress(GamePhase),

    #[error("game cannot be started from phase {0:?}")]
    AlreadyStarted(GamePhase),

    #[error("engine lock poisoned by a panicking caller")]
    EnginePoisoned,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Role;

    #[test]
    fn test_column_full_display() {
        let err = GameError::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "column 3 is full");
    }

    #[test]
    fn test_move_out_of_turn_display() {
        let err = GameError::MoveOutOfTurn {
            requested: PlayerIdentity::new("Bob", Role::SideB),
            holder: PlayerIdentity::new("Alice", Role::SideA),
        };
        assert_eq!(
            err.to_string(),
            "Bob (SideB) moved out of turn (current turn: Alice (SideA))"
        );
    }

    #[test]
    fn test_not_in_progress_display() {
        let err = GameError::NotInProgress(GamePhase::Finished);
        assert_eq!(err.to_string(), "game is not in progress (phase: Finished)");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("session.first_player must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: session.first_player must not be empty"
        );
    }
}
