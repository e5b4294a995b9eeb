use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Cell;

/// Default display name for a player created without one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Which seat a player occupies, and how its moves are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SideA,
    SideB,
    Heuristic,
}

impl Role {
    /// Convert role to the cell marker its pieces leave on the board.
    ///
    /// The heuristic player always sits in the second seat, so it shares
    /// `SideB`'s marker.
    pub fn to_cell(self) -> Cell {
        match self {
            Role::SideA => Cell::SideA,
            Role::SideB | Role::Heuristic => Cell::SideB,
        }
    }

    /// Whether moves for this role are computed by the engine.
    pub fn is_heuristic(self) -> bool {
        self == Role::Heuristic
    }
}

/// Plain construction parameters for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub role: Role,
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

impl PlayerConfig {
    pub fn new(role: Role) -> Self {
        PlayerConfig {
            role,
            name: default_name(),
        }
    }

    pub fn named(role: Role, name: impl Into<String>) -> Self {
        PlayerConfig {
            role,
            name: name.into(),
        }
    }
}

/// An immutable player identity: display name plus role.
///
/// Two identities are equal iff both name and role match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerIdentity {
    name: String,
    role: Role,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        PlayerIdentity {
            name: name.into(),
            role,
        }
    }

    pub fn from_config(config: PlayerConfig) -> Self {
        PlayerIdentity::new(config.name, config.role)
    }

    /// Get player name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn to_cell(&self) -> Cell {
        self.role.to_cell()
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        let player = PlayerIdentity::from_config(PlayerConfig::new(Role::SideA));
        assert_eq!(player.name(), "Player");
        assert_eq!(player.role(), Role::SideA);
    }

    #[test]
    fn test_identity_equality_needs_name_and_role() {
        let a = PlayerIdentity::new("Ann", Role::SideA);
        assert_eq!(a, PlayerIdentity::new("Ann", Role::SideA));
        assert_ne!(a, PlayerIdentity::new("Ann", Role::SideB));
        assert_ne!(a, PlayerIdentity::new("Bea", Role::SideA));
    }

    #[test]
    fn test_heuristic_shares_second_marker() {
        assert_eq!(Role::SideA.to_cell(), Cell::SideA);
        assert_eq!(Role::SideB.to_cell(), Cell::SideB);
        assert_eq!(Role::Heuristic.to_cell(), Cell::SideB);
        assert!(Role::Heuristic.is_heuristic());
        assert!(!Role::SideB.is_heuristic());
    }

    #[test]
    fn test_config_name_defaults_in_toml() {
        let config: PlayerConfig = toml::from_str(r#"role = "SideB""#).unwrap();
        assert_eq!(config, PlayerConfig::new(Role::SideB));
    }

    #[test]
    fn test_display() {
        let p = PlayerIdentity::new("Computer", Role::Heuristic);
        assert_eq!(p.to_string(), "Computer (Heuristic)");
    }
}
