//! ID types for MLB teams, players and games.

use crate::error::{HanksTankError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for MLB team IDs (e.g. 144 for Atlanta).
///
/// # Examples
///
/// ```rust
/// use hanks_tank::TeamId;
///
/// let team_id = TeamId::new(144);
/// assert_eq!(team_id.as_u32(), 144);
/// assert_eq!(team_id.to_string(), "144");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = HanksTankError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for player IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = HanksTankError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// MLB Stats API game primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePk(pub u64);

impl GamePk {
    pub fn new(pk: u64) -> Self {
        Self(pk)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GamePk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GamePk {
    type Err = HanksTankError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_parse_and_display() {
        let id: TeamId = " 144 ".parse().unwrap();
        assert_eq!(id, TeamId::new(144));
        assert_eq!(id.to_string(), "144");
    }

    #[test]
    fn test_game_pk_rejects_garbage() {
        assert!("abc".parse::<GamePk>().is_err());
        assert_eq!("745804".parse::<GamePk>().unwrap().as_u64(), 745804);
    }

    #[test]
    fn test_player_id_roundtrip_serde() {
        let id = PlayerId::new(660670);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "660670");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
