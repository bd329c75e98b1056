//! The three fixed search depths offered to players.

use serde::{Deserialize, Serialize};

/// Opponent strength, expressed as a search depth in plies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// One ply: takes immediate wins, otherwise plays the best-looking move.
    Easy,
    /// Three plies.
    #[default]
    Medium,
    /// Six plies.
    Hard,
}

impl Difficulty {
    /// Search depth in plies.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 6,
        }
    }
}

/// A depth that is not one of the supported tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Unsupported difficulty depth {}. Choose one of 1, 3, 6", _0)]
pub struct DifficultyError(pub u8);

impl std::error::Error for DifficultyError {}

impl TryFrom<u8> for Difficulty {
    type Error = DifficultyError;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        match depth {
            1 => Ok(Difficulty::Easy),
            3 => Ok(Difficulty::Medium),
            6 => Ok(Difficulty::Hard),
            other => Err(DifficultyError(other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_depths() {
        assert_eq!(Difficulty::Easy.depth(), 1);
        assert_eq!(Difficulty::Medium.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 6);
    }

    #[test]
    fn test_try_from_rejects_unsupported_depth() {
        assert_eq!(Difficulty::try_from(6), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::try_from(2), Err(DifficultyError(2)));
        assert!(DifficultyError(2).to_string().contains("Unsupported"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Difficulty::from_str("Hard").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert!(Difficulty::from_str("impossible").is_err());
    }
}
