//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique round identifier, used to correlate log lines
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Create a new random round ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RoundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundId({})", self.0)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round outcome, from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Draw,
}

impl Outcome {
    /// Text shown when the round is disclosed
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::PlayerWins => "Player Wins",
            Outcome::ComputerWins => "Computer Wins",
            Outcome::Draw => "Draw",
        }
    }

    /// The same result seen from the other side
    pub fn reversed(&self) -> Outcome {
        match self {
            Outcome::PlayerWins => Outcome::ComputerWins,
            Outcome::ComputerWins => Outcome::PlayerWins,
            Outcome::Draw => Outcome::Draw,
        }
    }

    /// Short cell label used in the rules table
    pub fn cell(&self) -> &'static str {
        match self {
            Outcome::PlayerWins => "Win",
            Outcome::ComputerWins => "Lose",
            Outcome::Draw => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
