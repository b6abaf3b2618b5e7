//! Runtime commands typed by the player.

use crate::games::{Move, MoveSet};
use thiserror::Error;

/// Rejected runtime input; the round stays where it was
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid choice {input:?}, enter a number from the menu")]
    NotANumber { input: String },

    #[error("Invalid choice {choice}, pick a move from 1 to {max}")]
    OutOfRange { choice: i64, max: usize },
}

/// A parsed input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play the given move
    Play(Move),
    /// Show the rules table
    Help,
    /// Abort the round
    Exit,
}

impl Command {
    /// Parse one line of input against the configured moves
    pub fn parse(moves: &MoveSet, line: &str) -> Result<Command, InputError> {
        let input = line.trim();
        if input == "?" || input.eq_ignore_ascii_case("help") {
            return Ok(Command::Help);
        }

        let choice: i64 = input.parse().map_err(|_| InputError::NotANumber {
            input: input.to_string(),
        })?;
        if choice == 0 {
            return Ok(Command::Exit);
        }

        usize::try_from(choice)
            .ok()
            .and_then(|number| moves.by_number(number))
            .map(Command::Play)
            .ok_or(InputError::OutOfRange {
                choice,
                max: moves.len(),
            })
    }
}
