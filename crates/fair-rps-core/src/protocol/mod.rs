//! Round protocol: types, player commands, and the round state machine.

mod input;
mod round;
mod types;

pub use input::{Command, InputError};
pub use round::{Disclosure, GameRound, RoundState};
pub use types::{Outcome, RoundId};
