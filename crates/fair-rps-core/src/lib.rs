//! Fair RPS Core Library
//!
//! Provably fair rock-paper-scissors over any odd number of moves. The
//! computer commits to its move with an HMAC before the player chooses, then
//! reveals the key so the player can check the commitment.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, FixedRandom, OsRandom, RandomError, RoundSecret, SecureRandomSource};
pub use error::GameError;
pub use games::{resolve, Move, MoveSet, MoveSetError};
pub use protocol::{Command, Disclosure, GameRound, InputError, Outcome, RoundId, RoundState};
