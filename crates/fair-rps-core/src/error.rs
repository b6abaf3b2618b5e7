//! Crate-level error type.

use crate::crypto::RandomError;
use crate::games::MoveSetError;
use thiserror::Error;

/// Errors that stop a round from starting
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Configuration(#[from] MoveSetError),

    #[error(transparent)]
    RandomUnavailable(#[from] RandomError),
}
