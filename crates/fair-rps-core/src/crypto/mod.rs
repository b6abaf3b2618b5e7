//! Cryptographic primitives for the fairness protocol.
//!
//! This module provides:
//! - SecureRandomSource with OS-backed and fixed implementations
//! - RoundSecret, the per-round HMAC key
//! - Commitment, the HMAC tag published before the player moves

mod commitment;
mod random;
mod secret;

pub use commitment::Commitment;
pub use random::{FixedRandom, OsRandom, RandomError, SecureRandomSource};
pub use secret::{RoundSecret, SecretParseError, SECRET_LEN};
