//! Per-round secret key.

use super::random::{RandomError, SecureRandomSource};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key length in bytes (256 bits)
pub const SECRET_LEN: usize = 32;

/// Errors parsing a disclosed key
#[derive(Debug, Error, PartialEq)]
pub enum SecretParseError {
    #[error("Key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Key must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Random key generated fresh for every round and disclosed once it ends
#[derive(Clone, PartialEq, Eq)]
pub struct RoundSecret([u8; SECRET_LEN]);

impl RoundSecret {
    /// Generate a new key from a secure source
    pub fn generate(rng: &mut impl SecureRandomSource) -> Result<Self, RandomError> {
        let mut bytes = [0u8; SECRET_LEN];
        rng.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded key
    pub fn from_hex(s: &str) -> Result<Self, SecretParseError> {
        let bytes = hex::decode(s.trim())?;
        let bytes: [u8; SECRET_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SecretParseError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    /// Lowercase hex form, which is also the HMAC key material
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for RoundSecret {
    type Err = SecretParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for RoundSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundSecret({}..)", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for RoundSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for RoundSecret {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for RoundSecret {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}
