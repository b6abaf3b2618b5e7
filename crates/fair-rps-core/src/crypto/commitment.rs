//! HMAC commitment to the computer's move.

use super::secret::RoundSecret;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &RoundSecret, label: &str) -> HmacSha256 {
    // Key material is the hex text of the secret, not its raw bytes
    let key = secret.to_hex();
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("hmac accepts any key length");
    mac.update(label.as_bytes());
    mac
}

/// Commitment = HMAC-SHA256(key = hex(secret), message = move label)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Commit to a move label under the round secret
    pub fn new(secret: &RoundSecret, label: &str) -> Self {
        Self(keyed_mac(secret, label).finalize().into_bytes().into())
    }

    /// Verify that the given secret and move label produce this commitment
    pub fn verify(&self, secret: &RoundSecret, label: &str) -> bool {
        keyed_mac(secret, label).verify_slice(&self.0).is_ok()
    }
}

impl FromStr for Commitment {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex::encode(self.0).serialize(s)
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}
