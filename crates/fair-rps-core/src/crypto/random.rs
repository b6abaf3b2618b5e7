//! Secure randomness sources for key generation and move selection.

use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors from a randomness source
#[derive(Debug, Error)]
pub enum RandomError {
    #[error("Secure random source unavailable: {0}")]
    Unavailable(String),

    #[error("Cannot pick an index from an empty range")]
    EmptyRange,

    #[error("Fixed random source exhausted")]
    Exhausted,

    #[error("Queued index {index} is out of range for bound {bound}")]
    OutOfRange { index: usize, bound: usize },
}

/// A cryptographically secure source of randomness.
///
/// Passed explicitly to everything that needs randomness so a round can be
/// replayed deterministically in tests with [`FixedRandom`].
pub trait SecureRandomSource {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomError>;

    /// Pick an index uniformly from `[0, bound)`
    fn uniform_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::EmptyRange);
        }

        // Reject the tail of the u64 range so every index is equally likely
        let bound = bound as u64;
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let mut word = [0u8; 8];
            self.fill_bytes(&mut word)?;
            let value = u64::from_le_bytes(word);
            if value < zone {
                return Ok((value % bound) as usize);
            }
        }
    }
}

/// Operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomError::Unavailable(e.to_string()))
    }
}

/// Deterministic source replaying a fixed byte pattern and queued indices
#[derive(Clone, Debug, Default)]
pub struct FixedRandom {
    bytes: Vec<u8>,
    cursor: usize,
    indices: VecDeque<usize>,
}

impl FixedRandom {
    /// Create a source that cycles through `bytes`
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: 0,
            indices: VecDeque::new(),
        }
    }

    /// Queue indices to be returned by `uniform_index`, in order
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl SecureRandomSource for FixedRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        if self.bytes.is_empty() {
            return Err(RandomError::Exhausted);
        }
        for byte in dest.iter_mut() {
            *byte = self.bytes[self.cursor % self.bytes.len()];
            self.cursor += 1;
        }
        Ok(())
    }

    fn uniform_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::EmptyRange);
        }
        let index = self.indices.pop_front().ok_or(RandomError::Exhausted)?;
        if index >= bound {
            return Err(RandomError::OutOfRange { index, bound });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that only exercises the default `uniform_index`
    struct Bytes(FixedRandom);

    impl SecureRandomSource for Bytes {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
            self.0.fill_bytes(dest)
        }
    }

    #[test]
    fn test_os_random_fills_bytes() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill_bytes(&mut a).unwrap();
        OsRandom.fill_bytes(&mut b).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_os_random_index_in_range() {
        for bound in [1, 3, 5, 7, 101] {
            for _ in 0..50 {
                assert!(OsRandom.uniform_index(bound).unwrap() < bound);
            }
        }
    }

    #[test]
    fn test_os_random_covers_every_index() {
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[OsRandom.uniform_index(5).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(matches!(
            OsRandom.uniform_index(0),
            Err(RandomError::EmptyRange)
        ));
        assert!(matches!(
            FixedRandom::new([1]).uniform_index(0),
            Err(RandomError::EmptyRange)
        ));
    }

    #[test]
    fn test_default_index_uses_little_endian_words() {
        let mut source = Bytes(FixedRandom::new([4, 0, 0, 0, 0, 0, 0, 0]));
        // 4 % 3 == 1
        assert_eq!(source.uniform_index(3).unwrap(), 1);
    }

    #[test]
    fn test_default_index_rejects_biased_tail() {
        // u64::MAX is divisible by 3 so it is the only rejected value for bound 3
        let mut pattern = vec![0xff; 8];
        pattern.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        let mut source = Bytes(FixedRandom::new(pattern));

        assert_eq!(source.uniform_index(3).unwrap(), 2);
    }

    #[test]
    fn test_fixed_random_cycles_bytes() {
        let mut source = FixedRandom::new([1, 2, 3]);
        let mut out = [0u8; 7];
        source.fill_bytes(&mut out).unwrap();

        assert_eq!(out, [1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_fixed_random_queued_indices() {
        let mut source = FixedRandom::new([0]).with_indices([2, 0]);

        assert_eq!(source.uniform_index(3).unwrap(), 2);
        assert_eq!(source.uniform_index(3).unwrap(), 0);
        assert!(matches!(
            source.uniform_index(3),
            Err(RandomError::Exhausted)
        ));
    }

    #[test]
    fn test_fixed_random_index_out_of_range() {
        let mut source = FixedRandom::new([0]).with_indices([5]);

        assert!(matches!(
            source.uniform_index(3),
            Err(RandomError::OutOfRange { index: 5, bound: 3 })
        ));
    }

    #[test]
    fn test_fixed_random_without_bytes() {
        let mut out = [0u8; 4];
        assert!(matches!(
            FixedRandom::default().fill_bytes(&mut out),
            Err(RandomError::Exhausted)
        ));
    }
}
