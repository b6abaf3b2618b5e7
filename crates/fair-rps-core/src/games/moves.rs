//! Move sets and move selection.

use crate::crypto::{RandomError, SecureRandomSource};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Smallest playable move set
pub const MIN_MOVES: usize = 3;

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

/// Invalid move set configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveSetError {
    #[error("Expected an odd number of at least 3 moves, got {count}")]
    TooFew { count: usize },

    #[error("Expected an odd number of moves, got {count}")]
    EvenCount { count: usize },

    #[error("Moves must be unique, {label:?} appears more than once")]
    Duplicate { label: String },
}

/// A move, as a position in its [`MoveSet`].
///
/// Only valid with the set it came from (or a clone of it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    set: u64,
    index: usize,
}

impl Move {
    /// Zero-based position in the move set
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based number shown in the menu
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Ordered, odd-sized set of distinct move labels.
///
/// Order is significant: the moves sit on a circle in this order and each one
/// beats the half of the circle that precedes it.
#[derive(Clone, Debug)]
pub struct MoveSet {
    id: u64,
    labels: Vec<String>,
}

impl PartialEq for MoveSet {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for MoveSet {}

impl MoveSet {
    /// Validate and build a move set
    pub fn new<I, S>(labels: I) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let count = labels.len();

        if count < MIN_MOVES {
            return Err(MoveSetError::TooFew { count });
        }
        if count % 2 == 0 {
            return Err(MoveSetError::EvenCount { count });
        }

        let mut seen = HashSet::with_capacity(count);
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(MoveSetError::Duplicate {
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            labels,
        })
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; a valid move set has at least three moves
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Moves each side beats (and loses to)
    pub fn half(&self) -> usize {
        self.labels.len() / 2
    }

    fn at(&self, index: usize) -> Move {
        Move { set: self.id, index }
    }

    /// Move at a zero-based index
    pub fn get(&self, index: usize) -> Option<Move> {
        (index < self.labels.len()).then(|| self.at(index))
    }

    /// Whether a move was taken from this set
    pub fn contains(&self, mv: Move) -> bool {
        mv.set == self.id && mv.index < self.labels.len()
    }

    /// Move at a one-based menu number
    pub fn by_number(&self, number: usize) -> Option<Move> {
        number.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Move with the given label
    pub fn position(&self, label: &str) -> Option<Move> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|index| self.at(index))
    }

    /// Label of a move.
    ///
    /// Panics if the move does not belong to this set.
    pub fn label(&self, mv: Move) -> &str {
        assert!(
            self.contains(mv),
            "move #{} is not in this move set",
            mv.number()
        );
        &self.labels[mv.index]
    }

    /// All labels, in order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All moves, in order
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        (0..self.labels.len()).map(|index| self.at(index))
    }

    /// Pick a move uniformly at random
    pub fn choose(&self, rng: &mut impl SecureRandomSource) -> Result<Move, RandomError> {
        rng.uniform_index(self.labels.len()).map(|index| self.at(index))
    }
}
