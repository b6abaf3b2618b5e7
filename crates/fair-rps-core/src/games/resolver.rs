//! Cyclic winner resolution for any odd-sized move set.

use super::moves::{Move, MoveSet};
use crate::protocol::Outcome;

/// Outcome for the moves at positions `player` and `computer` on a circle of `n`.
///
/// The player wins when the computer's move is one of the `n / 2` moves
/// directly before the player's move going round the circle.
pub fn outcome_at(n: usize, player: usize, computer: usize) -> Outcome {
    assert!(
        player < n && computer < n,
        "moves ({}, {}) are outside a move set of {} moves",
        player,
        computer,
        n
    );

    if player == computer {
        return Outcome::Draw;
    }

    let distance = (player + n - computer) % n;
    if distance <= n / 2 {
        Outcome::PlayerWins
    } else {
        Outcome::ComputerWins
    }
}

/// Decide a round between the player's and the computer's move.
///
/// Panics if either move was not taken from `moves`, even when its index is in range.
pub fn resolve(moves: &MoveSet, player: Move, computer: Move) -> Outcome {
    assert!(
        moves.contains(player) && moves.contains(computer),
        "moves #{} and #{} are not both in the configured move set",
        player.number(),
        computer.number()
    );
    outcome_at(moves.len(), player.index(), computer.index())
}

/// Decide a round by move labels.
///
/// Panics if either label is not in `moves`.
pub fn resolve_labels(moves: &MoveSet, player: &str, computer: &str) -> Outcome {
    let find = |label: &str| {
        moves
            .position(label)
            .unwrap_or_else(|| panic!("move {:?} is not in the configured move set", label))
    };
    resolve(moves, find(player), find(computer))
}
