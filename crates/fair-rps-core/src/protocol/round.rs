//! A single commit-reveal round against the computer.
//!
//! Phases:
//! 1. Init: the move set is fixed
//! 2. Committed: key generated, computer move chosen, HMAC computed
//! 3. AwaitingPlayerMove: only the HMAC has been shown
//! 4. Resolved: the player's move is judged against the computer's
//! 5. Disclosed: key and computer move are revealed for verification
//!
//! Phases 1, 2 happen inside [`GameRound::start`]; phases 4, 5 inside a single
//! call to [`GameRound::handle_input`]. The computer move never changes after
//! `start` returns.

use super::input::Command;
use super::types::{Outcome, RoundId};
use crate::crypto::{Commitment, RoundSecret, SecureRandomSource};
use crate::error::GameError;
use crate::games::{menu_lines, render_rules_table, resolve, Move, MoveSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// A committed round waiting for the player's move
pub struct GameRound {
    id: RoundId,
    moves: MoveSet,
    secret: RoundSecret,
    computer_move: Move,
    commitment: Commitment,
}

/// Where a round is after handling one input line
#[derive(Debug)]
pub enum RoundState {
    /// Still waiting; help was shown or the input was rejected
    AwaitingPlayerMove(GameRound),
    /// Finished; key and computer move revealed
    Disclosed(Disclosure),
    /// The player quit before moving
    Aborted,
}

impl GameRound {
    /// Commit to a computer move over a validated move set
    pub fn start(moves: MoveSet, rng: &mut impl SecureRandomSource) -> Result<Self, GameError> {
        let id = RoundId::new();
        let secret = RoundSecret::generate(rng)?;
        let computer_move = moves.choose(rng)?;
        let commitment = Commitment::new(&secret, moves.label(computer_move));

        // The computer move and secret stay out of the logs until disclosure
        debug!("Round {} committed to {} over {} moves", id, commitment, moves.len());

        Ok(Self {
            id,
            moves,
            secret,
            computer_move,
            commitment,
        })
    }

    /// Validate raw labels and start a round
    pub fn from_labels<I, S>(labels: I, rng: &mut impl SecureRandomSource) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves = MoveSet::new(labels)?;
        Self::start(moves, rng)
    }

    /// Round identifier
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Configured moves
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Published commitment to the computer move
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Lines shown before the player moves: the HMAC, then the menu
    pub fn opening_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("HMAC: {}", self.commitment)];
        lines.extend(menu_lines(&self.moves));
        lines
    }

    /// Handle one line of player input
    pub fn handle_input(self, line: &str) -> (RoundState, Vec<String>) {
        match Command::parse(&self.moves, line) {
            Ok(Command::Play(player_move)) => {
                let disclosure = self.disclose(player_move);
                let lines = disclosure.lines();
                (RoundState::Disclosed(disclosure), lines)
            }
            Ok(Command::Help) => {
                let mut lines = vec![render_rules_table(&self.moves)];
                lines.extend(menu_lines(&self.moves));
                (RoundState::AwaitingPlayerMove(self), lines)
            }
            Ok(Command::Exit) => {
                info!("Round {} aborted by player", self.id);
                (RoundState::Aborted, Vec::new())
            }
            Err(e) => {
                warn!("Round {} rejected input: {}", self.id, e);
                let mut lines = vec![e.to_string()];
                lines.extend(menu_lines(&self.moves));
                (RoundState::AwaitingPlayerMove(self), lines)
            }
        }
    }

    fn disclose(self, player_move: Move) -> Disclosure {
        let outcome = resolve(&self.moves, player_move, self.computer_move);
        info!("Round {} resolved: {}", self.id, outcome);

        Disclosure {
            round_id: self.id,
            player_move: self.moves.label(player_move).to_string(),
            computer_move: self.moves.label(self.computer_move).to_string(),
            outcome,
            key: self.secret,
            hmac: self.commitment,
        }
    }
}

impl fmt::Debug for GameRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRound")
            .field("id", &self.id)
            .field("moves", &self.moves.labels())
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

/// Everything revealed at the end of a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub round_id: RoundId,
    pub player_move: String,
    pub computer_move: String,
    pub outcome: Outcome,
    /// Round secret; the HMAC key is its hex text
    pub key: RoundSecret,
    /// Commitment published before the player moved
    pub hmac: Commitment,
}

impl Disclosure {
    /// Recompute the commitment from the revealed key and computer move
    pub fn verify(&self) -> bool {
        self.hmac.verify(&self.key, &self.computer_move)
    }

    /// Lines shown to the player
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Your move: {}", self.player_move),
            format!("Computer move: {}", self.computer_move),
            self.outcome.to_string(),
            format!("HMAC key: {}", self.key),
        ]
    }
}
