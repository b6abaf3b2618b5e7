//! Move sets and the rules of the cyclic game.

mod moves;
mod resolver;
mod rules;

pub use moves::{Move, MoveSet, MoveSetError, MIN_MOVES};
pub use resolver::{outcome_at, resolve, resolve_labels};
pub use rules::{menu_lines, render_rules_table, rules_table};
