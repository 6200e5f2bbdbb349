//! Board domain: core types and rules.

mod rules;
mod types;

pub use rules::{check_winner, evaluate, is_full};
pub use types::{Board, Mark, Outcome};
