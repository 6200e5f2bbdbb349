//! Game rules for the shared board.
//!
//! Pure functions only: the session applies them after every board
//! change, whether the change came from local input or a remote
//! snapshot.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use crate::game::types::{Board, Outcome};

/// Evaluates the board to a final result.
///
/// `Some(Won(mark))` when a line is complete, `Some(Draw)` when the
/// board is full with no line, `None` while the game continues.
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(mark) = check_winner(board) {
        return Some(Outcome::Won(mark));
    }
    if is_full(board) {
        return Some(Outcome::Draw);
    }
    None
}
