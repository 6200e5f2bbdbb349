//! Win detection over the fixed line set.

use crate::game::types::{Board, Mark};
use tracing::instrument;

/// Checks if a mark has completed a line.
///
/// Returns `Some(mark)` for the first completed line in the fixed
/// enumeration order: rows, then columns, then diagonals. Under
/// alternating play at most one distinct mark can hold a line, so the
/// order never changes the answer.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    const LINES: [[usize; 3]; 8] = [
        // Rows
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        // Columns
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        // Diagonals
        [0, 4, 8],
        [2, 4, 6],
    ];

    for [a, b, c] in LINES {
        if let Some(mark) = board.mark_at(a)
            && board.mark_at(b) == Some(mark)
            && board.mark_at(c) == Some(mark)
        {
            return Some(mark);
        }
    }

    None
}
