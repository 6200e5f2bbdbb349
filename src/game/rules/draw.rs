//! Draw detection.

use crate::game::types::Board;
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board with no completed line is a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| cell.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Mark;

    #[test]
    fn empty_board_is_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn partial_board_is_not_full() {
        let mut board = Board::new();
        board.place(4, Mark::X);
        assert!(!is_full(&board));
    }

    #[test]
    fn board_with_all_cells_occupied_is_full() {
        let mut board = Board::new();
        for cell in 0..9 {
            board.place(cell, if cell % 2 == 0 { Mark::X } else { Mark::O });
        }
        assert!(is_full(&board));
    }
}
