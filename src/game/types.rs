//! Core domain types for the shared board.

use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// The final result of a game.
///
/// Replicated as the plain strings `"X"`, `"O"`, or `"Draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A mark completed a line.
    Won(Mark),
    /// The board filled with no line completed.
    Draw,
}

impl Outcome {
    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(mark),
            Outcome::Draw => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Outcome::Won(Mark::X) => "X",
            Outcome::Won(Mark::O) => "O",
            Outcome::Draw => "Draw",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        match label.as_str() {
            "X" => Ok(Outcome::Won(Mark::X)),
            "O" => Ok(Outcome::Won(Mark::O)),
            "Draw" => Ok(Outcome::Draw),
            other => Err(serde::de::Error::unknown_variant(other, &["X", "O", "Draw"])),
        }
    }
}

/// 3x3 board in row-major order.
///
/// Replicated as a 9-entry array of `"X" | "O" | null`. The hosted store
/// may elide trailing nulls, so decoding pads short arrays with empty
/// cells and truncates long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Option<Mark>; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Option<Mark>; 9] {
        &self.cells
    }

    /// Returns the mark at `cell`, `None` when vacant or out of range.
    pub fn mark_at(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    /// Checks whether `cell` is on the board and unoccupied.
    pub fn is_vacant(&self, cell: usize) -> bool {
        matches!(self.cells.get(cell), Some(None))
    }

    /// Places a mark at `cell`. Out-of-range cells are ignored.
    pub fn place(&mut self, cell: usize, mark: Mark) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = Some(mark);
        }
    }

    /// Formats the board as a human-readable string. Vacant cells show
    /// their 1-based key binding.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = row * 3 + col;
                match self.cells[cell] {
                    Some(mark) => out.push_str(&mark.to_string()),
                    None => out.push_str(&(cell + 1).to_string()),
                }
                if col < 2 {
                    out.push('|');
                }
            }
            if row < 2 {
                out.push_str("\n-+-+-\n");
            }
        }
        out
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cells: Vec<Option<Mark>> = Vec::deserialize(deserializer)?;
        let mut board = Board::new();
        for (cell, mark) in cells.into_iter().take(9).enumerate() {
            board.cells[cell] = mark;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips_the_mark() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn out_of_range_placement_is_ignored() {
        let mut board = Board::new();
        board.place(9, Mark::X);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn display_shows_key_bindings_for_vacant_cells() {
        let mut board = Board::new();
        board.place(0, Mark::X);
        board.place(4, Mark::O);
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
