use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to draw the board, detached from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub mines_left: isize,
    pub status: GameStatus,
    /// Row-major cell states.
    pub cells: Vec<Vec<CellState>>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        let (rows, cols) = board.size();
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| board.cell_at((row, col)).state())
                    .collect()
            })
            .collect();

        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            mines_left: board.mines_left(),
            status: board.status(),
            cells,
        }
    }
}

impl Board {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(self)
    }
}

/// One line of glyphs per row.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
