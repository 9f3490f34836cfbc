use serde::{Deserialize, Serialize};

/// Player-visible state of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Flagged,
    Questioned,
    /// Opened safe cell carrying its adjacent mine count.
    Revealed(u8),
    /// The mine that ended the game.
    ExplodedMine,
    Mine,
    /// A flag that was placed on a safe cell.
    CrossedMine,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Flagged | Self::Questioned)
    }

    /// Whether the cell still looks unopened to the player.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Flagged | Self::Questioned)
    }

    pub const fn adjacent_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }

    /// Next state of the flag cycle, `None` when the cell can't be marked.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Closed => Some(Self::Flagged),
            Self::Flagged => Some(Self::Questioned),
            Self::Questioned => Some(Self::Closed),
            _ => None,
        }
    }

    /// Character the text front end draws for this state.
    pub const fn glyph(self) -> char {
        match self {
            Self::Closed => '#',
            Self::Flagged => 'F',
            Self::Questioned => '?',
            Self::Revealed(0) => '.',
            Self::Revealed(count @ 1..=8) => (b'0' + count) as char,
            Self::Revealed(_) => '!',
            Self::ExplodedMine => 'X',
            Self::Mine => '*',
            Self::CrossedMine => 'x',
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) state: CellState,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn state(self) -> CellState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_cycle_returns_to_closed() {
        let mut state = CellState::Closed;
        for expected in [CellState::Flagged, CellState::Questioned, CellState::Closed] {
            state = state.next_mark().unwrap();
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn revealed_cells_do_not_cycle() {
        assert_eq!(CellState::Revealed(3).next_mark(), None);
        assert_eq!(CellState::Mine.next_mark(), None);
        assert_eq!(CellState::CrossedMine.next_mark(), None);
    }

    #[test]
    fn glyphs_follow_state() {
        assert_eq!(CellState::Revealed(0).glyph(), '.');
        assert_eq!(CellState::Revealed(1).glyph(), '1');
        assert_eq!(CellState::Revealed(8).glyph(), '8');
        assert_eq!(CellState::ExplodedMine.glyph(), 'X');
        assert_eq!(CellState::default().glyph(), '#');
    }
}
