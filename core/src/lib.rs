#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod session;
mod snapshot;
mod types;

/// Smallest number of mines any board gets, whatever its size.
pub const MIN_MINES: CellCount = 3;

/// Densest accepted difficulty, from 9 on every cell would be a mine.
pub const MAX_DIFFICULTY: u8 = 8;

/// Board shape and mine density, fixed for the lifetime of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub difficulty: u8,
}

impl BoardConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, difficulty: u8) -> Self {
        Self {
            width,
            height,
            difficulty,
        }
    }

    pub fn new(width: Coord, height: Coord, difficulty: u8) -> Result<Self> {
        Self::new_unchecked(width, height, difficulty).validate()
    }

    /// Checks the dimensions and that the mines fit around any first click.
    pub fn validate(self) -> Result<Self> {
        if self.width == 0
            || self.height == 0
            || self.difficulty == 0
            || self.difficulty > MAX_DIFFICULTY
        {
            return Err(GameError::InvalidConfig);
        }

        let safe_zone = mult(self.height.min(3), self.width.min(3));
        if self.mine_count().saturating_add(safe_zone) > self.total_cells() {
            return Err(GameError::TooManyMines);
        }

        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// `max(round(width * height * difficulty / 9), 3)`.
    ///
    /// Exact for every config [`BoardConfig::validate`] accepts; past
    /// [`MAX_DIFFICULTY`] a 255x255 board saturates at `CellCount::MAX`.
    pub fn mine_count(&self) -> CellCount {
        let scaled = u32::from(self.total_cells()) * u32::from(self.difficulty);
        // w*h*d/9 never lands on exactly .5, so round-half-up is exact.
        let rounded = (2 * scaled + 9) / 18;
        let rounded = CellCount::try_from(rounded).unwrap_or(CellCount::MAX);
        rounded.max(MIN_MINES)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No mines placed yet.
    Ready,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Face shown above the board.
    pub const fn face(self) -> &'static str {
        match self {
            Self::Ready | Self::InProgress => ":)",
            Self::Won => "B)",
            Self::Lost => "X(",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes, the most severe one wins.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_count_follows_density_formula() {
        assert_eq!(BoardConfig::new_unchecked(4, 5, 1).mine_count(), 3);
        assert_eq!(BoardConfig::new_unchecked(10, 10, 1).mine_count(), 11);
        assert_eq!(BoardConfig::new_unchecked(10, 10, 2).mine_count(), 22);
        assert_eq!(BoardConfig::new_unchecked(9, 9, 1).mine_count(), 9);
        assert_eq!(BoardConfig::new_unchecked(30, 16, 2).mine_count(), 107);
    }

    #[test]
    fn mine_count_has_floor_of_three() {
        assert_eq!(BoardConfig::new_unchecked(1, 1, 1).mine_count(), 3);
        assert_eq!(BoardConfig::new_unchecked(3, 3, 1).mine_count(), 3);
    }

    #[test]
    fn mine_count_matches_rounded_ratio_for_all_small_boards() {
        for width in 1..=20u8 {
            for height in 1..=20u8 {
                for difficulty in 1..=4u8 {
                    let config = BoardConfig::new_unchecked(width, height, difficulty);
                    let area = f64::from(width) * f64::from(height);
                    let ratio = area / (9.0 / f64::from(difficulty));
                    // floor(x + 0.5), x never ends in .5 here
                    let expected = ((ratio + 0.5) as CellCount).max(MIN_MINES);
                    assert_eq!(config.mine_count(), expected, "{width}x{height} d{difficulty}");
                }
            }
        }
    }

    #[test]
    fn validate_rejects_empty_dimensions() {
        assert_eq!(BoardConfig::new(0, 5, 1), Err(GameError::InvalidConfig));
        assert_eq!(BoardConfig::new(5, 0, 1), Err(GameError::InvalidConfig));
        assert_eq!(BoardConfig::new(5, 5, 0), Err(GameError::InvalidConfig));
    }

    #[test]
    fn validate_caps_difficulty() {
        assert_eq!(BoardConfig::new(4, 4, 9), Err(GameError::InvalidConfig));
        assert_eq!(BoardConfig::new(255, 255, 10), Err(GameError::InvalidConfig));
        assert!(BoardConfig::new(255, 255, MAX_DIFFICULTY).is_ok());
        assert_eq!(
            BoardConfig::new_unchecked(255, 255, MAX_DIFFICULTY).mine_count(),
            57800
        );
    }

    #[test]
    fn validate_rejects_boards_without_room_around_first_click() {
        assert_eq!(BoardConfig::new(2, 2, 1), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(3, 3, 1), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(4, 4, 8), Err(GameError::TooManyMines));
        assert!(BoardConfig::new(4, 5, 1).is_ok());
        assert!(BoardConfig::new(3, 4, 1).is_ok());
    }

    #[test]
    fn reveal_outcomes_merge_by_severity() {
        use RevealOutcome::*;
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(Won | HitMine, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
