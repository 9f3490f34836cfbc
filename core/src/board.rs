use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Grid of cells plus the mine set and outcome flags of one game.
///
/// Mines are placed lazily by the first [`Board::reveal`], never inside the
/// 3x3 block around that click.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Array2<Cell>,
    mine_positions: BTreeSet<Coord2>,
    mine_count: CellCount,
    seed: u64,
    initialized: bool,
    lost: bool,
}

impl Board {
    /// Empty board, mines are placed from `seed` on the first reveal.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            grid: Array2::default(config.size().to_nd_index()),
            mine_positions: BTreeSet::new(),
            mine_count: config.mine_count(),
            seed,
            initialized: false,
            lost: false,
        })
    }

    /// Board with a fixed mine layout, already past the first click.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfig);
        }

        let mut grid: Array2<Cell> = Array2::default(size.to_nd_index());
        let mut mine_positions = BTreeSet::new();
        for &coords in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            grid[coords.to_nd_index()].is_mine = true;
            mine_positions.insert(coords);
        }

        Ok(Self {
            grid,
            mine_count: mine_positions.len().try_into().unwrap_or(CellCount::MAX),
            mine_positions,
            seed: 0,
            initialized: true,
            lost: false,
        })
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.grid.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_positions.iter().copied()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn is_won(&self) -> bool {
        !self.lost && self.is_finished()
    }

    pub fn status(&self) -> GameStatus {
        if self.lost {
            GameStatus::Lost
        } else if !self.initialized {
            GameStatus::Ready
        } else if self.is_finished() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Panics when `coords` is off the grid, see [`Board::get_cell`].
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn get_cell(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords.to_nd_index()).copied()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.iter_coords()
            .map(|coords| (coords, self.grid[coords.to_nd_index()]))
    }

    pub fn flags_placed(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|cell| cell.state == CellState::Flagged)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flags_placed() as isize)
    }

    /// Number of mines among the in-bounds neighbours of `coords`.
    pub fn count_mines(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos.to_nd_index()].is_mine)
            .count() as u8
    }

    /// Places the mines anywhere except the 3x3 block around `click`.
    pub fn place_mines(&mut self, click: Coord2) -> Result<()> {
        use rand::prelude::*;

        let click = self.validate_coords(click)?;
        if self.initialized {
            return Err(GameError::AlreadyPlaced);
        }

        let mut candidates: Vec<Coord2> = self
            .iter_coords()
            .filter(|&pos| !within_one(pos, click))
            .collect();
        let wanted = usize::from(self.mine_count);
        if wanted > candidates.len() {
            log::warn!(
                "Cannot place {} mines around {:?}, only {} cells outside the safe zone",
                wanted,
                click,
                candidates.len()
            );
            return Err(GameError::TooManyMines);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, wanted);
        for &pos in chosen.iter() {
            self.grid[pos.to_nd_index()].is_mine = true;
            self.mine_positions.insert(pos);
        }
        self.initialized = true;

        log::debug!(
            "Placed {} mines around first click {:?} (seed {})",
            self.mine_positions.len(),
            click,
            self.seed
        );
        Ok(())
    }

    /// Opens a cell, flood-filling through zero cells.
    ///
    /// Anything but a closed cell is left alone, even once the game is over.
    /// The first reveal on a fresh board places the mines before opening
    /// anything.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        // marked, opened or settled cells never change on reveal
        if !matches!(self.grid[coords.to_nd_index()].state, CellState::Closed) {
            return Ok(RevealOutcome::NoChange);
        }
        self.check_not_finished()?;

        if !self.initialized {
            self.place_mines(coords)?;
        }

        if self.grid[coords.to_nd_index()].is_mine {
            log::debug!("Hit mine at {:?}", coords);
            self.game_over(Some(coords));
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_fill(coords);
        if opened == 0 {
            return Ok(RevealOutcome::NoChange);
        }
        log::debug!("Opened {} cells from {:?}", opened, coords);

        Ok(if self.is_finished() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Cycles `Closed -> Flagged -> Questioned -> Closed`.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        let Some(next) = self.grid[coords.to_nd_index()].state.next_mark() else {
            return Ok(MarkOutcome::NoChange);
        };
        self.check_not_finished()?;

        let cell = &mut self.grid[coords.to_nd_index()];
        log::trace!("Mark at {:?}: {:?} -> {:?}", coords, cell.state, next);
        cell.state = next;
        Ok(MarkOutcome::Changed)
    }

    /// Whether the game is over.
    ///
    /// Only the safe neighbours of each mine are inspected, so a pocket of safe
    /// cells with no adjacent mine does not hold the game open.
    pub fn is_finished(&self) -> bool {
        if self.lost {
            return true;
        }
        if !self.initialized {
            return false;
        }
        if self.mine_positions.is_empty() {
            return self.grid.iter().all(|cell| cell.state.is_revealed());
        }

        self.mine_positions.iter().all(|&mine| {
            self.grid.iter_neighbors(mine).all(|pos| {
                let cell = self.grid[pos.to_nd_index()];
                cell.is_mine || cell.state.is_revealed()
            })
        })
    }

    /// Outcome sweep, settles every cell into its final display state.
    ///
    /// `exploded` is the mine that was hit, `None` finishes a won game.
    pub fn game_over(&mut self, exploded: Option<Coord2>) {
        use CellState::*;

        if exploded.is_some() {
            self.lost = true;
        }

        for coords in self.iter_coords() {
            let cell = self.grid[coords.to_nd_index()];
            let next = if Some(coords) == exploded {
                ExplodedMine
            } else {
                match cell.state {
                    Closed | Questioned if cell.is_mine => Mine,
                    Closed | Questioned => Revealed(self.count_mines(coords)),
                    Flagged if !cell.is_mine => CrossedMine,
                    other => other,
                }
            };
            self.grid[coords.to_nd_index()].state = next;
        }

        log::debug!(
            "Game over ({}), exploded at {:?}",
            if self.lost { "lost" } else { "won" },
            exploded
        );
    }

    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.grid[visit_coords.to_nd_index()];
            if cell.is_mine || cell.state.is_revealed() {
                continue;
            }

            let count = self.count_mines(visit_coords);
            self.grid[visit_coords.to_nd_index()].state = CellState::Revealed(count);
            opened = opened.saturating_add(1);
            log::trace!("Flood opened {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(self.grid.iter_neighbors(visit_coords).filter(|&pos| {
                    let neighbor = self.grid[pos.to_nd_index()];
                    !neighbor.is_mine && !neighbor.state.is_revealed()
                }));
            }
        }

        opened
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
