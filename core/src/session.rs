use serde::{Deserialize, Serialize};

use crate::*;

/// What the player asked for, already translated to grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Primary button: first click or reveal.
    Reveal(Coord2),
    /// Secondary button: cycle flag / question mark.
    Mark(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    NoChange,
    Changed,
    Exploded,
    Won,
}

impl CommandOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl From<RevealOutcome> for CommandOutcome {
    fn from(outcome: RevealOutcome) -> Self {
        match outcome {
            RevealOutcome::NoChange => Self::NoChange,
            RevealOutcome::Revealed => Self::Changed,
            RevealOutcome::HitMine => Self::Exploded,
            RevealOutcome::Won => Self::Won,
        }
    }
}

impl From<MarkOutcome> for CommandOutcome {
    fn from(outcome: MarkOutcome) -> Self {
        match outcome {
            MarkOutcome::NoChange => Self::NoChange,
            MarkOutcome::Changed => Self::Changed,
        }
    }
}

/// Drives one board through a game, one command at a time.
///
/// Once the game is over further commands are ignored, and a win gets its
/// outcome sweep applied right away.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    board: Board,
    finished: bool,
}

impl Session {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Ok(Self::from_board(Board::new(config, seed)?))
    }

    /// Wraps a prepared board, settling it first if it is already won.
    pub fn from_board(mut board: Board) -> Self {
        let finished = board.is_finished();
        if finished && !board.is_lost() {
            board.game_over(None);
        }
        Self { board, finished }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(&self.board)
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        if self.finished {
            log::debug!("Ignoring {:?}, game already finished", command);
            return Ok(CommandOutcome::NoChange);
        }

        let outcome: CommandOutcome = match command {
            Command::Reveal(coords) => self.board.reveal(coords)?.into(),
            Command::Mark(coords) => self.board.toggle_flag(coords)?.into(),
        };

        self.finished = self.board.is_finished();
        if self.finished && !self.board.is_lost() {
            self.board.game_over(None);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_command_can_be_a_flag() {
        let mut session = Session::new(BoardConfig::default(), 11).unwrap();

        let outcome = session.apply(Command::Mark((0, 0))).unwrap();

        assert_eq!(outcome, CommandOutcome::Changed);
        assert!(!session.board().is_initialized());
        assert_eq!(session.status(), GameStatus::Ready);
    }

    #[test]
    fn first_reveal_places_mines_and_opens() {
        let mut session = Session::new(BoardConfig::default(), 5).unwrap();

        let outcome = session.apply(Command::Reveal((5, 5))).unwrap();

        assert!(matches!(outcome, CommandOutcome::Changed | CommandOutcome::Won));
        assert!(session.board().is_initialized());
        assert_eq!(session.board().cell_at((5, 5)).state(), CellState::Revealed(0));
    }

    #[test]
    fn win_applies_outcome_sweep() {
        // (2, 2) is a safe cell with no mine next to it
        let board = Board::with_mines((3, 3), &[(0, 0)]);
        let mut session = Session::from_board(board.unwrap());
        session.apply(Command::Mark((1, 2))).unwrap();

        session.apply(Command::Reveal((0, 1))).unwrap();
        session.apply(Command::Reveal((1, 0))).unwrap();
        let outcome = session.apply(Command::Reveal((1, 1))).unwrap();

        assert_eq!(outcome, CommandOutcome::Won);
        assert!(session.is_finished());
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.board().cell_at((2, 2)).state(), CellState::Revealed(0));
        assert_eq!(session.board().cell_at((0, 0)).state(), CellState::Mine);
        assert_eq!(session.board().cell_at((1, 2)).state(), CellState::CrossedMine);
    }

    #[test]
    fn win_sweep_shows_questioned_mines() {
        let board = Board::with_mines((3, 3), &[(0, 0)]).unwrap();
        let mut session = Session::from_board(board);
        session.apply(Command::Mark((0, 0))).unwrap();
        session.apply(Command::Mark((0, 0))).unwrap();
        assert_eq!(session.board().cell_at((0, 0)).state(), CellState::Questioned);

        let outcome = session.apply(Command::Reveal((2, 2))).unwrap();

        assert_eq!(outcome, CommandOutcome::Won);
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.board().cell_at((0, 0)).state(), CellState::Mine);
    }

    #[test]
    fn already_won_board_is_settled_on_wrap() {
        let board = Board::with_mines((1, 1), &[(0, 0)]).unwrap();
        assert!(board.is_finished());

        let session = Session::from_board(board);

        assert!(session.is_finished());
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.board().cell_at((0, 0)).state(), CellState::Mine);
    }

    #[test]
    fn commands_after_loss_are_ignored() {
        let board = Board::with_mines((2, 2), &[(0, 0)]).unwrap();
        let mut session = Session::from_board(board);

        assert_eq!(
            session.apply(Command::Reveal((0, 0))).unwrap(),
            CommandOutcome::Exploded
        );
        let before = session.snapshot();

        assert_eq!(
            session.apply(Command::Reveal((1, 1))).unwrap(),
            CommandOutcome::NoChange
        );
        assert_eq!(
            session.apply(Command::Mark((1, 1))).unwrap(),
            CommandOutcome::NoChange
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn invalid_coords_surface_as_errors() {
        let mut session = Session::new(BoardConfig::default(), 0).unwrap();
        assert_eq!(
            session.apply(Command::Reveal((10, 0))),
            Err(GameError::InvalidCoords)
        );
        assert!(!session.is_finished());
    }
}
