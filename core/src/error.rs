use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid board configuration")]
    InvalidConfig,
    #[error("Too many mines for the available cells")]
    TooManyMines,
    #[error("Mines have already been placed")]
    AlreadyPlaced,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
