use sapper_core::{Command, Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    NewGame,
    Quit,
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command {0:?}, expected `r <row> <col>`, `f <row> <col>`, `n` or `q`")]
    UnknownCommand(String),
    #[error("Expected two coordinates: <row> <col>")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    BadCoord(String),
    #[error("Unexpected trailing input {0:?}")]
    Trailing(String),
}

/// Parses one line typed by the player.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Empty);
    };

    let command: fn(Coord2) -> Command = match verb.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "n" | "new" | "restart" => return Ok(Input::NewGame),
        "r" | "reveal" | "o" | "open" => Command::Reveal,
        "f" | "flag" | "m" | "mark" => Command::Mark,
        _ => return Err(InputError::UnknownCommand(verb.to_string())),
    };

    let row = parse_coord(words.next())?;
    let col = parse_coord(words.next())?;
    if let Some(extra) = words.next() {
        return Err(InputError::Trailing(extra.to_string()));
    }

    Ok(Input::Command(command((row, col))))
}

fn parse_coord(word: Option<&str>) -> Result<Coord, InputError> {
    let word = word.ok_or(InputError::MissingCoords)?;
    word.parse()
        .map_err(|_| InputError::BadCoord(word.to_string()))
}
