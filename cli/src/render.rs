use anyhow::Result;
use sapper_core::{GameStatus, Snapshot};
use std::io::Write;

/// Draws the board as text, or as one JSON line when `json` is set.
pub fn render(out: &mut impl Write, snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{}  mines left: {}",
            snapshot.status.face(),
            snapshot.mines_left
        )?;
        write!(out, "{snapshot}")?;
        match snapshot.status {
            GameStatus::Won => writeln!(out, "Cleared!")?,
            GameStatus::Lost => writeln!(out, "Boom.")?,
            GameStatus::Ready | GameStatus::InProgress => {}
        }
    }
    out.flush()?;
    Ok(())
}
