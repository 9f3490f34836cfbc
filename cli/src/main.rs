use anyhow::{Context, Result};
use clap::Parser;
use sapper_core::Session;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use input::Input;

mod config;
mod input;
mod render;

/// Minesweeper in the terminal: `r <row> <col>` reveals, `f <row> <col>` cycles a flag,
/// `n` starts a new game, `q` quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with `width`, `height` and `difficulty`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u8>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u8>,

    /// Mine density multiplier, roughly one mine per 9/difficulty cells
    #[arg(short, long)]
    difficulty: Option<u8>,

    /// Print a JSON snapshot per turn instead of the text board
    #[arg(long)]
    json: bool,
}

fn init_logging(level: log::Level) {
    use tracing_subscriber::filter::LevelFilter;

    let filter = match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        init_logging(log_level);
    }

    let overrides = config::Overrides {
        width: args.width,
        height: args.height,
        difficulty: args.difficulty,
    };
    let config = config::load(args.config.as_deref(), overrides)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} board with {} mines, seed {}",
        config.width,
        config.height,
        config.mine_count(),
        seed
    );

    let mut session = Session::new(config, seed)?;
    let mut out = io::stdout().lock();
    render::render(&mut out, &session.snapshot(), args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read command")?;
        let command = match input::parse_line(&line) {
            Ok(Input::Command(command)) => command,
            Ok(Input::Empty) => continue,
            Ok(Input::Quit) => break,
            Ok(Input::NewGame) => {
                let seed = rand::random();
                log::info!("New game, seed {}", seed);
                session = Session::new(config, seed)?;
                render::render(&mut out, &session.snapshot(), args.json)?;
                continue;
            }
            Err(err) => {
                log::warn!("{}", err);
                continue;
            }
        };

        match session.apply(command) {
            Ok(outcome) => log::debug!("{:?} -> {:?}", command, outcome),
            Err(err) => {
                log::warn!("{:?} rejected: {}", command, err);
                continue;
            }
        }

        render::render(&mut out, &session.snapshot(), args.json)?;
        if session.is_finished() && !args.json {
            writeln!(out, "`n` for a new game, `q` to quit")?;
        }
    }

    Ok(())
}
