use anyhow::{Context, Result};
use sapper_core::{BoardConfig, Coord};
use std::{fs, path::Path};

/// Values given on the command line, they win over the config file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub difficulty: Option<u8>,
}

impl Overrides {
    fn apply(self, config: BoardConfig) -> BoardConfig {
        BoardConfig {
            width: self.width.unwrap_or(config.width),
            height: self.height.unwrap_or(config.height),
            difficulty: self.difficulty.unwrap_or(config.difficulty),
        }
    }
}

pub fn parse(text: &str) -> Result<BoardConfig> {
    Ok(toml::from_str(text)?)
}

pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<BoardConfig> {
    let base = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => BoardConfig::default(),
    };

    let config = overrides.apply(base);
    log::debug!("board config: {:?}", config);

    config.validate().with_context(|| {
        format!(
            "Cannot play a {}x{} board at difficulty {}",
            config.width, config.height, config.difficulty
        )
    })
}
