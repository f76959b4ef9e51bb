use anyhow::Context;
use clap::Parser;
use concentration_core::GameConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Match all pairs to win!", long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with game settings, flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// How many milliseconds a mismatched pair stays face up
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Comma separated symbols to deal, each one twice
    #[arg(long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Cards per row
    #[arg(long)]
    pub columns: Option<u16>,

    /// Print every snapshot as a JSON line instead of drawing the board
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Defaults, then the config file, then command line flags.
    pub fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.mismatch_delay_ms = delay_ms;
        }
        if let Some(symbols) = &self.symbols {
            config.alphabet = symbols.clone();
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Could not parse config file {}", path.display()))
}
