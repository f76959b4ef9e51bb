use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::*;

pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_COLUMNS: u16 = 4;

/// Settings consumed when an engine is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Distinct symbols, each dealt twice
    pub alphabet: Vec<String>,
    /// How long a mismatched pair stays face up
    pub mismatch_delay_ms: u64,
    /// Fixed seed for reproducible boards, entropy when absent
    pub seed: Option<u64>,
    /// Width of the board when rendered as a grid
    pub columns: u16,
}

impl GameConfig {
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn validate(&self) -> Result<Alphabet> {
        if self.columns == 0 {
            return Err(GameError::InvalidColumns);
        }
        Alphabet::new(self.alphabet.iter().cloned())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_SYMBOLS.iter().map(|&s| s.to_owned()).collect(),
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            seed: None,
            columns: DEFAULT_COLUMNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: GameConfig = toml::from_str("seed = 7").unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mismatch_delay(), Duration::from_secs(1));
        assert_eq!(config.columns, 4);
        assert_eq!(config.validate(), Ok(Alphabet::default()));
    }

    #[test]
    fn parses_full_config() {
        let config: GameConfig = toml::from_str(
            r#"
            alphabet = ["A", "B"]
            mismatch_delay_ms = 250
            columns = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.mismatch_delay(), Duration::from_millis(250));
        assert_eq!(config.seed, None);
        assert_eq!(config.validate().unwrap().len(), 2);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<GameConfig>("delay = 5").is_err());
    }

    #[test]
    fn validate_reports_bad_settings() {
        let zero_columns = GameConfig {
            columns: 0,
            ..Default::default()
        };
        let duplicates = GameConfig {
            alphabet: vec!["A".into(), "A".into()],
            ..Default::default()
        };

        assert_eq!(zero_columns.validate(), Err(GameError::InvalidColumns));
        assert_eq!(
            duplicates.validate(),
            Err(GameError::DuplicateSymbol("A".into()))
        );
    }
}
