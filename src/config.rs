//! Game settings, optionally read from `~/.config/concentration/config.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::game::{Deck, Timing};

const CONFIG_DIR: &str = ".config/concentration";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_SYMBOLS: [&str; 8] = ["🍎", "🍌", "🍇", "🍓", "🍒", "🍑", "🍉", "🍍"];
pub const DEFAULT_COLUMNS: usize = 4;
pub const MATCH_DELAY_MS: u64 = 500;
pub const MISMATCH_DELAY_MS: u64 = 1000;
pub const COMPLETION_DELAY_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub symbols: Vec<String>,
    pub columns: usize,
    pub match_delay_ms: u64,
    pub mismatch_delay_ms: u64,
    pub completion_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            columns: DEFAULT_COLUMNS,
            match_delay_ms: MATCH_DELAY_MS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            completion_delay_ms: COMPLETION_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Reads the user config if there is one. Anything unusable falls back to
    /// the defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                warn!(error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        let cards = self.deck()?.card_count();
        if self.columns > cards {
            return Err(ConfigError::TooManyColumns {
                columns: self.columns,
                cards,
            });
        }
        Ok(())
    }

    pub fn deck(&self) -> Result<Deck, ConfigError> {
        Deck::new(self.symbols.iter().cloned())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            match_delay: Duration::from_millis(self.match_delay_ms),
            mismatch_delay: Duration::from_millis(self.mismatch_delay_ms),
            completion_delay: Duration::from_millis(self.completion_delay_ms),
        }
    }

    /// Columns and rows for laying out `deck`. Columns are clamped to the
    /// card count so a fallback deck never gets an empty grid.
    pub fn grid_size(&self, deck: &Deck) -> (i32, i32) {
        let cards = deck.card_count();
        let columns = self.columns.clamp(1, cards.max(1));
        let rows = cards.div_ceil(columns);
        (
            i32::try_from(columns).unwrap_or(i32::MAX),
            i32::try_from(rows).unwrap_or(i32::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_fruit_board() {
        let config = GameConfig::default();
        let deck = config.deck().unwrap();
        assert_eq!(deck.pair_count(), 8);
        assert_eq!(config.grid_size(&deck), (4, 4));
        assert_eq!(config.timing(), Timing::default());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config =
            GameConfig::from_json(r#"{ "symbols": ["a", "b", "c"], "columns": 3 }"#, Path::new("c.json"))
                .unwrap();
        assert_eq!(config.symbols, vec!["a", "b", "c"]);
        assert_eq!(config.grid_size(&config.deck().unwrap()), (3, 2));
        assert_eq!(config.mismatch_delay_ms, MISMATCH_DELAY_MS);
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let err = GameConfig::from_json(r#"{ "symbols": ["a", "a"] }"#, Path::new("c.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSymbol(s) if s == "a"));
    }

    #[test]
    fn rejects_empty_deck_and_zero_columns() {
        let empty = GameConfig::from_json(r#"{ "symbols": [] }"#, Path::new("c.json"));
        assert!(matches!(empty, Err(ConfigError::EmptyDeck)));

        let no_columns = GameConfig::from_json(r#"{ "columns": 0 }"#, Path::new("c.json"));
        assert!(matches!(no_columns, Err(ConfigError::NoColumns)));
    }

    #[test]
    fn rejects_more_columns_than_cards() {
        let err = GameConfig::from_json(r#"{ "columns": 4294967296 }"#, Path::new("c.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooManyColumns { columns: 4294967296, cards: 16 }
        ));

        let err = GameConfig::from_json(
            r#"{ "symbols": ["a", "b"], "columns": 5 }"#,
            Path::new("c.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TooManyColumns { columns: 5, cards: 4 }));

        let exact = GameConfig::from_json(
            r#"{ "symbols": ["a", "b"], "columns": 4 }"#,
            Path::new("c.json"),
        );
        assert!(exact.is_ok());
    }

    #[test]
    fn grid_size_clamps_to_the_dealt_deck() {
        let config = GameConfig {
            columns: 2_147_483_648,
            ..GameConfig::default()
        };
        let (columns, rows) = config.grid_size(&Deck::default());
        assert_eq!((columns, rows), (16, 1));

        let uneven = GameConfig {
            columns: 5,
            ..GameConfig::default()
        };
        assert_eq!(uneven.grid_size(&Deck::default()), (5, 4));
    }

    #[test]
    fn malformed_json_reports_the_path() {
        let err = GameConfig::from_json("{ nope", Path::new("broken.json")).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::load_from(Path::new("/nonexistent/concentration.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
