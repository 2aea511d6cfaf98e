use std::path::PathBuf;

use thiserror::Error;

use crate::game::Symbol;

/// Problems with the deck or the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("deck needs at least one symbol")]
    EmptyDeck,

    #[error("symbol {0} is listed more than once")]
    DuplicateSymbol(String),

    #[error("board needs at least one column")]
    NoColumns,

    #[error("{columns} columns is more than the {cards} cards on the board")]
    TooManyColumns { columns: usize, cards: usize },
}

/// A state the board transitions are supposed to make unreachable.
///
/// Seeing one of these means a defect in the engine, never bad player input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("board holds {actual} cards, expected {expected}")]
    CardCount { expected: usize, actual: usize },

    #[error("symbol {symbol} appears {count} times on the board")]
    UnpairedSymbol { symbol: Symbol, count: usize },

    #[error("card at index {index} records position {recorded}")]
    MisplacedCard { index: usize, recorded: usize },

    #[error("{revealed} cards are revealed but the turn holds {in_turn}")]
    StrayReveal { revealed: usize, in_turn: usize },

    #[error("board lock is {locked} while the turn holds {in_turn} cards")]
    LockMismatch { locked: bool, in_turn: usize },

    #[error("{cards} matched cards recorded as {pairs} pairs")]
    PairCount { cards: usize, pairs: usize },
}
