//! Single-player concentration: find every pair on a shuffled board of
//! face-down cards.
//!
//! The [`game`] module holds the GUI-free engine. A front end drives it by
//! calling [`GameSession::select_card`] and [`GameSession::request_restart`],
//! receives notifications through [`GameObserver`], and supplies deferred
//! execution through a [`Scheduler`].

pub mod config;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use error::{ConfigError, InvariantViolation};
pub use game::{
    Board, Card, CardState, Deck, EventLog, GameEvent, GameObserver, GameResult, GameSession,
    ManualScheduler, Scheduler, Symbol, Timing,
};
