//! The game engine: board, turn rules, timer and the seams a front end
//! plugs into.

pub mod board;
pub mod observer;
pub mod schedule;
pub mod session;
pub mod shuffle;
pub mod timer;

pub use board::{Board, Card, CardState, Deck, Symbol};
pub use observer::{EventLog, GameEvent, GameObserver};
pub use schedule::{Generation, Job, JobId, ManualScheduler, Outcome, Scheduler, Task};
pub use session::{GameResult, GameSession, Timing};
pub use timer::{Timer, format_clock};
