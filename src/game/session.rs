use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, trace, warn};

use super::board::{Board, CardState, Deck};
use super::observer::GameObserver;
use super::schedule::{Generation, Job, JobId, ManualScheduler, Outcome, Scheduler, Task};
use super::timer::Timer;
use crate::config::{COMPLETION_DELAY_MS, MATCH_DELAY_MS, MISMATCH_DELAY_MS};
use crate::error::InvariantViolation;

/// Pauses that let the player see a resolved turn before it changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub match_delay: Duration,
    /// Longer than `match_delay` so a wrong pair can be memorized.
    pub mismatch_delay: Duration,
    pub completion_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            match_delay: Duration::from_millis(MATCH_DELAY_MS),
            mismatch_delay: Duration::from_millis(MISMATCH_DELAY_MS),
            completion_delay: Duration::from_millis(COMPLETION_DELAY_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub elapsed_secs: u32,
    pub attempts: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Empty,
    One(usize),
    Two(usize, usize),
}

impl Turn {
    fn len(self) -> usize {
        match self {
            Turn::Empty => 0,
            Turn::One(_) => 1,
            Turn::Two(..) => 2,
        }
    }
}

/// One player's game: the board, the turn in progress and the counters.
///
/// Everything runs on the caller's thread. Deferred work (resolution delays,
/// timer ticks) goes through `S` and comes back via [`GameSession::run_job`].
pub struct GameSession<S: Scheduler, O: GameObserver> {
    deck: Deck,
    timing: Timing,
    rng: StdRng,
    scheduler: S,
    observer: O,
    board: Board,
    turn: Turn,
    attempts: u32,
    matched_pairs: usize,
    timer: Timer,
    generation: Generation,
    started: bool,
    result: Option<GameResult>,
    pending: Vec<JobId>,
}

impl<S: Scheduler, O: GameObserver> GameSession<S, O> {
    pub fn new(deck: Deck, timing: Timing, scheduler: S, observer: O) -> Self {
        Self::with_rng(deck, timing, scheduler, observer, StdRng::from_os_rng())
    }

    /// Deals a first board from `rng`. Seeded rngs give reproducible games.
    pub fn with_rng(deck: Deck, timing: Timing, scheduler: S, observer: O, rng: StdRng) -> Self {
        let mut session = GameSession {
            deck,
            timing,
            rng,
            scheduler,
            observer,
            board: Board::default(),
            turn: Turn::Empty,
            attempts: 0,
            matched_pairs: 0,
            timer: Timer::default(),
            generation: Generation::default(),
            started: false,
            result: None,
            pending: Vec::new(),
        };
        session.init_game();
        session
    }

    /// Throws away the current game and deals a fresh board.
    pub fn init_game(&mut self) {
        for id in self.pending.drain(..) {
            self.scheduler.cancel(id);
        }
        self.timer.reset(&mut self.scheduler);
        self.generation = self.generation.next();
        self.turn = Turn::Empty;
        self.attempts = 0;
        self.matched_pairs = 0;
        self.started = false;
        self.result = None;
        self.board = Board::shuffled(&self.deck, &mut self.rng);
        debug!(generation = ?self.generation, pairs = self.deck.pair_count(), "dealt new board");

        self.observer.on_reset(self.board.cards());
        self.observer.on_attempts_changed(0);
        self.observer.on_pairs_changed(0, self.deck.pair_count());
        self.observer.on_time_changed(0);
    }

    pub fn request_restart(&mut self) {
        info!(attempts = self.attempts, "restarting game");
        self.init_game();
    }

    /// Player input. Anything that cannot be acted on is silently ignored.
    pub fn select_card(&mut self, position: usize) {
        if self.board.is_locked() || self.result.is_some() {
            trace!(position, "input ignored while resolving");
            return;
        }
        match self.board.card(position) {
            Some(card) if card.state() == CardState::Hidden => {}
            _ => {
                trace!(position, "input ignored on unavailable card");
                return;
            }
        }

        if !self.started {
            self.started = true;
            self.timer.start(&mut self.scheduler, self.generation);
        }

        let Some(symbol) = self.board.reveal(position) else {
            return;
        };
        self.observer.on_card_revealed(position, &symbol);

        self.turn = match self.turn {
            Turn::Empty => Turn::One(position),
            Turn::One(first) => Turn::Two(first, position),
            Turn::Two(a, b) => {
                error!(a, b, position, "turn already holds two cards");
                return;
            }
        };
        if let Turn::Two(a, b) = self.turn {
            self.begin_resolution(a, b);
        }
    }

    fn begin_resolution(&mut self, a: usize, b: usize) {
        self.board.lock();
        self.attempts += 1;
        self.observer.on_attempts_changed(self.attempts);

        let same = match (self.board.card(a), self.board.card(b)) {
            (Some(first), Some(second)) => first.symbol() == second.symbol(),
            _ => false,
        };
        let (outcome, delay) = if same {
            (Outcome::Match, self.timing.match_delay)
        } else {
            (Outcome::Mismatch, self.timing.mismatch_delay)
        };
        debug!(a, b, ?outcome, attempts = self.attempts, "turn complete");
        self.defer(delay, Task::Resolve(outcome));
    }

    /// Delivery point for every job handed to the scheduler.
    pub fn run_job(&mut self, id: JobId, job: Job) {
        self.scheduler.fired(id);
        self.pending.retain(|pending| *pending != id);
        if job.generation != self.generation {
            debug!(?job, "dropping job from an earlier game");
            return;
        }

        match job.task {
            Task::Tick => {
                if let Some(secs) = self.timer.tick(id, &mut self.scheduler, self.generation) {
                    self.observer.on_time_changed(secs);
                }
            }
            Task::Resolve(outcome) => self.resolve_turn(outcome),
            Task::AnnounceComplete => self.announce_complete(),
        }
    }

    fn resolve_turn(&mut self, outcome: Outcome) {
        let Turn::Two(a, b) = self.turn else {
            warn!(turn = ?self.turn, "resolution without a full turn");
            return;
        };

        match outcome {
            Outcome::Match => {
                self.board.resolve_match(a, b);
                self.matched_pairs += 1;
                self.observer.on_cards_matched([a, b]);
                self.observer
                    .on_pairs_changed(self.matched_pairs, self.deck.pair_count());
            }
            Outcome::Mismatch => {
                self.board.resolve_mismatch(a, b);
                self.observer.on_cards_hidden_again([a, b]);
            }
        }
        self.turn = Turn::Empty;
        self.board.unlock();

        if let Err(err) = self.verify() {
            error!(error = %err, "game state invariant violated");
        }

        if self.matched_pairs == self.deck.pair_count() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        self.timer.stop(&mut self.scheduler);
        let result = GameResult {
            elapsed_secs: self.timer.elapsed_secs(),
            attempts: self.attempts,
        };
        info!(elapsed_secs = result.elapsed_secs, attempts = result.attempts, "board cleared");
        self.result = Some(result);
        self.defer(self.timing.completion_delay, Task::AnnounceComplete);
    }

    fn announce_complete(&mut self) {
        if let Some(result) = self.result {
            self.observer
                .on_game_complete(result.elapsed_secs, result.attempts);
        }
    }

    fn defer(&mut self, delay: Duration, task: Task) {
        let job = Job {
            generation: self.generation,
            task,
        };
        let id = self.scheduler.schedule(delay, job);
        self.pending.push(id);
    }

    /// Cross-checks the board, the turn and the counters.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        self.board.verify(&self.deck)?;

        let in_turn = self.turn.len();
        let revealed = self.board.count(CardState::Revealed);
        if revealed != in_turn {
            return Err(InvariantViolation::StrayReveal { revealed, in_turn });
        }
        let locked = self.board.is_locked();
        if locked != (in_turn == 2) {
            return Err(InvariantViolation::LockMismatch { locked, in_turn });
        }
        let cards = self.board.count(CardState::Matched);
        if cards != self.matched_pairs * 2 {
            return Err(InvariantViolation::PairCount {
                cards,
                pairs: self.matched_pairs,
            });
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> usize {
        self.deck.pair_count()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_locked(&self) -> bool {
        self.board.is_locked()
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<O: GameObserver> GameSession<ManualScheduler, O> {
    /// Moves simulated time forward, running every job that falls due on the
    /// way in time order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some((id, job)) = self.scheduler.pop_due(until) {
            self.run_job(id, job);
        }
        self.scheduler.set_now(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EventLog, GameEvent, Symbol};

    type TestSession = GameSession<ManualScheduler, EventLog>;

    fn session() -> TestSession {
        let deck = Deck::new(["a", "b", "c"]).unwrap();
        GameSession::with_rng(
            deck,
            Timing::default(),
            ManualScheduler::new(),
            EventLog::new(),
            StdRng::seed_from_u64(11),
        )
    }

    fn positions_of(session: &TestSession, symbol: &str) -> (usize, usize) {
        let found: Vec<usize> = session
            .board()
            .cards()
            .iter()
            .filter(|card| card.symbol() == &Symbol::from(symbol))
            .map(|card| card.position())
            .collect();
        (found[0], found[1])
    }

    #[test]
    fn turn_len_never_exceeds_two() {
        assert_eq!(Turn::Empty.len(), 0);
        assert_eq!(Turn::One(3).len(), 1);
        assert_eq!(Turn::Two(1, 2).len(), 2);
    }

    #[test]
    fn new_session_is_idle() {
        let session = session();
        assert_eq!(session.board().len(), 6);
        assert_eq!(session.attempts(), 0);
        assert!(!session.is_timer_running());
        assert!(!session.is_locked());
        assert_eq!(session.verify(), Ok(()));
        assert_eq!(session.scheduler().pending(), 0);
    }

    #[test]
    fn single_reveal_holds_turn_open() {
        let mut session = session();
        session.select_card(0);
        assert_eq!(session.attempts(), 0);
        assert!(!session.is_locked());
        assert!(session.is_timer_running());
        assert_eq!(session.verify(), Ok(()));
    }

    #[test]
    fn second_reveal_locks_until_resolved() {
        let mut session = session();
        let (a, _) = positions_of(&session, "a");
        let (b, _) = positions_of(&session, "b");
        session.select_card(a);
        session.select_card(b);
        assert!(session.is_locked());
        assert_eq!(session.verify(), Ok(()));

        session.advance(Duration::from_millis(999));
        assert!(session.is_locked());
        session.advance(Duration::from_millis(1));
        assert!(!session.is_locked());
        assert_eq!(session.board().count(CardState::Hidden), 6);
    }

    #[test]
    fn stale_job_is_dropped() {
        let mut session = session();
        let (a, _) = positions_of(&session, "a");
        let (b, _) = positions_of(&session, "b");
        session.select_card(a);
        session.select_card(b);
        let stale = Job {
            generation: session.generation(),
            task: Task::Resolve(Outcome::Mismatch),
        };

        session.request_restart();
        session.observer_mut().take();
        session.run_job(JobId::new(u64::MAX), stale);

        assert!(session.observer().events().is_empty());
        assert_eq!(session.board().count(CardState::Hidden), 6);
        assert_eq!(session.verify(), Ok(()));
    }

    #[test]
    fn restart_cancels_pending_work() {
        let mut session = session();
        let (a, b) = positions_of(&session, "a");
        session.select_card(a);
        session.select_card(b);
        assert_eq!(session.scheduler().pending(), 2);

        session.request_restart();
        assert_eq!(session.scheduler().pending(), 0);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn completion_reports_captured_result() {
        let mut session = session();
        for symbol in ["a", "b", "c"] {
            let (x, y) = positions_of(&session, symbol);
            session.select_card(x);
            session.select_card(y);
            session.advance(Duration::from_millis(500));
        }
        assert!(session.is_complete());
        assert!(!session.is_timer_running());
        let result = session.result().unwrap();
        assert_eq!(result.attempts, 3);

        session.advance(Duration::from_millis(500));
        let events = session.observer().events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameComplete {
                elapsed_secs: result.elapsed_secs,
                attempts: 3
            })
        );
    }
}
