//! Deferred execution. The session never sleeps; it asks a [`Scheduler`] to
//! hand a [`Job`] back later through [`GameSession::run_job`].
//!
//! [`GameSession::run_job`]: super::GameSession::run_job

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    pub fn new(raw: u64) -> Self {
        JobId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of one dealt board. Bumped on every new game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Match,
    Mismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Tick,
    Resolve(Outcome),
    AnnounceComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Job {
    pub generation: Generation,
    pub task: Task,
}

pub trait Scheduler {
    /// Arranges for `job` to come back after `delay`.
    fn schedule(&mut self, delay: Duration, job: Job) -> JobId;

    /// Drops a job that has not fired. Unknown or finished ids are ignored.
    fn cancel(&mut self, id: JobId);

    /// Told when `id` is being delivered, so its bookkeeping can go.
    fn fired(&mut self, _id: JobId) {}
}

/// Simulated clock. Time only moves when the owner says so.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, JobId), Job>,
    due_at: HashMap<JobId, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Removes the earliest job due no later than `until` and moves the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(JobId, Job)> {
        let (&(at, id), _) = self.queue.first_key_value()?;
        if at > until {
            return None;
        }
        let job = self.queue.remove(&(at, id))?;
        self.due_at.remove(&id);
        self.now = self.now.max(at);
        Some((id, job))
    }

    /// Moves the clock forward to `at`. Never moves it back.
    pub fn set_now(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, job: Job) -> JobId {
        let id = JobId(self.next_id);
        self.next_id += 1;
        let at = self.now + delay;
        self.queue.insert((at, id), job);
        self.due_at.insert(id, at);
        id
    }

    fn cancel(&mut self, id: JobId) {
        if let Some(at) = self.due_at.remove(&id) {
            self.queue.remove(&(at, id));
        }
    }
}
