use std::time::Duration;

use super::schedule::{Generation, Job, JobId, Scheduler, Task};

pub const TICK: Duration = Duration::from_secs(1);

/// Whole seconds since the first reveal of a game.
///
/// Each tick is a one-shot job that books the next one. Only the tick whose
/// id the timer is waiting for counts, so a stopped timer stays stopped.
#[derive(Debug, Default)]
pub struct Timer {
    elapsed_secs: u32,
    pending: Option<JobId>,
}

impl Timer {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, generation: Generation) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(Self::book(scheduler, generation));
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    pub fn reset<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.stop(scheduler);
        self.elapsed_secs = 0;
    }

    /// Counts the tick `id` and books the next one. Returns the new total, or
    /// `None` if `id` is not the tick this timer is waiting for.
    pub fn tick<S: Scheduler + ?Sized>(
        &mut self,
        id: JobId,
        scheduler: &mut S,
        generation: Generation,
    ) -> Option<u32> {
        if self.pending != Some(id) {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        self.pending = Some(Self::book(scheduler, generation));
        Some(self.elapsed_secs)
    }

    fn book<S: Scheduler + ?Sized>(scheduler: &mut S, generation: Generation) -> JobId {
        scheduler.schedule(
            TICK,
            Job {
                generation,
                task: Task::Tick,
            },
        )
    }
}

/// `mm:ss` with both fields zero-padded. Minutes are not capped.
pub fn format_clock(elapsed_secs: u32) -> String {
    let mins = elapsed_secs / 60;
    let secs = elapsed_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ManualScheduler;

    fn run(timer: &mut Timer, scheduler: &mut ManualScheduler, until: Duration) -> Vec<u32> {
        let mut seen = Vec::new();
        while let Some((id, job)) = scheduler.pop_due(until) {
            if let Some(secs) = timer.tick(id, scheduler, job.generation) {
                seen.push(secs);
            }
        }
        seen
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(5999), "99:59");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn counts_once_per_second() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = Timer::default();
        timer.start(&mut scheduler, Generation::default());
        assert_eq!(run(&mut timer, &mut scheduler, Duration::from_millis(3500)), vec![1, 2, 3]);
        assert_eq!(timer.elapsed_secs(), 3);
    }

    #[test]
    fn start_twice_keeps_one_tick_chain() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = Timer::default();
        timer.start(&mut scheduler, Generation::default());
        timer.start(&mut scheduler, Generation::default());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn stop_halts_counting() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = Timer::default();
        timer.stop(&mut scheduler);

        timer.start(&mut scheduler, Generation::default());
        run(&mut timer, &mut scheduler, Duration::from_secs(2));
        timer.stop(&mut scheduler);
        assert!(!timer.is_running());
        assert!(run(&mut timer, &mut scheduler, Duration::from_secs(10)).is_empty());
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn foreign_tick_ids_are_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = Timer::default();
        timer.start(&mut scheduler, Generation::default());
        assert_eq!(
            timer.tick(JobId::new(4242), &mut scheduler, Generation::default()),
            None
        );
        assert_eq!(timer.elapsed_secs(), 0);
    }
}
