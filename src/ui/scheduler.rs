use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use concentration::game::{GameSession, Job, JobId, Scheduler};

use super::state::UiState;

pub type SharedSession = Rc<RefCell<GameSession<GlibScheduler, UiState>>>;
type WeakSession = Weak<RefCell<GameSession<GlibScheduler, UiState>>>;

/// Runs session jobs from the GLib main loop.
///
/// Holds a weak handle back to the session that owns it, so a closed window
/// lets pending timeouts lapse.
pub struct GlibScheduler {
    session: WeakSession,
    next_id: u64,
    sources: HashMap<JobId, glib::SourceId>,
}

impl GlibScheduler {
    pub fn new(session: WeakSession) -> Self {
        GlibScheduler {
            session,
            next_id: 0,
            sources: HashMap::new(),
        }
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&mut self, delay: Duration, job: Job) -> JobId {
        let id = JobId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let session = self.session.clone();
        let source = glib::timeout_add_local_once(delay, move || {
            if let Some(session) = session.upgrade() {
                session.borrow_mut().run_job(id, job);
            }
        });
        self.sources.insert(id, source);
        id
    }

    fn cancel(&mut self, id: JobId) {
        if let Some(source) = self.sources.remove(&id) {
            source.remove();
        }
    }

    fn fired(&mut self, id: JobId) {
        // A one-shot source is gone once its callback runs; removing it again
        // would be an error.
        self.sources.remove(&id);
    }
}
