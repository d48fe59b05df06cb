use super::models::UploadTracker;
use panelsync_models::UploadState;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

impl UploadTracker {
    pub fn new(tasks: usize) -> Self {
        Self {
            states: Mutex::new(vec![UploadState::Pending; tasks]),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Pending -> InFlight
    pub fn start(&self, task: usize) {
        {
            let mut states = self.states.lock();
            debug_assert_eq!(states[task], UploadState::Pending);
            states[task] = UploadState::InFlight;
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    /// InFlight -> Succeeded | Failed
    pub fn finish(&self, task: usize, succeeded: bool) {
        {
            let mut states = self.states.lock();
            debug_assert_eq!(states[task], UploadState::InFlight);
            states[task] = if succeeded {
                UploadState::Succeeded
            } else {
                UploadState::Failed
            };
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn state(&self, task: usize) -> Option<UploadState> {
        self.states.lock().get(task).copied()
    }

    pub fn count(&self, state: UploadState) -> usize {
        self.states.lock().iter().filter(|s| **s == state).count()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn all_terminal(&self) -> bool {
        self.states.lock().iter().all(|s| s.is_terminal())
    }
}
