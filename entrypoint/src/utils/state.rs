use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Process-wide guard against overlapping scrape runs. Both the manual
/// trigger and the scheduler go through here; a refused start is not
/// queued, callers poll status and try again later.
#[derive(Debug)]
pub struct RunCoordinator {
    state: Mutex<RunState>,
}

impl Default for RunCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RunCoordinator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RunState::Idle),
        }
    }

    /// Atomically move Idle -> Running. Returns false when a run is
    /// already in flight.
    pub fn try_begin(&self) -> bool {
        let mut state = self.state.lock().expect("Run state lock poisoned");

        if *state == RunState::Running {
            return false;
        }

        *state = RunState::Running;

        true
    }

    pub fn finish(&self) {
        *self.state.lock().expect("Run state lock poisoned") = RunState::Idle;
    }

    pub fn is_running(&self) -> bool {
        *self.state.lock().expect("Run state lock poisoned") == RunState::Running
    }
}
