//! Scripted provider for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::{Accuracy, FixRequest, LocationError, LocationSource};
use crate::geo::Coordinates;

/// What one `get_fix` call does.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Fix(Coordinates),
    Fail(LocationError),
    /// Block until the request is cancelled.
    Hang,
}

/// Plays queued outcomes in order, then repeats the fallback outcome forever.
#[derive(Debug)]
pub struct ScriptedLocation {
    granted: AtomicBool,
    queue: Mutex<VecDeque<ScriptedOutcome>>,
    fallback: ScriptedOutcome,
    permission_requests: AtomicUsize,
    fix_requests: AtomicUsize,
}

impl ScriptedLocation {
    pub fn new(fallback: ScriptedOutcome) -> Self {
        Self {
            granted: AtomicBool::new(true),
            queue: Mutex::new(VecDeque::new()),
            fallback,
            permission_requests: AtomicUsize::new(0),
            fix_requests: AtomicUsize::new(0),
        }
    }

    pub fn returning(coordinates: Coordinates) -> Self {
        Self::new(ScriptedOutcome::Fix(coordinates))
    }

    pub fn failing(error: LocationError) -> Self {
        Self::new(ScriptedOutcome::Fail(error))
    }

    pub fn hanging() -> Self {
        Self::new(ScriptedOutcome::Hang)
    }

    /// A provider that refuses permission.
    pub fn denying() -> Self {
        let source = Self::failing(LocationError::Unavailable("not permitted".to_string()));
        source.set_permission(false);
        source
    }

    /// Queue an outcome to play before the fallback.
    pub fn then(self, outcome: ScriptedOutcome) -> Self {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(outcome);
        }
        self
    }

    pub fn set_permission(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn fix_requests(&self) -> usize {
        self.fix_requests.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> ScriptedOutcome {
        self.queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl LocationSource for ScriptedLocation {
    fn name(&self) -> &str {
        "scripted"
    }

    fn request_permission(&self, _accuracy: Accuracy) -> bool {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.granted.load(Ordering::SeqCst)
    }

    fn get_fix(&self, request: &FixRequest) -> Result<Coordinates, LocationError> {
        self.fix_requests.fetch_add(1, Ordering::SeqCst);
        match self.next_outcome() {
            ScriptedOutcome::Fix(coordinates) => Ok(coordinates),
            ScriptedOutcome::Fail(error) => Err(error),
            ScriptedOutcome::Hang => {
                while !request.cancel.is_cancelled() {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(LocationError::Timeout(Duration::ZERO))
            }
        }
    }
}
