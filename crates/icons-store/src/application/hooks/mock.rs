//! Recording hook for unit testing.
//!
//! [`RecordingHook`] implements both hook traits, remembers every value it
//! was shown, and returns a configurable [`SaveDecision`].

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{PostSaveHook, PreSaveHook, SaveDecision};

/// A hook that records candidates and saved values.
pub struct RecordingHook<T> {
    cancel: AtomicBool,
    candidates: Mutex<Vec<T>>,
    saved: Mutex<Vec<T>>,
}

impl<T: Clone> RecordingHook<T> {
    /// A hook that lets every save proceed.
    pub fn new() -> Self {
        Self {
            cancel: AtomicBool::new(false),
            candidates: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// A hook that cancels every save.
    pub fn cancelling() -> Self {
        let hook = Self::new();
        hook.set_cancel(true);
        hook
    }

    pub fn set_cancel(&self, cancel: bool) {
        self.cancel.store(cancel, Ordering::SeqCst);
    }

    /// Values passed to `before_save`, oldest first.
    pub fn candidates(&self) -> Vec<T> {
        self.candidates.lock().clone()
    }

    /// Values passed to `after_save`, oldest first.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().clone()
    }
}

impl<T: Clone> Default for RecordingHook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> PreSaveHook<T> for RecordingHook<T> {
    fn before_save(&self, candidate: &T) -> SaveDecision {
        self.candidates.lock().push(candidate.clone());
        if self.cancel.load(Ordering::SeqCst) {
            SaveDecision::Cancel
        } else {
            SaveDecision::Proceed
        }
    }
}

impl<T: Clone + Send + Sync> PostSaveHook<T> for RecordingHook<T> {
    fn after_save(&self, saved: &T) {
        self.saved.lock().push(saved.clone());
    }
}
