//! Save hooks.
//!
//! Hooks are passed to the store at construction time, not subscribed to
//! later, so the set of observers that can veto a save is fixed and visible
//! wherever the store is built.
//!
//! Both hook kinds run synchronously on the thread that called
//! `set_options`:
//!
//! - [`PreSaveHook::before_save`] runs before the store lock is taken.  It
//!   may call back into the store (`get_options`, `reload_options`) without
//!   deadlocking.  Returning [`SaveDecision::Cancel`] aborts the save; later
//!   pre-save hooks are not consulted.
//! - [`PostSaveHook::after_save`] runs after the lock is released, with the
//!   value that was just written.
//!
//! Closures implement both traits, so simple hooks need no named type:
//!
//! ```rust
//! use std::sync::Arc;
//! use icons_store::{PreSaveHook, SaveDecision};
//!
//! let veto_empty: Arc<dyn PreSaveHook<String>> =
//!     Arc::new(|candidate: &String| {
//!         if candidate.is_empty() { SaveDecision::Cancel } else { SaveDecision::Proceed }
//!     });
//! assert_eq!(veto_empty.before_save(&String::new()), SaveDecision::Cancel);
//! ```

pub mod mock;

/// Verdict returned by a [`PreSaveHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveDecision {
    #[default]
    Proceed,
    Cancel,
}

impl SaveDecision {
    pub fn is_cancel(self) -> bool {
        self == SaveDecision::Cancel
    }
}

/// Runs before a save; may veto it.
pub trait PreSaveHook<T>: Send + Sync {
    fn before_save(&self, candidate: &T) -> SaveDecision;
}

/// Runs after a successful save.
pub trait PostSaveHook<T>: Send + Sync {
    fn after_save(&self, saved: &T);
}

impl<T, F> PreSaveHook<T> for F
where
    F: Fn(&T) -> SaveDecision + Send + Sync,
{
    fn before_save(&self, candidate: &T) -> SaveDecision {
        self(candidate)
    }
}

impl<T, F> PostSaveHook<T> for F
where
    F: Fn(&T) + Send + Sync,
{
    fn after_save(&self, saved: &T) {
        self(saved)
    }
}
