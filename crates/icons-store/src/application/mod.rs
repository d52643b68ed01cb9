//! Application layer: the store and its save hooks.
//!
//! # Sub-modules
//!
//! - **`store`** – [`store::ConfigurationStore`], the lazily loaded, lock
//!   protected owner of one settings record and its backing document.
//!
//! - **`hooks`** – [`hooks::PreSaveHook`] and [`hooks::PostSaveHook`], the
//!   synchronous callbacks run around every save.  A pre-save hook may veto
//!   the save.
//!
//! Like the rest of this layer, the store depends on the collaborator
//! traits (`OptionsFileSystem`, `DocumentSerializer`, `LogSink`), never on a
//! concrete implementation.

pub mod hooks;
pub mod store;
