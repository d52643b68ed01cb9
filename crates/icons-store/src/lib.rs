//! # icons-store
//!
//! A generic, thread-safe options store.  One [`ConfigurationStore`] owns one
//! typed settings record: it loads the record lazily from a JSON (or TOML)
//! document, writes back only the fields the record declares as persisted,
//! and lets observers veto a save before it happens.
//!
//! # Architecture overview
//!
//! The crate follows the same three layers as the rest of the workspace:
//!
//! - **`domain`** – The [`SettingsRecord`] trait, the persisted projection
//!   that turns a record into a [`StoredDocument`] and back, and the log
//!   entry model.  No file system, no locks.
//!
//! - **`application`** – [`ConfigurationStore`] itself plus the save hook
//!   traits.  Depends only on the collaborator traits below.
//!
//! - **`infrastructure`** – Concrete collaborators: the local file system
//!   with atomic writes, the JSON and TOML document serializers, and the log
//!   sinks (tracing forwarder, in-memory transcript, fan-out).
//!
//! ```text
//! caller ──► set_options(v)
//!              ├─ PreSaveHook::before_save   (no lock held)
//!              ├─ lock ─ project ─ serialize ─ write_atomic ─ cache = v ─ unlock
//!              └─ PostSaveHook::after_save   (no lock held)
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::hooks::{PostSaveHook, PreSaveHook, SaveDecision};
pub use application::store::{
    ConfigurationStore, ConfigurationStoreBuilder, LoadBase, SaveOutcome, StoreError,
    StoreOptions,
};
pub use domain::log::{LogEntry, LogLevel, LogSink};
pub use domain::record::{SettingsRecord, ValidationError};
pub use domain::projection::{ProjectionError, StoredDocument};
pub use infrastructure::fs::{LocalFileSystem, OptionsFileSystem};
pub use infrastructure::log::{FanOutSink, MemorySink, TracingSink};
pub use infrastructure::serializer::{
    DocumentSerializer, JsonDocumentSerializer, SerializerError, TomlDocumentSerializer,
};
