//! Domain types for the options store.
//!
//! Nothing in this module touches the file system or takes a lock.  It
//! describes what a settings record is, which of its fields are durable, and
//! how a record maps onto the flat document that ends up on disk.

/// Log entry model and the [`log::LogSink`] seam.
pub mod log;
/// Persisted projection: record ⇄ [`projection::StoredDocument`].
pub mod projection;
/// The [`record::SettingsRecord`] trait implemented by every options type.
pub mod record;
