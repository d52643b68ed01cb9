//! Infrastructure layer for the options store.
//!
//! Contains the concrete collaborators a [`ConfigurationStore`] is wired
//! with: file system access, document serializers and log sinks.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by the `domain` layer.
//!
//! [`ConfigurationStore`]: crate::ConfigurationStore

pub mod fs;
pub mod log;
pub mod serializer;
