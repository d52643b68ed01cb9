//! The settings record contract.
//!
//! A settings record is a flat struct of scalar and enum-like fields.  Each
//! field is either *persisted* (written to and read from the backing
//! document) or *transient* (UI-only data such as option lists or button
//! descriptors that lives in memory only).
//!
//! The split is declared at compile time in two places that must agree:
//!
//! 1. Transient fields carry `#[serde(skip)]`, so they never appear in the
//!    serde representation and are filled from `Default` when a record is
//!    rebuilt from a document.
//! 2. [`SettingsRecord::PERSISTED_FIELDS`] lists the serialized names of the
//!    persisted fields, in the order they are written.  The projection only
//!    ever copies these keys, so a transient field that forgot its
//!    `#[serde(skip)]` still cannot leak into the document.
//!
//! # Example
//!
//! ```rust
//! use icons_store::SettingsRecord;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Overlay {
//!     icon_size: u32,
//!     show_icons: bool,
//!     #[serde(skip)]
//!     preview_label: String,
//! }
//!
//! impl Default for Overlay {
//!     fn default() -> Self {
//!         Self { icon_size: 10, show_icons: true, preview_label: String::new() }
//!     }
//! }
//!
//! impl SettingsRecord for Overlay {
//!     const PERSISTED_FIELDS: &'static [&'static str] = &["IconSize", "ShowIcons"];
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A value rejected by [`SettingsRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {field}: {reason}")]
pub struct ValidationError {
    /// Serialized name of the offending field.
    pub field: &'static str,
    /// Human-readable explanation.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A typed settings object that can be held by a
/// [`ConfigurationStore`](crate::ConfigurationStore).
pub trait SettingsRecord:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Serialized names of the persisted fields, in document order.
    const PERSISTED_FIELDS: &'static [&'static str];

    /// Checks a candidate value before it is saved.
    ///
    /// The default accepts everything.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is out of
    /// range.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_names_field_and_reason() {
        let err = ValidationError::new("IconSize", "must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "invalid value for IconSize: must be between 1 and 100"
        );
    }
}
