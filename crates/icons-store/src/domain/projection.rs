//! Persisted projection of a settings record.
//!
//! [`project`] turns a record into a [`StoredDocument`] holding only the
//! fields listed in [`SettingsRecord::PERSISTED_FIELDS`].  [`restore`] goes
//! the other way: it overlays a document onto a base record, keeping the
//! base value for every key the document lacks and ignoring every key the
//! record does not persist.

use serde_json::Value;
use thiserror::Error;

use super::record::SettingsRecord;

/// The on-disk representation: persisted field name → primitive value,
/// in insertion order.
pub type StoredDocument = serde_json::Map<String, Value>;

/// Error converting between a record and its [`StoredDocument`].
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The record's serde representation is not a key/value mapping.
    #[error("settings record did not serialize to a key/value mapping")]
    NotAMapping,

    /// A name in `PERSISTED_FIELDS` is absent from the record's serde output,
    /// usually because the field is marked `#[serde(skip)]` by mistake.
    #[error("persisted field `{0}` is missing from the serialized record")]
    MissingField(&'static str),

    /// A stored value does not fit the field's type.
    #[error("stored value does not match the settings type: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Builds the persisted projection of `record`.
///
/// # Errors
///
/// Returns [`ProjectionError::NotAMapping`] or
/// [`ProjectionError::MissingField`] when the record type and its
/// `PERSISTED_FIELDS` schema disagree.
pub fn project<T: SettingsRecord>(record: &T) -> Result<StoredDocument, ProjectionError> {
    let Value::Object(mut fields) = serde_json::to_value(record)? else {
        return Err(ProjectionError::NotAMapping);
    };

    let mut document = StoredDocument::new();
    for &name in T::PERSISTED_FIELDS {
        let value = fields
            .remove(name)
            .ok_or(ProjectionError::MissingField(name))?;
        document.insert(name.to_owned(), value);
    }
    Ok(document)
}

/// Rebuilds a record from `document`, starting from the persisted fields of
/// `base`.
///
/// Keys missing from the document keep `base`'s value.  Unknown keys are
/// dropped.  Transient fields come back as their `Default` value.
///
/// # Errors
///
/// Returns [`ProjectionError::Shape`] when a stored value cannot be converted
/// to its field's type.
pub fn restore<T: SettingsRecord>(
    base: &T,
    document: StoredDocument,
) -> Result<T, ProjectionError> {
    let mut merged = project(base)?;
    for (key, value) in document {
        if let Some(slot) = merged.get_mut(&key) {
            *slot = value;
        }
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}
