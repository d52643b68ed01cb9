//! `KEY=VALUE` editing of a settings record.
//!
//! Used by the host CLI's `set` command.  Assignments are applied to the
//! record's persisted projection, so only persisted fields can be edited and
//! the value type is taken from the field's current JSON value:
//!
//! - booleans accept `true` / `false`
//! - numbers accept a signed integer
//! - strings (and `null` fields, e.g. an unset folder) take the text as-is
//! - an empty value clears an optional field and empties any other string
//!
//! Keys match case-insensitively against the persisted field names.

use serde_json::Value;
use thiserror::Error;

use icons_store::domain::projection::{project, restore, StoredDocument};
use icons_store::{ProjectionError, SettingsRecord};

/// Error applying an assignment.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("expected KEY=VALUE, got `{0}`")]
    Syntax(String),

    #[error("unknown option `{key}`; known options: {known}")]
    UnknownKey { key: String, known: String },

    #[error("option `{key}` expects {expected}, got `{value}`")]
    Type {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// One parsed `KEY=VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for Assignment {
    type Err = EditError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self {
                key: key.trim().to_string(),
                value: value.to_string(),
            }),
            _ => Err(EditError::Syntax(text.to_string())),
        }
    }
}

fn canonical_key<T: SettingsRecord>(key: &str) -> Result<&'static str, EditError> {
    T::PERSISTED_FIELDS
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(key))
        .ok_or_else(|| EditError::UnknownKey {
            key: key.to_string(),
            known: T::PERSISTED_FIELDS.join(", "),
        })
}

fn convert(key: &'static str, current: &Value, raw: &str) -> Result<Value, EditError> {
    let mismatch = |expected| EditError::Type {
        key,
        expected,
        value: raw.to_string(),
    };
    match current {
        Value::Bool(_) => raw
            .trim()
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| mismatch("true or false")),
        Value::Number(_) => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| mismatch("an integer")),
        _ => Ok(Value::String(raw.to_string())),
    }
}

/// Value for an emptied string field: `null` when the record accepts it
/// there, otherwise `""`.
fn cleared<T: SettingsRecord>(current: &T, document: &StoredDocument, key: &str) -> Value {
    let mut trial = document.clone();
    trial.insert(key.to_string(), Value::Null);
    match restore(current, trial) {
        Ok(_) => Value::Null,
        Err(_) => Value::String(String::new()),
    }
}

/// Returns a copy of `current` with every assignment applied in order.
///
/// Nothing is changed if any assignment fails.  Enum-valued fields are
/// checked when the edited document is turned back into a record, so an
/// unknown variant surfaces as [`EditError::Projection`].
pub fn apply_assignments<T: SettingsRecord>(
    current: &T,
    assignments: &[Assignment],
) -> Result<T, EditError> {
    let mut document = project(current)?;
    for assignment in assignments {
        let key = canonical_key::<T>(&assignment.key)?;
        let existing = document.get(key).cloned().unwrap_or(Value::Null);
        let value = match &existing {
            Value::String(_) | Value::Null if assignment.value.is_empty() => {
                cleared(current, &document, key)
            }
            _ => convert(key, &existing, &assignment.value)?,
        };
        document.insert(key.to_string(), value);
    }
    Ok(restore(current, document)?)
}
