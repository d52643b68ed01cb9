//! Document serializers.
//!
//! A [`DocumentSerializer`] converts between raw file bytes and a
//! [`StoredDocument`].  It knows nothing about settings records; the typed
//! step happens in [`crate::domain::projection`].
//!
//! Two formats are provided:
//!
//! - [`JsonDocumentSerializer`] – the default.  Indented JSON, keys in
//!   document order, trailing newline.
//! - [`TomlDocumentSerializer`] – a flat TOML table.  TOML has no null, so
//!   null-valued entries are omitted on write and fall back to the base value
//!   on the next load.

use serde_json::Value;
use thiserror::Error;

use crate::domain::projection::StoredDocument;

/// Error parsing or rendering a document.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid TOML document: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to render TOML document: {0}")]
    TomlRender(#[from] toml::ser::Error),
}

/// Structured, human-readable document format.
pub trait DocumentSerializer: Send + Sync {
    /// File extension without the dot, e.g. `"json"`.
    fn file_extension(&self) -> &'static str;

    /// Parses a document into an ordered key/value mapping.
    fn parse(&self, bytes: &[u8]) -> Result<StoredDocument, SerializerError>;

    /// Renders a mapping as an indented document.
    fn render(&self, document: &StoredDocument) -> Result<Vec<u8>, SerializerError>;
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Indented JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentSerializer;

impl DocumentSerializer for JsonDocumentSerializer {
    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn parse(&self, bytes: &[u8]) -> Result<StoredDocument, SerializerError> {
        Ok(serde_json::from_slice(strip_bom(bytes))?)
    }

    fn render(&self, document: &StoredDocument) -> Result<Vec<u8>, SerializerError> {
        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Flat TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDocumentSerializer;

impl DocumentSerializer for TomlDocumentSerializer {
    fn file_extension(&self) -> &'static str {
        "toml"
    }

    fn parse(&self, bytes: &[u8]) -> Result<StoredDocument, SerializerError> {
        let text = std::str::from_utf8(strip_bom(bytes))?;
        Ok(toml::from_str(text)?)
    }

    fn render(&self, document: &StoredDocument) -> Result<Vec<u8>, SerializerError> {
        let present: StoredDocument = document
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(toml::to_string_pretty(&present)?.into_bytes())
    }
}
