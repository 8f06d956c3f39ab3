//! Allow-listed views of structured documents.
//!
//! A `SanitizedDocument` is built, never filtered: only `type`, `date`, a
//! redacted `snippet` of `content` and a fresh identifier are copied into
//! it. Fields added to source documents later are dropped automatically.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field holding the free text to sanitize.
pub const CONTENT_FIELD: &str = "content";
pub const TYPE_FIELD: &str = "type";
pub const DATE_FIELD: &str = "date";
pub const ID_FIELD: &str = "id";

/// An input document: field name to JSON value.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedDocument {
    /// Random identifier, unrelated to the source document's id.
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub snippet: String,
}

/// Renders a field value as text. Strings are taken verbatim, other values
/// as their JSON text; `null` counts as absent.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Generates an identifier guaranteed to differ from `original`.
pub fn fresh_document_id(original: Option<&Value>) -> String {
    let original = original.and_then(field_text);
    loop {
        let candidate = Uuid::new_v4().to_string();
        if original.as_deref() != Some(candidate.as_str()) {
            return candidate;
        }
    }
}
