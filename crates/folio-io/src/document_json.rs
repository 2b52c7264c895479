//! Parse `BlockDocument` and `Post` JSON with better diagnostics.
//!
//! serde's "missing field X" message names one field at a time and says
//! nothing about what else is required. These helpers keep validation exactly
//! as strict as the plain serde path but report every missing top-level field
//! at once.

use std::fmt;

use folio_core::model::BlockDocument;
use folio_core::post::Post;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

const DOCUMENT_REQUIRED_FIELDS: &[&str] = &["blocks"];
const POST_REQUIRED_FIELDS: &[&str] = &["title", "editorType", "createdAt"];

/// Which payload a [`DocumentJsonError`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Document,
    Post,
}

impl PayloadKind {
    fn label(self) -> &'static str {
        match self {
            PayloadKind::Document => "Document",
            PayloadKind::Post => "Post",
        }
    }

    fn required_fields(self) -> &'static [&'static str] {
        match self {
            PayloadKind::Document => DOCUMENT_REQUIRED_FIELDS,
            PayloadKind::Post => POST_REQUIRED_FIELDS,
        }
    }
}

/// A structured error for parsing a Document or Post JSON payload.
#[derive(Debug)]
pub enum DocumentJsonError {
    /// The input was not valid JSON.
    InvalidJson(serde_json::Error),
    /// Valid JSON, but missing required top-level fields.
    MissingRequiredTopLevelFields {
        kind: PayloadKind,
        missing: Vec<&'static str>,
        required: Vec<&'static str>,
    },
    /// Valid JSON that does not match the expected shape.
    InvalidShape {
        kind: PayloadKind,
        source: serde_json::Error,
    },
}

impl fmt::Display for DocumentJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentJsonError::InvalidJson(e) => {
                write!(f, "Invalid JSON: {e}")
            }
            DocumentJsonError::MissingRequiredTopLevelFields {
                kind,
                missing,
                required,
            } => {
                write!(
                    f,
                    "Invalid {} JSON: missing required top-level field(s): {}. Required top-level fields: {}.",
                    kind.label(),
                    missing.join(", "),
                    required.join(", ")
                )
            }
            DocumentJsonError::InvalidShape { kind, source } => {
                // Keep serde's message, it usually points at the exact field.
                write!(
                    f,
                    "Invalid {} JSON shape: {source}. Required top-level fields: {}.",
                    kind.label(),
                    kind.required_fields().join(", ")
                )
            }
        }
    }
}

impl std::error::Error for DocumentJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentJsonError::InvalidJson(e) => Some(e),
            DocumentJsonError::InvalidShape { source, .. } => Some(source),
            DocumentJsonError::MissingRequiredTopLevelFields { .. } => None,
        }
    }
}

/// Parse a BlockDocument JSON string (`{"time"?, "blocks", "version"?}`).
///
/// Blocks of unknown type are kept, not rejected; they are skipped only when
/// rendering.
pub fn parse_document_json_str(s: &str) -> Result<BlockDocument, DocumentJsonError> {
    parse_checked(s, PayloadKind::Document)
}

/// Parse a Post JSON string.
pub fn parse_post_json_str(s: &str) -> Result<Post, DocumentJsonError> {
    parse_checked(s, PayloadKind::Post)
}

fn parse_checked<T: DeserializeOwned>(s: &str, kind: PayloadKind) -> Result<T, DocumentJsonError> {
    let v: Value = serde_json::from_str(s).map_err(DocumentJsonError::InvalidJson)?;
    let obj = v.as_object().ok_or_else(|| DocumentJsonError::InvalidShape {
        kind,
        source: serde_json::Error::custom("expected a JSON object"),
    })?;

    let required = kind.required_fields();
    let missing: Vec<&'static str> = required
        .iter()
        .copied()
        .filter(|k| !obj.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        return Err(DocumentJsonError::MissingRequiredTopLevelFields {
            kind,
            missing,
            required: required.to_vec(),
        });
    }

    serde_json::from_value(v).map_err(|source| DocumentJsonError::InvalidShape { kind, source })
}
