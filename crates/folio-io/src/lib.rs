//! `folio-io` is the single supported public entrypoint for the Folio post
//! model and its deterministic helpers (canonical JSON, content hashing, block
//! rendering, the editor adapter, and post persistence).
//!
//! This crate intentionally contains **no** UI toolkit bindings and no HTTP
//! client. Widgets and remote stores plug in through the `EditorWidget` and
//! `PostStore` traits.

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `folio_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

// Re-export the document and post model.
#[doc(hidden)]
pub mod core {
    pub use folio_core::hash::{ContentHash, HashAlgorithm, UnsupportedHashAlgorithm};
    pub use folio_core::kind::BlockKind;
    pub use folio_core::model::{
        Block, BlockData, BlockDocument, ChecklistData, ChecklistItem, CodeData, DelimiterData,
        EmbedData, Extra, FileRef, FormatVersion, HeaderData, ImageData, InlineCodeData,
        LinkMeta, LinkToolData, ListData, ListStyle, MarkerData, OtherBlock, OtherReason,
        ParagraphData, QuoteData, TableData,
    };
    pub use folio_core::post::{EditorType, Post, PostBody, PostStatus};
    pub use folio_core::store::{MemoryStore, PersistenceError, PostStore};
}

/// Deterministic JSON canonicalization helpers.
pub use folio_core::canonical_json;

/// Hash helpers over canonical JSON.
pub use folio_core::hash as hashing;

// Re-export the renderer.
#[doc(hidden)]
pub mod render {
    pub use folio_render::html::{to_html, EMBED_UNAVAILABLE};
    pub use folio_render::markdown::{normalize_line_breaks, render_markdown};
    pub use folio_render::{
        render, render_post, render_with_diagnostics, CheckItem, HeadingLevel, Markup, Node,
        Rendered, RenderedPost, SkipReason, SkippedBlock,
    };
}

// Re-export the editor adapter.
#[doc(hidden)]
pub mod editor {
    pub use folio_editor::config::DEFAULT_QUIESCENCE;
    pub use folio_editor::{
        Activity, AdapterConfig, AdapterError, AuthoringSession, Callbacks, Change,
        EditorAdapter, EditorCommand, EditorWidget, Phase, PushOutcome, WidgetError,
    };
}

/// JSON parsing with actionable diagnostics.
pub mod document_json;

/// Directory-backed post store.
pub mod dir_store;

/// Version constants for schema conformance.
pub mod version;

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::core::{
        Block, BlockData, BlockDocument, BlockKind, ContentHash, EditorType, HashAlgorithm,
        MemoryStore, PersistenceError, Post, PostBody, PostStatus, PostStore,
    };
    pub use crate::dir_store::DirStore;
    pub use crate::document_json::{parse_document_json_str, parse_post_json_str, DocumentJsonError};
    pub use crate::editor::{
        AdapterConfig, AdapterError, AuthoringSession, Callbacks, Change, EditorAdapter,
        EditorCommand, EditorWidget, PushOutcome, WidgetError,
    };
    pub use crate::render::{render, render_post, to_html, Markup, Node, RenderedPost};
    pub use crate::{canonical_json, hashing};
}
