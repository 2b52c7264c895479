//! The contract a third-party block-editing widget has to fulfil.

use folio_core::model::BlockDocument;

/// Failure reported by a widget operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WidgetError {
    message: String,
}

impl WidgetError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::new(e.to_string())
    }
}

/// An interactive block editor surface.
///
/// Implementations run on a single-threaded UI runtime, so the futures carry
/// no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait EditorWidget {
    /// Finish the widget's own setup and show `initial`.
    async fn initialize(&mut self, initial: &BlockDocument) -> Result<(), WidgetError>;

    /// Serialize the widget's current state.
    async fn save(&mut self) -> Result<BlockDocument, WidgetError>;

    /// Replace everything the widget shows with `value`.
    ///
    /// On failure the widget keeps showing its previous content.
    async fn render(&mut self, value: &BlockDocument) -> Result<(), WidgetError>;

    /// Release all widget resources. Called exactly once.
    fn destroy(&mut self);
}
