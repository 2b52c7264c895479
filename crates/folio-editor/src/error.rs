use crate::widget::WidgetError;

/// Errors surfaced by the editor adapter.
///
/// None of these are fatal: the adapter keeps its last good state and stays
/// usable (except after `Destroyed`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Widget → document serialization failed; the edit was dropped.
    #[error("failed to serialize editor state: {0}")]
    Serialization(#[source] WidgetError),

    /// Document → widget push failed; the widget keeps its previous content.
    #[error("failed to load document into editor: {0}")]
    Render(#[source] WidgetError),

    #[error("editor failed to initialize: {0}")]
    Initialization(#[source] WidgetError),

    #[error("editor is not ready yet")]
    NotReady,

    #[error("editor has been destroyed")]
    Destroyed,
}
