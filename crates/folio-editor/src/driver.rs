//! Event loop that drives an adapter from UI commands.

use folio_core::model::BlockDocument;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::adapter::EditorAdapter;
use crate::widget::EditorWidget;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// The user changed something in the widget.
    Edited,
    /// The owner supplies a (possibly) new document.
    Push(BlockDocument),
    Destroy,
}

impl<W: EditorWidget> EditorAdapter<W> {
    /// Process commands until `Destroy` or until every sender is gone, then
    /// destroy the widget.
    ///
    /// Commands are handled one at a time, so serialized edits reach the change
    /// callback in input order. The quiet-period timer is a single sleep that
    /// is dropped and re-armed whenever a command arrives first.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<EditorCommand>) {
        loop {
            let deadline = self.quiescence_deadline();
            tokio::select! {
                biased;
                cmd = commands.recv() => match cmd {
                    // Errors below were already passed to the error callback.
                    Some(EditorCommand::Edited) => {
                        let _ = self.edit().await;
                    }
                    Some(EditorCommand::Push(doc)) => {
                        let _ = self.push(doc).await;
                    }
                    Some(EditorCommand::Destroy) | None => break,
                },
                _ = wait_until(deadline) => {
                    let _ = self.tick().await;
                }
            }
        }
        debug!("editor command loop finished");
        self.destroy();
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
