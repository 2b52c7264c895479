//! Bridge between an interactive editor widget and the `BlockDocument` value.
//!
//! Two flows run through the adapter and must not trample each other:
//! - outbound: every user edit is serialized and handed to the owner's
//!   change callback, in input order;
//! - inbound: the owner pushes a document (initial load, switching posts) and
//!   the widget is re-rendered, but only when the content actually differs and
//!   never while the user is typing, since a re-render resets the cursor.
//!
//! "Typing" lasts from an edit until a quiet period (`AdapterConfig::quiescence`)
//! has passed with no further edits. Pushes that arrive meanwhile are parked
//! (last one wins) and applied once the period ends, unless a later edit
//! supersedes them.

use folio_core::hash::ContentHash;
use folio_core::model::BlockDocument;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::widget::{EditorWidget, WidgetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Widget still initializing; inbound pushes are parked.
    Uninitialized,
    Ready(Activity),
    /// Widget released; nothing fires any more.
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    /// An outbound save is in flight.
    Typing,
    /// The last save finished; inbound pushes stay parked until `until`.
    Quiescing { until: Instant },
}

/// What happened to an inbound push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The widget was re-rendered with the new document.
    Applied,
    /// Same content as already loaded; the widget was left alone.
    Unchanged,
    /// Parked until the widget is ready or the user stops typing.
    Deferred,
}

/// A serialized edit handed to the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Increases by one with every emitted change.
    pub revision: u64,
    pub document: BlockDocument,
}

type ChangeFn = Box<dyn FnMut(Change)>;
type ErrorFn = Box<dyn FnMut(&AdapterError)>;

/// Owner notifications. Dropped on destroy, so neither fires afterwards.
pub struct Callbacks {
    on_change: ChangeFn,
    on_error: Option<ErrorFn>,
}

impl Callbacks {
    pub fn new(on_change: impl FnMut(Change) + 'static) -> Self {
        Self {
            on_change: Box::new(on_change),
            on_error: None,
        }
    }

    pub fn on_error(mut self, on_error: impl FnMut(&AdapterError) + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }
}

pub struct EditorAdapter<W: EditorWidget> {
    widget: W,
    config: AdapterConfig,
    phase: Phase,
    callbacks: Option<Callbacks>,
    /// Content hash of what the widget currently shows.
    loaded: Option<ContentHash>,
    pending: Option<BlockDocument>,
    revision: u64,
}

impl<W: EditorWidget> EditorAdapter<W> {
    pub fn new(widget: W, config: AdapterConfig, callbacks: Callbacks) -> Self {
        Self {
            widget,
            config,
            phase: Phase::Uninitialized,
            callbacks: Some(callbacks),
            loaded: None,
            pending: None,
            revision: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Revision of the last emitted change (0 before the first edit).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_pending_push(&self) -> bool {
        self.pending.is_some()
    }

    /// True while an edit is in flight or its quiet period has not elapsed.
    pub fn is_typing(&self) -> bool {
        match self.phase {
            Phase::Ready(Activity::Typing) => true,
            Phase::Ready(Activity::Quiescing { until }) => Instant::now() < until,
            _ => false,
        }
    }

    /// When the current quiet period ends, if one is running.
    pub fn quiescence_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Ready(Activity::Quiescing { until }) => Some(until),
            _ => None,
        }
    }

    /// Wait for the widget to come up showing `initial`, then apply any push
    /// that arrived in the meantime.
    pub async fn initialize(&mut self, initial: &BlockDocument) -> Result<(), AdapterError> {
        match self.phase {
            Phase::Destroyed => return Err(self.report(AdapterError::Destroyed)),
            Phase::Ready(_) => return Ok(()),
            Phase::Uninitialized => {}
        }

        let hash = initial
            .content_hash(self.config.hash_algorithm)
            .map_err(|e| self.report(AdapterError::Initialization(e.into())))?;

        if let Err(e) = self.widget.initialize(initial).await {
            return Err(self.report(AdapterError::Initialization(e)));
        }

        self.loaded = Some(hash);
        self.phase = Phase::Ready(Activity::Idle);
        debug!(blocks = initial.blocks.len(), "editor ready");

        // A failed pending push is reported through the callbacks; the widget
        // itself did come up.
        let _ = self.flush_pending().await;
        Ok(())
    }

    /// Handle a user edit: serialize the widget and notify the owner.
    ///
    /// On failure nothing is emitted and the owner keeps its previous document.
    pub async fn edit(&mut self) -> Result<BlockDocument, AdapterError> {
        match self.phase {
            Phase::Destroyed => return Err(self.report(AdapterError::Destroyed)),
            Phase::Uninitialized => return Err(self.report(AdapterError::NotReady)),
            Phase::Ready(_) => {}
        }

        self.phase = Phase::Ready(Activity::Typing);
        let saved = self.widget.save().await;
        self.phase = Phase::Ready(Activity::Quiescing {
            until: Instant::now() + self.config.quiescence,
        });

        let document = saved.map_err(|e| self.report(AdapterError::Serialization(e)))?;
        let hash = document
            .content_hash(self.config.hash_algorithm)
            .map_err(|e| self.report(AdapterError::Serialization(e.into())))?;

        // The widget now shows what the user typed; a push parked before this
        // edit would overwrite it.
        if self.pending.take().is_some() {
            debug!("dropping inbound push superseded by an edit");
        }
        self.loaded = Some(hash);
        self.revision += 1;

        if let Some(callbacks) = self.callbacks.as_mut() {
            (callbacks.on_change)(Change {
                revision: self.revision,
                document: document.clone(),
            });
        }
        Ok(document)
    }

    /// Offer a new document from the owner.
    pub async fn push(&mut self, value: BlockDocument) -> Result<PushOutcome, AdapterError> {
        match self.phase {
            Phase::Destroyed => return Err(self.report(AdapterError::Destroyed)),
            Phase::Uninitialized => {
                self.pending = Some(value);
                return Ok(PushOutcome::Deferred);
            }
            Phase::Ready(_) => {}
        }

        self.settle_activity();
        if self.is_typing() {
            debug!("user is typing; parking inbound push");
            self.pending = Some(value);
            return Ok(PushOutcome::Deferred);
        }

        // This push is newer than anything still parked.
        if self.pending.take().is_some() {
            debug!("dropping parked push superseded by a newer one");
        }
        self.apply(&value).await
    }

    /// Advance the typing state; once quiet, apply a parked push.
    ///
    /// Returns `Ok(None)` when there was nothing to do.
    pub async fn tick(&mut self) -> Result<Option<PushOutcome>, AdapterError> {
        if !matches!(self.phase, Phase::Ready(_)) {
            return Ok(None);
        }
        self.settle_activity();
        if self.is_typing() {
            return Ok(None);
        }
        self.flush_pending().await
    }

    /// Sleep until the current quiet period ends, then `tick`.
    pub async fn settle(&mut self) -> Result<Option<PushOutcome>, AdapterError> {
        if let Some(until) = self.quiescence_deadline() {
            sleep_until(until).await;
        }
        self.tick().await
    }

    /// Release the widget. Idempotent; the widget is destroyed exactly once.
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.widget.destroy();
        self.callbacks = None;
        self.pending = None;
        self.phase = Phase::Destroyed;
        debug!("editor destroyed");
    }

    fn settle_activity(&mut self) {
        if let Phase::Ready(Activity::Quiescing { until }) = self.phase {
            if Instant::now() >= until {
                self.phase = Phase::Ready(Activity::Idle);
            }
        }
    }

    async fn flush_pending(&mut self) -> Result<Option<PushOutcome>, AdapterError> {
        match self.pending.take() {
            Some(value) => self.apply(&value).await.map(Some),
            None => Ok(None),
        }
    }

    async fn apply(&mut self, value: &BlockDocument) -> Result<PushOutcome, AdapterError> {
        let hash = value
            .content_hash(self.config.hash_algorithm)
            .map_err(|e| self.report(AdapterError::Render(WidgetError::from(e))))?;

        if self.loaded.as_ref() == Some(&hash) {
            debug!(%hash, "inbound push has identical content; skipping re-render");
            return Ok(PushOutcome::Unchanged);
        }

        if let Err(e) = self.widget.render(value).await {
            return Err(self.report(AdapterError::Render(e)));
        }
        debug!(%hash, blocks = value.blocks.len(), "inbound push applied");
        self.loaded = Some(hash);
        Ok(PushOutcome::Applied)
    }

    fn report(&mut self, err: AdapterError) -> AdapterError {
        warn!(error = %err, "editor adapter error");
        if let Some(on_error) = self.callbacks.as_mut().and_then(|c| c.on_error.as_mut()) {
            on_error(&err);
        }
        err
    }
}

impl<W: EditorWidget> Drop for EditorAdapter<W> {
    fn drop(&mut self) {
        self.destroy();
    }
}
