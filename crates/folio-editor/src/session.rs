//! The author's working copy of a post.
//!
//! The session owns the only writable copy. Editor changes update it in
//! memory; nothing reaches the store until `save` is called.

use folio_core::model::BlockDocument;
use folio_core::post::{EditorType, Post};
use folio_core::store::{PersistenceError, PostStore};
use tracing::{info, warn};

pub struct AuthoringSession<S: PostStore> {
    store: S,
    post: Post,
    dirty: bool,
}

impl<S: PostStore> AuthoringSession<S> {
    /// Start editing a post that has not been stored yet.
    pub fn create(store: S, post: Post) -> Self {
        Self {
            store,
            post,
            dirty: true,
        }
    }

    /// Start editing a stored post.
    pub fn open(store: S, id: &str) -> Result<Self, PersistenceError> {
        let post = store.fetch(id)?;
        Ok(Self {
            store,
            post,
            dirty: false,
        })
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The document to load into the editor widget.
    pub fn document(&self) -> BlockDocument {
        self.post.content_blocks.clone().unwrap_or_default()
    }

    /// Take a document emitted by the editor.
    pub fn apply_change(&mut self, document: BlockDocument) {
        self.post.content_blocks = Some(document);
        self.dirty = true;
    }

    pub fn set_markdown(&mut self, text: impl Into<String>) {
        self.post.content = Some(text.into());
        self.dirty = true;
    }

    pub fn set_editor_type(&mut self, editor_type: EditorType) {
        if self.post.editor_type != editor_type {
            self.post.editor_type = editor_type;
            self.dirty = true;
        }
    }

    /// Edit any other post field (title, tags, status, …).
    pub fn update(&mut self, f: impl FnOnce(&mut Post)) {
        f(&mut self.post);
        self.dirty = true;
    }

    /// Store a snapshot of the current post.
    ///
    /// On failure the in-memory post and the dirty flag are left untouched so
    /// the author can retry.
    pub fn save(&mut self) -> Result<&Post, PersistenceError> {
        let snapshot = self.post.normalized();
        match self.store.save(&snapshot) {
            Ok(saved) => {
                info!(id = saved.id.as_deref().unwrap_or(""), "post saved");
                self.post = saved;
                self.dirty = false;
                Ok(&self.post)
            }
            Err(e) => {
                warn!(error = %e, "saving post failed; keeping local copy");
                Err(e)
            }
        }
    }

    /// Switch to another stored post, discarding unsaved changes.
    ///
    /// Returns the new document so the caller can push it into the editor.
    pub fn switch_to(&mut self, id: &str) -> Result<BlockDocument, PersistenceError> {
        let post = self.store.fetch(id)?;
        if self.dirty {
            warn!(from = self.post.id.as_deref().unwrap_or("<new>"), to = id, "discarding unsaved changes");
        }
        self.post = post;
        self.dirty = false;
        Ok(self.document())
    }

    /// Delete the stored post. The local copy becomes a new, unsaved post.
    pub fn delete(&mut self) -> Result<(), PersistenceError> {
        let id = self
            .post
            .id
            .clone()
            .ok_or_else(|| PersistenceError::NotFound("<unsaved>".to_string()))?;
        self.store.delete(&id)?;
        info!(%id, "post deleted");
        self.post.id = None;
        self.dirty = true;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
