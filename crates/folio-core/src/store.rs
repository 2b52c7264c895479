//! Persistence interface for posts.
//!
//! The real backing service is external; this module only fixes the contract
//! and provides an in-memory implementation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::post::Post;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("post '{0}' not found")]
    NotFound(String),

    #[error("invalid post id '{0}'")]
    InvalidId(String),

    #[error("post rejected: {0}")]
    Rejected(String),

    #[error("failed to encode or decode post: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Save/fetch access to stored posts.
pub trait PostStore {
    /// Store `post`, assigning an id when it has none. Returns the stored post.
    fn save(&mut self, post: &Post) -> Result<Post, PersistenceError>;

    fn fetch(&self, id: &str) -> Result<Post, PersistenceError>;

    fn list(&self) -> Result<Vec<Post>, PersistenceError>;

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError>;
}

impl<S: PostStore + ?Sized> PostStore for &mut S {
    fn save(&mut self, post: &Post) -> Result<Post, PersistenceError> {
        (**self).save(post)
    }

    fn fetch(&self, id: &str) -> Result<Post, PersistenceError> {
        (**self).fetch(id)
    }

    fn list(&self) -> Result<Vec<Post>, PersistenceError> {
        (**self).list()
    }

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        (**self).delete(id)
    }
}

/// Keeps posts in a map; ids are `post-1`, `post-2`, …
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: BTreeMap<String, Post>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl PostStore for MemoryStore {
    fn save(&mut self, post: &Post) -> Result<Post, PersistenceError> {
        if post.title.trim().is_empty() {
            return Err(PersistenceError::Rejected("title is required".to_string()));
        }

        let mut stored = post.clone();
        let id = match &stored.id {
            Some(id) => id.clone(),
            None => {
                self.next_id += 1;
                let id = format!("post-{}", self.next_id);
                stored.id = Some(id.clone());
                id
            }
        };

        debug!(%id, "memory store: saved post");
        self.posts.insert(id, stored.clone());
        Ok(stored)
    }

    fn fetch(&self, id: &str) -> Result<Post, PersistenceError> {
        self.posts
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<Post>, PersistenceError> {
        Ok(self.posts.values().cloned().collect())
    }

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.posts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }
}
