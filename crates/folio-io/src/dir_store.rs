//! A `PostStore` backed by a directory of JSON files, one `<id>.json` per post.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::post::Post;
use folio_core::store::{PersistenceError, PostStore};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use uuid::Uuid;

const EXTENSION: &str = "json";

/// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Use `root` as the store directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, PersistenceError> {
        if !is_valid_id(id) {
            return Err(PersistenceError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.{EXTENSION}")))
    }

    fn read(&self, id: &str, path: &Path) -> Result<Post, PersistenceError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PersistenceError::NotFound(id.to_string()),
            _ => PersistenceError::Io(e),
        })?;
        let mut post: Post = serde_json::from_str(&text)?;
        // The file name is authoritative.
        post.id = Some(id.to_string());
        Ok(post)
    }
}

impl PostStore for DirStore {
    fn save(&mut self, post: &Post) -> Result<Post, PersistenceError> {
        if post.title.trim().is_empty() {
            return Err(PersistenceError::Rejected("title is required".to_string()));
        }

        let mut stored = post.clone();
        let id = stored
            .id
            .get_or_insert_with(|| Uuid::new_v4().simple().to_string())
            .clone();
        let path = self.path_for(&id)?;

        // Write next to the target and rename, so a crash never leaves a
        // half-written post behind. The temp file is removed on any failure.
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(&mut tmp, &stored)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(%id, path = %path.display(), "dir store: saved post");
        Ok(stored)
    }

    fn fetch(&self, id: &str) -> Result<Post, PersistenceError> {
        let path = self.path_for(id)?;
        self.read(id, &path)
    }

    /// Posts sorted by id. Files that fail to parse are skipped with a warning.
    fn list(&self) -> Result<Vec<Post>, PersistenceError> {
        let mut ids: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|id| is_valid_id(id))
            .collect();
        ids.sort();

        let mut posts = Vec::with_capacity(ids.len());
        for id in ids {
            match self.fetch(&id) {
                Ok(post) => posts.push(post),
                Err(e) => warn!(%id, error = %e, "dir store: skipping unreadable post"),
            }
        }
        Ok(posts)
    }

    fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(id)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PersistenceError::NotFound(id.to_string()),
            _ => PersistenceError::Io(e),
        })?;
        debug!(%id, "dir store: deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_charset() {
        assert!(is_valid_id("intro-post_2"));
        assert!(is_valid_id("0f8c6a1e9b2d4c3fa5e7d9b1c3e5f7a9"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("../etc/passwd"));
        assert!(!is_valid_id("a b"));
        assert!(!is_valid_id("naïve"));
    }
}
