//! The Post entity: the persisted container of a document.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::model::BlockDocument;

/// Which body a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorType {
    #[default]
    Markdown,
    RichText,
}

impl EditorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EditorType::Markdown => "markdown",
            EditorType::RichText => "richtext",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// A blog post as transported over the wire.
///
/// `content` and `contentBlocks` are mutually exclusive in meaning: only the
/// one selected by `editorType` is ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_blocks: Option<BlockDocument>,
    pub editor_type: EditorType,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
}

/// A post body, selected through the `editorType` discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody<'a> {
    Markdown(&'a str),
    RichText(Cow<'a, BlockDocument>),
}

impl Post {
    pub fn new(title: impl Into<String>, editor_type: EditorType, created_at: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            summary: String::new(),
            content: None,
            content_blocks: None,
            editor_type,
            image: String::new(),
            tags: Vec::new(),
            author: String::new(),
            status: PostStatus::Draft,
            published_at: None,
            created_at: created_at.into(),
        }
    }

    /// The active body. A missing field reads as an empty body of that mode.
    pub fn body(&self) -> PostBody<'_> {
        match self.editor_type {
            EditorType::Markdown => PostBody::Markdown(self.content.as_deref().unwrap_or("")),
            EditorType::RichText => PostBody::RichText(match &self.content_blocks {
                Some(doc) => Cow::Borrowed(doc),
                None => Cow::Owned(BlockDocument::default()),
            }),
        }
    }

    /// Copy with the inactive body dropped, as it should be stored.
    pub fn normalized(&self) -> Post {
        let mut out = self.clone();
        match out.editor_type {
            EditorType::Markdown => {
                out.content_blocks = None;
                out.content.get_or_insert_with(String::new);
            }
            EditorType::RichText => {
                out.content = None;
                out.content_blocks.get_or_insert_with(BlockDocument::default);
            }
        }
        out
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}
