//! Post-level rendering: pick the block or markdown path from `editorType`.

use folio_core::post::{Post, PostBody};

use crate::blocks::render;
use crate::html::to_html;
use crate::markdown::render_markdown;
use crate::node::Node;

/// A rendered post body. The two strategies never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPost {
    Blocks(Vec<Node>),
    /// HTML produced by the markdown renderer.
    Markdown(String),
}

impl RenderedPost {
    pub fn to_html(&self) -> String {
        match self {
            RenderedPost::Blocks(nodes) => to_html(nodes),
            RenderedPost::Markdown(html) => html.clone(),
        }
    }
}

pub fn render_post(post: &Post) -> RenderedPost {
    match post.body() {
        PostBody::RichText(doc) => RenderedPost::Blocks(render(&doc)),
        PostBody::Markdown(text) => RenderedPost::Markdown(render_markdown(text)),
    }
}
