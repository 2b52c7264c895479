//! Block document → output nodes.
//!
//! Rendering is pure and total: every block is handled on its own, so one
//! block that cannot be rendered never affects its siblings.

use folio_core::model::{Block, BlockData, BlockDocument, OtherReason};
use tracing::{debug, warn};

use crate::node::{CheckItem, HeadingLevel, Markup, Node};

/// Why a block produced no node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Forward-compatible skip of a kind this renderer does not know.
    UnknownKind,
    /// A known kind whose payload could not be decoded.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    /// Position of the block in the document.
    pub index: usize,
    pub kind: String,
    pub reason: SkipReason,
}

/// Nodes in document order plus a record of skipped blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub nodes: Vec<Node>,
    pub skipped: Vec<SkippedBlock>,
}

/// Render a document into nodes, dropping diagnostics.
pub fn render(doc: &BlockDocument) -> Vec<Node> {
    render_with_diagnostics(doc).nodes
}

/// Render a document and report every block that was skipped.
///
/// A block that renders to nothing by rule (an image without a URL) is not a
/// skip and is not reported.
pub fn render_with_diagnostics(doc: &BlockDocument) -> Rendered {
    let mut out = Rendered {
        nodes: Vec::with_capacity(doc.blocks.len()),
        skipped: Vec::new(),
    };

    for (index, block) in doc.blocks.iter().enumerate() {
        match render_block(block) {
            Ok(Some(node)) => out.nodes.push(node),
            Ok(None) => {}
            Err(reason) => {
                match &reason {
                    SkipReason::UnknownKind => {
                        debug!(index, kind = block.kind_name(), "skipping unknown block kind");
                    }
                    SkipReason::Malformed(err) => {
                        warn!(index, kind = block.kind_name(), %err, "skipping malformed block");
                    }
                }
                out.skipped.push(SkippedBlock {
                    index,
                    kind: block.kind_name().to_string(),
                    reason,
                });
            }
        }
    }

    out
}

/// Render a single block. `Ok(None)` means the block contributes nothing.
pub fn render_block(block: &Block) -> Result<Option<Node>, SkipReason> {
    let node = match &block.data {
        BlockData::Header(h) => Node::Heading {
            level: HeadingLevel::from_stored(h.level),
            content: Markup::trusted(&*h.text),
        },
        BlockData::Paragraph(p) => Node::Paragraph(Markup::trusted(&*p.text)),
        BlockData::List(l) => Node::List {
            style: l.style,
            items: l.items.iter().map(|i| Markup::trusted(&**i)).collect(),
        },
        BlockData::Checklist(c) => Node::Checklist(
            c.items
                .iter()
                .map(|i| CheckItem {
                    content: Markup::trusted(&*i.text),
                    checked: i.checked,
                })
                .collect(),
        ),
        BlockData::Quote(q) => Node::Quote {
            content: Markup::trusted(&*q.text),
            caption: caption(q.caption.as_deref()),
        },
        BlockData::Code(c) => Node::Code(c.code.clone()),
        BlockData::InlineCode(c) => Node::InlineCode(c.text.clone()),
        BlockData::Marker(m) => Node::Marker(Markup::trusted(&*m.text)),
        BlockData::Delimiter(_) => Node::Delimiter,
        BlockData::Table(t) => {
            let mut rows: Vec<Vec<Markup>> = t
                .content
                .iter()
                .map(|row| row.iter().map(|c| Markup::trusted(&**c)).collect())
                .collect();
            let header = if t.with_headings == Some(true) && !rows.is_empty() {
                Some(rows.remove(0))
            } else {
                None
            };
            Node::Table { header, rows }
        }
        // A missing embed keeps its slot as a placeholder; a missing image
        // (below) disappears.
        BlockData::Embed(e) => match e.url() {
            Some(url) => Node::Embed {
                url: url.to_string(),
                caption: caption(e.caption.as_deref()),
            },
            None => Node::EmbedUnavailable,
        },
        BlockData::LinkTool(l) => {
            if l.link.trim().is_empty() {
                return Ok(None);
            }
            let meta = l.meta.as_ref();
            Node::LinkCard {
                url: l.link.clone(),
                title: meta.and_then(|m| non_blank(m.title.as_deref())),
                description: meta.and_then(|m| non_blank(m.description.as_deref())),
                image: meta
                    .and_then(|m| m.image.as_ref())
                    .and_then(|i| non_blank(i.url.as_deref())),
            }
        }
        BlockData::Image(i) => match i.url() {
            Some(url) => Node::Image {
                url: url.to_string(),
                caption: caption(i.caption.as_deref()),
            },
            None => return Ok(None),
        },
        BlockData::Other(other) => {
            return Err(match &other.reason {
                OtherReason::UnknownKind => SkipReason::UnknownKind,
                OtherReason::Malformed(e) => SkipReason::Malformed(e.clone()),
            });
        }
    };

    Ok(Some(node))
}

fn caption(s: Option<&str>) -> Option<Markup> {
    s.map(Markup::trusted).filter(|m| !m.is_blank())
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty()).map(str::to_string)
}
