//! Catalog of the block kinds this crate understands.

use core::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Paragraph,
    List,
    Checklist,
    Quote,
    Code,
    InlineCode,
    Marker,
    Delimiter,
    Table,
    Embed,
    LinkTool,
    Image,
}

impl BlockKind {
    pub const ALL: [BlockKind; 13] = [
        BlockKind::Header,
        BlockKind::Paragraph,
        BlockKind::List,
        BlockKind::Checklist,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::InlineCode,
        BlockKind::Marker,
        BlockKind::Delimiter,
        BlockKind::Table,
        BlockKind::Embed,
        BlockKind::LinkTool,
        BlockKind::Image,
    ];

    /// Wire name, as stored in a block's `type` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::Checklist => "checklist",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::InlineCode => "inlineCode",
            BlockKind::Marker => "marker",
            BlockKind::Delimiter => "delimiter",
            BlockKind::Table => "table",
            BlockKind::Embed => "embed",
            BlockKind::LinkTool => "linkTool",
            BlockKind::Image => "image",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            BlockKind::Header => "Document heading",
            BlockKind::Paragraph => "Body text",
            BlockKind::List => "Bullet or numbered list",
            BlockKind::Checklist => "Task list",
            BlockKind::Quote => "Blockquote with optional attribution",
            BlockKind::Code => "Preformatted code, rendered verbatim",
            BlockKind::InlineCode => "Short inline code span",
            BlockKind::Marker => "Highlighted text",
            BlockKind::Delimiter => "Section break",
            BlockKind::Table => "Tabular data",
            BlockKind::Embed => "Embedded external content",
            BlockKind::LinkTool => "Link preview card",
            BlockKind::Image => "Image with optional caption",
        }
    }

    /// Whether blocks of this kind carry authored text (as opposed to media or
    /// pure layout).
    pub const fn carries_text(self) -> bool {
        !matches!(
            self,
            BlockKind::Delimiter | BlockKind::Embed | BlockKind::Image
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ();

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}
