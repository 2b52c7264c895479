//! Read-only output nodes produced by the block renderer.

use std::fmt;

use folio_core::model::ListStyle;

/// Trusted inline markup (bold/italic/link subset).
///
/// Rich-inline strings are sanitized by the layer that produced and stored
/// them. The renderer emits them as-is and never re-escapes; wrapping them in
/// this type keeps that boundary visible wherever they flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    pub fn trusted(s: impl Into<String>) -> Self {
        Markup(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supported heading levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Map a stored level to a heading; missing or out-of-range is `H2`.
    pub fn from_stored(level: Option<i64>) -> Self {
        match level {
            Some(1) => HeadingLevel::H1,
            Some(3) => HeadingLevel::H3,
            Some(4) => HeadingLevel::H4,
            _ => HeadingLevel::H2,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub content: Markup,
    pub checked: bool,
}

impl CheckItem {
    /// Checked items are struck through.
    pub fn strikethrough(&self) -> bool {
        self.checked
    }
}

/// One rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading {
        level: HeadingLevel,
        content: Markup,
    },
    Paragraph(Markup),
    List {
        style: ListStyle,
        items: Vec<Markup>,
    },
    Checklist(Vec<CheckItem>),
    Quote {
        content: Markup,
        caption: Option<Markup>,
    },
    /// Raw code, never interpreted as markup.
    Code(String),
    InlineCode(String),
    Marker(Markup),
    Delimiter,
    Table {
        header: Option<Vec<Markup>>,
        rows: Vec<Vec<Markup>>,
    },
    Embed {
        url: String,
        caption: Option<Markup>,
    },
    /// An embed block without a URL still takes up a slot on the page.
    EmbedUnavailable,
    LinkCard {
        url: String,
        title: Option<String>,
        description: Option<String>,
        image: Option<String>,
    },
    Image {
        url: String,
        caption: Option<Markup>,
    },
}
