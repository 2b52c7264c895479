//! `folio inspect` and `folio kinds`.

use std::io::Write;

use anyhow::Result;
use folio_io::core::OtherReason;
use folio_io::prelude::{Block, BlockData, BlockDocument, BlockKind};
use tabwriter::TabWriter;

const PREVIEW_MAX_CHARS: usize = 60;
const NONE: &str = "-";

/// Row selection for `inspect`. Indices always refer to the full document.
#[derive(Debug)]
pub struct Filter {
    /// Exact block type (wire name), known or not.
    pub kind: Option<String>,
    /// Only kinds that carry authored text.
    pub text_only: bool,
}

impl Filter {
    fn matches(&self, block: &Block) -> bool {
        if self.kind.as_deref().is_some_and(|k| k != block.kind_name()) {
            return false;
        }
        !self.text_only || block.kind().is_some_and(BlockKind::carries_text)
    }
}

/// One row per block: index, type, id, preview.
pub fn write_table(doc: &BlockDocument, filter: &Filter, out: impl Write) -> Result<()> {
    let mut tw = TabWriter::new(out);
    writeln!(tw, "index\ttype\tid\tpreview")?;
    for (index, block) in doc.blocks.iter().enumerate() {
        if !filter.matches(block) {
            continue;
        }
        writeln!(
            tw,
            "{index}\t{}\t{}\t{}",
            block.kind_name(),
            block.id.as_deref().unwrap_or(NONE),
            preview(block)
        )?;
    }
    tw.flush()?;
    Ok(())
}

/// The block-kind catalog.
pub fn write_kinds(out: impl Write) -> Result<()> {
    let mut tw = TabWriter::new(out);
    writeln!(tw, "type\ttext\tdescription")?;
    for kind in BlockKind::ALL {
        let text = if kind.carries_text() { "yes" } else { "no" };
        writeln!(tw, "{kind}\t{text}\t{}", kind.description())?;
    }
    tw.flush()?;
    Ok(())
}

/// Single-line summary of a block's content.
pub fn preview(block: &Block) -> String {
    let raw = match &block.data {
        BlockData::Header(d) => d.text.clone(),
        BlockData::Paragraph(d) => d.text.clone(),
        BlockData::List(d) => d.items.join(" / "),
        BlockData::Checklist(d) => d
            .items
            .iter()
            .map(|i| format!("[{}] {}", if i.checked { 'x' } else { ' ' }, i.text))
            .collect::<Vec<_>>()
            .join(" / "),
        BlockData::Quote(d) => d.text.clone(),
        BlockData::Code(d) => d.code.clone(),
        BlockData::InlineCode(d) => d.text.clone(),
        BlockData::Marker(d) => d.text.clone(),
        BlockData::Delimiter(_) => String::new(),
        BlockData::Table(d) => d
            .content
            .iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join(" / "),
        BlockData::Embed(d) => d.url().unwrap_or("(no url)").to_string(),
        BlockData::LinkTool(d) => d.link.clone(),
        BlockData::Image(d) => d.url().unwrap_or("(no file)").to_string(),
        BlockData::Other(o) => match &o.reason {
            OtherReason::UnknownKind => "(unknown type)".to_string(),
            OtherReason::Malformed(e) => format!("(malformed: {e})"),
        },
    };

    let flat = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return NONE.to_string();
    }
    bounded(&flat)
}

fn bounded(s: &str) -> String {
    if s.chars().count() <= PREVIEW_MAX_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(PREVIEW_MAX_CHARS - 1).collect();
    out.push('…');
    out
}
