//! Markdown body rendering.
//!
//! Authored markdown posts expect every newline to show up as a line break,
//! which standard markdown does not do (single newlines merge into one
//! paragraph). Bodies are therefore normalized before parsing:
//! 1. CRLF and lone CR become LF
//! 2. every LF becomes a hard break (`"  \n"`)
//!
//! Blank lines stay blank (a line of two spaces is still blank), so paragraph
//! breaks survive.

use pulldown_cmark::{html, Options, Parser};

/// Apply the line-ending normalization and hard-break promotion.
pub fn normalize_line_breaks(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("  \n");
            }
            '\n' => out.push_str("  \n"),
            other => out.push(other),
        }
    }
    out
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render a markdown body to HTML.
pub fn render_markdown(input: &str) -> String {
    let normalized = normalize_line_breaks(input);
    let parser = Parser::new_ext(&normalized, options());
    let mut out = String::with_capacity(normalized.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
