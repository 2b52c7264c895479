//! HTML serialization of rendered nodes.
//!
//! Trusted markup is written as-is. Everything else that reaches the output
//! (code, link-card text, URLs in attributes) is escaped here.

use std::fmt::{self, Write};

use folio_core::model::ListStyle;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::node::{Markup, Node};

/// Placeholder text for an embed block without a URL.
pub const EMBED_UNAVAILABLE: &str = "Embed not available";

/// Serialize nodes to HTML, one node per line.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, node);
    }
    out
}

pub fn write_node<W: Write>(w: &mut W, node: &Node) -> fmt::Result {
    match node {
        Node::Heading { level, content } => {
            let tag = level.tag();
            write!(w, "<{tag}>{content}</{tag}>")
        }
        Node::Paragraph(content) => write!(w, "<p>{content}</p>"),
        Node::List { style, items } => {
            let tag = match style {
                ListStyle::Ordered => "ol",
                ListStyle::Unordered => "ul",
            };
            write!(w, "<{tag}>")?;
            for item in items {
                write!(w, "<li>{item}</li>")?;
            }
            write!(w, "</{tag}>")
        }
        Node::Checklist(items) => {
            w.write_str(r#"<ul class="checklist">"#)?;
            for item in items {
                if item.strikethrough() {
                    write!(
                        w,
                        r#"<li class="checked"><input type="checkbox" checked disabled /> <span style="text-decoration: line-through">{}</span></li>"#,
                        item.content
                    )?;
                } else {
                    write!(
                        w,
                        r#"<li><input type="checkbox" disabled /> <span>{}</span></li>"#,
                        item.content
                    )?;
                }
            }
            w.write_str("</ul>")
        }
        Node::Quote { content, caption } => {
            write!(w, "<blockquote><p>{content}</p>")?;
            if let Some(caption) = caption {
                write!(w, "<footer>{caption}</footer>")?;
            }
            w.write_str("</blockquote>")
        }
        Node::Code(code) => write!(w, "<pre><code>{}</code></pre>", encode_text(code)),
        Node::InlineCode(text) => write!(w, "<p><code>{}</code></p>", encode_text(text)),
        Node::Marker(content) => write!(w, "<p><mark>{content}</mark></p>"),
        Node::Delimiter => w.write_str("<hr />"),
        Node::Table { header, rows } => {
            w.write_str("<table>")?;
            if let Some(header) = header {
                w.write_str("<thead>")?;
                write_row(w, header, "th")?;
                w.write_str("</thead>")?;
            }
            w.write_str("<tbody>")?;
            for row in rows {
                write_row(w, row, "td")?;
            }
            w.write_str("</tbody></table>")
        }
        Node::Embed { url, caption } => {
            write!(
                w,
                r#"<figure class="embed"><iframe src="{}" allowfullscreen></iframe>"#,
                encode_double_quoted_attribute(url)
            )?;
            write_figcaption(w, caption.as_ref())?;
            w.write_str("</figure>")
        }
        Node::EmbedUnavailable => {
            write!(w, r#"<p class="embed-unavailable">{EMBED_UNAVAILABLE}</p>"#)
        }
        Node::LinkCard {
            url,
            title,
            description,
            image,
        } => {
            write!(
                w,
                r#"<a class="link-card" href="{}" target="_blank" rel="noopener noreferrer">"#,
                encode_double_quoted_attribute(url)
            )?;
            if let Some(image) = image {
                write!(
                    w,
                    r#"<img src="{}" alt="" />"#,
                    encode_double_quoted_attribute(image)
                )?;
            }
            let title = title.as_deref().unwrap_or(url);
            write!(w, "<strong>{}</strong>", encode_text(title))?;
            if let Some(description) = description {
                write!(w, "<span>{}</span>", encode_text(description))?;
            }
            w.write_str("</a>")
        }
        Node::Image { url, caption } => {
            write!(
                w,
                r#"<figure><img src="{}" alt="" />"#,
                encode_double_quoted_attribute(url)
            )?;
            write_figcaption(w, caption.as_ref())?;
            w.write_str("</figure>")
        }
    }
}

fn write_row<W: Write>(w: &mut W, cells: &[Markup], cell_tag: &str) -> fmt::Result {
    w.write_str("<tr>")?;
    for cell in cells {
        write!(w, "<{cell_tag}>{cell}</{cell_tag}>")?;
    }
    w.write_str("</tr>")
}

fn write_figcaption<W: Write>(w: &mut W, caption: Option<&Markup>) -> fmt::Result {
    match caption {
        Some(caption) => write!(w, "<figcaption>{caption}</figcaption>"),
        None => Ok(()),
    }
}
