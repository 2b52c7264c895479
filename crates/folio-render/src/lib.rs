#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the Folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod blocks;
pub mod html;
pub mod markdown;
pub mod node;
pub mod post;

pub use blocks::{render, render_with_diagnostics, Rendered, SkipReason, SkippedBlock};
pub use node::{CheckItem, HeadingLevel, Markup, Node};
pub use post::{render_post, RenderedPost};
