#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the Folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod canonical_json;
pub mod hash;
pub mod kind;
pub mod model;
pub mod post;
pub mod store;
