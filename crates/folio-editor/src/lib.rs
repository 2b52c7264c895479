#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the Folio project.

Do NOT depend on this crate directly.
Use `folio-io` instead.
"#]

pub mod adapter;
pub mod config;
pub mod driver;
pub mod error;
pub mod session;
pub mod widget;

pub use adapter::{Activity, Callbacks, Change, EditorAdapter, Phase, PushOutcome};
pub use config::AdapterConfig;
pub use driver::EditorCommand;
pub use error::AdapterError;
pub use session::AuthoringSession;
pub use widget::{EditorWidget, WidgetError};
