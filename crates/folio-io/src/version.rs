//! Version constants for schema conformance and CI gating.

/// Post wire format version.
pub const POST_V: u8 = 1;

/// JSON Schema bundle version for the on-disk schemas under `schemas/`.
///
/// Bump this if the schema constraints change (even if `POST_V` stays the same).
pub const SCHEMA_BUNDLE_V: u8 = 1;

