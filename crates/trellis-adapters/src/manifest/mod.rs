//! Package manifest adapters.

mod json;

pub use json::JsonManifestWriter;
