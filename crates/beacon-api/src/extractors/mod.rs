//! Custom Axum extractors.

pub mod project_key;

pub use project_key::ProjectKey;
