//! Shared plain types.

pub mod properties;
