//! HTTP handlers, organized by surface area.

pub mod admin;
pub mod analytics;
pub mod events;
pub mod health;
pub mod live;
pub mod script;
pub mod track;
pub mod ws;
