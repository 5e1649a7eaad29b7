//! # beacon-entity
//!
//! Domain entity models for Beacon: projects, tracked events, sessions,
//! visitors, and the aggregate row types used by reporting queries.

pub mod event;
pub mod project;
pub mod session;
pub mod stats;
pub mod visitor;

pub use event::{CreateEvent, Event};
pub use project::{CreateProject, Project, UpdateProject};
pub use session::{CreateSession, Session};
pub use visitor::{CreateVisitor, Visitor};
