//! Repository implementations for all Beacon entities.

pub mod event;
pub mod project;
pub mod session;
pub mod visitor;

pub use event::EventRepository;
pub use project::ProjectRepository;
pub use session::SessionRepository;
pub use visitor::VisitorRepository;
