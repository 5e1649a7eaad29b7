//! # beacon-realtime
//!
//! In-process realtime hub. Ingestion publishes freshly tracked events to the
//! hub; dashboard viewers register project-scoped subscriptions and receive
//! each matching event as a serialized frame over their WebSocket.

pub mod hub;
pub mod message;

pub use hub::{ConnectionId, Hub, HubHandle};
pub use message::OutboundFrame;
