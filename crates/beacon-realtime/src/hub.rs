//! The realtime hub task and its cloneable handle.
//!
//! A single coordination task owns the subscriber table; registration,
//! removal, and publishing all flow through one command channel, so no lock
//! is ever held across a send. Publishing is fire-and-forget: a full or
//! closed viewer buffer evicts that viewer and never blocks ingestion.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use beacon_entity::event::Event;

use crate::message::OutboundFrame;

/// Identifier for one viewer connection.
pub type ConnectionId = Uuid;

/// One registered viewer: the project it watches and its outbound buffer.
#[derive(Debug)]
struct Subscriber {
    project_id: Uuid,
    sender: mpsc::Sender<String>,
}

#[derive(Debug)]
enum HubCommand {
    Register {
        conn_id: ConnectionId,
        project_id: Uuid,
        sender: mpsc::Sender<String>,
    },
    Unregister {
        conn_id: ConnectionId,
    },
    Publish {
        event: Event,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
}

/// The hub coordination task. Constructed via [`Hub::spawn`].
#[derive(Debug)]
pub struct Hub {
    subscribers: HashMap<ConnectionId, Subscriber>,
    rx: mpsc::UnboundedReceiver<HubCommand>,
}

impl Hub {
    /// Spawn the hub task and return a handle to it.
    ///
    /// The task runs until every handle has been dropped.
    pub fn spawn() -> HubHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            subscribers: HashMap::new(),
            rx,
        };
        tokio::spawn(hub.run());
        HubHandle { tx }
    }

    async fn run(mut self) {
        info!("Realtime hub started");
        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                HubCommand::Register {
                    conn_id,
                    project_id,
                    sender,
                } => {
                    self.subscribers.insert(
                        conn_id,
                        Subscriber { project_id, sender },
                    );
                    info!(
                        conn_id = %conn_id,
                        project_id = %project_id,
                        total = self.subscribers.len(),
                        "Viewer registered"
                    );
                }
                HubCommand::Unregister { conn_id } => {
                    if self.subscribers.remove(&conn_id).is_some() {
                        info!(
                            conn_id = %conn_id,
                            total = self.subscribers.len(),
                            "Viewer unregistered"
                        );
                    }
                }
                HubCommand::Publish { event } => self.publish(event),
                HubCommand::Count { reply } => {
                    let _ = reply.send(self.subscribers.len());
                }
            }
        }
        info!("Realtime hub stopped");
    }

    fn publish(&mut self, event: Event) {
        // Events tracked without a project cannot be routed to any viewer.
        let Some(project_id) = event.project_id else {
            debug!(event_id = %event.id, "Dropping broadcast for event without project");
            return;
        };

        let frame = OutboundFrame::new_event(project_id, event);
        let text = match serde_json::to_string(&frame) {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "Failed to serialize broadcast frame");
                return;
            }
        };

        let mut dead = Vec::new();
        for (conn_id, sub) in &self.subscribers {
            if sub.project_id != project_id {
                continue;
            }
            if let Err(e) = sub.sender.try_send(text.clone()) {
                match e {
                    mpsc::error::TrySendError::Full(_) => {
                        warn!(conn_id = %conn_id, "Viewer buffer full, evicting slow viewer");
                    }
                    mpsc::error::TrySendError::Closed(_) => {
                        debug!(conn_id = %conn_id, "Viewer channel closed, removing");
                    }
                }
                dead.push(*conn_id);
            }
        }

        // Dropping the subscriber closes its channel; the viewer's writer
        // task sees the close and tears the socket down.
        for conn_id in dead {
            self.subscribers.remove(&conn_id);
        }
    }
}

/// Cloneable handle for talking to the hub task.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// Register a viewer for a project and return its connection id together
    /// with the receiving end of its outbound buffer.
    pub fn subscribe(
        &self,
        project_id: Uuid,
        buffer_size: usize,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let conn_id = Uuid::new_v4();
        let (sender, receiver) = mpsc::channel(buffer_size);
        let _ = self.tx.send(HubCommand::Register {
            conn_id,
            project_id,
            sender,
        });
        (conn_id, receiver)
    }

    /// Remove a viewer. Safe to call for an already-removed connection.
    pub fn unregister(&self, conn_id: ConnectionId) {
        let _ = self.tx.send(HubCommand::Unregister { conn_id });
    }

    /// Publish a freshly tracked event to all viewers of its project.
    ///
    /// Never blocks and never fails from the publisher's point of view.
    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(HubCommand::Publish { event });
    }

    /// Number of currently registered viewers.
    pub async fn connection_count(&self) -> usize {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(HubCommand::Count { reply }).is_err() {
            return 0;
        }
        rx.await.unwrap_or(0)
    }
}
