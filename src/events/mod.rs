//! Domain event bus.
//!
//! Services emit events after successful state changes; consumers (audit
//! trail, notification fan-out) live outside this crate. The bus is a
//! bounded tokio mpsc channel so a slow consumer applies backpressure
//! instead of growing without bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted by the scheduling core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    SeasonCreated {
        season_id: Uuid,
        field_id: i64,
        name: String,
    },
    SeasonCompleted {
        season_id: Uuid,
    },
    WorkOrdersMaterialized {
        season_id: Uuid,
        field_id: i64,
        count: usize,
    },
    WorkOrderStatusChanged {
        work_order_id: Uuid,
        status: String,
    },
    TemplateSaved {
        template_id: Uuid,
        name: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event; a full or closed channel is logged and swallowed so
    /// event delivery never fails a state change that already committed.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!(error = %e, "event channel closed, dropping event");
        }
    }
}

/// Creates the event channel plus a logging consumer task. The returned
/// sender is shared by all services; the join handle runs for the life of
/// the process.
pub fn channel(capacity: usize) -> (EventSender, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel(capacity);
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let received_at: DateTime<Utc> = Utc::now();
            info!(?event, %received_at, "domain event");
        }
    });
    (EventSender::new(tx), handle)
}
