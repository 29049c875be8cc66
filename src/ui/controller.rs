//! Refresh controller.
//!
//! Consumes domain events one at a time, runs the refresh plan for each
//! event's kind against the model store and then asks the render loop for a
//! redraw. Refresh failures are logged and never stop the plan or the loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::events::{DomainEvent, EventKind};
use crate::models::{ModelStore, RefreshOp};

const INFO_ONLY: &[RefreshOp] = &[RefreshOp::Info];
const INFO_AND_CHANNELS: &[RefreshOp] = &[
    RefreshOp::Info,
    RefreshOp::ChannelsBalance,
    RefreshOp::Channels,
];

/// Ordered refresh operations for an event kind.
pub fn refresh_plan(kind: EventKind) -> &'static [RefreshOp] {
    match kind {
        EventKind::BlockReceived | EventKind::PeerUpdated => INFO_ONLY,
        EventKind::ChannelPending
        | EventKind::ChannelActive
        | EventKind::ChannelInactive
        | EventKind::InvoiceSettled => INFO_AND_CHANNELS,
    }
}

/// Receiver side of the redraw signal. Must never block.
pub trait RedrawSink: Send + Sync {
    fn request_redraw(&self);
}

/// Single-slot redraw signal. Requests made while one is pending collapse
/// into it.
#[derive(Clone)]
pub struct RedrawHandle {
    tx: mpsc::Sender<()>,
}

impl RedrawHandle {
    pub fn channel() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }
}

impl RedrawSink for RedrawHandle {
    fn request_redraw(&self) {
        // Full: a redraw is already queued. Closed: the render loop is gone.
        let _ = self.tx.try_send(());
    }
}

pub struct Controller {
    models: Arc<ModelStore>,
    redraw: Arc<dyn RedrawSink>,
}

impl Controller {
    pub fn new(models: Arc<ModelStore>, redraw: Arc<dyn RedrawSink>) -> Self {
        Self { models, redraw }
    }

    /// Run the plan for one event, then signal a redraw exactly once.
    pub async fn process(&self, event: &DomainEvent) {
        let kind = event.kind();
        for op in refresh_plan(kind) {
            if let Err(err) = self.models.refresh(*op).await {
                tracing::error!(event = %kind, op = op.name(), error = %err, "refresh failed");
            }
        }
        self.redraw.request_redraw();
    }

    /// Process events until every sender is dropped.
    pub async fn listen(self, mut events: mpsc::Receiver<DomainEvent>) {
        tracing::debug!("controller listening");
        while let Some(event) = events.recv().await {
            tracing::debug!(event = %event.kind(), "event received");
            self.process(&event).await;
        }
        tracing::debug!("event stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_start_with_info() {
        for kind in EventKind::ALL {
            assert_eq!(refresh_plan(kind).first(), Some(&RefreshOp::Info));
        }
    }

    #[test]
    fn wallet_balance_is_bootstrap_only() {
        for kind in EventKind::ALL {
            assert!(!refresh_plan(kind).contains(&RefreshOp::WalletBalance));
        }
    }

    #[tokio::test]
    async fn redraw_requests_coalesce() {
        let (handle, mut rx) = RedrawHandle::channel();
        handle.request_redraw();
        handle.request_redraw();
        handle.request_redraw();
        assert_eq!(rx.recv().await, Some(()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn redraw_after_receiver_dropped_is_ignored() {
        let (handle, rx) = RedrawHandle::channel();
        drop(rx);
        handle.request_redraw();
    }
}
