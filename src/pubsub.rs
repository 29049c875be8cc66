//! Subscription transport: turns node activity into [`DomainEvent`]s.
//!
//! Two producers feed one bounded channel:
//! - a ticker that polls `get_info` and compares counters with the previous
//!   observation;
//! - an optional watcher on LND's invoice stream for settled invoices.
//!
//! Both stop on shutdown or when the receiving side is dropped; once they
//! return the sender is gone and the controller's loop ends.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::events::{DomainEvent, EventKind};
use crate::network::{parse_invoice_update, DataSource, InfoSnapshot, LndClient};
use crate::shutdown::ShutdownHandle;

pub struct PubSub {
    source: Arc<dyn DataSource>,
    invoices: Option<Arc<LndClient>>,
    interval: Duration,
}

impl PubSub {
    pub fn new(source: Arc<dyn DataSource>, interval: Duration) -> Self {
        Self {
            source,
            invoices: None,
            interval,
        }
    }

    /// Also follow the invoice stream of `client`.
    pub fn with_invoices(mut self, client: Arc<LndClient>) -> Self {
        self.invoices = Some(client);
        self
    }

    pub async fn run(self, events: mpsc::Sender<DomainEvent>, shutdown: ShutdownHandle) {
        tracing::debug!(interval = ?self.interval, "pubsub started");
        let ticker = watch_info(
            Arc::clone(&self.source),
            self.interval,
            events.clone(),
            shutdown.clone(),
        );
        let invoices = async {
            if let Some(client) = self.invoices.clone() {
                watch_invoices(client, self.interval, events.clone(), shutdown.clone()).await;
            }
        };
        tokio::join!(ticker, invoices);
        tracing::debug!("pubsub stopped");
    }
}

/// Hand every event to `emit` until the producers stop, then report how
/// the transport task ended. A panicked transport comes back as `Err`.
pub async fn drain_events(
    mut events: mpsc::Receiver<DomainEvent>,
    transport: JoinHandle<()>,
    mut emit: impl FnMut(DomainEvent),
) -> Result<(), JoinError> {
    while let Some(event) = events.recv().await {
        emit(event);
    }
    transport.await
}

/// Event kinds implied by the change from `old` to `new`.
///
/// Block height and peer count trigger on any change; channel counters only
/// when they grow.
pub fn info_changes(old: &InfoSnapshot, new: &InfoSnapshot) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    if old.block_height != new.block_height {
        kinds.push(EventKind::BlockReceived);
    }
    if old.num_peers != new.num_peers {
        kinds.push(EventKind::PeerUpdated);
    }
    if old.num_pending_channels < new.num_pending_channels {
        kinds.push(EventKind::ChannelPending);
    }
    if old.num_active_channels < new.num_active_channels {
        kinds.push(EventKind::ChannelActive);
    }
    if old.num_inactive_channels < new.num_inactive_channels {
        kinds.push(EventKind::ChannelInactive);
    }
    kinds
}

async fn watch_info(
    source: Arc<dyn DataSource>,
    interval: Duration,
    events: mpsc::Sender<DomainEvent>,
    shutdown: ShutdownHandle,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last: Option<InfoSnapshot> = None;

    loop {
        tokio::select! {
            _ = shutdown.wait() => return,
            _ = ticker.tick() => {}
        }

        let info = match source.get_info().await {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!(error = %err, "pubsub: get_info failed");
                continue;
            }
        };

        // The first observation is the baseline.
        if let Some(previous) = last.as_ref() {
            for kind in info_changes(previous, &info) {
                if events.send(DomainEvent::new(kind)).await.is_err() {
                    return;
                }
            }
        }
        last = Some(info);
    }
}

async fn watch_invoices(
    client: Arc<LndClient>,
    retry_delay: Duration,
    events: mpsc::Sender<DomainEvent>,
    shutdown: ShutdownHandle,
) {
    while !shutdown.is_shutting_down() {
        match client.subscribe_invoices().await {
            Ok(mut stream) => {
                let mut lines = LineBuffer::default();
                loop {
                    let chunk = tokio::select! {
                        _ = shutdown.wait() => return,
                        chunk = stream.next() => chunk,
                    };
                    let chunk = match chunk {
                        Some(Ok(chunk)) => chunk,
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "pubsub: invoice stream failed");
                            break;
                        }
                        None => {
                            tracing::debug!("pubsub: invoice stream closed");
                            break;
                        }
                    };
                    for line in lines.push(&chunk) {
                        match parse_invoice_update(&line) {
                            Ok(true) => {
                                let event = DomainEvent::new(EventKind::InvoiceSettled);
                                if events.send(event).await.is_err() {
                                    return;
                                }
                            }
                            Ok(false) => {}
                            Err(err) => tracing::warn!(error = %err, "pubsub: bad invoice update"),
                        }
                    }
                }
            }
            Err(err) => tracing::warn!(error = %err, "pubsub: invoice subscription failed"),
        }

        tokio::select! {
            _ = shutdown.wait() => return,
            _ = tokio::time::sleep(retry_delay) => {}
        }
    }
}

/// Splits a chunked byte stream into newline-terminated messages.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = line.trim_ascii();
            if !line.is_empty() {
                lines.push(line.to_vec());
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{ChannelSummary, ChannelsBalance, DataSourceError, WalletBalance};
    use crate::shutdown::ShutdownCoordinator;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    fn info(height: u32, peers: u32, pending: u32, active: u32, inactive: u32) -> InfoSnapshot {
        InfoSnapshot {
            block_height: height,
            num_peers: peers,
            num_pending_channels: pending,
            num_active_channels: active,
            num_inactive_channels: inactive,
            ..InfoSnapshot::default()
        }
    }

    #[tokio::test]
    async fn drain_reports_panicked_transport() {
        let (tx, rx) = mpsc::channel(4);
        let transport = tokio::spawn(async move {
            let _ = tx.send(DomainEvent::new(EventKind::BlockReceived)).await;
            panic!("ticker died");
        });

        let mut seen = Vec::new();
        let result = drain_events(rx, transport, |event| seen.push(event.kind())).await;
        assert_eq!(seen, vec![EventKind::BlockReceived]);
        assert!(result.is_err_and(|err| err.is_panic()));
    }

    #[tokio::test]
    async fn drain_ends_cleanly_with_transport() {
        let (tx, rx) = mpsc::channel(4);
        let transport = tokio::spawn(async move {
            let _ = tx.send(DomainEvent::new(EventKind::InvoiceSettled)).await;
        });

        let mut count = 0;
        let result = drain_events(rx, transport, |_| count += 1).await;
        assert_eq!(count, 1);
        assert!(result.is_ok());
    }

    #[test]
    fn unchanged_info_emits_nothing() {
        let a = info(100, 3, 0, 2, 1);
        assert!(info_changes(&a, &a.clone()).is_empty());
    }

    #[test]
    fn new_block_and_peer_change() {
        let kinds = info_changes(&info(100, 3, 0, 2, 1), &info(101, 2, 0, 2, 1));
        assert_eq!(kinds, vec![EventKind::BlockReceived, EventKind::PeerUpdated]);
    }

    #[test]
    fn channel_counters_only_fire_on_growth() {
        let kinds = info_changes(&info(100, 3, 1, 2, 1), &info(100, 3, 2, 3, 2));
        assert_eq!(
            kinds,
            vec![
                EventKind::ChannelPending,
                EventKind::ChannelActive,
                EventKind::ChannelInactive,
            ]
        );
        assert!(info_changes(&info(100, 3, 2, 3, 2), &info(100, 3, 1, 2, 1)).is_empty());
    }

    #[test]
    fn line_buffer_joins_split_chunks() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(br#"{"result":{"state":"#).is_empty());
        let lines = buffer.push(b"\"SETTLED\"}}\n{\"result\":{}}\n\n{\"par");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], br#"{"result":{"state":"SETTLED"}}"#.to_vec());
        assert_eq!(buffer.push(b"tial\":1}\r\n").len(), 1);
    }

    struct Heights {
        heights: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl DataSource for Heights {
        async fn get_info(&self) -> Result<InfoSnapshot, DataSourceError> {
            let mut heights = self.heights.lock();
            if heights.is_empty() {
                return Err(DataSourceError::Unavailable {
                    message: "exhausted".to_string(),
                });
            }
            Ok(info(heights.remove(0), 1, 0, 0, 0))
        }

        async fn get_wallet_balance(&self) -> Result<WalletBalance, DataSourceError> {
            Ok(WalletBalance::default())
        }

        async fn get_channels_balance(&self) -> Result<ChannelsBalance, DataSourceError> {
            Ok(ChannelsBalance::default())
        }

        async fn list_channels(&self) -> Result<Vec<ChannelSummary>, DataSourceError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn ticker_reports_new_blocks_after_baseline() {
        let source = Arc::new(Heights {
            heights: Mutex::new(vec![10, 10, 11]),
        });
        let coordinator = ShutdownCoordinator::new();
        let (tx, mut rx) = mpsc::channel(8);
        let pubsub = PubSub::new(source, Duration::from_millis(5));
        let task = tokio::spawn(pubsub.run(tx, coordinator.handle()));

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("event in time")
            .expect("channel open");
        assert_eq!(event.kind(), EventKind::BlockReceived);

        coordinator.signal();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("pubsub stops")
            .expect("task ok");
        assert!(rx.recv().await.is_none());
    }
}
