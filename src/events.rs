//! Domain events emitted by the node subscription feed.

use std::fmt;

/// Kind of node state change carried by a [`DomainEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BlockReceived,
    ChannelPending,
    ChannelActive,
    ChannelInactive,
    InvoiceSettled,
    PeerUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::BlockReceived,
        EventKind::ChannelPending,
        EventKind::ChannelActive,
        EventKind::ChannelInactive,
        EventKind::InvoiceSettled,
        EventKind::PeerUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BlockReceived => "block.received",
            EventKind::ChannelPending => "channel.pending",
            EventKind::ChannelActive => "channel.active",
            EventKind::ChannelInactive => "channel.inactive",
            EventKind::InvoiceSettled => "invoice.settled",
            EventKind::PeerUpdated => "peer.updated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification that node state changed.
///
/// Produced by the subscription transport and consumed exactly once by the
/// refresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainEvent {
    kind: EventKind,
}

impl DomainEvent {
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl From<EventKind> for DomainEvent {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}
