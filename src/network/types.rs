//! Node state as seen by the dashboard.
//!
//! These are plain values; the data source builds them and the model store
//! swaps them in whole.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSnapshot {
    pub alias: String,
    pub pubkey: String,
    pub version: String,
    pub block_height: u32,
    pub block_hash: String,
    pub synced: bool,
    pub num_peers: u32,
    pub num_active_channels: u32,
    pub num_inactive_channels: u32,
    pub num_pending_channels: u32,
}

/// On-chain wallet balance in satoshis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletBalance {
    pub total: i64,
    pub confirmed: i64,
    pub unconfirmed: i64,
}

/// Aggregate balance held in channels, in satoshis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelsBalance {
    pub balance: i64,
    pub pending_open_balance: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelStatus {
    #[default]
    Active,
    Inactive,
    Opening,
}

impl ChannelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelStatus::Active => "active",
            ChannelStatus::Inactive => "inactive",
            ChannelStatus::Opening => "opening",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSummary {
    /// Short channel id; zero while the funding transaction is unconfirmed.
    pub id: u64,
    pub status: ChannelStatus,
    pub remote_pubkey: String,
    pub channel_point: String,
    pub capacity: i64,
    pub local_balance: i64,
    pub remote_balance: i64,
    pub total_sent: i64,
    pub total_received: i64,
    pub num_updates: u64,
    pub private: bool,
}
