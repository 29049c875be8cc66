use async_trait::async_trait;

use super::error::DataSourceError;
use super::types::{ChannelSummary, ChannelsBalance, InfoSnapshot, WalletBalance};

/// Remote source of node state.
///
/// Every call may block for a network round trip and may fail. Callers
/// treat a single failure as final for that attempt; there is no retry.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn get_info(&self) -> Result<InfoSnapshot, DataSourceError>;

    async fn get_wallet_balance(&self) -> Result<WalletBalance, DataSourceError>;

    async fn get_channels_balance(&self) -> Result<ChannelsBalance, DataSourceError>;

    async fn list_channels(&self) -> Result<Vec<ChannelSummary>, DataSourceError>;
}
