//! In-memory snapshot of node state.
//!
//! The refresh task is the only writer; the render loop only reads. Every
//! facet lives behind its own `Arc` and a refresh swaps the pointer once the
//! new value is fully built, so a reader sees either the old value or the new
//! one and never a half-written facet. Locks are held only for the swap.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use thiserror::Error;

use crate::network::{
    ChannelSummary, ChannelsBalance, DataSource, DataSourceError, InfoSnapshot, WalletBalance,
};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("Channel index {index} out of range ({len} channels loaded)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One refreshable facet of the model store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshOp {
    Info,
    WalletBalance,
    ChannelsBalance,
    Channels,
}

impl RefreshOp {
    /// Startup order used by [`ModelStore::bootstrap`].
    pub const BOOTSTRAP: [RefreshOp; 4] = [
        RefreshOp::Info,
        RefreshOp::WalletBalance,
        RefreshOp::ChannelsBalance,
        RefreshOp::Channels,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RefreshOp::Info => "refresh_info",
            RefreshOp::WalletBalance => "refresh_wallet_balance",
            RefreshOp::ChannelsBalance => "refresh_channels_balance",
            RefreshOp::Channels => "refresh_channels",
        }
    }
}

/// Single-value cell with whole-value replacement.
struct Facet<T> {
    value: RwLock<Arc<T>>,
}

impl<T: Default> Facet<T> {
    fn new() -> Self {
        Self {
            value: RwLock::new(Arc::new(T::default())),
        }
    }
}

impl<T> Facet<T> {
    fn load(&self) -> Arc<T> {
        Arc::clone(&self.value.read())
    }

    fn store(&self, value: T) {
        *self.value.write() = Arc::new(value);
    }
}

/// Read-only view of the store handed to the render pass.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub info: Arc<InfoSnapshot>,
    pub wallet_balance: Arc<WalletBalance>,
    pub channels_balance: Arc<ChannelsBalance>,
    pub channels: Arc<Vec<ChannelSummary>>,
    pub current_channel: Option<usize>,
}

impl ModelSnapshot {
    /// The selected channel, if the index still points into the list.
    pub fn current_channel(&self) -> Option<&ChannelSummary> {
        self.current_channel.and_then(|index| self.channels.get(index))
    }
}

pub struct ModelStore {
    source: Arc<dyn DataSource>,
    refresh_timeout: Option<Duration>,
    info: Facet<InfoSnapshot>,
    wallet_balance: Facet<WalletBalance>,
    channels_balance: Facet<ChannelsBalance>,
    channels: Facet<Vec<ChannelSummary>>,
    current_channel: RwLock<Option<usize>>,
}

impl ModelStore {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            refresh_timeout: None,
            info: Facet::new(),
            wallet_balance: Facet::new(),
            channels_balance: Facet::new(),
            channels: Facet::new(),
            current_channel: RwLock::new(None),
        }
    }

    /// Bound every data source call; an elapsed call fails with
    /// [`DataSourceError::Timeout`] and leaves the facet untouched.
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            info: self.info.load(),
            wallet_balance: self.wallet_balance.load(),
            channels_balance: self.channels_balance.load(),
            channels: self.channels.load(),
            current_channel: *self.current_channel.read(),
        }
    }

    pub fn info(&self) -> Arc<InfoSnapshot> {
        self.info.load()
    }

    pub fn wallet_balance(&self) -> Arc<WalletBalance> {
        self.wallet_balance.load()
    }

    pub fn channels_balance(&self) -> Arc<ChannelsBalance> {
        self.channels_balance.load()
    }

    pub fn channels(&self) -> Arc<Vec<ChannelSummary>> {
        self.channels.load()
    }

    pub fn current_channel_index(&self) -> Option<usize> {
        *self.current_channel.read()
    }

    pub async fn refresh(&self, op: RefreshOp) -> Result<(), ModelError> {
        match op {
            RefreshOp::Info => self.refresh_info().await,
            RefreshOp::WalletBalance => self.refresh_wallet_balance().await,
            RefreshOp::ChannelsBalance => self.refresh_channels_balance().await,
            RefreshOp::Channels => self.refresh_channels().await,
        }
    }

    pub async fn refresh_info(&self) -> Result<(), ModelError> {
        let info = self.call("get_info", self.source.get_info()).await?;
        self.info.store(info);
        Ok(())
    }

    pub async fn refresh_wallet_balance(&self) -> Result<(), ModelError> {
        let balance = self
            .call("get_wallet_balance", self.source.get_wallet_balance())
            .await?;
        self.wallet_balance.store(balance);
        Ok(())
    }

    pub async fn refresh_channels_balance(&self) -> Result<(), ModelError> {
        let balance = self
            .call("get_channels_balance", self.source.get_channels_balance())
            .await?;
        self.channels_balance.store(balance);
        Ok(())
    }

    pub async fn refresh_channels(&self) -> Result<(), ModelError> {
        let channels = self.call("list_channels", self.source.list_channels()).await?;
        self.channels.store(channels);
        Ok(())
    }

    /// Select the channel shown by the detail view.
    pub fn set_current_channel(&self, index: usize) -> Result<(), ModelError> {
        let len = self.channels.load().len();
        if index >= len {
            return Err(ModelError::IndexOutOfRange { index, len });
        }
        *self.current_channel.write() = Some(index);
        Ok(())
    }

    /// Fill every facet once, in fixed order, stopping at the first failure.
    pub async fn bootstrap(&self) -> Result<(), ModelError> {
        for op in RefreshOp::BOOTSTRAP {
            self.refresh(op).await?;
            tracing::debug!(op = op.name(), "bootstrap step complete");
        }
        Ok(())
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, DataSourceError>>,
    ) -> Result<T, DataSourceError> {
        let Some(limit) = self.refresh_timeout else {
            return request.await;
        };
        match tokio::time::timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => Err(DataSourceError::Timeout {
                operation,
                seconds: limit.as_secs(),
            }),
        }
    }
}
