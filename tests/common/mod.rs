//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use lntop::models::{ModelStore, RefreshOp};
use lntop::network::{
    ChannelStatus, ChannelSummary, ChannelsBalance, DataSource, DataSourceError, InfoSnapshot,
    WalletBalance,
};
use lntop::ui::app::App;
use lntop::ui::controller::RedrawSink;
use lntop::ui::input::Keymap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// -- Data source mock ---------------------------------------------------------

/// In-memory data source that records which facet each call fetched and can
/// be told to fail specific ones.
#[derive(Default)]
pub struct MockSource {
    trace: Mutex<Vec<RefreshOp>>,
    failing: Mutex<HashSet<RefreshOp>>,
    info: Mutex<InfoSnapshot>,
    wallet: Mutex<WalletBalance>,
    channels_balance: Mutex<ChannelsBalance>,
    channels: Mutex<Vec<ChannelSummary>>,
}

impl MockSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_channels(count: u64) -> Arc<Self> {
        let source = Self::new();
        source.set_channels((1..=count).map(channel).collect());
        source
    }

    pub fn fail(&self, op: RefreshOp) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: RefreshOp) {
        self.failing.lock().remove(&op);
    }

    pub fn set_channels(&self, channels: Vec<ChannelSummary>) {
        *self.channels.lock() = channels;
    }

    pub fn set_info(&self, info: InfoSnapshot) {
        *self.info.lock() = info;
    }

    pub fn set_wallet(&self, wallet: WalletBalance) {
        *self.wallet.lock() = wallet;
    }

    /// Facets fetched so far, in call order.
    pub fn trace(&self) -> Vec<RefreshOp> {
        self.trace.lock().clone()
    }

    pub fn clear_trace(&self) {
        self.trace.lock().clear();
    }

    fn record(&self, op: RefreshOp) -> Result<(), DataSourceError> {
        self.trace.lock().push(op);
        if self.failing.lock().contains(&op) {
            return Err(DataSourceError::Unavailable {
                message: format!("{} failed", op.name()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn get_info(&self) -> Result<InfoSnapshot, DataSourceError> {
        self.record(RefreshOp::Info)?;
        Ok(self.info.lock().clone())
    }

    async fn get_wallet_balance(&self) -> Result<WalletBalance, DataSourceError> {
        self.record(RefreshOp::WalletBalance)?;
        Ok(*self.wallet.lock())
    }

    async fn get_channels_balance(&self) -> Result<ChannelsBalance, DataSourceError> {
        self.record(RefreshOp::ChannelsBalance)?;
        Ok(*self.channels_balance.lock())
    }

    async fn list_channels(&self) -> Result<Vec<ChannelSummary>, DataSourceError> {
        self.record(RefreshOp::Channels)?;
        Ok(self.channels.lock().clone())
    }
}

pub fn channel(id: u64) -> ChannelSummary {
    ChannelSummary {
        id,
        status: ChannelStatus::Active,
        remote_pubkey: format!("02peer{id:02}"),
        channel_point: format!("{id:064x}:0"),
        capacity: 1_000_000,
        local_balance: 400_000,
        remote_balance: 600_000,
        ..Default::default()
    }
}

// -- Redraw sink --------------------------------------------------------------

#[derive(Default)]
pub struct CountingRedraw {
    count: AtomicUsize,
}

impl CountingRedraw {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl RedrawSink for CountingRedraw {
    fn request_redraw(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// -- App helpers --------------------------------------------------------------

pub fn store(source: &Arc<MockSource>) -> Arc<ModelStore> {
    let source: Arc<dyn DataSource> = source.clone();
    Arc::new(ModelStore::new(source))
}

/// App over a bootstrapped store.
pub async fn make_app(source: &Arc<MockSource>) -> App {
    let models = store(source);
    models.bootstrap().await.expect("bootstrap");
    let mut app = App::new(models, Keymap::default());
    app.layout(120, 40);
    app
}

// -- Config helpers -----------------------------------------------------------

pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
