use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logger: LoggerConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    /// Logging disabled.
    Nope,
    /// Debug level.
    Development,
    /// Info level.
    #[default]
    Production,
}

/// Log sink settings. The dashboard owns the terminal, so logs go to a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggerConfig {
    #[serde(rename = "type", default)]
    pub kind: LoggerKind,
    /// Log file path (`~` is expanded).
    #[serde(default = "default_log_dest")]
    pub dest: PathBuf,
}

/// Connection settings for the node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Display name of the node.
    #[serde(default = "default_network_name")]
    pub name: String,
    /// Node implementation; only "lnd" is supported.
    #[serde(rename = "type", default = "default_network_type")]
    pub kind: String,
    /// REST endpoint (scheme + host + port).
    #[serde(default = "default_address")]
    pub address: String,
    /// TLS certificate path (`~` is expanded).
    #[serde(default = "default_cert")]
    pub cert: PathBuf,
    /// Macaroon path (`~` is expanded).
    #[serde(default = "default_macaroon")]
    pub macaroon: PathBuf,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_conn_timeout")]
    pub conn_timeout_secs: u64,
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Capacity of the domain event queue (default: 64).
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Node polling interval in seconds (default: 3).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Per-refresh timeout in seconds. Unset means refreshes may wait forever.
    #[serde(default)]
    pub refresh_timeout_secs: Option<u64>,
}

/// Key overrides, e.g. `quit = ["ctrl-c", "q"]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeysConfig {
    #[serde(default = "default_quit_keys")]
    pub quit: Vec<String>,
    #[serde(default = "default_help_keys")]
    pub help: Vec<String>,
}

fn default_log_dest() -> PathBuf {
    PathBuf::from("~/.lntop/lntop.log")
}

fn default_network_name() -> String {
    "lnd".to_string()
}

fn default_network_type() -> String {
    "lnd".to_string()
}

fn default_address() -> String {
    "https://127.0.0.1:8080".to_string()
}

fn default_cert() -> PathBuf {
    PathBuf::from("~/.lnd/tls.cert")
}

fn default_macaroon() -> PathBuf {
    PathBuf::from("~/.lnd/data/chain/bitcoin/mainnet/readonly.macaroon")
}

fn default_conn_timeout() -> u64 {
    5
}

fn default_event_buffer() -> usize {
    64
}

fn default_poll_interval() -> u64 {
    3
}

fn default_quit_keys() -> Vec<String> {
    vec!["ctrl-c".to_string(), "f10".to_string()]
}

fn default_help_keys() -> Vec<String> {
    vec!["f1".to_string()]
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            kind: LoggerKind::default(),
            dest: default_log_dest(),
        }
    }
}

impl LoggerConfig {
    pub fn dest_path(&self) -> PathBuf {
        expand_home(&self.dest)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network_name(),
            kind: default_network_type(),
            address: default_address(),
            cert: default_cert(),
            macaroon: default_macaroon(),
            conn_timeout_secs: default_conn_timeout(),
        }
    }
}

impl NetworkConfig {
    pub fn cert_path(&self) -> PathBuf {
        expand_home(&self.cert)
    }

    pub fn macaroon_path(&self) -> PathBuf {
        expand_home(&self.macaroon)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            poll_interval_secs: default_poll_interval(),
            refresh_timeout_secs: None,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            quit: default_quit_keys(),
            help: default_help_keys(),
        }
    }
}

/// Replace a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
