//! Configuration loading.
//!
//! `~/.lntop/config.toml` by default; every section and field is optional.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    expand_home, Config, KeysConfig, LoggerConfig, LoggerKind, NetworkConfig, UiConfig,
};
