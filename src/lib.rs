pub mod cli;
pub mod config;
pub mod events;
pub mod logging;
pub mod models;
pub mod network;
pub mod pubsub;
pub mod shutdown;
pub mod ui;
