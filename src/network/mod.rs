//! Access to the node's state.
//!
//! The dashboard only depends on the [`DataSource`] trait; [`LndClient`] is
//! the production implementation over LND's REST interface.

mod error;
mod lnd;
mod source;
mod types;

pub use error::DataSourceError;
pub use lnd::{parse_invoice_update, LndClient};
pub use source::DataSource;
pub use types::{ChannelStatus, ChannelSummary, ChannelsBalance, InfoSnapshot, WalletBalance};
