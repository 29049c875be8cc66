//! LND REST client.
//!
//! Talks to `lnd`'s REST proxy with the macaroon in the
//! `Grpc-Metadata-macaroon` header and the node's TLS certificate pinned as
//! a root. uint64 fields come back as JSON strings, so the wire structs
//! accept either form.

use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::{Certificate, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::NetworkConfig;

use super::error::DataSourceError;
use super::source::DataSource;
use super::types::{ChannelStatus, ChannelSummary, ChannelsBalance, InfoSnapshot, WalletBalance};

const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";

pub struct LndClient {
    client: Client,
    base_url: String,
    macaroon: String,
}

impl LndClient {
    /// Build a client from network settings, reading the certificate and
    /// macaroon from disk.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, DataSourceError> {
        let cert_path = config.cert_path();
        let cert_pem = fs::read(&cert_path).map_err(|source| DataSourceError::Credentials {
            path: cert_path.clone(),
            source,
        })?;
        let certificate =
            Certificate::from_pem(&cert_pem).map_err(|e| DataSourceError::InvalidCertificate {
                path: cert_path.clone(),
                message: e.to_string(),
            })?;

        let macaroon_path = config.macaroon_path();
        let macaroon = fs::read(&macaroon_path).map_err(|source| DataSourceError::Credentials {
            path: macaroon_path,
            source,
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.conn_timeout_secs))
            .add_root_certificate(certificate)
            .build()
            .map_err(|source| DataSourceError::Request {
                endpoint: config.address.clone(),
                source,
            })?;

        Ok(Self::with_client(client, &config.address, &macaroon))
    }

    pub fn with_client(client: Client, address: &str, macaroon: &[u8]) -> Self {
        Self {
            client,
            base_url: address.trim_end_matches('/').to_string(),
            macaroon: hex::encode(macaroon),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataSourceError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header(MACAROON_HEADER, &self.macaroon)
            .send()
            .await
            .map_err(|source| DataSourceError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| DataSourceError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(DataSourceError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        decode(path, &body)
    }

    /// Open the invoice subscription stream.
    ///
    /// Yields raw body chunks; callers split them into newline-delimited
    /// JSON messages and decode each with [`parse_invoice_update`].
    pub async fn subscribe_invoices(
        &self,
    ) -> Result<BoxStream<'static, Result<Vec<u8>, DataSourceError>>, DataSourceError> {
        const PATH: &str = "/v1/invoices/subscribe";
        let response = self
            .client
            .get(format!("{}{}", self.base_url, PATH))
            .header(MACAROON_HEADER, &self.macaroon)
            .send()
            .await
            .map_err(|source| DataSourceError::Request {
                endpoint: PATH.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(DataSourceError::Status {
                endpoint: PATH.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|source| DataSourceError::Request {
                        endpoint: PATH.to_string(),
                        source,
                    })
            })
            .boxed())
    }
}

#[async_trait]
impl DataSource for LndClient {
    async fn get_info(&self) -> Result<InfoSnapshot, DataSourceError> {
        let info: GetInfoResponse = self.get("/v1/getinfo").await?;
        Ok(info.into())
    }

    async fn get_wallet_balance(&self) -> Result<WalletBalance, DataSourceError> {
        let balance: WalletBalanceResponse = self.get("/v1/balance/blockchain").await?;
        Ok(balance.into())
    }

    async fn get_channels_balance(&self) -> Result<ChannelsBalance, DataSourceError> {
        let balance: ChannelBalanceResponse = self.get("/v1/balance/channels").await?;
        Ok(balance.into())
    }

    async fn list_channels(&self) -> Result<Vec<ChannelSummary>, DataSourceError> {
        let open: ListChannelsResponse = self.get("/v1/channels").await?;
        let pending: PendingChannelsResponse = self.get("/v1/channels/pending").await?;
        Ok(merge_channels(open, pending))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, DataSourceError> {
    serde_json::from_slice(body).map_err(|e| DataSourceError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}

/// Decode one message from the invoice subscription stream.
///
/// Returns `Ok(true)` for a settled invoice, `Ok(false)` for any other
/// invoice update.
pub fn parse_invoice_update(line: &[u8]) -> Result<bool, DataSourceError> {
    #[derive(Deserialize)]
    struct Envelope {
        result: Option<Invoice>,
        error: Option<serde_json::Value>,
    }

    #[derive(Deserialize)]
    struct Invoice {
        #[serde(default)]
        state: String,
        #[serde(default)]
        settled: bool,
    }

    let envelope: Envelope = decode("/v1/invoices/subscribe", line)?;
    if let Some(error) = envelope.error {
        return Err(DataSourceError::Unavailable {
            message: error.to_string(),
        });
    }
    Ok(envelope
        .result
        .is_some_and(|invoice| invoice.settled || invoice.state == "SETTLED"))
}

fn merge_channels(open: ListChannelsResponse, pending: PendingChannelsResponse) -> Vec<ChannelSummary> {
    let mut channels: Vec<ChannelSummary> = open.channels.into_iter().map(Into::into).collect();
    channels.extend(
        pending
            .pending_open_channels
            .into_iter()
            .map(|pending| pending.channel.into()),
    );
    channels
}

// -- wire types ---------------------------------------------------------------

mod wire_int {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    pub fn signed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(value),
            Raw::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }

    pub fn unsigned<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => u64::try_from(value).map_err(D::Error::custom),
            Raw::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetInfoResponse {
    identity_pubkey: String,
    alias: String,
    version: String,
    block_height: u32,
    block_hash: String,
    synced_to_chain: bool,
    num_peers: u32,
    num_active_channels: u32,
    num_inactive_channels: u32,
    num_pending_channels: u32,
}

impl From<GetInfoResponse> for InfoSnapshot {
    fn from(info: GetInfoResponse) -> Self {
        Self {
            alias: info.alias,
            pubkey: info.identity_pubkey,
            version: info.version,
            block_height: info.block_height,
            block_hash: info.block_hash,
            synced: info.synced_to_chain,
            num_peers: info.num_peers,
            num_active_channels: info.num_active_channels,
            num_inactive_channels: info.num_inactive_channels,
            num_pending_channels: info.num_pending_channels,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WalletBalanceResponse {
    #[serde(default, deserialize_with = "wire_int::signed")]
    total_balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    confirmed_balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    unconfirmed_balance: i64,
}

impl From<WalletBalanceResponse> for WalletBalance {
    fn from(balance: WalletBalanceResponse) -> Self {
        Self {
            total: balance.total_balance,
            confirmed: balance.confirmed_balance,
            unconfirmed: balance.unconfirmed_balance,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChannelBalanceResponse {
    #[serde(default, deserialize_with = "wire_int::signed")]
    balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    pending_open_balance: i64,
}

impl From<ChannelBalanceResponse> for ChannelsBalance {
    fn from(balance: ChannelBalanceResponse) -> Self {
        Self {
            balance: balance.balance,
            pending_open_balance: balance.pending_open_balance,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListChannelsResponse {
    #[serde(default)]
    channels: Vec<WireChannel>,
}

#[derive(Debug, Default, Deserialize)]
struct WireChannel {
    #[serde(default)]
    active: bool,
    #[serde(default)]
    remote_pubkey: String,
    #[serde(default)]
    channel_point: String,
    #[serde(default, deserialize_with = "wire_int::unsigned")]
    chan_id: u64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    capacity: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    local_balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    remote_balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    total_satoshis_sent: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    total_satoshis_received: i64,
    #[serde(default, deserialize_with = "wire_int::unsigned")]
    num_updates: u64,
    #[serde(default)]
    private: bool,
}

impl From<WireChannel> for ChannelSummary {
    fn from(channel: WireChannel) -> Self {
        Self {
            id: channel.chan_id,
            status: if channel.active {
                ChannelStatus::Active
            } else {
                ChannelStatus::Inactive
            },
            remote_pubkey: channel.remote_pubkey,
            channel_point: channel.channel_point,
            capacity: channel.capacity,
            local_balance: channel.local_balance,
            remote_balance: channel.remote_balance,
            total_sent: channel.total_satoshis_sent,
            total_received: channel.total_satoshis_received,
            num_updates: channel.num_updates,
            private: channel.private,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PendingChannelsResponse {
    #[serde(default)]
    pending_open_channels: Vec<WirePendingOpen>,
}

#[derive(Debug, Default, Deserialize)]
struct WirePendingOpen {
    #[serde(default)]
    channel: WirePendingChannel,
}

#[derive(Debug, Default, Deserialize)]
struct WirePendingChannel {
    #[serde(default)]
    remote_node_pub: String,
    #[serde(default)]
    channel_point: String,
    #[serde(default, deserialize_with = "wire_int::signed")]
    capacity: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    local_balance: i64,
    #[serde(default, deserialize_with = "wire_int::signed")]
    remote_balance: i64,
    #[serde(default)]
    private: bool,
}

impl From<WirePendingChannel> for ChannelSummary {
    fn from(channel: WirePendingChannel) -> Self {
        Self {
            id: 0,
            status: ChannelStatus::Opening,
            remote_pubkey: channel.remote_node_pub,
            channel_point: channel.channel_point,
            capacity: channel.capacity,
            local_balance: channel.local_balance,
            remote_balance: channel.remote_balance,
            private: channel.private,
            ..ChannelSummary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getinfo_tolerates_missing_fields() {
        let info: GetInfoResponse = decode(
            "/v1/getinfo",
            br#"{"alias":"bob","block_height":812345,"num_peers":4,"synced_to_chain":true}"#,
        )
        .expect("decode");
        let info = InfoSnapshot::from(info);
        assert_eq!(info.alias, "bob");
        assert_eq!(info.block_height, 812345);
        assert_eq!(info.num_peers, 4);
        assert!(info.synced);
        assert_eq!(info.num_pending_channels, 0);
    }

    #[test]
    fn balances_accept_string_encoded_integers() {
        let balance: WalletBalanceResponse = decode(
            "/v1/balance/blockchain",
            br#"{"total_balance":"150000","confirmed_balance":100000,"unconfirmed_balance":"50000"}"#,
        )
        .expect("decode");
        let balance = WalletBalance::from(balance);
        assert_eq!(balance.total, 150_000);
        assert_eq!(balance.confirmed, 100_000);
        assert_eq!(balance.unconfirmed, 50_000);
    }

    #[test]
    fn rejects_non_numeric_balance() {
        let result: Result<ChannelBalanceResponse, _> =
            decode("/v1/balance/channels", br#"{"balance":"lots"}"#);
        assert!(matches!(result, Err(DataSourceError::Decode { .. })));
    }

    #[test]
    fn merges_open_then_pending_channels() {
        let open: ListChannelsResponse = decode(
            "/v1/channels",
            br#"{"channels":[
                {"active":true,"remote_pubkey":"02aa","chan_id":"773526505578627073","capacity":"1000000","local_balance":"400000","remote_balance":"590000","num_updates":"12"},
                {"remote_pubkey":"03bb","chan_id":"1","capacity":"20000"}
            ]}"#,
        )
        .expect("decode open");
        let pending: PendingChannelsResponse = decode(
            "/v1/channels/pending",
            br#"{"pending_open_channels":[{"channel":{"remote_node_pub":"02cc","capacity":"50000","local_balance":"50000"}}]}"#,
        )
        .expect("decode pending");

        let channels = merge_channels(open, pending);
        assert_eq!(channels.len(), 3);
        assert_eq!(channels[0].id, 773526505578627073);
        assert_eq!(channels[0].status, ChannelStatus::Active);
        assert_eq!(channels[0].num_updates, 12);
        assert_eq!(channels[1].status, ChannelStatus::Inactive);
        assert_eq!(channels[2].status, ChannelStatus::Opening);
        assert_eq!(channels[2].remote_pubkey, "02cc");
        assert_eq!(channels[2].id, 0);
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(br#"{"code":2,"message":"permission denied"}"#),
            "permission denied"
        );
        assert_eq!(error_message(b"  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn invoice_update_reports_settled_only() {
        assert!(parse_invoice_update(br#"{"result":{"state":"SETTLED","value":"100"}}"#).unwrap());
        assert!(parse_invoice_update(br#"{"result":{"settled":true}}"#).unwrap());
        assert!(!parse_invoice_update(br#"{"result":{"state":"OPEN"}}"#).unwrap());
        assert!(parse_invoice_update(br#"{"error":{"code":2,"message":"eof"}}"#).is_err());
    }

    #[test]
    fn macaroon_is_hex_encoded() {
        let client = LndClient::with_client(Client::new(), "https://localhost:8080/", &[0xde, 0xad]);
        assert_eq!(client.macaroon, "dead");
        assert_eq!(client.base_url, "https://localhost:8080");
    }
}
