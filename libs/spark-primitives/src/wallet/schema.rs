use serde::{Deserialize, Serialize};

use crate::common_schemas::{digits, sat_as_string, MsatAmount, SatAmount};
use crate::remote::FundOutput;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<FundOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelsResponse {
    pub channels: Vec<Channel>,
}

/// A channel as shown by the wallet. Amounts and counts are strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub active: bool,
    pub remote_pubkey: String,
    pub channel_point: String,
    pub chan_id: String,
    #[serde(serialize_with = "sat_as_string")]
    pub capacity: SatAmount,
    #[serde(serialize_with = "sat_as_string")]
    pub local_balance: SatAmount,
    #[serde(serialize_with = "sat_as_string")]
    pub remote_balance: SatAmount,
    #[serde(serialize_with = "sat_as_string")]
    pub total_satoshis_sent: SatAmount,
    #[serde(serialize_with = "sat_as_string")]
    pub total_satoshis_received: SatAmount,
    #[serde(with = "digits")]
    pub num_updates: u64,
    pub csv_delay: u32,
    pub private: bool,
    #[serde(serialize_with = "sat_as_string")]
    pub local_chan_reserve_sat: SatAmount,
    #[serde(serialize_with = "sat_as_string")]
    pub remote_chan_reserve_sat: SatAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainBalance {
    pub total_balance: SatAmount,
    pub confirmed_balance: SatAmount,
    pub unconfirmed_balance: SatAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightningBalance {
    pub balance: SatAmount,
    pub pending_open_balance: SatAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_preimage: Option<String>,
    pub r_hash: String,
    /// `None` for invoices that accept any amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_msat: Option<MsatAmount>,
    pub settled: bool,
    pub creation_date: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_date: Option<u64>,
    pub payment_request: String,
    pub expiry: u64,
    pub amt_paid: SatAmount,
    pub amt_paid_sat: SatAmount,
    pub amt_paid_msat: MsatAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub payment_request: String,
    pub r_hash: String,
    pub expires_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentsResponse {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_preimage: Option<String>,
    pub status: String,
    pub creation_date: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_request: Option<String>,
    pub value: SatAmount,
    pub value_msat: MsatAmount,
    /// Known once the amount delivered to the destination is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_msat: Option<MsatAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub payment_hash: String,
    pub payment_preimage: String,
    pub status: String,
    pub value_msat: MsatAmount,
    pub fee_msat: MsatAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedPaymentRequest {
    pub destination: String,
    pub payment_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_satoshis: Option<SatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_msat: Option<MsatAmount>,
    pub timestamp: u64,
    pub expiry: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cltv_expiry: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentCoins {
    pub txid: String,
    pub tx: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenedChannel {
    pub funding_txid_str: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedPeer {
    pub pub_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseChannelResponse {
    pub chan_close: ChannelCloseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCloseStatus {
    pub success: bool,
}

impl CloseChannelResponse {
    pub fn success() -> Self {
        Self {
            chan_close: ChannelCloseStatus { success: true },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfoResponse {
    pub node: Option<NodeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<u64>,
    pub pub_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub addresses: Vec<NetworkAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddress {
    pub network: String,
    pub addr: String,
}

impl NetworkAddress {
    pub fn tcp(addr: String) -> Self {
        Self {
            network: "tcp".to_string(),
            addr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyNodeInfo {
    pub identity_pubkey: String,
    pub alias: String,
    pub color: String,
    pub num_peers: u32,
    pub num_pending_channels: u32,
    pub num_active_channels: u32,
    pub num_inactive_channels: u32,
    pub block_height: u32,
    pub network: String,
    pub version: String,
    /// `pubkey@host:port` for every announced address
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub channel_fees: Vec<ChannelFee>,
    pub total_fee_sum: SatAmount,
    pub day_fee_sum: SatAmount,
    pub week_fee_sum: SatAmount,
    pub month_fee_sum: SatAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFee {
    pub chan_id: String,
    pub channel_point: String,
    /// Absent if the channel has no announced fee policy (yet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_msat: Option<MsatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeUpdate {
    pub base_fee_msat: MsatAmount,
    pub fee_rate_ppm: u32,
    /// The channel ids of all updated channels
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub total_fees: SatAmount,
}
