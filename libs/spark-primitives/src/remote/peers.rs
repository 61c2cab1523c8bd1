use serde::{Deserialize, Serialize};

use crate::common_schemas::{MsatAmount, PublicKey, SatAmount, ShortChannelId};

pub const CHANNEL_STATE_NORMAL: &str = "CHANNELD_NORMAL";
pub const CHANNEL_STATE_AWAITING_LOCKIN: &str = "CHANNELD_AWAITING_LOCKIN";
pub const CHANNEL_STATE_ONCHAIN: &str = "ONCHAIN";
pub const CHANNEL_STATE_CLOSED: &str = "CLOSED";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListPeersResponse {
    #[serde(default)]
    pub peers: Vec<Peer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Peer {
    pub id: String,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub netaddr: Vec<String>,
    #[serde(default)]
    pub channels: Vec<PeerChannel>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeerChannel {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_channel_id: Option<ShortChannelId>,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub funding_txid: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub msatoshi_to_us: MsatAmount,
    #[serde(default)]
    pub msatoshi_total: MsatAmount,
    #[serde(default)]
    pub our_channel_reserve_satoshis: SatAmount,
    #[serde(default)]
    pub their_channel_reserve_satoshis: SatAmount,
    #[serde(default)]
    pub our_to_self_delay: u32,
    #[serde(default)]
    pub in_payments_offered: u64,
    #[serde(default)]
    pub in_msatoshi_fulfilled: MsatAmount,
    #[serde(default)]
    pub out_payments_offered: u64,
    #[serde(default)]
    pub out_msatoshi_fulfilled: MsatAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_to_addr: Option<String>,
}

impl PeerChannel {
    /// The channel is closed or being closed on-chain
    pub fn is_terminal(&self) -> bool {
        self.state == CHANNEL_STATE_ONCHAIN || self.state == CHANNEL_STATE_CLOSED
    }
}

/// `connect` takes positional arguments: `[id, host]`
#[derive(Debug, Clone, Serialize)]
#[serde(into = "Vec<String>")]
pub struct ConnectRequest {
    pub id: PublicKey,
    pub host: String,
}

impl From<ConnectRequest> for Vec<String> {
    fn from(request: ConnectRequest) -> Self {
        vec![request.id.to_hex(), request.host]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FundChannelRequest {
    pub id: PublicKey,
    /// Amount in satoshi
    pub amount: u64,
    pub feerate: String,
    pub announce: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FundChannelResponse {
    pub txid: String,
    #[serde(default)]
    pub tx: String,
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseRequest {
    pub id: String,
    /// Seconds to wait for a mutual close before closing unilaterally.
    /// Zero means wait forever.
    pub unilateraltimeout: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(default, rename = "type")]
    pub close_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListChannelsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListChannelsResponse {
    #[serde(default)]
    pub channels: Vec<ChannelPolicy>,
}

/// A half-channel from the gossip store, including its fee policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelPolicy {
    pub source: String,
    pub destination: String,
    pub short_channel_id: ShortChannelId,
    pub base_fee_millisatoshi: u64,
    pub fee_per_millionth: u64,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetChannelFeeRequest {
    /// A channel id, short channel id, peer id or "all"
    pub id: String,
    pub base: u64,
    pub ppm: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetChannelFeeResponse {
    pub base: u64,
    pub ppm: u32,
    #[serde(default)]
    pub channels: Vec<UpdatedChannel>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdatedChannel {
    pub peer_id: String,
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_channel_id: Option<ShortChannelId>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    const PUBKEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn deserialize_listpeers() {
        let value = json!({
            "peers" : [{
                "id" : PUBKEY,
                "connected" : true,
                "netaddr" : ["127.0.0.1:9735"],
                "channels" : [{
                    "state" : "CHANNELD_NORMAL",
                    "short_channel_id" : "103x1x0",
                    "channel_id" : "cc",
                    "funding_txid" : "dd",
                    "private" : false,
                    "msatoshi_to_us" : 5000000,
                    "to_us_msat" : "5000000msat",
                    "msatoshi_total" : "10000000msat",
                    "our_channel_reserve_satoshis" : 100,
                    "their_channel_reserve_satoshis" : 100,
                    "our_to_self_delay" : 144,
                    "in_payments_offered" : 2,
                    "in_msatoshi_fulfilled" : 3000,
                    "out_payments_offered" : 1,
                    "out_msatoshi_fulfilled" : 1000
                }]
            }, {
                "id" : PUBKEY,
                "connected" : false
            }]
        });

        let response: ListPeersResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.peers.len(), 2);
        assert!(response.peers[1].channels.is_empty());

        let channel = &response.peers[0].channels[0];
        assert_eq!(channel.msatoshi_to_us, MsatAmount::new(5_000_000));
        assert_eq!(channel.msatoshi_total, MsatAmount::new(10_000_000));
        assert!(!channel.is_terminal());
    }

    #[test]
    fn connect_uses_positional_params() {
        let request = ConnectRequest {
            id: PublicKey::from_hex(PUBKEY).unwrap(),
            host: "10.0.0.1:9735".to_string(),
        };

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!([PUBKEY, "10.0.0.1:9735"])
        );
    }

    #[test]
    fn list_channels_request_omits_missing_source() {
        let request = ListChannelsRequest { source: None };
        assert_eq!(serde_json::to_value(request).unwrap(), json!({}));
    }
}
