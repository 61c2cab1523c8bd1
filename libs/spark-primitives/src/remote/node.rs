use serde::{Deserialize, Serialize};

use crate::common_schemas::{MsatAmount, PublicKey, ShortChannelId};

pub const FORWARD_STATUS_SETTLED: &str = "settled";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetInfoResponse {
    pub id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub num_peers: u32,
    #[serde(default)]
    pub num_pending_channels: u32,
    #[serde(default)]
    pub num_active_channels: u32,
    #[serde(default)]
    pub num_inactive_channels: u32,
    #[serde(default)]
    pub address: Vec<NodeAddress>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub blockheight: u32,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub msatoshi_fees_collected: MsatAmount,
}

/// An address on which a node can be reached
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub address_type: String,
    #[serde(default)]
    pub address: String,
    pub port: u16,
}

impl NodeAddress {
    /// Formats the address as `host:port`.
    ///
    /// IPv6 addresses use the bracket notation `[host]:port`
    pub fn to_host_port(&self) -> String {
        if self.address_type == "ipv6" {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

/// `listnodes` takes positional arguments: `[id]`
#[derive(Debug, Clone, Serialize)]
#[serde(into = "Vec<String>")]
pub struct ListNodesRequest {
    pub id: PublicKey,
}

impl From<ListNodesRequest> for Vec<String> {
    fn from(request: ListNodesRequest) -> Self {
        vec![request.id.to_hex()]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListNodesResponse {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Node {
    pub nodeid: String,
    // Only known once the node has announced itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<u64>,
    #[serde(default)]
    pub addresses: Vec<NodeAddress>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListForwardsResponse {
    #[serde(default)]
    pub forwards: Vec<Forward>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Forward {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_channel: Option<ShortChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_channel: Option<ShortChannelId>,
    /// Fee earned in millisatoshi
    #[serde(default)]
    pub fee: MsatAmount,
    #[serde(default)]
    pub received_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_time: Option<f64>,
}

impl Forward {
    pub fn is_settled(&self) -> bool {
        self.status == FORWARD_STATUS_SETTLED
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetRouteRequest {
    pub id: PublicKey,
    pub msatoshi: u64,
    pub riskfactor: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetRouteResponse {
    #[serde(default)]
    pub route: Vec<RouteHop>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteHop {
    pub id: String,
    pub channel: ShortChannelId,
    /// The amount forwarded to this hop
    pub msatoshi: MsatAmount,
    #[serde(default)]
    pub delay: u32,
}
