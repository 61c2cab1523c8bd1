use spark_primitives::remote::{GetInfoResponse, ListNodesResponse};
use spark_primitives::wallet::{MyNodeInfo, NetworkAddress, NodeInfo, NodeInfoResponse};

/// `node` is `None` if the remote node doesn't know the requested node
pub fn node_info(response: ListNodesResponse) -> NodeInfoResponse {
    let node = response.nodes.into_iter().next().map(|node| NodeInfo {
        last_update: node.last_timestamp,
        pub_key: node.nodeid,
        alias: node.alias,
        color: node.color,
        addresses: node
            .addresses
            .iter()
            .map(|a| NetworkAddress::tcp(a.to_host_port()))
            .collect(),
    });

    NodeInfoResponse { node }
}

pub fn my_node_info(info: GetInfoResponse) -> MyNodeInfo {
    let uris = info
        .address
        .iter()
        .map(|a| format!("{}@{}", info.id, a.to_host_port()))
        .collect();

    MyNodeInfo {
        identity_pubkey: info.id,
        alias: info.alias,
        color: info.color,
        num_peers: info.num_peers,
        num_pending_channels: info.num_pending_channels,
        num_active_channels: info.num_active_channels,
        num_inactive_channels: info.num_inactive_channels,
        block_height: info.blockheight,
        network: info.network,
        version: info.version,
        uris,
    }
}
