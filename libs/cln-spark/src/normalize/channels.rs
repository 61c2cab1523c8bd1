use anyhow::{Context, Result};

use spark_primitives::remote::{
    ConnectResponse, FundChannelResponse, ListPeersResponse, Peer, PeerChannel,
};
use spark_primitives::wallet::{Channel, ChannelsResponse, ConnectedPeer, OpenedChannel};

/// Picks the channel that represents a peer.
///
/// That is the first channel that isn't closed or closing. If all channels
/// are closed, the first channel is returned.
pub fn representative_channel(channels: &[PeerChannel]) -> Option<&PeerChannel> {
    channels
        .iter()
        .find(|c| !c.is_terminal())
        .or_else(|| channels.first())
}

/// One channel per peer. Peers without channels are skipped
pub fn channels(response: &ListPeersResponse) -> Result<ChannelsResponse> {
    let channels = response
        .peers
        .iter()
        .filter_map(|peer| representative_channel(&peer.channels).map(|c| (peer, c)))
        .map(|(peer, channel)| to_channel(peer, channel))
        .collect::<Result<Vec<_>>>()?;

    Ok(ChannelsResponse { channels })
}

fn to_channel(peer: &Peer, channel: &PeerChannel) -> Result<Channel> {
    let capacity = channel.msatoshi_total.to_sat();
    let local_balance = channel.msatoshi_to_us.to_sat();
    let remote_balance = capacity.checked_sub(&local_balance).with_context(|| {
        format!(
            "Channel {} with {} reports a local balance above its capacity",
            channel.channel_id, peer.id
        )
    })?;

    Ok(Channel {
        active: peer.connected,
        remote_pubkey: peer.id.clone(),
        channel_point: channel.funding_txid.clone(),
        chan_id: channel.channel_id.clone(),
        capacity,
        local_balance,
        remote_balance,
        total_satoshis_sent: channel.out_msatoshi_fulfilled.to_sat(),
        total_satoshis_received: channel.in_msatoshi_fulfilled.to_sat(),
        num_updates: channel
            .in_payments_offered
            .saturating_add(channel.out_payments_offered),
        csv_delay: channel.our_to_self_delay,
        private: channel.private,
        local_chan_reserve_sat: channel.our_channel_reserve_satoshis,
        remote_chan_reserve_sat: channel.their_channel_reserve_satoshis,
        close_address: channel.close_to_addr.clone(),
    })
}

pub fn opened_channel(response: FundChannelResponse) -> OpenedChannel {
    OpenedChannel {
        funding_txid_str: response.txid,
    }
}

pub fn connected_peer(response: ConnectResponse) -> ConnectedPeer {
    ConnectedPeer {
        pub_key: response.id,
    }
}
