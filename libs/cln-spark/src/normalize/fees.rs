use std::collections::HashMap;

use anyhow::{Context, Result};

use spark_primitives::common_schemas::{MsatAmount, ShortChannelId};
use spark_primitives::remote::{
    ChannelPolicy, Forward, GetInfoResponse, ListChannelsResponse, ListPeersResponse,
    SetChannelFeeResponse,
};
use spark_primitives::wallet::{ChannelFee, FeeSummary, FeeUpdate};

const DAY: i64 = 24 * 60 * 60;

/// The start of each reporting window as a unix timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeWindows {
    pub day: f64,
    pub week: f64,
    pub month: f64,
}

impl FeeWindows {
    /// The windows ending at `now` (unix timestamp in seconds)
    pub fn ending_at(now: i64) -> Self {
        Self {
            day: (now - DAY) as f64,
            week: (now - 7 * DAY) as f64,
            month: (now - 30 * DAY) as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardedFees {
    pub day: MsatAmount,
    pub week: MsatAmount,
    pub month: MsatAmount,
}

/// Sums the fees of settled forwards per window.
///
/// The windows are nested. A forward of the last day counts in all three.
pub fn forwarded_fees(forwards: &[Forward], windows: FeeWindows) -> Result<ForwardedFees> {
    let mut fees = ForwardedFees::default();
    let add = |sum: &mut MsatAmount, fee: &MsatAmount| -> Result<()> {
        *sum = sum.checked_add(fee).context("Forwarding fees overflow")?;
        Ok(())
    };

    for forward in forwards.iter().filter(|f| f.is_settled()) {
        let time = forward.resolved_time.unwrap_or(forward.received_time);
        if time > windows.day {
            add(&mut fees.day, &forward.fee)?;
        }
        if time > windows.week {
            add(&mut fees.week, &forward.fee)?;
        }
        if time > windows.month {
            add(&mut fees.month, &forward.fee)?;
        }
    }

    Ok(fees)
}

/// Lists the fee policy of each peer's first channel
pub fn channel_fees(peers: &ListPeersResponse, policies: &ListChannelsResponse) -> Vec<ChannelFee> {
    let by_scid: HashMap<ShortChannelId, &ChannelPolicy> = policies
        .channels
        .iter()
        .map(|p| (p.short_channel_id, p))
        .collect();

    peers
        .peers
        .iter()
        .filter_map(|peer| peer.channels.first())
        .map(|channel| {
            let policy = channel
                .short_channel_id
                .and_then(|scid| by_scid.get(&scid).copied());

            ChannelFee {
                chan_id: channel.channel_id.clone(),
                channel_point: channel.funding_txid.clone(),
                base_fee_msat: policy.map(|p| MsatAmount::new(p.base_fee_millisatoshi)),
                fee_rate: policy.map(|p| p.fee_per_millionth as f64 / 1_000_000.0),
            }
        })
        .collect()
}

pub fn fee_summary(
    info: &GetInfoResponse,
    forwards: &[Forward],
    peers: &ListPeersResponse,
    policies: &ListChannelsResponse,
    now: i64,
) -> Result<FeeSummary> {
    let forwarded = forwarded_fees(forwards, FeeWindows::ending_at(now))?;

    Ok(FeeSummary {
        channel_fees: channel_fees(peers, policies),
        total_fee_sum: info.msatoshi_fees_collected.to_sat(),
        day_fee_sum: forwarded.day.to_sat(),
        week_fee_sum: forwarded.week.to_sat(),
        month_fee_sum: forwarded.month.to_sat(),
    })
}

pub fn fee_update(response: SetChannelFeeResponse) -> FeeUpdate {
    FeeUpdate {
        base_fee_msat: MsatAmount::new(response.base),
        fee_rate_ppm: response.ppm,
        channels: response
            .channels
            .into_iter()
            .map(|c| c.channel_id)
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use spark_primitives::common_schemas::SatAmount;

    const NOW: i64 = 1_700_000_000;

    fn forward(status: &str, fee: u64, age: i64) -> serde_json::Value {
        json!({
            "status" : status,
            "in_channel" : "103x1x0",
            "out_channel" : "104x1x1",
            "fee" : fee,
            "received_time" : (NOW - age - 1) as f64,
            "resolved_time" : (NOW - age) as f64 + 0.5
        })
    }

    fn forwards(values: Vec<serde_json::Value>) -> Vec<Forward> {
        serde_json::from_value(serde_json::Value::Array(values)).unwrap()
    }

    #[test]
    fn windows_are_nested() {
        let forwards = forwards(vec![
            forward("settled", 1_000, 60),
            forward("settled", 2_000, 3 * DAY),
            forward("settled", 4_000, 20 * DAY),
            forward("settled", 8_000, 40 * DAY),
            forward("failed", 16_000, 60),
            forward("offered", 32_000, 60),
        ]);

        let fees = forwarded_fees(&forwards, FeeWindows::ending_at(NOW)).unwrap();
        assert_eq!(fees.day, MsatAmount::new(1_000));
        assert_eq!(fees.week, MsatAmount::new(3_000));
        assert_eq!(fees.month, MsatAmount::new(7_000));
    }

    #[test]
    fn order_of_forwards_does_not_matter() {
        let mut values = vec![
            forward("settled", 4_000, 20 * DAY),
            forward("settled", 1_000, 60),
            forward("settled", 8_000, 40 * DAY),
            forward("settled", 2_000, 3 * DAY),
        ];
        let unordered = forwarded_fees(&forwards(values.clone()), FeeWindows::ending_at(NOW)).unwrap();
        values.reverse();
        let reversed = forwarded_fees(&forwards(values), FeeWindows::ending_at(NOW)).unwrap();

        assert_eq!(unordered, reversed);
        assert_eq!(unordered.month, MsatAmount::new(7_000));
    }

    #[test]
    fn forwards_without_resolved_time_use_received_time() {
        let forwards = forwards(vec![json!({
            "status" : "settled",
            "fee" : "1500msat",
            "received_time" : (NOW - 10) as f64
        })]);

        let fees = forwarded_fees(&forwards, FeeWindows::ending_at(NOW)).unwrap();
        assert_eq!(fees.day, MsatAmount::new(1_500));
    }

    #[test]
    fn summary_attaches_channel_policies() {
        let info: GetInfoResponse = serde_json::from_value(json!({
            "id" : "02ff",
            "msatoshi_fees_collected" : 12_345
        }))
        .unwrap();
        let peers: ListPeersResponse = serde_json::from_value(json!({
            "peers" : [
                {"id" : "02aa", "channels" : [
                    {"state" : "CHANNELD_NORMAL", "short_channel_id" : "103x1x0", "channel_id" : "c0", "funding_txid" : "f0"},
                    {"state" : "CHANNELD_NORMAL", "short_channel_id" : "105x1x0", "channel_id" : "c9", "funding_txid" : "f9"}
                ]},
                {"id" : "02bb", "channels" : [
                    {"state" : "CHANNELD_AWAITING_LOCKIN", "channel_id" : "c1", "funding_txid" : "f1"}
                ]},
                {"id" : "02cc", "channels" : []}
            ]
        }))
        .unwrap();
        let policies: ListChannelsResponse = serde_json::from_value(json!({
            "channels" : [{
                "source" : "02ff",
                "destination" : "02aa",
                "short_channel_id" : "103x1x0",
                "base_fee_millisatoshi" : 1000,
                "fee_per_millionth" : 10,
                "active" : true
            }]
        }))
        .unwrap();

        let summary = fee_summary(&info, &[], &peers, &policies, NOW).unwrap();
        assert_eq!(summary.total_fee_sum, SatAmount::new(12));
        assert_eq!(summary.day_fee_sum, SatAmount::ZERO);
        assert_eq!(summary.channel_fees.len(), 2);

        let first = &summary.channel_fees[0];
        assert_eq!(first.chan_id, "c0");
        assert_eq!(first.channel_point, "f0");
        assert_eq!(first.base_fee_msat, Some(MsatAmount::new(1000)));
        assert_eq!(first.fee_rate, Some(0.00001));

        let pending = &summary.channel_fees[1];
        assert_eq!(pending.chan_id, "c1");
        assert_eq!(pending.base_fee_msat, None);
        assert_eq!(pending.fee_rate, None);
    }

    #[test]
    fn convert_fee_update() {
        let response: SetChannelFeeResponse = serde_json::from_value(json!({
            "base" : 1000,
            "ppm" : 10,
            "channels" : [{"peer_id" : "02aa", "channel_id" : "c0", "short_channel_id" : "103x1x0"}]
        }))
        .unwrap();

        let update = fee_update(response);
        assert_eq!(update.base_fee_msat, MsatAmount::new(1000));
        assert_eq!(update.fee_rate_ppm, 10);
        assert_eq!(update.channels, vec!["c0".to_string()]);
    }
}
