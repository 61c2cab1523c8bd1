use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common_schemas::{SatAmount, ShortChannelId};

pub const OUTPUT_STATUS_CONFIRMED: &str = "confirmed";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListFundsResponse {
    #[serde(default)]
    pub outputs: Vec<FundOutput>,
    #[serde(default)]
    pub channels: Vec<FundChannel>,
}

/// An on-chain output owned by the node.
///
/// The wallet shows these as transactions. Fields we don't interpret
/// are kept in `extra` so they can be handed to the wallet unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FundOutput {
    pub txid: String,
    pub output: u32,
    /// Value in satoshi
    pub value: u64,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FundOutput {
    pub fn is_confirmed(&self) -> bool {
        self.status == OUTPUT_STATUS_CONFIRMED
    }

    pub fn value_sat(&self) -> SatAmount {
        SatAmount::new(self.value)
    }
}

/// A channel as reported by `listfunds`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FundChannel {
    pub peer_id: String,
    pub state: String,
    /// Our side of the channel
    pub channel_sat: SatAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_total_sat: Option<SatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_channel_id: Option<ShortChannelId>,
    #[serde(default)]
    pub funding_txid: String,
    #[serde(default)]
    pub connected: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithdrawRequest {
    pub destination: String,
    /// Amount in satoshi
    pub satoshi: u64,
    pub feerate: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithdrawResponse {
    pub txid: String,
    #[serde(default)]
    pub tx: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewAddrResponse {
    // Older nodes use `address`. More recent ones return `bech32`
    #[serde(alias = "bech32")]
    pub address: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_listfunds() {
        let value = json!({
            "outputs" : [
                {
                    "txid" : "aa",
                    "output" : 0,
                    "value" : 100,
                    "amount_msat" : "100000msat",
                    "address" : "bcrt1qexample",
                    "status" : "confirmed",
                    "blockheight" : 101
                }
            ],
            "channels" : [
                {
                    "peer_id" : "02aa",
                    "connected" : true,
                    "state" : "CHANNELD_NORMAL",
                    "short_channel_id" : "103x1x0",
                    "channel_sat" : 5000,
                    "our_amount_msat" : "5000000msat",
                    "channel_total_sat" : 10000,
                    "funding_txid" : "bb"
                }
            ]
        });

        let funds: ListFundsResponse = serde_json::from_value(value).unwrap();
        assert_eq!(funds.outputs.len(), 1);
        assert!(funds.outputs[0].is_confirmed());
        assert_eq!(funds.outputs[0].extra.get("blockheight"), Some(&json!(101)));
        assert_eq!(funds.channels[0].channel_sat, SatAmount::new(5000));
    }

    #[test]
    fn fund_output_is_passed_through_unchanged() {
        let value = json!({
            "txid" : "aa",
            "output" : 1,
            "value" : 100,
            "address" : "bcrt1qexample",
            "status" : "unconfirmed",
            "reserved" : false
        });

        let output: FundOutput = serde_json::from_value(value.clone()).unwrap();
        assert!(!output.is_confirmed());
        assert_eq!(serde_json::to_value(output).unwrap(), value);
    }

    #[test]
    fn withdraw_request_sends_amount_as_number() {
        let request = WithdrawRequest {
            destination: "bcrt1qexample".to_string(),
            satoshi: 1200,
            feerate: "2000perkb".to_string(),
        };

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"destination" : "bcrt1qexample", "satoshi" : 1200, "feerate" : "2000perkb"})
        );
    }

    #[test]
    fn newaddr_accepts_bech32_field() {
        let addr: NewAddrResponse = serde_json::from_value(json!({"bech32" : "bcrt1q"})).unwrap();
        assert_eq!(addr.address, "bcrt1q");
    }
}
