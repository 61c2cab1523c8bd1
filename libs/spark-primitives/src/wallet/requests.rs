//! Typed requests for every wallet operation that takes arguments.
//!
//! Requests with named fields can be parsed from the wallet's JSON using
//! [`crate::validation::from_value`]. REST-style callers pass positional
//! url-parameters and use the `from_url_params` constructors instead.

use serde::{Deserialize, Serialize};

use crate::common_schemas::{FeeRate, MsatAmount, PublicKey, SatAmount};
use crate::validation::{RequestError, UrlParams};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCoinsRequest {
    /// The on-chain destination address
    pub addr: String,
    pub amount: SatAmount,
    pub sat_per_byte: FeeRate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub memo: String,
    pub value: SatAmount,
    /// Expiry in seconds. The node picks a default if absent
    #[serde(default)]
    pub expiry: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenChannelRequest {
    pub node_pubkey_string: PublicKey,
    pub satoshis: SatAmount,
    pub sat_per_byte: FeeRate,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectPeerRequest {
    pub addr: PeerAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerAddress {
    pub pubkey: PublicKey,
    pub host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayInvoiceRequest {
    pub payment_request: String,
    /// Only required for invoices that don't specify an amount
    #[serde(default)]
    pub amt: Option<SatAmount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFeesRequest {
    /// Update all channels. `channel_id` is ignored if set
    #[serde(default)]
    pub global: bool,
    #[serde(default, alias = "channelId")]
    pub channel_id: Option<String>,
    pub base_fee_msat: MsatAmount,
    /// Proportional fee. E.g. 0.000001 equals 1 ppm
    pub fee_rate: f64,
}

impl SetFeesRequest {
    /// The `id` understood by the remote node
    pub fn target(&self) -> Result<String, RequestError> {
        if self.global {
            return Ok("all".to_string());
        }

        match &self.channel_id {
            Some(channel_id) if !channel_id.is_empty() => Ok(channel_id.clone()),
            _ => Err(RequestError::invalid_param(
                "channel_id",
                "A channel_id is required unless global is set",
            )),
        }
    }

    /// The fee rate in parts per million
    pub fn fee_rate_ppm(&self) -> Result<u32, RequestError> {
        let ppm = (self.fee_rate * 1_000_000.0).round();
        if !ppm.is_finite() || ppm < 0.0 || ppm > f64::from(u32::MAX) {
            return Err(RequestError::invalid_param(
                "fee_rate",
                format!("Fee rate out of range: {}", self.fee_rate),
            ));
        }
        Ok(ppm as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseChannelRequest {
    pub channel_id: String,
    /// Close unilaterally if the peer doesn't cooperate within a minute
    #[serde(default)]
    pub force: bool,
}

impl CloseChannelRequest {
    pub fn from_url_params(params: &[String]) -> Result<Self, RequestError> {
        let params = UrlParams::new(params);
        Ok(Self {
            channel_id: params.required(0, "channel_id")?.to_string(),
            force: params.flag(1, "force")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfoRequest {
    pub pubkey: PublicKey,
}

impl NodeInfoRequest {
    pub fn from_url_params(params: &[String]) -> Result<Self, RequestError> {
        let params = UrlParams::new(params);
        Ok(Self {
            pubkey: params.parse(0, "pubkey")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub pubkey: PublicKey,
    pub amount: SatAmount,
}

impl RouteRequest {
    pub fn from_url_params(params: &[String]) -> Result<Self, RequestError> {
        let params = UrlParams::new(params);
        let amount: u64 = params.parse(1, "amount")?;
        Ok(Self {
            pubkey: params.parse(0, "pubkey")?,
            amount: SatAmount::new(amount),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodePaymentRequest {
    pub payment_request: String,
}

impl DecodePaymentRequest {
    pub fn from_url_params(params: &[String]) -> Result<Self, RequestError> {
        let params = UrlParams::new(params);
        Ok(Self {
            payment_request: params.required(0, "payment_request")?.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validation::from_value;
    use serde_json::json;

    const PUBKEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_open_channel_request() {
        let request: OpenChannelRequest = from_value(json!({
            "node_pubkey_string" : PUBKEY,
            "satoshis" : "100000",
            "sat_per_byte" : 2,
            "private" : true
        }))
        .unwrap();

        assert_eq!(request.satoshis, SatAmount::new(100_000));
        assert_eq!(request.sat_per_byte.to_perkb_string(), "2000perkb");
        assert!(request.private);
    }

    #[test]
    fn open_channel_request_rejects_invalid_pubkey() {
        let err = from_value::<OpenChannelRequest>(json!({
            "node_pubkey_string" : "not-a-key",
            "satoshis" : 1000,
            "sat_per_byte" : 2
        }))
        .unwrap_err();

        match err {
            RequestError::InvalidParam { property, .. } => {
                assert_eq!(property, "node_pubkey_string")
            }
            _ => panic!("Expected InvalidParam"),
        }
    }

    #[test]
    fn set_fees_target() {
        let mut request: SetFeesRequest = from_value(json!({
            "global" : true,
            "base_fee_msat" : 1000,
            "fee_rate" : 0.000001
        }))
        .unwrap();
        assert_eq!(request.target().unwrap(), "all");
        assert_eq!(request.fee_rate_ppm().unwrap(), 1);

        request.global = false;
        assert!(request.target().is_err());

        request.channel_id = Some("103x1x0".to_string());
        assert_eq!(request.target().unwrap(), "103x1x0");
    }

    #[test]
    fn set_fees_accepts_camel_case_channel_id() {
        let request: SetFeesRequest = from_value(json!({
            "channelId" : "abc",
            "base_fee_msat" : 1,
            "fee_rate" : 0.5
        }))
        .unwrap();

        assert_eq!(request.target().unwrap(), "abc");
        assert_eq!(request.fee_rate_ppm().unwrap(), 500_000);
    }

    #[test]
    fn set_fees_rejects_negative_rate() {
        let request = SetFeesRequest {
            global: true,
            channel_id: None,
            base_fee_msat: MsatAmount::new(0),
            fee_rate: -0.1,
        };
        assert!(request.fee_rate_ppm().is_err());
    }

    #[test]
    fn close_channel_from_url_params() {
        let request = CloseChannelRequest::from_url_params(&params(&["abc"])).unwrap();
        assert_eq!(
            request,
            CloseChannelRequest {
                channel_id: "abc".to_string(),
                force: false
            }
        );

        let request = CloseChannelRequest::from_url_params(&params(&["abc", "true"])).unwrap();
        assert!(request.force);

        assert!(CloseChannelRequest::from_url_params(&[]).is_err());
    }

    #[test]
    fn route_request_from_url_params() {
        let request = RouteRequest::from_url_params(&params(&[PUBKEY, "1500"])).unwrap();
        assert_eq!(request.amount, SatAmount::new(1500));
        assert_eq!(request.pubkey.to_hex(), PUBKEY);

        let err = RouteRequest::from_url_params(&params(&[PUBKEY])).unwrap_err();
        assert_eq!(
            err,
            RequestError::MissingParam {
                index: 1,
                name: "amount"
            }
        );

        assert!(RouteRequest::from_url_params(&params(&["zz", "1500"])).is_err());
    }

    #[test]
    fn node_info_and_decode_from_url_params() {
        let request = NodeInfoRequest::from_url_params(&params(&[PUBKEY])).unwrap();
        assert_eq!(request.pubkey.to_hex(), PUBKEY);

        let request = DecodePaymentRequest::from_url_params(&params(&["lnbc1"])).unwrap();
        assert_eq!(request.payment_request, "lnbc1");
    }
}
