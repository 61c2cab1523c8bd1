use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::no_params::NoParams;

/// The body posted to the `/rpc` endpoint of the Spark server
///
/// Unlike JSON-RPC 2.0 there is no `id` or `jsonrpc`-field. Each HTTP
/// request carries exactly one call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcEnvelope {
    method: String,
    params: Value,
}

impl RpcEnvelope {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Creates an envelope with `"params" : {}`
    pub fn without_params(method: impl Into<String>) -> Self {
        Self::new(method, Value::Object(serde_json::Map::new()))
    }

    pub fn from_params<P>(method: impl Into<String>, params: &P) -> Result<Self, serde_json::Error>
    where
        P: Serialize,
    {
        Ok(Self::new(method, serde_json::to_value(params)?))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Requests a slice of a potentially long result-set.
///
/// Sent to the server as a `Range: <unit>=<slice>`-header.
/// E.g: `Range: invoices=-100` requests the last 100 invoices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeDirective {
    unit: String,
    slice: String,
}

impl RangeDirective {
    pub fn new(unit: impl Into<String>, slice: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            slice: slice.into(),
        }
    }

    /// The last `count` records of `unit`
    pub fn last(unit: impl Into<String>, count: u32) -> Self {
        Self::new(unit, format!("-{}", count))
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn slice(&self) -> &str {
        &self.slice
    }

    pub fn header_value(&self) -> String {
        format!("{}={}", self.unit, self.slice)
    }
}

/// Identifies a call for the purpose of coalescing concurrent duplicates.
///
/// Computed from the method, the serialized params and the serialized range.
/// `serde_json` serializes objects with sorted keys so params that compare
/// equal produce the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(envelope: &RpcEnvelope, range: Option<&RangeDirective>) -> Self {
        let range = match range {
            Some(range) => serde_json::json!({"unit" : range.unit, "slice" : range.slice}),
            None => Value::Null,
        };
        Self(format!("{}{}{}", envelope.method, envelope.params, range))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The body the Spark server sends along with an error status
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// Defines a remote method and describes the schema
/// of the params `I` and the result `O`.
#[derive(Debug)]
pub struct RpcMethod<'a, I, O> {
    pub method: &'a str,
    request: std::marker::PhantomData<I>,
    return_type: std::marker::PhantomData<O>,
}

// Manual impls. A derive would require `I : Clone` and `O : Clone`
impl<I, O> Clone for RpcMethod<'_, I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for RpcMethod<'_, I, O> {}

impl<'a, I, O> RpcMethod<'a, I, O> {
    pub const fn new(method: &'a str) -> Self {
        Self {
            method,
            request: std::marker::PhantomData,
            return_type: std::marker::PhantomData,
        }
    }

    pub const fn name(&self) -> &'a str {
        self.method
    }
}

impl<I, O> RpcMethod<'_, I, O>
where
    I: Serialize,
{
    /// Creates the envelope with parameters for the given method
    pub fn create_envelope(&self, params: &I) -> Result<RpcEnvelope, serde_json::Error> {
        RpcEnvelope::from_params(self.method, params)
    }
}

impl<I, O> RpcMethod<'_, I, O>
where
    O: DeserializeOwned,
{
    /// Parses the result. The error reports the path of the offending field
    pub fn parse_result_value(
        &self,
        value: Value,
    ) -> Result<O, serde_path_to_error::Error<serde_json::Error>> {
        serde_path_to_error::deserialize(value)
    }
}

impl<'a, I, O> std::convert::From<&'a RpcMethod<'a, I, O>> for String {
    fn from(value: &RpcMethod<I, O>) -> Self {
        value.method.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_envelope() {
        let envelope = RpcEnvelope::without_params("getinfo");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value, json!({"method" : "getinfo", "params" : {}}));
    }

    #[test]
    fn envelope_from_positional_params() {
        let params = vec!["02aa".to_string(), "127.0.0.1:9735".to_string()];
        let envelope = RpcEnvelope::from_params("connect", &params).unwrap();

        assert_eq!(envelope.method(), "connect");
        assert_eq!(envelope.params(), &json!(["02aa", "127.0.0.1:9735"]));
    }

    #[test]
    fn range_header_value() {
        let range = RangeDirective::last("invoices", 100);
        assert_eq!(range.header_value(), "invoices=-100");
        assert_eq!(range.unit(), "invoices");
        assert_eq!(range.slice(), "-100");
    }

    #[test]
    fn fingerprint_depends_on_all_inputs() {
        let envelope = RpcEnvelope::new("listinvoices", json!({}));
        let range = RangeDirective::last("invoices", 100);

        let fp_without_range = Fingerprint::new(&envelope, None);
        let fp_with_range = Fingerprint::new(&envelope, Some(&range));
        assert_eq!(fp_without_range.as_str(), "listinvoices{}null");
        assert_ne!(fp_without_range, fp_with_range);

        let other_params = RpcEnvelope::new("listinvoices", json!({"label" : "a"}));
        assert_ne!(
            Fingerprint::new(&other_params, None),
            Fingerprint::new(&envelope, None)
        );

        let other_method = RpcEnvelope::new("listsendpays", json!({}));
        assert_ne!(
            Fingerprint::new(&other_method, None),
            Fingerprint::new(&envelope, None)
        );
    }

    #[test]
    fn fingerprint_ignores_key_order() {
        let a = RpcEnvelope::new("pay", json!({"bolt11" : "lnbc1", "msatoshi" : 1000}));
        let b = RpcEnvelope::new("pay", json!({"msatoshi" : 1000, "bolt11" : "lnbc1"}));

        assert_eq!(Fingerprint::new(&a, None), Fingerprint::new(&b, None));
    }

    #[test]
    fn create_envelope_from_method() {
        let method = RpcMethod::<NoParams, Value>::new("newaddr");
        let envelope = method.create_envelope(&NoParams).unwrap();

        assert_eq!(envelope.method(), "newaddr");
        assert_eq!(envelope.params(), &json!({}));
    }

    #[test]
    fn parse_result_reports_path() {
        #[derive(Deserialize, Debug)]
        struct Outer {
            #[allow(dead_code)]
            inner: Inner,
        }

        #[derive(Deserialize, Debug)]
        struct Inner {
            #[allow(dead_code)]
            value: u64,
        }

        let method = RpcMethod::<NoParams, Outer>::new("test.method");
        let err = method
            .parse_result_value(json!({"inner" : {"value" : "not a number"}}))
            .expect_err("value is not an integer");

        assert_eq!(err.path().to_string(), "inner.value");
    }

    #[test]
    fn deserialize_error_body() {
        let body: ErrorBody = serde_json::from_str(r#"{"message" : "Unknown command"}"#).unwrap();
        assert_eq!(body.message, "Unknown command");
        assert_eq!(body.code, None);

        serde_json::from_str::<ErrorBody>(r#"{"error" : "no message"}"#)
            .expect_err("message is required");
    }
}
