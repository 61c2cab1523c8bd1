use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The params of a method that takes no arguments.
///
/// The Spark server hands `params` to the node as-is and the node only
/// accepts an object or an array there. This is sent as `{}`, never `null`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NoParams;

impl Serialize for NoParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_map(Some(0))?.end()
    }
}

impl<'de> Deserialize<'de> for NoParams {
    fn deserialize<D>(deserializer: D) -> Result<NoParams, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absent params are fine, an object with entries is not
        match Option::<Map<String, Value>>::deserialize(deserializer)? {
            Some(params) if !params.is_empty() => {
                let names: Vec<&str> = params.keys().map(String::as_str).collect();
                Err(D::Error::custom(format!(
                    "Method takes no params but got '{}'",
                    names.join("', '")
                )))
            }
            _ => Ok(NoParams),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn sent_as_empty_object() {
        assert_eq!(serde_json::to_string(&NoParams).unwrap(), "{}");
        assert_eq!(json!({"method" : "getinfo", "params" : NoParams})["params"], json!({}));
    }

    #[test]
    fn accepts_empty_or_missing_params() {
        let _: NoParams = serde_json::from_str("{}").unwrap();
        let _: NoParams = serde_json::from_str("null").unwrap();
        let _: NoParams = serde_json::from_value(Value::Null).unwrap();

        let err = serde_json::from_value::<NoParams>(json!({"label" : "zeus.1"})).unwrap_err();
        assert!(err.to_string().contains("label"));
        serde_json::from_value::<NoParams>(json!([1])).expect_err("Arrays carry params");
    }
}
