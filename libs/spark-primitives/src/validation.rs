//! Validation of requests coming from the wallet.
//!
//! The wallet passes either a loosely typed JSON-object or a list of
//! positional "url parameters". Both are converted into typed requests here
//! so the rest of the code never touches untyped input.

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    /// A positional parameter is missing
    MissingParam { index: usize, name: &'static str },
    /// A parameter is present but can't be used
    InvalidParam { property: String, message: String },
}

impl RequestError {
    pub fn invalid_param(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParam { index, name } => {
                write!(f, "Missing parameter '{}' at position {}", name, index)
            }
            Self::InvalidParam { property, message } => {
                write!(f, "Invalid parameter '{}': {}", property, message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Parses a request from a json_value
///
/// The error names the path of the first field that failed to parse.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    if !matches!(value, Value::Object(_)) {
        return Err(RequestError::invalid_param(
            "",
            "Arguments should be passed by name",
        ));
    }

    serde_path_to_error::deserialize::<_, T>(value).map_err(|e| RequestError::InvalidParam {
        property: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Positional parameters as used by REST-style callers
pub struct UrlParams<'a> {
    params: &'a [String],
}

impl<'a> UrlParams<'a> {
    pub fn new(params: &'a [String]) -> Self {
        Self { params }
    }

    pub fn optional(&self, index: usize) -> Option<&'a str> {
        self.params
            .get(index)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn required(&self, index: usize, name: &'static str) -> Result<&'a str, RequestError> {
        self.optional(index)
            .ok_or(RequestError::MissingParam { index, name })
    }

    /// Parses a required parameter using `FromStr`
    pub fn parse<T>(&self, index: usize, name: &'static str) -> Result<T, RequestError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required(index, name)?;
        raw.parse::<T>()
            .map_err(|e| RequestError::invalid_param(name, e.to_string()))
    }

    /// Parses an optional flag. A missing or empty parameter is `false`
    pub fn flag(&self, index: usize, name: &'static str) -> Result<bool, RequestError> {
        match self.optional(index) {
            None => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(RequestError::invalid_param(
                name,
                format!("Expected a boolean but got '{}'", other),
            )),
        }
    }
}
