/// The ways a remote call can fail.
///
/// A single failure can be observed by multiple callers when identical
/// calls are coalesced. That is why the error is `Clone` and carries
/// rendered messages rather than the underlying errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No usable settings were available
    Settings(String),
    /// No response was received (connection refused, DNS, TLS, ...)
    Transport(String),
    /// The server responded with an error status and a message
    Remote { status: u16, message: String },
    /// The server responded with an error status and a body we can't parse
    UnparseableResponse { status: u16, body: String },
    /// The server responded with a success status but the body isn't what we expected
    Parse(String),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settings(message) => write!(f, "Invalid settings: {}", message),
            Self::Transport(message) => write!(f, "{}", message),
            Self::Remote { message, .. } => write!(f, "{}", message),
            Self::UnparseableResponse { status, body } => {
                write!(f, "response was ({}){}", status, body)
            }
            Self::Parse(message) => write!(f, "Failed to parse response: {}", message),
        }
    }
}

impl std::error::Error for DispatchError {}

impl DispatchError {
    /// The HTTP-status if the server responded with an error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } | Self::UnparseableResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_remote_errors() {
        let err = DispatchError::Remote {
            status: 500,
            message: "Unknown command 'foo'".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown command 'foo'");
        assert_eq!(err.status(), Some(500));

        let err = DispatchError::UnparseableResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "response was (502)Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn transport_errors_are_not_rewritten() {
        let err = DispatchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.status(), None);
    }
}
