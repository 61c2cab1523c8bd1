use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};

const RPC_PATH: &str = "/rpc";

/// Connection settings for the Spark server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The base url of the Spark server. `/rpc` is appended if it is missing
    pub url: String,
    /// Sent in the `X-Access`-header
    pub access_key: String,
    /// Setting this to `false` accepts any TLS-certificate.
    /// Only use this for nodes with a self-signed certificate.
    pub cert_verification: bool,
}

impl Settings {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_key: access_key.into(),
            cert_verification: true,
        }
    }

    pub fn with_cert_verification(mut self, cert_verification: bool) -> Self {
        self.cert_verification = cert_verification;
        self
    }

    /// The endpoint all calls are posted to
    pub fn rpc_url(&self) -> String {
        if self.url.ends_with(RPC_PATH) {
            self.url.clone()
        } else {
            format!("{}{}", self.url.trim_end_matches('/'), RPC_PATH)
        }
    }
}

/// Provides the settings that are currently active.
///
/// The dispatcher reads a new snapshot for every call because
/// the user can switch to another node at any time.
pub trait SettingsProvider: Send + Sync {
    fn snapshot(&self) -> Result<Settings>;
}

/// Settings that are kept in memory and can be swapped at runtime
#[derive(Debug, Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn update(&self, settings: Settings) {
        let mut current = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *current = settings;
    }
}

impl SettingsProvider for SharedSettings {
    fn snapshot(&self) -> Result<Settings> {
        let settings = self
            .inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        if settings.url.is_empty() {
            return Err(anyhow!("No url configured for the Spark server"));
        }
        Ok(settings)
    }
}
