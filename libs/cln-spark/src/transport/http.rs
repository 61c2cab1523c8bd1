use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use reqwest::Client;

use crate::transport::{HttpRequest, HttpResponse, Transport, CONTENT_TYPE};

/// Posts requests over HTTP(S) using `reqwest`.
///
/// Two clients are kept around. The second one accepts any certificate
/// and is only used when a request opts out of TLS-verification.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    verifying: Client,
    trusting: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let verifying = builder(timeout)
            .build()
            .context("Failed to build http client")?;
        let trusting = builder(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            verifying,
            trusting,
        })
    }

    fn client(&self, verify_tls: bool) -> &Client {
        if verify_tls {
            &self.verifying
        } else {
            &self.trusting
        }
    }
}

fn builder(timeout: Option<Duration>) -> reqwest::ClientBuilder {
    match timeout {
        Some(timeout) => Client::builder().timeout(timeout),
        None => Client::builder(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        log::trace!("POST {}", request.url);

        let mut builder = self
            .client(request.verify_tls)
            .post(request.url.as_str())
            .header(header::CONTENT_TYPE, CONTENT_TYPE);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
