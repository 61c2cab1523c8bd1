//! A [`Transport`] that replies with canned responses.
//!
//! Responses are keyed by the remote method found in the request body.
//! A gate can be installed to hold every response until the test
//! releases it.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Holds every response until a permit is added to the gate
    pub(crate) fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let transport = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (transport, gate)
    }

    pub(crate) fn respond(&self, method: &str, status: u16, body: impl Into<String>) {
        self.replies.lock().unwrap().insert(
            method.to_string(),
            Reply::Respond(HttpResponse::new(status, body)),
        );
    }

    pub(crate) fn ok(&self, method: &str, result: Value) {
        self.respond(method, 200, result.to_string())
    }

    pub(crate) fn fail(&self, method: &str, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::Fail(message.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The parsed bodies of all requests for `method`
    pub(crate) fn calls_to(&self, method: &str) -> Vec<Value> {
        self.requests()
            .iter()
            .map(|r| serde_json::from_slice::<Value>(&r.body).unwrap())
            .filter(|body| body["method"] == method)
            .collect()
    }

    /// Waits until at least `count` requests were received
    pub(crate) async fn wait_for_requests(&self, count: usize) {
        while self.requests.lock().unwrap().len() < count {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let body: Value = serde_json::from_slice(&request.body)?;
        let method = body["method"].as_str().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }

        let reply = self.replies.lock().unwrap().get(&method).cloned();
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(anyhow!(message)),
            None => Ok(HttpResponse::new(
                500,
                format!(r#"{{"message":"Unknown command '{}'"}}"#, method),
            )),
        }
    }
}
