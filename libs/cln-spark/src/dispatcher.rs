use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use spark_primitives::json_rpc::{ErrorBody, Fingerprint, RangeDirective, RpcEnvelope, RpcMethod};

use crate::error::DispatchError;
use crate::settings::{Settings, SettingsProvider};
use crate::transport::{
    HttpRequest, HttpResponse, InFlightCalls, Registration, Transport, ACCESS_HEADER, RANGE_HEADER,
};

pub type CallOutcome = Result<Value, DispatchError>;

/// Posts calls to the Spark server.
///
/// Calls with the same method, params and range that overlap in time
/// result in a single request. Every caller receives the same outcome.
///
/// The request itself runs on a spawned task. It completes and clears
/// the in-flight table even if all callers have gone away.
/// Requires a tokio runtime.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    settings: Arc<dyn SettingsProvider>,
    in_flight: InFlightCalls<Fingerprint, CallOutcome>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            transport,
            settings,
            in_flight: InFlightCalls::new(),
        }
    }

    /// The calls that are currently in flight
    pub fn in_flight(&self) -> &InFlightCalls<Fingerprint, CallOutcome> {
        &self.in_flight
    }

    /// Calls a typed remote method and parses the result
    pub async fn call<I, O>(
        &self,
        method: RpcMethod<'_, I, O>,
        params: &I,
        range: Option<RangeDirective>,
    ) -> Result<O, DispatchError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let envelope = method.create_envelope(params).map_err(|e| {
            DispatchError::Parse(format!(
                "Failed to serialize params for '{}': {}",
                method.name(),
                e
            ))
        })?;

        let value = self.dispatch(envelope, range).await?;

        method.parse_result_value(value).map_err(|e| {
            DispatchError::Parse(format!(
                "Unexpected result for '{}' at '{}': {}",
                method.name(),
                e.path(),
                e.inner()
            ))
        })
    }

    /// Posts the envelope unless an identical call is in flight already
    pub async fn dispatch(&self, envelope: RpcEnvelope, range: Option<RangeDirective>) -> CallOutcome {
        let fingerprint = Fingerprint::new(&envelope, range.as_ref());

        match self.in_flight.register(fingerprint.clone()) {
            Registration::Follower(pending) => {
                log::debug!("Joining in-flight call {}", fingerprint);
                pending.await
            }
            Registration::Leader(pending) => {
                let settings = match self.settings.snapshot() {
                    Ok(settings) => settings,
                    Err(e) => {
                        let err = DispatchError::Settings(format!("{:#}", e));
                        self.in_flight.settle(&fingerprint, Err(err.clone()));
                        return Err(err);
                    }
                };

                log::debug!("Calling '{}'", envelope.method());
                let dispatcher = self.clone();
                tokio::spawn(async move {
                    let method = envelope.method().to_string();
                    let call = {
                        let dispatcher = dispatcher.clone();
                        tokio::spawn(async move {
                            dispatcher
                                .execute(&settings, &envelope, range.as_ref())
                                .await
                        })
                    };

                    // A panic in the transport must still settle the call
                    let outcome = call.await.unwrap_or_else(|e| {
                        Err(DispatchError::Transport(format!(
                            "Call to '{}' did not complete: {}",
                            method, e
                        )))
                    });
                    if let Err(err) = &outcome {
                        log::warn!("Call to '{}' failed: {}", method, err);
                    }
                    dispatcher.in_flight.settle(&fingerprint, outcome);
                });
                pending.await
            }
        }
    }

    async fn execute(
        &self,
        settings: &Settings,
        envelope: &RpcEnvelope,
        range: Option<&RangeDirective>,
    ) -> CallOutcome {
        let request = build_request(settings, envelope, range)?;
        let response = self
            .transport
            .post(request)
            .await
            .map_err(|e| DispatchError::Transport(format!("{:#}", e)))?;

        classify_response(response)
    }
}

/// Builds the request for the currently active settings
pub fn build_request(
    settings: &Settings,
    envelope: &RpcEnvelope,
    range: Option<&RangeDirective>,
) -> Result<HttpRequest, DispatchError> {
    let body = envelope
        .to_body()
        .map_err(|e| DispatchError::Parse(format!("Failed to serialize request: {}", e)))?;

    let mut headers = vec![(ACCESS_HEADER.to_string(), settings.access_key.clone())];
    if let Some(range) = range {
        headers.push((RANGE_HEADER.to_string(), range.header_value()));
    }

    Ok(HttpRequest {
        url: settings.rpc_url(),
        headers,
        body,
        verify_tls: settings.cert_verification,
    })
}

/// Statuses below 300 carry the result. Anything else is an error
pub fn classify_response(response: HttpResponse) -> CallOutcome {
    let HttpResponse { status, body } = response;

    if status < 300 {
        return serde_json::from_str(&body).map_err(|e| {
            DispatchError::Parse(format!("Invalid JSON in response ({}): {}", status, e))
        });
    }

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error_body) => Err(DispatchError::Remote {
            status,
            message: error_body.message,
        }),
        Err(_) => Err(DispatchError::UnparseableResponse { status, body }),
    }
}
