//! The transport seam and its reqwest-backed implementation.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::Request;
use crate::response::Response;
use crate::retry::{is_retryable_status, RetryPolicy};

/// Executes requests on behalf of the REST client.
///
/// Implementations never raise: a call that cannot complete is reported
/// through [`Response::failed`]. Timeouts, retries and connection reuse are
/// the implementation's own policy.
pub trait Transport: Send + Sync {
    /// Execute a request and return what came back.
    fn execute(&self, request: Request) -> impl Future<Output = Response> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Response> + Send {
        (**self).execute(request)
    }
}

/// HTTP transport built on reqwest with timeouts, gzip and retry.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request once, without retry.
    async fn execute_once(&self, request: &Request) -> Result<Response> {
        let url = url::Url::parse(&request.url())?;
        let mut req = self.inner.request(request.method().to_reqwest(), url);

        for (name, value) in request.headers() {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            req = req.json(body);
        }

        debug!(method = %request.method(), path = request.path(), "Sending request");

        let response = req.send().await?;
        let status = response.status().as_u16();

        let content_length = response.content_length();
        if response.status().is_success() {
            debug!(status, content_length, "Response received");
        } else {
            info!(status, content_length, "Non-success response");
        }

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(headers
            .into_iter()
            .fold(Response::new(status, body), |response, (name, value)| {
                response.with_header(&name, value)
            }))
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn execute(&self, request: Request) -> Response {
        let mut retry_policy = self.config.retry.clone().map(RetryPolicy::new);
        let idempotent = request.method().is_idempotent();

        loop {
            let (retry_after, outcome) = match self.execute_once(&request).await {
                Ok(response) if is_retryable_status(response.status(), idempotent) => {
                    (response.retry_after(), Ok(response))
                }
                Ok(response) => return response,
                // The server may already have acted on a request that timed out.
                Err(err) if idempotent && err.is_retryable() => (None, Err(err)),
                Err(err) => return Response::failed(err),
            };

            let delay = retry_policy
                .as_mut()
                .and_then(|policy| policy.next_delay(retry_after));

            let Some(delay) = delay else {
                return match outcome {
                    Ok(response) => response,
                    Err(err) => match retry_policy {
                        Some(policy) if policy.attempt() > 0 => Response::failed(
                            Error::with_source(
                                ErrorKind::RetriesExhausted {
                                    attempts: policy.attempt(),
                                },
                                err,
                            ),
                        ),
                        _ => Response::failed(err),
                    },
                };
            };

            let reason = match &outcome {
                Ok(response) => format!("status {}", response.status()),
                Err(err) => err.to_string(),
            };
            warn!(
                attempt = retry_policy.as_ref().map(RetryPolicy::attempt),
                delay_ms = delay.as_millis() as u64,
                reason = %reason,
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
