//! Salesforce REST API client.
//!
//! The client owns the session and the API version. Every operation goes
//! through [`SalesforceRestClient::request`], which is the single place that
//! checks for a session, attaches the bearer token and translates failures.

use forcelink_auth::AuthenticationFlow;
use forcelink_client::{ClientConfig, HttpMethod, HttpTransport, Request, Response, Transport};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::response::check_api_error;
use crate::session::Session;

mod crud;
mod query;

/// Salesforce REST API client.
///
/// Created unauthenticated. Call [`authenticate`](Self::authenticate) with
/// any [`AuthenticationFlow`] before other operations; until then they fail
/// with [`ErrorKind::NotAuthenticated`].
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_auth::{OAuthConfig, UsernamePasswordFlow};
/// use forcelink_rest::SalesforceRestClient;
///
/// let mut client = SalesforceRestClient::new()?;
/// client
///     .authenticate(&UsernamePasswordFlow::new(
///         OAuthConfig::new("consumer_key").with_secret("consumer_secret"),
///         "user@example.com",
///         "password",
///     ))
///     .await?;
///
/// // Query
/// let accounts: Vec<serde_json::Value> =
///     client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
///
/// // Create
/// let id = client.create("Account", &json!({"Name": "New Account"})).await?;
///
/// // Update
/// client.update("Account", &id, &json!({"Name": "Updated"})).await?;
///
/// // Delete
/// client.delete("Account", &id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient<T = HttpTransport> {
    transport: T,
    api_version: String,
    session: Option<Session>,
}

impl SalesforceRestClient<HttpTransport> {
    /// Create a client with the default HTTP transport.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> SalesforceRestClient<T> {
    /// Create a client on top of any transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            api_version: crate::DEFAULT_API_VERSION.to_string(),
            session: None,
        }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Set the API version used by subsequent requests.
    pub fn set_api_version(&mut self, version: impl Into<String>) {
        self.api_version = version.into();
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.set_api_version(version);
        self
    }

    /// Whether a session is in place.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Instance URL of the current session.
    pub fn instance_url(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.instance_url.as_str())
    }

    /// Run `flow` and replace the session with its result.
    ///
    /// On failure the flow's error is returned as
    /// [`ErrorKind::Authentication`] and the previous session is kept.
    #[instrument(skip(self, flow))]
    pub async fn authenticate<F: AuthenticationFlow>(&mut self, flow: &F) -> Result<()> {
        let token = flow.authenticate().await?;
        info!(instance_url = %token.instance_url, "Authenticated");
        self.session = Some(Session::from(token));
        Ok(())
    }

    /// `<instanceUrl>/services/data/<apiVersion>/` for the current session.
    pub fn base_url(&self) -> Result<String> {
        Ok(self.session()?.data_url(&self.api_version))
    }

    /// Send one request and translate the response.
    ///
    /// Fails with [`ErrorKind::NotAuthenticated`] before touching the
    /// transport when there is no session.
    #[instrument(skip(self, body), fields(method = %method))]
    pub async fn request(
        &self,
        base_url: &str,
        resource_path: &str,
        body: Option<Value>,
        method: HttpMethod,
    ) -> Result<Response> {
        let session = self.session()?;

        let mut request = Request::new(method, base_url, resource_path)
            .bearer_auth(&session.access_token)
            .accept_json();
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(path = resource_path, "Sending request");
        let response = self.transport.execute(request).await;
        debug!(status = response.status(), "Received response");

        check_api_error(response)
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::NotAuthenticated))
    }
}

/// Reject an empty required argument.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{name} must not be empty")));
    }
    Ok(())
}
