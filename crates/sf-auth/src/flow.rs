//! The authentication flow seam and the token endpoint exchange shared by
//! the network-backed flows.

use std::future::Future;

use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// A way of obtaining an access token and the instance URL it is valid for.
///
/// Each flow owns its own validation and retry behavior; the REST client only
/// invokes [`authenticate`](AuthenticationFlow::authenticate) and stores the
/// result.
pub trait AuthenticationFlow: Send + Sync {
    /// Run the flow.
    fn authenticate(&self) -> impl Future<Output = Result<AuthToken>> + Send;
}

/// Access token and instance URL produced by a flow.
///
/// The access token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    /// Access token to send as the bearer credential.
    pub access_token: String,
    /// Tenant-specific base URL.
    pub instance_url: String,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

impl AuthToken {
    /// Create a token from its parts.
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
        }
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// POST form parameters to `<login_url>/services/oauth2/token`.
pub(crate) async fn request_token(
    http_client: &reqwest::Client,
    login_url: &str,
    params: &[(&str, &str)],
) -> Result<AuthToken> {
    let body = serde_urlencoded::to_string(params)?;

    let response = http_client
        .post(format!(
            "{}/services/oauth2/token",
            login_url.trim_end_matches('/')
        ))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        return Err(match serde_json::from_str::<OAuthErrorResponse>(&text) {
            Ok(error) => Error::new(ErrorKind::OAuth {
                error: error.error,
                description: error.error_description,
            }),
            Err(_) => Error::new(ErrorKind::Http(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            ))),
        });
    }

    let text = response.text().await?;
    let token: AuthToken = serde_json::from_str(&text)?;
    Ok(token)
}

/// Reject empty required credential values before any network call.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::new(ErrorKind::InvalidCredentials(format!(
            "{name} must not be empty"
        ))));
    }
    Ok(())
}

/// Read a required variable through `lookup`.
pub(crate) fn required_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::new(ErrorKind::EnvVar(name.to_string())))
}
