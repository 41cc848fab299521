//! Connected-app configuration and the OAuth token flows.
//!
//! - [`OAuthTokenFlow`] wraps an access token obtained out of band
//!   (web server flow, `sf org display`, another service).
//! - [`RefreshTokenFlow`] exchanges a refresh token for a new access token.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::flow::{request_token, require, required_var, AuthToken, AuthenticationFlow};

/// OAuth 2.0 configuration for a connected app.
///
/// The consumer secret is redacted in Debug output.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Consumer key (client_id).
    pub consumer_key: String,
    /// Consumer secret (client_secret). Optional for some flows.
    consumer_secret: Option<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl OAuthConfig {
    /// Create a new OAuth config.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: None,
        }
    }

    /// Set the consumer secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Get the consumer secret.
    pub(crate) fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }

    /// Append `client_id` and, when configured, `client_secret`.
    pub(crate) fn push_client_params<'a>(&'a self, params: &mut Vec<(&'static str, &'a str)>) {
        params.push(("client_id", &self.consumer_key));
        if let Some(secret) = self.consumer_secret() {
            params.push(("client_secret", secret));
        }
    }
}

/// An access token and instance URL that were obtained elsewhere.
///
/// Authenticating with this flow performs no network call; it only checks
/// that both values are present.
#[derive(Debug, Clone)]
pub struct OAuthTokenFlow {
    token: AuthToken,
}

impl OAuthTokenFlow {
    /// Create a flow from an access token and its instance URL.
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            token: AuthToken::new(access_token, instance_url),
        }
    }

    /// Load the token from environment variables.
    ///
    /// Required environment variables:
    /// - `SF_INSTANCE_URL`
    /// - `SF_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let instance_url = required_var(&lookup, "SF_INSTANCE_URL")?;
        let access_token = required_var(&lookup, "SF_ACCESS_TOKEN")?;
        Ok(Self::new(access_token, instance_url))
    }
}

impl AuthenticationFlow for OAuthTokenFlow {
    async fn authenticate(&self) -> Result<AuthToken> {
        require("access_token", &self.token.access_token)?;
        require("instance_url", &self.token.instance_url)?;
        Ok(self.token.clone())
    }
}

/// Refresh-token grant against the token endpoint.
///
/// The refresh token is redacted in Debug output.
#[derive(Clone)]
pub struct RefreshTokenFlow {
    config: OAuthConfig,
    refresh_token: String,
    login_url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for RefreshTokenFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenFlow")
            .field("config", &self.config)
            .field("refresh_token", &"[REDACTED]")
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl RefreshTokenFlow {
    /// Create a refresh flow against the production login URL.
    pub fn new(config: OAuthConfig, refresh_token: impl Into<String>) -> Self {
        Self {
            config,
            refresh_token: refresh_token.into(),
            login_url: crate::PRODUCTION_LOGIN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Use a different login URL (sandbox, My Domain).
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }
}

impl AuthenticationFlow for RefreshTokenFlow {
    #[instrument(skip(self), fields(login_url = %self.login_url))]
    async fn authenticate(&self) -> Result<AuthToken> {
        require("refresh_token", &self.refresh_token)?;

        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
        ];
        self.config.push_client_params(&mut params);

        let token = request_token(&self.http_client, &self.login_url, &params).await?;
        debug!(instance_url = %token.instance_url, "Refresh token exchanged");
        Ok(token)
    }
}
