//! Username-password OAuth flow.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::flow::{request_token, require, required_var, AuthToken, AuthenticationFlow};
use crate::oauth::OAuthConfig;

/// `grant_type=password` against the token endpoint.
///
/// When the org requires it, the user's security token is appended to the
/// password before sending. Password and security token are redacted in Debug
/// output.
#[derive(Clone)]
pub struct UsernamePasswordFlow {
    config: OAuthConfig,
    username: String,
    password: String,
    security_token: Option<String>,
    login_url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for UsernamePasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernamePasswordFlow")
            .field("config", &self.config)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl UsernamePasswordFlow {
    /// Create a flow against the production login URL.
    pub fn new(
        config: OAuthConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            config,
            username: username.into(),
            password: password.into(),
            security_token: None,
            login_url: crate::PRODUCTION_LOGIN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set the security token appended to the password.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Use a different login URL (sandbox, My Domain).
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Use the sandbox login URL.
    pub fn sandbox(self) -> Self {
        self.with_login_url(crate::SANDBOX_LOGIN_URL)
    }

    /// Get the login URL.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Load the flow from environment variables.
    ///
    /// Required environment variables:
    /// - `SF_CLIENT_ID`
    /// - `SF_USERNAME`
    /// - `SF_PASSWORD`
    ///
    /// Optional:
    /// - `SF_CLIENT_SECRET`
    /// - `SF_SECURITY_TOKEN`
    /// - `SF_LOGIN_URL` (default: production login URL)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = OAuthConfig::new(required_var(&lookup, "SF_CLIENT_ID")?);
        if let Some(secret) = lookup("SF_CLIENT_SECRET").filter(|s| !s.is_empty()) {
            config = config.with_secret(secret);
        }

        let mut flow = Self::new(
            config,
            required_var(&lookup, "SF_USERNAME")?,
            required_var(&lookup, "SF_PASSWORD")?,
        );
        if let Some(token) = lookup("SF_SECURITY_TOKEN").filter(|s| !s.is_empty()) {
            flow = flow.with_security_token(token);
        }
        if let Some(login_url) = lookup("SF_LOGIN_URL").filter(|s| !s.is_empty()) {
            flow = flow.with_login_url(login_url);
        }

        Ok(flow)
    }
}

impl AuthenticationFlow for UsernamePasswordFlow {
    #[instrument(skip(self), fields(login_url = %self.login_url, username = %self.username))]
    async fn authenticate(&self) -> Result<AuthToken> {
        require("username", &self.username)?;
        require("password", &self.password)?;

        let password = match &self.security_token {
            Some(token) => format!("{}{}", self.password, token),
            None => self.password.clone(),
        };

        let mut params = vec![
            ("grant_type", "password"),
            ("username", self.username.as_str()),
            ("password", password.as_str()),
        ];
        self.config.push_client_params(&mut params);

        let token = request_token(&self.http_client, &self.login_url, &params).await?;
        debug!(instance_url = %token.instance_url, "Username-password flow succeeded");
        Ok(token)
    }
}
