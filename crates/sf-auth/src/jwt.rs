//! JWT Bearer authentication flow.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::flow::{request_token, require, AuthToken, AuthenticationFlow};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// JWT Bearer authentication for server-to-server integration.
///
/// Requires a connected app with a certificate configured. The private key
/// is never printed in Debug output.
#[derive(Clone)]
pub struct JwtBearerFlow {
    consumer_key: String,
    username: String,
    /// RSA private key in PEM format.
    private_key: Vec<u8>,
    /// Assertion lifetime (default: 3 minutes).
    expiration: Duration,
    login_url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for JwtBearerFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtBearerFlow")
            .field("consumer_key", &self.consumer_key)
            .field("username", &self.username)
            .field("private_key", &"[REDACTED]")
            .field("expiration", &self.expiration)
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl JwtBearerFlow {
    /// Create a new JWT Bearer flow against the production login URL.
    ///
    /// # Arguments
    ///
    /// * `consumer_key` - The consumer key from the connected app
    /// * `username` - The Salesforce username to authenticate as
    /// * `private_key` - The private key in PEM format (RSA)
    pub fn new(
        consumer_key: impl Into<String>,
        username: impl Into<String>,
        private_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            username: username.into(),
            private_key: private_key.into(),
            expiration: Duration::minutes(3),
            login_url: crate::PRODUCTION_LOGIN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Load the private key from a file.
    pub fn from_key_file(
        consumer_key: impl Into<String>,
        username: impl Into<String>,
        key_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let private_key = std::fs::read(key_path.as_ref())?;
        Ok(Self::new(consumer_key, username, private_key))
    }

    /// Set the JWT expiration duration.
    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Use a different login URL. It is also the assertion audience.
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Generate a signed JWT assertion.
    fn generate_assertion(&self) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.expiration;

        let claims = JwtClaims {
            iss: self.consumer_key.clone(),
            sub: self.username.clone(),
            aud: self.login_url.trim_end_matches('/').to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(&self.private_key)?;

        Ok(encode(&header, &claims, &key)?)
    }
}

impl AuthenticationFlow for JwtBearerFlow {
    #[instrument(skip(self), fields(login_url = %self.login_url, username = %self.username))]
    async fn authenticate(&self) -> Result<AuthToken> {
        require("consumer_key", &self.consumer_key)?;
        require("username", &self.username)?;

        let assertion = self.generate_assertion()?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let token = request_token(&self.http_client, &self.login_url, &params).await?;
        debug!(instance_url = %token.instance_url, "JWT Bearer flow succeeded");
        Ok(token)
    }
}

/// JWT claims for Salesforce OAuth.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Issuer (consumer key).
    iss: String,
    /// Subject (username).
    sub: String,
    /// Audience (login URL).
    aud: String,
    exp: i64,
    iat: i64,
}
