//! # forcelink-auth
//!
//! Authentication flows that produce the access token and instance URL a
//! forcelink REST client needs.
//!
//! ## Security
//!
//! - Sensitive data (tokens, passwords, secrets) are redacted in Debug output
//! - Tracing spans skip credential parameters
//!
//! ## Supported Flows
//!
//! - **Username-Password** - `grant_type=password` against the token endpoint
//! - **OAuth Token** - an access token and instance URL obtained elsewhere
//! - **Refresh Token** - exchange a refresh token for a new access token
//! - **JWT Bearer** - server-to-server with a signed assertion
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::{AuthenticationFlow, OAuthConfig, UsernamePasswordFlow};
//!
//! let flow = UsernamePasswordFlow::new(
//!     OAuthConfig::new("consumer_key").with_secret("consumer_secret"),
//!     "user@example.com",
//!     "password",
//! )
//! .with_security_token("token");
//!
//! let token = flow.authenticate().await?;
//! println!("instance: {}", token.instance_url);
//! ```

mod error;
mod flow;
mod jwt;
mod oauth;
mod password;

pub use error::{Error, ErrorKind, Result};
pub use flow::{AuthToken, AuthenticationFlow};
pub use jwt::JwtBearerFlow;
pub use oauth::{OAuthConfig, OAuthTokenFlow, RefreshTokenFlow};
pub use password::UsernamePasswordFlow;

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
