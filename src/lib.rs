//! # forcelink
//!
//! A typed Salesforce REST client for Rust.
//!
//! ## Security
//!
//! - Sensitive data (tokens, passwords, secrets) are redacted in Debug output
//! - Tracing spans skip credential parameters and request bodies
//!
//! ## Crates
//!
//! - **forcelink-client** - HTTP transport: request/response data, timeouts, retry
//! - **forcelink-auth** - Authentication flows: username-password, OAuth token, refresh token, JWT Bearer
//! - **forcelink-rest** - REST client: session, query, find by id, create, update, delete
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcelink::{SalesforceRestClient, UsernamePasswordFlow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SF_CLIENT_ID, SF_USERNAME, SF_PASSWORD, ...
//!     let flow = UsernamePasswordFlow::from_env()?;
//!
//!     let mut client = SalesforceRestClient::new()?;
//!     client.authenticate(&flow).await?;
//!
//!     let accounts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     for account in accounts {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use forcelink_auth as auth;
#[cfg(feature = "client")]
pub use forcelink_client as client;
#[cfg(feature = "rest")]
pub use forcelink_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use forcelink_auth::{
    AuthenticationFlow, JwtBearerFlow, OAuthConfig, OAuthTokenFlow, RefreshTokenFlow,
    UsernamePasswordFlow,
};
#[cfg(feature = "client")]
pub use forcelink_client::{ClientConfig, HttpTransport, Transport};
#[cfg(feature = "rest")]
pub use forcelink_rest::{FieldSpec, Record, RecordCodec, SalesforceRestClient};
