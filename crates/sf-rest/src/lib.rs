//! # forcelink-rest
//!
//! Typed Salesforce REST client: authenticate, query, find by id, create,
//! update and delete.
//!
//! ## Features
//!
//! - **Session gating** - nothing is sent before a successful `authenticate`
//! - **SOQL Query** - first page, all pages, or a single record by id
//! - **SObject CRUD** - create, update and delete individual records
//! - **Typed records** - a field table per record type drives projections
//!   and create/update bodies
//! - **One error type** - API errors, transport failures and flow failures
//!   all surface as [`Error`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::OAuthTokenFlow;
//! use forcelink_rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_rest::Error> {
//!     let mut client = SalesforceRestClient::new()?;
//!     client
//!         .authenticate(&OAuthTokenFlow::new("00D...", "https://myorg.my.salesforce.com"))
//!         .await?;
//!
//!     let accounts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     let id = client
//!         .create("Account", &serde_json::json!({"Name": "New Account"}))
//!         .await?;
//!     client
//!         .update("Account", &id, &serde_json::json!({"Name": "Updated"}))
//!         .await?;
//!     client.delete("Account", &id).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod json;
mod query;
mod record;
mod response;
mod session;
pub mod soql;

#[cfg(test)]
mod testing;

// Main client
pub use client::SalesforceRestClient;

// Error types
pub use error::{Error, ErrorKind, Result};

// Untyped JSON accessors
pub use json::JsonExt;

// Query types
pub use query::QueryResult;

// Record types
pub use record::{FieldSpec, Record, RecordCodec};

// Re-export forcelink-client types that users might need
pub use forcelink_client::{ClientConfig, ClientConfigBuilder, HttpMethod, Response};

/// API version used until the caller sets another.
pub const DEFAULT_API_VERSION: &str = "v28.0";
