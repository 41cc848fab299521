//! # forcelink-client
//!
//! HTTP transport layer for the forcelink Salesforce REST client.
//!
//! The REST client never talks to the network itself. It describes each call
//! as a [`Request`] and hands it to a [`Transport`], which returns a
//! [`Response`] carrying the status code, the raw body and, when the call could
//! not complete at all, the transport-level failure.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SalesforceRestClient                       │
//! │  - Session gating, URLs, bearer header                      │
//! │  - Error translation, record decoding                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Request
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Transport (trait)                           │
//! │  HttpTransport: reqwest with timeouts, gzip, retry          │
//! │  tests: any in-memory fake                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_client::{ClientConfig, HttpMethod, HttpTransport, Request, Transport};
//!
//! let transport = HttpTransport::new(ClientConfig::default())?;
//! let request = Request::new(
//!     HttpMethod::Get,
//!     "https://na1.salesforce.com/services/data/v28.0/",
//!     "limits",
//! )
//! .bearer_auth("00D...")
//! .accept_json();
//!
//! let response = transport.execute(request).await;
//! println!("{} {}", response.status(), response.body());
//! ```

mod config;
mod error;
mod request;
mod response;
mod retry;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{HttpMethod, Request};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use transport::{HttpTransport, Transport};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("forcelink/", env!("CARGO_PKG_VERSION"));
