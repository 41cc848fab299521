//! Integration test suite (requires a real Salesforce org).
//!
//! Run all integration tests with:
//!   SF_INSTANCE_URL=... SF_ACCESS_TOKEN=... cargo test --test integration -- --ignored --nocapture
//!
//! or with username-password credentials:
//!   SF_CLIENT_ID=... SF_CLIENT_SECRET=... SF_USERNAME=... SF_PASSWORD=... \
//!   SF_SECURITY_TOKEN=... cargo test --test integration -- --ignored --nocapture

#[path = "integration/common.rs"]
mod common;
#[path = "integration/rest.rs"]
mod rest;
