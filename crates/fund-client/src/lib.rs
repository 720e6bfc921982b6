//! fund-client
//!
//! HTTP access to the fund API: bearer authentication, the two submission
//! endpoints and the error taxonomy surfaced to callers.
//! Depends on fund-domain for payload shapes. Never retries.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use auth::AuthContext;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use transport::FundTransport;
