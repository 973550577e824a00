//! REST API client module for the Cylera Partner API.
//!
//! Provides `CyleraClient` for authenticated requests. The API uses
//! bearer-token authentication obtained through the partner login
//! endpoint; tokens are refreshed lazily when absent or expired.

pub mod client;
pub mod error;

pub use client::CyleraClient;
pub use error::CyleraError;

/// Pagination is 0-indexed on the partner API.
pub const DEFAULT_PAGE: u32 = 0;

/// Vendor-side cap on results per page. Requests above 100 are rejected
/// by the API, not validated here.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Query-parameter list under construction. Unset filters are omitted
/// entirely; unset is "no filter", not "filter on empty string".
#[derive(Debug, Default)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    pub fn set(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    /// Append `key=value` only when the filter is set.
    pub fn set_opt<T: ToString>(&mut self, key: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
