//! Session state for the authenticated API client.
//!
//! Tokens are obtained lazily by `CyleraClient` and expire after a
//! hardcoded 23-hour lifetime; refresh is purely reactive, checked at
//! the start of every request.

pub mod session;

pub use session::SessionData;
