//! Core library for the Cylera CLI.
//!
//! Provides an authenticated client for the Cylera Partner API with
//! lazy token refresh, plus one query module per resource family
//! (inventory, network, risk, threat, utilization). Responses are
//! returned as raw JSON; this library performs no schema validation
//! and no pagination-following.

pub mod api;
pub mod auth;
pub mod config;
pub mod inventory;
pub mod network;
pub mod risk;
pub mod threat;
pub mod utilization;

pub use api::{CyleraClient, CyleraError};
pub use config::Config;
