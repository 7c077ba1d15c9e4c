//! HTTP networking module
//!
//! Provides the HTTP client used by provider adapters.

mod client;

pub use client::HttpClient;
