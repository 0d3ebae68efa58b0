//! Domain Port Interfaces
//!
//! Callback contracts implemented by applications and invoked by runtimes.

/// Client request filtering
pub mod client_filter;

pub use client_filter::{ClientRequestContext, ClientRequestFilter, FilterChain, FilterOutcome};
