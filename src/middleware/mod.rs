//! HTTP middleware components.
//!
//! Two guards, one per credential type. Each verifies its credential, inserts
//! a typed context into the request extensions, or short-circuits with 401.

/// API key authentication for ingestion routes
pub mod api_key;

/// Cookie session authentication for dashboard routes
pub mod session;
