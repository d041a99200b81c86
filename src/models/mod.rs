//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response bodies built from them.

/// API key authentication model
pub mod api_key;
/// Usage event model
pub mod event;
/// Merchant (tenant) model
pub mod merchant;
/// Billable product model
pub mod sku;
