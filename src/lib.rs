//! Billbo backend: merchant accounts, API keys, SKUs and usage-event ingestion.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind the [`store::Store`] trait
//! - **Dashboard authentication**: email/password (Argon2id), then a signed
//!   session token in an `HttpOnly` cookie
//! - **Ingestion authentication**: API key with SHA-256 hashing
//! - **Format**: JSON requests/responses
//!
//! The binary in `main.rs` wires configuration, the PostgreSQL store and
//! the router together; tests build the same router over
//! [`store::MemoryStore`].

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
