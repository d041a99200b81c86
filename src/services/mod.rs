//! Business logic services.
//!
//! Services hold the credential logic and are kept apart from the HTTP
//! handlers: hashing, token signing, key generation, and the storage calls
//! that go with them.

pub mod api_key;
pub mod auth;
pub mod password;
pub mod token;
