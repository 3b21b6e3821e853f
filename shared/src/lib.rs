//! Shared types for the smart cart backend
//!
//! Error codes, API envelope, domain models and small utilities used by
//! cart-server and mirrored by the web client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};
