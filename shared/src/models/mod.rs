//! Data models
//!
//! Shared between cart-server and the web client (via API).
//! Wire format is camelCase JSON.

pub mod bill;
pub mod cart;
pub mod payment;
pub mod product;
pub mod transaction;

// Re-exports
pub use bill::*;
pub use cart::*;
pub use payment::*;
pub use product::*;
pub use transaction::*;
