//! HTTP surface.
//!
//! The router is composable and carries its own state, so tests drive
//! it directly without binding a socket; `server` wraps it with a
//! listener and graceful shutdown for the binary.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::clinic_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
