//! Axum HTTP server, routing, and lifecycle.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Serve until a shutdown signal arrives, then drain within a bounded time.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod serve;
pub mod state;
