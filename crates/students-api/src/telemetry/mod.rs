//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - Request bodies (student names, emails) never appear in log fields; only
//!   ids and error messages are logged.
//! - Log level is configurable via `log_level` in the config file
//!   (default: `info`); `RUST_LOG` takes precedence when set.

pub mod init;

pub use init::init_telemetry;
