//! Logging utilities.
//!
//! Logger initialization lives here. Everything else in the workspace logs through
//! the `log` facade and never touches the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
