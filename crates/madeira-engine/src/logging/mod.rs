//! Logging setup.
//!
//! The engine only talks to the `log` facade; this module installs the
//! `env_logger` backend for applications that do not bring their own.

mod init;

pub use init::{init_logging, LoggingConfig};
