//! CLI tool for consistent-hashing server rings.
//!
//! Provides commands for:
//! - Looking up which server owns a key
//! - Inspecting per-server ring ownership
//! - Measuring key movement when a server is removed

pub mod commands;
pub mod config;
pub mod telemetry;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
