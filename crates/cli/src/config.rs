//! Command-line and file configuration for `ringctl`.
//!
//! Servers come from a JSON file (`--config`), from repeated `--server` flags,
//! or both. File entries come first, flags are appended in order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use corelib::WeightedServer;
use serde::Deserialize;

use crate::commands::Command;
use crate::telemetry;

/// Inspect and query a consistent-hashing server ring.
#[derive(Parser, Debug)]
#[command(name = "ringctl", version, about)]
pub struct CliConfig {
    /// Path to a JSON config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Server as `addr` or `addr=weight`. Can be specified multiple times.
    #[arg(short, long = "server", global = true, value_parser = parse_server)]
    pub servers: Vec<WeightedServer>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// On-disk configuration.
///
/// ```json
/// { "servers": [{ "addr": "10.0.0.1:11211", "weight": 2 }], "log_level": "info" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub servers: Vec<WeightedServer>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

const DEFAULT_LOG_LEVEL: &str = "warn";

impl CliConfig {
    /// Loads the file config (if any), sets up logging and runs the command.
    pub fn run(self) -> Result<()> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let level = self
            .log_level
            .clone()
            .or_else(|| file.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        telemetry::init(&level);

        let servers = self.merge_servers(file)?;
        let result = self.command.execute(&servers)?;
        print!("{}", result);
        Ok(())
    }

    /// File servers followed by flag servers.
    pub fn merge_servers(&self, file: FileConfig) -> Result<Vec<WeightedServer>> {
        let mut servers = file.servers;
        servers.extend(self.servers.iter().cloned());
        if servers.is_empty() {
            bail!("no servers given; use --server or --config");
        }
        Ok(servers)
    }
}

/// Parses `addr` or `addr=weight`.
pub fn parse_server(s: &str) -> std::result::Result<WeightedServer, String> {
    match s.rsplit_once('=') {
        Some((addr, weight)) => {
            let weight = weight
                .parse::<u32>()
                .map_err(|e| format!("invalid weight {:?}: {}", weight, e))?;
            if addr.is_empty() {
                return Err("empty server address".to_string());
            }
            Ok(WeightedServer::new(addr, weight))
        }
        None if s.is_empty() => Err("empty server address".to_string()),
        None => Ok(WeightedServer::new(s, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server() {
        assert_eq!(
            parse_server("10.0.0.1:11211").unwrap(),
            WeightedServer::new("10.0.0.1:11211", 1)
        );
        assert_eq!(
            parse_server("10.0.0.1:11211=3").unwrap(),
            WeightedServer::new("10.0.0.1:11211", 3)
        );
        assert_eq!(
            parse_server("/tmp/mc.sock=0").unwrap(),
            WeightedServer::new("/tmp/mc.sock", 0)
        );
    }

    #[test]
    fn test_parse_server_invalid() {
        assert!(parse_server("").is_err());
        assert!(parse_server("=2").is_err());
        assert!(parse_server("10.0.0.1:11211=heavy").is_err());
    }

    #[test]
    fn test_file_config() {
        let config = FileConfig::from_json(
            r#"{"servers": [{"addr": "10.0.0.1:11211", "weight": 2}, {"addr": "/tmp/mc.sock"}]}"#,
        )
        .unwrap();
        assert_eq!(
            config.servers,
            vec![
                WeightedServer::new("10.0.0.1:11211", 2),
                WeightedServer::new("/tmp/mc.sock", 1),
            ]
        );
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_flags_follow_file_servers() {
        let cli = CliConfig::try_parse_from([
            "ringctl",
            "--server",
            "10.0.0.9:11211=4",
            "inspect",
        ])
        .unwrap();
        let file = FileConfig {
            servers: vec![WeightedServer::new("10.0.0.1:11211", 1)],
            log_level: None,
        };
        let merged = cli.merge_servers(file).unwrap();
        assert_eq!(merged[0].addr, "10.0.0.1:11211");
        assert_eq!(merged[1], WeightedServer::new("10.0.0.9:11211", 4));
    }

    #[test]
    fn test_no_servers_is_an_error() {
        let cli = CliConfig::try_parse_from(["ringctl", "inspect"]).unwrap();
        assert!(cli.merge_servers(FileConfig::default()).is_err());
    }
}
