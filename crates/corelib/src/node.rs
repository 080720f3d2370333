//! Server abstractions for the selector.
//!
//! A [`WeightedServer`] is what callers configure; a [`ServerAddr`] is what a
//! lookup hands back once the address has been resolved.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A backend server as configured by the caller.
///
/// `weight` is the server's relative capacity share. A weight of 0 is treated
/// as 1 when the ring is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedServer {
    /// Either `host:port` or a local socket path.
    pub addr: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl WeightedServer {
    pub fn new(addr: impl Into<String>, weight: u32) -> Self {
        Self {
            addr: addr.into(),
            weight,
        }
    }

    /// Weight with the zero-means-one rule applied.
    #[inline]
    pub fn effective_weight(&self) -> u32 {
        self.weight.max(1)
    }
}

/// A resolved server endpoint.
///
/// Cheap to clone; returned by value from every lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ServerAddr {
    Tcp(SocketAddr),
    Unix(PathBuf),
}

impl ServerAddr {
    pub fn is_unix(&self) -> bool {
        matches!(self, ServerAddr::Unix(_))
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerAddr::Tcp(addr) => write!(f, "tcp://{}", addr),
            ServerAddr::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_weight() {
        assert_eq!(WeightedServer::new("a:1", 0).effective_weight(), 1);
        assert_eq!(WeightedServer::new("a:1", 7).effective_weight(), 7);
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let server: WeightedServer =
            serde_json::from_str(r#"{"addr": "127.0.0.1:11211"}"#).unwrap();
        assert_eq!(server.weight, 1);
        assert_eq!(server.addr, "127.0.0.1:11211");
    }

    #[test]
    fn test_display() {
        let tcp = ServerAddr::Tcp("127.0.0.1:11211".parse().unwrap());
        assert_eq!(tcp.to_string(), "tcp://127.0.0.1:11211");
        let unix = ServerAddr::Unix(PathBuf::from("/tmp/mc.sock"));
        assert_eq!(unix.to_string(), "unix:///tmp/mc.sock");
        assert!(unix.is_unix());
        assert!(!tcp.is_unix());
    }
}
