//! Endpoint resolution.
//!
//! The selector never talks to a server. It only needs every configured
//! address turned into a [`ServerAddr`] before the ring is built, and that
//! job is delegated to a [`Resolver`].

use std::io;
use std::net::ToSocketAddrs;
use std::path::PathBuf;

use crate::node::ServerAddr;

/// Transport an address string refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Unix,
}

impl Transport {
    /// Anything containing a path separator is a local socket path, everything
    /// else is `host:port`.
    pub fn infer(addr: &str) -> Self {
        if addr.contains('/') {
            Transport::Unix
        } else {
            Transport::Tcp
        }
    }
}

/// Turns a configured address into a resolved endpoint.
///
/// Implementations may block (DNS). The selector calls them outside of any
/// lock, so a slow resolver only delays `set_servers`.
pub trait Resolver: Send + Sync + 'static {
    fn resolve(&self, addr: &str, transport: Transport) -> io::Result<ServerAddr>;
}

/// Resolver backed by the operating system.
///
/// TCP addresses go through [`ToSocketAddrs`] and the first answer wins.
/// Unix paths are taken as-is; nothing is checked on disk.
#[derive(Clone, Debug, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, addr: &str, transport: Transport) -> io::Result<ServerAddr> {
        match transport {
            Transport::Unix => Ok(ServerAddr::Unix(PathBuf::from(addr))),
            Transport::Tcp => addr
                .to_socket_addrs()?
                .next()
                .map(ServerAddr::Tcp)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no addresses found for {}", addr),
                    )
                }),
        }
    }
}

impl<F> Resolver for F
where
    F: Fn(&str, Transport) -> io::Result<ServerAddr> + Send + Sync + 'static,
{
    fn resolve(&self, addr: &str, transport: Transport) -> io::Result<ServerAddr> {
        self(addr, transport)
    }
}
