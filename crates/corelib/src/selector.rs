//! Server selection over a swappable hash ring.
//!
//! [`RingSelector`] owns the active ring behind a read/write lock. Updates
//! build a complete new ring without holding the lock and only take the write
//! lock to swap the `Arc`. Lookups hold the read lock for the duration of one
//! binary search, so they never see a partially built ring and never wait on
//! DNS or hashing done by an update.

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::network::{Resolver, SystemResolver, Transport};
use crate::node::{ServerAddr, WeightedServer};
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::{HashRing, RingBuilder};
use crate::token::Crc32Token;

/// Consistent-hashing server selector.
///
/// Starts unconfigured: every [`pick_server`](Self::pick_server) fails with
/// [`Error::NoServersConfigured`] until the first successful
/// [`set_servers`](Self::set_servers). Once configured it stays configured;
/// a failed update keeps the previous ring.
///
/// # Example
///
/// ```rust
/// use corelib::{RingSelector, WeightedServer};
///
/// let selector = RingSelector::new();
/// selector
///     .set_servers(&[
///         WeightedServer::new("127.0.0.1:11211", 1),
///         WeightedServer::new("127.0.0.1:11212", 2),
///     ])
///     .unwrap();
/// let server = selector.pick_server("user:42").unwrap();
/// assert!(server.to_string().starts_with("tcp://127.0.0.1:1121"));
/// ```
pub struct RingSelector<R = SystemResolver, P = Crc32Partitioner> {
    ring: RwLock<Arc<HashRing>>,
    resolver: R,
    partitioner: P,
}

impl RingSelector {
    /// Selector resolving addresses through the operating system.
    pub fn new() -> Self {
        Self::with_parts(SystemResolver, Crc32Partitioner)
    }
}

impl Default for RingSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolver> RingSelector<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self::with_parts(resolver, Crc32Partitioner)
    }
}

impl<R, P> RingSelector<R, P>
where
    R: Resolver,
    P: Partitioner<TokenType = Crc32Token>,
{
    pub fn with_parts(resolver: R, partitioner: P) -> Self {
        Self {
            ring: RwLock::new(Arc::new(HashRing::new())),
            resolver,
            partitioner,
        }
    }

    /// Replaces the server set.
    ///
    /// Every address is resolved and the whole ring is built before anything
    /// becomes visible. If any step fails the active ring is left exactly as
    /// it was. Concurrent calls each publish a complete ring; the last swap
    /// wins.
    pub fn set_servers(&self, servers: &[WeightedServer]) -> Result<()> {
        if servers.is_empty() {
            warn!("rejected empty server list");
            counter!("ring_rebuild_failures_total").increment(1);
            return Err(Error::EmptyServerList);
        }

        let mut builder = RingBuilder::new();
        for server in servers {
            let transport = Transport::infer(&server.addr);
            let addr = match self.resolver.resolve(&server.addr, transport) {
                Ok(addr) => addr,
                Err(source) => {
                    warn!(addr = %server.addr, ?transport, error = %source, "failed to resolve server");
                    counter!("ring_rebuild_failures_total").increment(1);
                    return Err(Error::AddressResolution {
                        addr: server.addr.clone(),
                        source,
                    });
                }
            };
            debug!(addr = %server.addr, resolved = %addr, weight = server.weight, "resolved server");
            builder = builder.add_server(server.clone(), addr);
        }

        let ring = Arc::new(builder.build_with(&self.partitioner));
        let vnodes = ring.vnode_count();

        // The old ring is released after the guard, outside the lock.
        let _previous = std::mem::replace(&mut *self.ring.write(), ring);

        counter!("ring_rebuilds_total").increment(1);
        info!(servers = servers.len(), vnodes, "published hash ring");
        Ok(())
    }

    /// Picks the server owning `key`.
    pub fn pick_server(&self, key: &str) -> Result<ServerAddr> {
        self.pick_server_bytes(key.as_bytes())
    }

    /// Picks the server owning a binary key.
    pub fn pick_server_bytes(&self, key: &[u8]) -> Result<ServerAddr> {
        let token = self.partitioner.partition(key);
        let ring = self.ring.read();
        match ring.owner_of(token) {
            Some(addr) => Ok(addr.clone()),
            None => {
                counter!("ring_lookup_failures_total").increment(1);
                Err(Error::NoServersConfigured)
            }
        }
    }

    /// The currently active ring.
    ///
    /// The returned ring is immutable and stays valid after later updates.
    pub fn snapshot(&self) -> Arc<HashRing> {
        Arc::clone(&self.ring.read())
    }

    /// True once a server list has been published.
    pub fn is_configured(&self) -> bool {
        !self.ring.read().is_empty()
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }
}

impl<R, P> fmt::Debug for RingSelector<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.read();
        f.debug_struct("RingSelector")
            .field("servers", &ring.server_count())
            .field("vnodes", &ring.vnode_count())
            .finish()
    }
}
