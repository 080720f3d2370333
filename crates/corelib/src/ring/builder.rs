//! Ring construction.
//!
//! Building is pure: the same servers in the same order always produce the
//! same ring. Nothing here takes a lock; the selector publishes the finished
//! ring afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::node::{ServerAddr, WeightedServer};
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::ring::{HashRing, RingServer};
use crate::ring::weight::vnode_counts;
use crate::token::Crc32Token;
use crate::vnode::vnodes_for;

/// Collects resolved servers and turns them into a [`HashRing`].
///
/// # Example
///
/// ```rust
/// use corelib::node::{ServerAddr, WeightedServer};
/// use corelib::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .add_server(
///         WeightedServer::new("127.0.0.1:11211", 1),
///         ServerAddr::Tcp("127.0.0.1:11211".parse().unwrap()),
///     )
///     .build();
/// assert_eq!(ring.vnode_count(), 50);
/// ```
#[derive(Debug, Default)]
pub struct RingBuilder {
    servers: Vec<(WeightedServer, ServerAddr)>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a server together with its already resolved address.
    pub fn add_server(mut self, server: WeightedServer, addr: ServerAddr) -> Self {
        self.servers.push((server, addr));
        self
    }

    /// Builds the ring with the default CRC-32 partitioner.
    pub fn build(self) -> HashRing {
        self.build_with(&Crc32Partitioner)
    }

    /// Builds the ring, hashing virtual nodes with `partitioner`.
    ///
    /// When two virtual nodes land on the same token the one placed later
    /// silently takes the position.
    pub fn build_with<P>(self, partitioner: &P) -> HashRing
    where
        P: Partitioner<TokenType = Crc32Token>,
    {
        let weights: Vec<u32> = self.servers.iter().map(|(s, _)| s.weight).collect();
        let counts = vnode_counts(&weights);
        let planned: usize = counts.iter().sum();

        let mut owners: HashMap<Crc32Token, usize> = HashMap::with_capacity(planned);
        let mut overwritten = 0usize;
        for (idx, ((server, _), count)) in self.servers.iter().zip(&counts).enumerate() {
            for vnode in vnodes_for(partitioner, &server.addr, idx, *count) {
                if owners.insert(vnode.token, vnode.server).is_some() {
                    overwritten += 1;
                }
            }
        }

        let mut tokens: Vec<Crc32Token> = owners.keys().copied().collect();
        tokens.sort_unstable();

        debug!(
            servers = self.servers.len(),
            planned_vnodes = planned,
            vnodes = tokens.len(),
            overwritten,
            partitioner = partitioner.name(),
            "built hash ring"
        );

        let servers = self
            .servers
            .into_iter()
            .zip(counts)
            .map(|((server, addr), planned_vnodes)| RingServer {
                weight: server.effective_weight(),
                name: server.addr,
                addr,
                planned_vnodes,
            })
            .collect();

        HashRing::from_parts(tokens, owners, servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tcp(addr: &str, weight: u32) -> (WeightedServer, ServerAddr) {
        (
            WeightedServer::new(addr, weight),
            ServerAddr::Tcp(addr.parse().unwrap()),
        )
    }

    /// Places every vnode identifier at the same token.
    struct Constant;

    impl Partitioner for Constant {
        type TokenType = Crc32Token;

        fn partition(&self, _key: &[u8]) -> Crc32Token {
            Crc32Token(7)
        }

        fn name(&self) -> &'static str {
            "Constant"
        }
    }

    #[test]
    fn test_build_default() {
        let (s1, a1) = tcp("10.0.0.1:11211", 1);
        let (s2, a2) = tcp("10.0.0.2:11211", 1);
        let ring = RingBuilder::new().add_server(s1, a1).add_server(s2, a2).build();

        assert_eq!(ring.server_count(), 2);
        assert_eq!(ring.vnode_count(), 100);
        assert!(ring.tokens().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ring.servers()[0].planned_vnodes, 50);
    }

    #[test]
    fn test_vnode_positions_follow_raw_address() {
        let (s1, a1) = tcp("10.0.0.1:11211", 1);
        let ring = RingBuilder::new().add_server(s1, a1.clone()).build();
        for i in 0..50 {
            let token = Crc32Token::from_key(&format!("10.0.0.1:11211{}", i));
            assert!(ring.tokens().binary_search(&token).is_ok());
            assert_eq!(ring.owner_of(token), Some(&a1));
        }
    }

    #[test]
    fn test_weighted_build() {
        let (s1, a1) = tcp("10.0.0.1:11211", 2);
        let (s2, a2) = tcp("10.0.0.2:11211", 1);
        let ring = RingBuilder::new().add_server(s1, a1).add_server(s2, a2).build();

        let heavy = ring.entries().filter(|(_, owner)| *owner == 0).count();
        let light = ring.entries().filter(|(_, owner)| *owner == 1).count();
        // 66 and 33 planned, minus any collisions.
        assert!(heavy <= 66 && heavy >= 60);
        assert!(light <= 33 && light >= 28);
    }

    #[test]
    fn test_collision_later_write_wins() {
        let ring = RingBuilder::new()
            .add_server(
                WeightedServer::new("/first.sock", 1),
                ServerAddr::Unix(PathBuf::from("/first.sock")),
            )
            .add_server(
                WeightedServer::new("/second.sock", 1),
                ServerAddr::Unix(PathBuf::from("/second.sock")),
            )
            .build_with(&Constant);

        assert_eq!(ring.vnode_count(), 1);
        assert_eq!(ring.server_count(), 2);
        assert_eq!(
            ring.owner_of(Crc32Token(0)),
            Some(&ServerAddr::Unix(PathBuf::from("/second.sock")))
        );
    }

    #[test]
    fn test_zero_weight_recorded_as_one() {
        let (s1, a1) = tcp("10.0.0.1:11211", 0);
        let ring = RingBuilder::new().add_server(s1, a1).build();
        assert_eq!(ring.servers()[0].weight, 1);
        assert_eq!(ring.vnode_count(), 50);
    }

    #[test]
    fn test_empty_builder() {
        assert!(RingBuilder::new().build().is_empty());
    }
}
