//! Immutable hash ring.
//!
//! A ring is built once by [`RingBuilder`](super::RingBuilder) and never
//! changed afterwards. Updating the server set means building a new ring and
//! publishing it through the selector.

use std::collections::HashMap;

use crate::node::ServerAddr;
use crate::token::Crc32Token;

/// A server as placed on a ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingServer {
    /// Address as configured. Virtual-node identifiers are derived from it.
    pub name: String,
    pub weight: u32,
    pub addr: ServerAddr,
    /// Vnodes assigned by weight normalization. Collisions can leave the ring
    /// with fewer positions than this.
    pub planned_vnodes: usize,
}

/// Sorted ring positions plus the owner of each.
///
/// # Invariants
///
/// - `tokens` is strictly ascending
/// - every token has an entry in `owners`, and `owners` has no other keys
/// - every owner index is valid in `servers`
#[derive(Debug, Default)]
pub struct HashRing {
    tokens: Vec<Crc32Token>,
    owners: HashMap<Crc32Token, usize>,
    servers: Vec<RingServer>,
}

impl HashRing {
    /// The empty ring. Every lookup against it misses.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        tokens: Vec<Crc32Token>,
        owners: HashMap<Crc32Token, usize>,
        servers: Vec<RingServer>,
    ) -> Self {
        debug_assert!(tokens.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(tokens.len(), owners.len());
        Self {
            tokens,
            owners,
            servers,
        }
    }

    /// True when the ring has no positions.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() || self.owners.is_empty()
    }

    /// Finds the server owning `token`.
    ///
    /// The owner is the first position `>= token`; past the last position the
    /// search wraps to the first one.
    pub fn lookup(&self, token: Crc32Token) -> Option<&RingServer> {
        let idx = self.position_for(token)?;
        let owner = self.owners.get(&self.tokens[idx])?;
        self.servers.get(*owner)
    }

    /// Resolved address of the server owning `token`.
    #[inline]
    pub fn owner_of(&self, token: Crc32Token) -> Option<&ServerAddr> {
        self.lookup(token).map(|server| &server.addr)
    }

    /// Index into [`tokens`](Self::tokens) of the position owning `token`.
    pub fn position_for(&self, token: Crc32Token) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let idx = self.tokens.partition_point(|t| *t < token);
        Some(if idx == self.tokens.len() { 0 } else { idx })
    }

    /// Number of positions (realized virtual nodes) on the ring.
    pub fn vnode_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of servers the ring was built from, including any that ended up
    /// with no positions.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// All positions, ascending.
    pub fn tokens(&self) -> &[Crc32Token] {
        &self.tokens
    }

    /// Servers in the order they were configured.
    pub fn servers(&self) -> &[RingServer] {
        &self.servers
    }

    /// Owning server index of each position, in ring order.
    pub fn entries(&self) -> impl Iterator<Item = (Crc32Token, usize)> + '_ {
        self.tokens
            .iter()
            .filter_map(|t| self.owners.get(t).map(|owner| (*t, *owner)))
    }
}
