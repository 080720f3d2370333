//! Ownership summary of a ring.
//!
//! Reports, per server, how many positions it actually holds and what
//! fraction of the 32-bit hash space maps to it. Useful for checking how far
//! a weighted layout drifts from the configured weights.

use crate::ring::HashRing;
use crate::token::{Crc32Token, Token};

/// Hash-space share of one server.
#[derive(Clone, Debug, PartialEq)]
pub struct Ownership {
    pub name: String,
    pub weight: u32,
    pub planned_vnodes: usize,
    /// Positions still held after collisions.
    pub vnodes: usize,
    /// Number of hash values owned, out of 2^32.
    pub span: u64,
}

impl Ownership {
    /// Owned fraction of the hash space, in `[0, 1]`.
    pub fn share(&self) -> f64 {
        self.span as f64 / HASH_SPACE as f64
    }
}

const HASH_SPACE: u64 = 1 << 32;

/// Per-server ownership, in configuration order.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    pub servers: Vec<Ownership>,
}

impl Topology {
    /// Walks the ring once and sums the arc each position owns.
    ///
    /// Position `i` owns every hash in `(tokens[i - 1], tokens[i]]`; the first
    /// position also owns the wrapped arc past the last one.
    pub fn of(ring: &HashRing) -> Self {
        let mut servers: Vec<Ownership> = ring
            .servers()
            .iter()
            .map(|s| Ownership {
                name: s.name.clone(),
                weight: s.weight,
                planned_vnodes: s.planned_vnodes,
                vnodes: 0,
                span: 0,
            })
            .collect();

        let tokens = ring.tokens();
        let mut prev: Option<Crc32Token> = tokens.last().copied();
        for (token, owner) in ring.entries() {
            let span = match prev {
                Some(_) if tokens.len() == 1 => HASH_SPACE,
                Some(p) => u64::from(p.distance_to(&token).0),
                None => 0,
            };
            if let Some(entry) = servers.get_mut(owner) {
                entry.vnodes += 1;
                entry.span += span;
            }
            prev = Some(token);
        }

        Self { servers }
    }

    /// Total positions on the ring.
    pub fn vnode_count(&self) -> usize {
        self.servers.iter().map(|s| s.vnodes).sum()
    }
}
