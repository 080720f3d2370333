//! Consistent hash ring implementation.
//!
//! Weight normalization decides how many virtual nodes each server gets, the
//! builder hashes them into a sorted ring, and the ring answers lookups.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod ring;
pub mod weight;

pub use builder::RingBuilder;
pub use ring::{HashRing, RingServer};
pub use weight::{vnode_counts, MAX_FACTOR};

/// Alias for the main ring type (used by lib.rs).
pub type Ring = HashRing;
