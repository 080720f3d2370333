//! Core library for consistent-hashing server selection.
//!
//! Maps cache keys onto a weighted, runtime-replaceable set of backend
//! servers:
//! - Server descriptors and endpoint resolution
//! - CRC-32 tokens and partitioner
//! - Weight normalization and ring construction
//! - The selector that publishes rings and answers lookups
//! - Ownership summaries of a ring

pub mod error;
pub mod network;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod selector;
pub mod token;
pub mod topology;
pub mod vnode;

pub use error::{Error, Result};
pub use network::{Resolver, SystemResolver, Transport};
pub use node::{ServerAddr, WeightedServer};
pub use partitioner::Partitioner;
pub use ring::{Ring, RingBuilder};
pub use selector::RingSelector;
pub use token::Token;
pub use topology::Topology;
pub use vnode::VirtualNode;
