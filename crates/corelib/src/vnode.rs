//! Virtual node abstractions.
//!
//! Each physical server is placed on the ring many times. Every placement is a
//! virtual node whose position is the hash of `"<addr><index>"`, where `addr`
//! is the address exactly as configured (not the resolved form) and `index`
//! counts from zero. Heavier servers get more indices and so own more of the
//! hash space.
//!
//! # Performance Characteristics
//!
//! - **Lookup**: O(log n) where n = total vnodes
//! - **Rebalancing**: removing one server only moves the keys its vnodes owned

use std::fmt::Write;

use crate::partitioner::Partitioner;
use crate::token::Token;

/// A virtual node on the hash ring.
///
/// `server` is the index of the owning server in the list the ring was built
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<T: Token> {
    pub token: T,
    pub server: usize,
}

impl<T: Token> VirtualNode<T> {
    #[inline]
    pub fn new(token: T, server: usize) -> Self {
        Self { token, server }
    }
}

/// Writes the identifier of virtual node `index` of `addr` into `buf`.
///
/// The buffer is cleared first so callers can reuse one allocation for a whole
/// ring build.
pub fn vnode_key(buf: &mut String, addr: &str, index: usize) {
    buf.clear();
    buf.push_str(addr);
    // Writing to a String cannot fail.
    let _ = write!(buf, "{}", index);
}

/// Produces the `count` virtual nodes of one server.
pub fn vnodes_for<'a, P: Partitioner>(
    partitioner: &'a P,
    addr: &'a str,
    server: usize,
    count: usize,
) -> impl Iterator<Item = VirtualNode<P::TokenType>> + 'a {
    let mut buf = String::with_capacity(addr.len() + 4);
    (0..count).map(move |index| {
        vnode_key(&mut buf, addr, index);
        VirtualNode::new(partitioner.partition(buf.as_bytes()), server)
    })
}
