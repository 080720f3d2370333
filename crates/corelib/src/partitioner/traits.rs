//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe. The same partitioner must be
/// used to place virtual nodes and to look keys up, otherwise lookups land on
/// arbitrary owners.
pub trait Partitioner: Send + Sync + 'static {
    /// The token type produced by this partitioner.
    type TokenType: Token;

    /// Converts a key into a token.
    fn partition(&self, key: &[u8]) -> Self::TokenType;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
