//! CRC-32/IEEE partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::crc32::Crc32Token;

/// Hashes keys with CRC-32 (IEEE polynomial).
///
/// Not a cryptographic hash; chosen for speed and because its output is
/// stable across platforms and releases.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Partitioner;

impl Partitioner for Crc32Partitioner {
    type TokenType = Crc32Token;

    #[inline]
    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Crc32Token::from_bytes(key)
    }

    fn name(&self) -> &'static str {
        "Crc32Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_matches_token() {
        let p = Crc32Partitioner;
        assert_eq!(p.partition(b"foo"), Crc32Token::from_key("foo"));
        assert_eq!(p.name(), "Crc32Partitioner");
    }
}
