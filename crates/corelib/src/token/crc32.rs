//! 32-bit ring positions produced by CRC-32/IEEE.

use std::fmt;

use crate::token::traits::Token;

/// A position on the 32-bit ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Crc32Token(pub u32);

impl Token for Crc32Token {
    fn zero() -> Self {
        Crc32Token(0)
    }

    fn max() -> Self {
        Crc32Token(u32::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u32::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        Crc32Token(other.0.wrapping_sub(self.0))
    }
}

impl Crc32Token {
    /// CRC-32 (IEEE polynomial) of `data`.
    #[inline]
    pub fn from_bytes(data: &[u8]) -> Self {
        Crc32Token(crc32fast::hash(data))
    }

    /// Creates a token from a string key.
    #[inline]
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}

impl From<u32> for Crc32Token {
    fn from(value: u32) -> Self {
        Crc32Token(value)
    }
}

impl fmt::Display for Crc32Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
