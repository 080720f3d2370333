//! Token abstraction module for consistent hashing.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe.

pub mod crc32;
pub mod traits;

pub use crc32::Crc32Token;
pub use traits::Token;
