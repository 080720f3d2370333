//! Core token trait definitions.

use std::fmt::Debug;
use std::hash::Hash;

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to compare/hash.
pub trait Token: Copy + Ord + Hash + Send + Sync + Debug + 'static {
    /// Minimum token value (start of ring).
    fn zero() -> Self;
    /// Maximum token value (end of ring).
    fn max() -> Self;
    /// True if this token is the minimum.
    fn is_zero(&self) -> bool;
    /// True if this token is the maximum.
    fn is_max(&self) -> bool;
    /// Clockwise distance from `self` to `other` on the ring.
    fn distance_to(&self, other: &Self) -> Self;
}
