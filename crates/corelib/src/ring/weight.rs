//! Weight normalization.
//!
//! Turns server weights into virtual-node counts. The nominal budget is
//! `MAX_FACTOR` vnodes per server, shared out in proportion to weight:
//!
//! ```text
//! vnodes(i) = floor(MAX_FACTOR * n * weight(i) / total_weight)
//! ```
//!
//! Truncation means the realized total can fall short of `MAX_FACTOR * n`,
//! and a server whose share rounds down to zero gets no vnodes at all. Both
//! are accepted; the ring layout must stay a pure function of the input.

/// Nominal number of virtual nodes per server.
pub const MAX_FACTOR: u64 = 50;

/// Virtual-node count for each weight, in input order.
///
/// Zero weights count as one.
pub fn vnode_counts(weights: &[u32]) -> Vec<usize> {
    let n = weights.len() as u128;
    let total: u128 = weights.iter().map(|&w| u128::from(w.max(1))).sum();
    if total == 0 {
        return Vec::new();
    }

    weights
        .iter()
        .map(|&w| {
            let share = u128::from(MAX_FACTOR) * n * u128::from(w.max(1)) / total;
            share as usize
        })
        .collect()
}
