//! Cache Replacement Policies.
//!
//! Selects the algorithm a cache uses to pick victim lines. The builder only records the
//! selection; victim selection itself runs inside the execution engine.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Random`: Random selection.
//! - `Lfu`: Least Frequently Used.
//! - `Bip`: Bimodal Insertion Policy.
//! - `Fifo`: First-In, First-Out (fallback for unrecognized names).

use serde::Serialize;

use crate::common::resolve::SymbolicOption;

/// Cache replacement policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the cache line that was accessed least recently.
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a randomly selected cache line from the set.
    Random,
    /// Least Frequently Used replacement policy.
    ///
    /// Evicts the cache line with the lowest access count.
    Lfu,
    /// Bimodal Insertion Policy.
    ///
    /// Inserts most new lines at the LRU position and occasionally at the MRU position,
    /// protecting the working set from streaming accesses.
    Bip,
    /// First In First Out replacement policy.
    ///
    /// Evicts the oldest cache line in the set (round-robin).
    Fifo,
}

impl SymbolicOption for ReplacementPolicy {
    const CATEGORY: &'static str = "replacement policy";
    const FALLBACK: Self = Self::Fifo;
    const NAMES: &'static [(&'static str, Self)] = &[
        ("LRU", Self::Lru),
        ("Random", Self::Random),
        ("LFU", Self::Lfu),
        ("BIP", Self::Bip),
        ("FIFO", Self::Fifo),
    ];
}
