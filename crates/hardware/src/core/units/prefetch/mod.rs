//! Hardware prefetcher selection.
//!
//! A cache may carry one prefetcher. `Prefetcher::None` is a valid, common selection and
//! means nothing is attached to the cache node.

use serde::Serialize;

use crate::common::resolve::SymbolicOption;

/// Hardware prefetcher types for cache prefetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Prefetcher {
    /// No prefetching enabled.
    #[default]
    None,
    /// Stride prefetcher.
    ///
    /// Detects stride patterns in memory accesses and prefetches
    /// addresses following the detected stride.
    Stride,
    /// Tagged prefetcher.
    ///
    /// Prefetches on demand misses and on hits to previously prefetched lines.
    Tagged,
    /// DCPT prefetcher.
    ///
    /// Records per-PC address deltas and replays recurring delta sequences.
    Dcpt,
}

impl Prefetcher {
    /// Returns the prefetcher to attach, or `None` when no prefetching is selected.
    pub const fn attachment(self) -> Option<Self> {
        match self {
            Self::None => None,
            other => Some(other),
        }
    }
}

impl SymbolicOption for Prefetcher {
    const CATEGORY: &'static str = "prefetcher";
    const FALLBACK: Self = Self::None;
    const NAMES: &'static [(&'static str, Self)] = &[
        ("None", Self::None),
        ("StridePrefetcher", Self::Stride),
        ("Stride", Self::Stride),
        ("TaggedPrefetcher", Self::Tagged),
        ("Tagged", Self::Tagged),
        ("DCPTPrefetcher", Self::Dcpt),
        ("DCPT", Self::Dcpt),
        ("DeadCachePredictionTable", Self::Dcpt),
    ];
}
