//! Branch prediction unit (BRU) selection.
//!
//! The out-of-order engine always runs with some predictor; this module names the variants
//! the configurator can swap in.

use serde::Serialize;

use crate::common::resolve::SymbolicOption;

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BranchPredictor {
    /// Bi-mode predictor.
    ///
    /// Splits the pattern history table into taken-biased and not-taken-biased halves
    /// selected by a choice table, reducing destructive aliasing.
    BiMode,
    /// Tournament predictor combining local and global predictors.
    ///
    /// Selects between local and global predictors based on performance.
    /// This is the engine's built-in default for out-of-order cores.
    Tournament,
    /// Local history predictor.
    ///
    /// Indexes two-bit counters with per-branch history.
    Local,
}

impl SymbolicOption for BranchPredictor {
    const CATEGORY: &'static str = "branch predictor";
    const FALLBACK: Self = Self::BiMode;
    const NAMES: &'static [(&'static str, Self)] = &[
        ("BiModeBP", Self::BiMode),
        ("BiMode", Self::BiMode),
        ("TournamentBP", Self::Tournament),
        ("Tournament", Self::Tournament),
        ("LocalBP", Self::Local),
        ("Local", Self::Local),
    ];
}
