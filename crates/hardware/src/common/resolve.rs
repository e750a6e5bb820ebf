//! Symbolic option resolution.
//!
//! Every user-facing knob that names a behavior (a replacement policy, a prefetcher, a core
//! type, an instruction set, a branch predictor) is resolved through [`SymbolicOption`]. The
//! lookup is a pure mapping over a closed set of names with an explicit fallback arm, so a
//! typo in an optional knob never aborts setup. Rejecting truly invalid values is the job of
//! the argument parser in front of this crate.

/// A closed set of behaviors selectable by name, with a fixed fallback.
pub trait SymbolicOption: Sized + Copy + 'static {
    /// Category name used in log messages (e.g., `"replacement policy"`).
    const CATEGORY: &'static str;

    /// Variant returned for names that are not recognized.
    const FALLBACK: Self;

    /// Recognized option names and the variant each one selects.
    ///
    /// Several spellings may map to the same variant. Matching is exact and case-sensitive.
    const NAMES: &'static [(&'static str, Self)];

    /// Returns the variant for `name`, or `None` if the name is not recognized.
    fn lookup(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, option)| *option)
    }

    /// Returns the variant for `name`, falling back to [`Self::FALLBACK`].
    fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or(Self::FALLBACK)
    }

    /// Returns `true` if `name` selects a variant without falling back.
    fn is_recognized(name: &str) -> bool {
        Self::lookup(name).is_some()
    }
}

/// Resolves `name` like [`SymbolicOption::resolve`], logging a warning when the fallback is taken.
///
/// `parameter` identifies the configuration field for the log message.
pub fn resolve_logged<T>(parameter: &str, name: &str) -> T
where
    T: SymbolicOption + std::fmt::Debug,
{
    T::lookup(name).unwrap_or_else(|| {
        tracing::warn!(
            parameter,
            name,
            fallback = ?T::FALLBACK,
            "unrecognized {} name, using fallback",
            T::CATEGORY
        );
        T::FALLBACK
    })
}
