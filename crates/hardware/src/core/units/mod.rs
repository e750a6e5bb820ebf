//! Functional unit selections and cache node construction.
//!
//! This module groups the parts of a core's memory path and front end that the builder
//! parameterizes:
//! 1. **Cache:** Cache specifications and the cache node factory.
//! 2. **Prefetch:** Hardware prefetcher selection.
//! 3. **BRU:** Branch predictor selection.

/// Branch predictor selection.
pub mod bru;

/// Cache specifications, replacement policies, and the cache node factory.
pub mod cache;

/// Hardware prefetcher selection.
pub mod prefetch;
