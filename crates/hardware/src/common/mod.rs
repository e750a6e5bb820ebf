//! Common utilities and types shared across the topology builder.
//!
//! This module provides the building blocks every other module leans on. It includes:
//! 1. **Error Handling:** The [`ConfigError`] type and its [`Result`] alias.
//! 2. **Quantities:** Parsed memory sizes and clock frequencies.
//! 3. **Option Resolution:** The name-to-behavior lookup with documented fallbacks.

/// Configuration error type.
pub mod error;

/// Symbolic option resolution with fallbacks.
pub mod resolve;

/// Memory size and frequency quantities.
pub mod units;

pub use error::{ConfigError, Result};
pub use resolve::SymbolicOption;
pub use units::{Frequency, MemorySize};
