//! Multi-core memory hierarchy and pipeline topology builder.
//!
//! This crate turns a flat set of parameters into a fully wired hardware topology for a
//! cycle-level simulator:
//! 1. **Common:** Errors, size/frequency quantities, and symbolic option resolution.
//! 2. **Config:** JSON-deserializable configuration with stock defaults.
//! 3. **Core:** ISA descriptors, cores, cache node factory, and the pipeline configurator.
//! 4. **SoC:** Ports, crossbars, memory, the cache hierarchy, the board, and the builder.

/// Common types (errors, quantities, option resolution).
pub mod common;
/// Topology configuration (defaults, hierarchical config structures).
pub mod config;
/// Core-side configuration (arch, cpu, pipeline, caches, predictors).
pub mod core;
/// System topology (ports, interconnects, memory, hierarchy, board, builder).
pub mod soc;

/// Root configuration type; use `Config::load` or build one directly.
pub use crate::config::Config;
/// Error type shared by every fallible operation.
pub use crate::common::ConfigError;
/// Assembled system; construct with `System::assemble`.
pub use crate::soc::System;
