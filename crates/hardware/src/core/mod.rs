//! Core-side configuration.
//!
//! This module contains everything the builder parameterizes inside or next to a core:
//! instruction-set descriptors, core handles, pipeline configuration, and the cache,
//! prefetcher, and branch predictor selections.

/// Instruction-set descriptors and interrupt controllers.
pub mod arch;

/// Processor and core handles.
pub mod cpu;

/// Pipeline parameters and the pipeline configurator.
pub mod pipeline;

/// Cache node factory and predictor/prefetcher selections.
pub mod units;

pub use self::cpu::{Core, CpuType, Processor};
