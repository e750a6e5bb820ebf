//! System-on-Chip (SoC) topology.
//!
//! This module organizes the components that make up the wired system: ports, crossbars,
//! main memory, the two-level cache hierarchy, the board that owns them, and the builder
//! that assembles everything from configuration.

/// Board: clock, memory, processor, cache hierarchy, and workload.
pub mod board;

/// System builder and topology report.
pub mod builder;

/// Private-L1 / shared-L2 cache hierarchy with two-phase wiring.
pub mod hierarchy;

/// L2 and system crossbars.
pub mod interconnect;

/// Main memory node.
pub mod memory;

/// Ports, port identities, and binding.
pub mod port;

/// System Assembly interface.
pub mod traits;

pub use board::Board;
pub use builder::System;
pub use hierarchy::{CacheHierarchy, HierarchySpec};
pub use traits::SystemAssembly;
