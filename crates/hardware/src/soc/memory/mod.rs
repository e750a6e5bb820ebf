//! Main memory.
//!
//! The system owns one memory node: a single-channel DDR3-1600 module mapped at address zero.
//! Its port is the memory-side port of the system; the system crossbar binds to it during
//! incorporation, and x86 interrupt controllers bind to it during pipeline configuration.

use serde::Serialize;

use crate::common::MemorySize;
use crate::common::error::{Result, ensure_positive};
use crate::soc::port::{Endpoint, Port, PortName};

/// Main memory node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryNode {
    size: MemorySize,
    technology: &'static str,
    channels: u32,
    /// Memory-side port of the system; accepts several requestors.
    pub port: Port,
}

impl MemoryNode {
    /// Creates a single-channel DDR3-1600 memory of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::InvalidParameter`] if `size` is zero.
    pub fn ddr3_1600_single_channel(size: MemorySize) -> Result<Self> {
        ensure_positive("system.memory_size", size.bytes())?;
        Ok(Self {
            size,
            technology: "DDR3_1600_8x8",
            channels: 1,
            port: Port::vector(Endpoint::Memory, PortName::Port),
        })
    }

    /// Declared capacity.
    pub const fn size(&self) -> MemorySize {
        self.size
    }

    /// DRAM interface model name.
    pub const fn technology(&self) -> &'static str {
        self.technology
    }

    /// Number of memory channels.
    pub const fn channels(&self) -> u32 {
        self.channels
    }

    /// Physical address range `[start, end)` served by this memory.
    pub const fn address_range(&self) -> (u64, u64) {
        (0, self.size.bytes())
    }
}
