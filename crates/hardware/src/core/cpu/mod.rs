//! Processor and core handles.
//!
//! This module defines the cores the System Assembly exposes to the builder. It provides:
//! 1. **Core Types:** Out-of-order, in-order timing, and atomic models.
//! 2. **Core:** Instruction/data access ports, pipeline parameters, and interrupt controller.
//! 3. **Processor:** The ordered set of cores sharing one core type and ISA.

use serde::Serialize;

use crate::common::error::{Result, ensure_positive};
use crate::common::resolve::SymbolicOption;
use crate::core::arch::{InterruptController, Isa};
use crate::core::pipeline::PipelineState;
use crate::soc::port::{Endpoint, Port, PortName};

/// Processor core model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CpuType {
    /// Out-of-order superscalar core.
    O3,
    /// In-order core with timing memory accesses.
    TimingSimple,
    /// In-order core with atomic (zero-contention) memory accesses.
    Atomic,
}

impl CpuType {
    /// Returns `true` for the out-of-order model, the only one that consumes pipeline parameters.
    pub const fn is_out_of_order(self) -> bool {
        matches!(self, Self::O3)
    }
}

impl SymbolicOption for CpuType {
    const CATEGORY: &'static str = "core type";
    const FALLBACK: Self = Self::O3;
    const NAMES: &'static [(&'static str, Self)] = &[
        ("O3", Self::O3),
        ("TimingSimple", Self::TimingSimple),
        ("Atomic", Self::Atomic),
    ];
}

/// One processing core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Core {
    index: usize,
    cpu_type: CpuType,
    isa: Isa,
    /// Instruction fetch port; bound to the core's private L1 instruction cache.
    pub icache_port: Port,
    /// Data access port; bound to the core's private L1 data cache.
    pub dcache_port: Port,
    /// Pipeline and prediction parameters.
    pub pipeline: PipelineState,
    /// Interrupt controller, once the configurator has attached one.
    pub interrupts: Option<InterruptController>,
    configured: bool,
}

impl Core {
    /// Creates core `index` with unbound ports and the engine's default pipeline parameters.
    pub fn new(index: usize, cpu_type: CpuType, isa: Isa) -> Self {
        Self {
            index,
            cpu_type,
            isa,
            icache_port: Port::single(Endpoint::Core(index), PortName::ICache),
            dcache_port: Port::single(Endpoint::Core(index), PortName::DCache),
            pipeline: PipelineState::default(),
            interrupts: None,
            configured: false,
        }
    }

    /// Returns `true` once the pipeline configurator has run on this core.
    pub const fn is_configured(&self) -> bool {
        self.configured
    }

    pub(crate) const fn mark_configured(&mut self) {
        self.configured = true;
    }

    /// Position of the core in the processor.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Core model.
    pub const fn cpu_type(&self) -> CpuType {
        self.cpu_type
    }

    /// Instruction set of the core.
    pub const fn isa(&self) -> Isa {
        self.isa
    }
}

/// The ordered set of cores of one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Processor {
    cpu_type: CpuType,
    isa: Isa,
    cores: Vec<Core>,
}

impl Processor {
    /// Creates a processor with `num_cores` identical cores.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::InvalidParameter`] if `num_cores` is zero.
    pub fn new(cpu_type: CpuType, isa: Isa, num_cores: usize) -> Result<Self> {
        ensure_positive("processor.num_cores", num_cores)?;
        let cores = (0..num_cores)
            .map(|index| Core::new(index, cpu_type, isa))
            .collect();
        Ok(Self {
            cpu_type,
            isa,
            cores,
        })
    }

    /// Core model shared by every core.
    pub const fn cpu_type(&self) -> CpuType {
        self.cpu_type
    }

    /// Instruction set shared by every core.
    pub const fn isa(&self) -> Isa {
        self.isa
    }

    /// Number of cores.
    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    /// Cores in index order.
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Mutable cores in index order.
    pub fn cores_mut(&mut self) -> &mut [Core] {
        &mut self.cores
    }
}
