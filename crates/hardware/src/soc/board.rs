//! Single-board system.
//!
//! The board is the System Assembly: it owns the clock domain, main memory, the processor,
//! and, once incorporated, the cache hierarchy. Components are attached in this order:
//! 1. **Construction:** Clock and memory exist from the start.
//! 2. **Processor:** Exposes the core handles; before this, the board has no cores.
//! 3. **Cache hierarchy:** Incorporated against the board, then moved in.
//! 4. **Workload:** The binary the cores will run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::common::error::{ConfigError, Result};
use crate::common::units::Frequency;
use crate::core::{Core, Processor};
use crate::soc::hierarchy::CacheHierarchy;
use crate::soc::memory::MemoryNode;
use crate::soc::port::Port;
use crate::soc::traits::SystemAssembly;

/// The clock every component of the board runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockDomain {
    /// Clock frequency.
    pub frequency: Frequency,
}

impl ClockDomain {
    /// Clock period in simulator ticks.
    pub fn period_ticks(&self) -> u64 {
        self.frequency.period_ticks()
    }
}

/// A syscall-emulation workload: one statically linked binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workload {
    /// Path of the binary, carried opaquely.
    pub binary: PathBuf,
}

/// A board with one processor, one cache hierarchy, and one memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    clock: ClockDomain,
    memory: MemoryNode,
    processor: Option<Processor>,
    cache_hierarchy: Option<CacheHierarchy>,
    workload: Option<Workload>,
}

impl Board {
    /// Creates a board with a clock and memory and nothing else.
    pub const fn new(clock: ClockDomain, memory: MemoryNode) -> Self {
        Self {
            clock,
            memory,
            processor: None,
            cache_hierarchy: None,
            workload: None,
        }
    }

    /// Attaches the processor, exposing its cores.
    pub fn set_processor(&mut self, processor: Processor) {
        tracing::debug!(
            cores = processor.num_cores(),
            cpu_type = ?processor.cpu_type(),
            isa = ?processor.isa(),
            "attached processor"
        );
        self.processor = Some(processor);
    }

    /// Incorporates `hierarchy` into the board and takes ownership of it.
    ///
    /// # Errors
    ///
    /// Propagates the incorporation error; the board is unchanged on failure.
    pub fn incorporate_cache(&mut self, mut hierarchy: CacheHierarchy) -> Result<()> {
        if self.cache_hierarchy.is_some() {
            return Err(ConfigError::AlreadyIncorporated);
        }
        hierarchy.incorporate(self)?;
        self.cache_hierarchy = Some(hierarchy);
        Ok(())
    }

    /// Sets the binary the cores will run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for an empty path.
    pub fn set_se_binary_workload(&mut self, binary: &Path) -> Result<()> {
        if binary.as_os_str().is_empty() {
            return Err(ConfigError::invalid("workload.binary", "path is empty"));
        }
        self.workload = Some(Workload {
            binary: binary.to_path_buf(),
        });
        Ok(())
    }

    /// Clock domain.
    pub const fn clock(&self) -> ClockDomain {
        self.clock
    }

    /// Main memory.
    pub const fn memory(&self) -> &MemoryNode {
        &self.memory
    }

    /// Processor, once attached.
    pub const fn processor(&self) -> Option<&Processor> {
        self.processor.as_ref()
    }

    /// Cache hierarchy, once incorporated.
    pub const fn cache_hierarchy(&self) -> Option<&CacheHierarchy> {
        self.cache_hierarchy.as_ref()
    }

    /// Workload, once set.
    pub const fn workload(&self) -> Option<&Workload> {
        self.workload.as_ref()
    }

    /// Every port on the board: memory, cores and their interrupt controllers, then the
    /// cache hierarchy.
    pub fn ports(&self) -> Vec<&Port> {
        let mut ports = vec![&self.memory.port];
        if let Some(processor) = &self.processor {
            for core in processor.cores() {
                ports.push(&core.icache_port);
                ports.push(&core.dcache_port);
                if let Some(controller) = &core.interrupts {
                    ports.extend(controller.ports());
                }
            }
        }
        if let Some(hierarchy) = &self.cache_hierarchy {
            ports.extend(hierarchy.ports());
        }
        ports
    }
}

impl SystemAssembly for Board {
    fn mem_port(&self) -> &Port {
        &self.memory.port
    }

    fn mem_port_mut(&mut self) -> &mut Port {
        &mut self.memory.port
    }

    fn num_cores(&self) -> Option<usize> {
        self.processor.as_ref().map(Processor::num_cores)
    }

    fn cores_mut(&mut self) -> Result<&mut [Core]> {
        self.processor
            .as_mut()
            .map(Processor::cores_mut)
            .ok_or(ConfigError::CoresUnavailable)
    }
}
