//! System construction and top-level `System` type.
//!
//! This module assembles a complete system from configuration. It performs:
//! 1. **Resolution:** Turns symbolic names and quantity strings into typed specs.
//! 2. **Allocation:** Builds the cache hierarchy before any system object exists.
//! 3. **Board setup:** Creates memory and the board, then attaches the processor.
//! 4. **Wiring:** Incorporates the hierarchy and configures every core's pipeline.
//! 5. **Workload:** Records the binary the cores will run.
//!
//! The first error aborts assembly; no partially wired system is returned.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::common::error::{Result, ensure_positive};
use crate::common::units::{Frequency, MemorySize};
use crate::config::Config;
use crate::core::Processor;
use crate::core::arch::Isa;
use crate::core::cpu::CpuType;
use crate::core::pipeline::{PipelineState, configure_cores};
use crate::core::units::cache::CacheSpec;
use crate::soc::board::{Board, ClockDomain};
use crate::soc::hierarchy::CacheHierarchy;
use crate::soc::interconnect::{CrossbarKind, CrossbarTiming};
use crate::soc::memory::MemoryNode;
use crate::soc::port::PortRef;

/// One undirected binding between two ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Binding {
    /// Lower port of the pair, in port order.
    pub a: PortRef,
    /// Higher port of the pair, in port order.
    pub b: PortRef,
}

impl Binding {
    /// Creates a binding with its ends in canonical order.
    pub fn new(x: PortRef, y: PortRef) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    /// Returns `true` if this binding joins `x` and `y`, in either order.
    pub fn joins(&self, x: PortRef, y: PortRef) -> bool {
        *self == Self::new(x, y)
    }
}

/// An assembled system: the wired board plus run limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct System {
    /// The wired board.
    pub board: Board,
    /// Simulated ticks before the run is cut off.
    pub max_tick: u64,
}

impl System {
    /// Assembles and wires a system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Processor, cache, pipeline, system, and workload configuration.
    ///
    /// # Returns
    ///
    /// A system whose hierarchy is incorporated and whose cores are configured.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::common::ConfigError`] raised by parsing, allocation,
    /// incorporation, or pipeline configuration.
    pub fn assemble(config: &Config) -> Result<Self> {
        ensure_positive("system.max_tick", config.system.max_tick)?;

        let cpu_type = config.processor.resolve_cpu_type();
        let isa = config.processor.resolve_isa();
        let num_cores = config.processor.num_cores;
        let hierarchy_spec = config.cache.to_spec()?;
        let pipeline_spec = config.pipeline.to_spec();
        let memory_size = config.system.memory_size()?;
        let frequency = config.system.clock_frequency()?;

        let hierarchy = CacheHierarchy::allocate(&hierarchy_spec, num_cores)?;
        let memory = MemoryNode::ddr3_1600_single_channel(memory_size)?;
        let mut board = Board::new(ClockDomain { frequency }, memory);
        board.set_processor(Processor::new(cpu_type, isa, num_cores)?);
        board.incorporate_cache(hierarchy)?;
        configure_cores(&mut board, &pipeline_spec)?;
        board.set_se_binary_workload(&config.workload.binary)?;

        tracing::info!(
            cores = num_cores,
            cpu_type = ?cpu_type,
            isa = ?isa,
            memory = %memory_size,
            clock = %frequency,
            "assembled system"
        );
        Ok(Self {
            board,
            max_tick: config.system.max_tick,
        })
    }

    /// Returns every port binding in the system, each listed once, in port order.
    pub fn netlist(&self) -> Vec<Binding> {
        let mut bindings = BTreeSet::new();
        for port in self.board.ports() {
            bindings.extend(port.peers().iter().map(|&peer| Binding::new(port.id(), peer)));
        }
        bindings.into_iter().collect()
    }

    /// Builds a serializable summary of the wired topology.
    pub fn report(&self) -> TopologyReport {
        let board = &self.board;
        let (cores, cpu_type, isa) = board.processor().map_or_else(
            || (Vec::new(), None, None),
            |processor| {
                let cores = processor
                    .cores()
                    .iter()
                    .map(|core| CoreReport {
                        index: core.index(),
                        pipeline: core.pipeline.clone(),
                        interrupt_controller: core.interrupts.is_some(),
                    })
                    .collect();
                (cores, Some(processor.cpu_type()), Some(processor.isa()))
            },
        );
        let caches = board
            .cache_hierarchy()
            .map(|hierarchy| {
                hierarchy
                    .cache_nodes()
                    .map(|node| CacheReport {
                        name: node.endpoint().to_string(),
                        num_sets: node.spec().num_sets(),
                        spec: node.spec().clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let interconnects = board
            .cache_hierarchy()
            .map(|hierarchy| {
                hierarchy
                    .interconnects()
                    .into_iter()
                    .map(|bus| InterconnectReport {
                        name: bus.endpoint().to_string(),
                        kind: bus.kind(),
                        timing: bus.timing(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        TopologyReport {
            cpu_type,
            isa,
            clock: board.clock().frequency,
            clock_period_ticks: board.clock().period_ticks(),
            memory: MemoryReport {
                size: board.memory().size(),
                technology: board.memory().technology(),
                channels: board.memory().channels(),
            },
            max_tick: self.max_tick,
            binary: board.workload().map(|workload| workload.binary.clone()),
            cores,
            caches,
            interconnects,
            bindings: self.netlist(),
        }
    }
}

/// Serializable summary of an assembled system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyReport {
    /// Core model, if a processor is attached.
    pub cpu_type: Option<CpuType>,
    /// Instruction set, if a processor is attached.
    pub isa: Option<Isa>,
    /// Board clock.
    pub clock: Frequency,
    /// Board clock period in ticks.
    pub clock_period_ticks: u64,
    /// Main memory.
    pub memory: MemoryReport,
    /// Run limit in ticks.
    pub max_tick: u64,
    /// Workload binary.
    pub binary: Option<PathBuf>,
    /// Per-core pipeline parameters.
    pub cores: Vec<CoreReport>,
    /// Every cache, L1I first, L2 last.
    pub caches: Vec<CacheReport>,
    /// Both crossbars.
    pub interconnects: Vec<InterconnectReport>,
    /// Every port binding.
    pub bindings: Vec<Binding>,
}

/// Main memory summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryReport {
    /// Capacity.
    pub size: MemorySize,
    /// DRAM interface model.
    pub technology: &'static str,
    /// Channel count.
    pub channels: u32,
}

/// Core summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreReport {
    /// Core index.
    pub index: usize,
    /// Configured pipeline parameters.
    pub pipeline: PipelineState,
    /// Whether an interrupt controller is attached.
    pub interrupt_controller: bool,
}

/// Cache summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheReport {
    /// Node name (e.g. `l1d[0]`).
    pub name: String,
    /// Number of sets at the engine's line size.
    pub num_sets: u64,
    /// Full spec.
    pub spec: CacheSpec,
}

/// Crossbar summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterconnectReport {
    /// Node name (`l2_bus` or `membus`).
    pub name: String,
    /// Crossbar flavour.
    pub kind: CrossbarKind,
    /// Timing parameters.
    pub timing: CrossbarTiming,
}
