//! Private-L1 / shared-L2 cache hierarchy.
//!
//! The hierarchy is built in two phases because the system that owns it, and the cores it
//! serves, may not exist yet when the hierarchy is specified:
//! 1. **Allocate:** [`CacheHierarchy::allocate`] builds one L1 instruction and one L1 data cache
//!    per core, one shared L2, the L2 crossbar, and the system crossbar. Nothing is wired.
//! 2. **Incorporate:** [`CacheHierarchy::incorporate`] wires the nodes into a system, from
//!    memory upward: system crossbar, L2, L2 crossbar, then each core's L1 pair.
//!
//! Each incorporation step attaches to a port that the previous step connected, and checks
//! that it really is connected before binding anything.

use serde::Serialize;

use crate::common::MemorySize;
use crate::common::error::{ConfigError, Result, ensure_positive};
use crate::core::Core;
use crate::core::units::cache::{CacheNode, CacheSpec};
use crate::soc::interconnect::{CrossbarKind, Interconnect};
use crate::soc::port::{Endpoint, Port, check_connect, connect};
use crate::soc::traits::SystemAssembly;

/// Cache specs for each cache type of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchySpec {
    /// Spec used for every private L1 instruction cache.
    pub l1i: CacheSpec,
    /// Spec used for every private L1 data cache.
    pub l1d: CacheSpec,
    /// Spec of the shared L2.
    pub l2: CacheSpec,
}

impl Default for HierarchySpec {
    fn default() -> Self {
        Self {
            l1i: CacheSpec::l1(MemorySize::kib(16), 2),
            l1d: CacheSpec::l1(MemorySize::kib(16), 2),
            l2: CacheSpec::l2(MemorySize::kib(256), 8),
        }
    }
}

/// Lifecycle phase of a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HierarchyState {
    /// Nodes exist but nothing is wired.
    Allocated,
    /// Wired into a system; must not be incorporated again.
    Incorporated,
}

/// Two-level cache hierarchy with private L1s and a shared L2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheHierarchy {
    num_cores: usize,
    state: HierarchyState,
    l1_icaches: Vec<CacheNode>,
    l1_dcaches: Vec<CacheNode>,
    l2_cache: CacheNode,
    l2_bus: Interconnect,
    membus: Interconnect,
}

/// Fails with [`ConfigError::DanglingPort`] unless `port` already leads somewhere.
fn ensure_downstream(port: &Port) -> Result<()> {
    if port.is_connected() {
        Ok(())
    } else {
        Err(ConfigError::DanglingPort { port: port.id() })
    }
}

impl CacheHierarchy {
    /// Allocates every node of the hierarchy for `num_cores` cores.
    ///
    /// Needs no reference to the owning system; the result is a self-contained, unwired set of
    /// nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `num_cores` is zero or any cache spec is
    /// invalid.
    pub fn allocate(spec: &HierarchySpec, num_cores: usize) -> Result<Self> {
        ensure_positive("processor.num_cores", num_cores)?;

        let l1_icaches = (0..num_cores)
            .map(|core| CacheNode::build(Endpoint::L1ICache(core), &spec.l1i))
            .collect::<Result<Vec<_>>>()?;
        let l1_dcaches = (0..num_cores)
            .map(|core| CacheNode::build(Endpoint::L1DCache(core), &spec.l1d))
            .collect::<Result<Vec<_>>>()?;
        let l2_cache = CacheNode::build(Endpoint::L2Cache, &spec.l2)?;

        tracing::info!(
            cores = num_cores,
            l1i = %spec.l1i.size,
            l1d = %spec.l1d.size,
            l2 = %spec.l2.size,
            "allocated cache hierarchy"
        );

        Ok(Self {
            num_cores,
            state: HierarchyState::Allocated,
            l1_icaches,
            l1_dcaches,
            l2_cache,
            l2_bus: Interconnect::new(CrossbarKind::L2),
            membus: Interconnect::new(CrossbarKind::System),
        })
    }

    /// Wires the hierarchy into `system`.
    ///
    /// Binding order, each step relying on the one before:
    /// 1. system crossbar downstream to the system memory port;
    /// 2. L2 downstream to the system crossbar;
    /// 3. L2 crossbar downstream to the L2;
    /// 4. per core: L1I and L1D downstream to the L2 crossbar, then the core's instruction and
    ///    data ports to its L1I and L1D.
    ///
    /// Core handles are taken from `system` here, not earlier. All preconditions, including
    /// every binding to the system's memory and core ports, are checked before the first
    /// binding, so a failed call leaves both the hierarchy and the system unwired.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::AlreadyIncorporated`] on a second call.
    /// * [`ConfigError::CoresUnavailable`] if the system has not exposed its cores.
    /// * [`ConfigError::CoreCountMismatch`] if the system's core count differs from the
    ///   allocated count.
    /// * [`ConfigError::PortAlreadyBound`] if the system's ports were wired by someone else.
    pub fn incorporate<S>(&mut self, system: &mut S) -> Result<()>
    where
        S: SystemAssembly + ?Sized,
    {
        if self.state == HierarchyState::Incorporated {
            return Err(ConfigError::AlreadyIncorporated);
        }
        let exposed = system.num_cores().ok_or(ConfigError::CoresUnavailable)?;
        if exposed != self.num_cores {
            return Err(ConfigError::CoreCountMismatch {
                allocated: self.num_cores,
                exposed,
            });
        }

        self.check_external_ports(system)?;

        self.connect_membus(system.mem_port_mut())?;
        self.connect_l2()?;
        self.connect_l2_bus()?;
        self.connect_l1s(system.cores_mut()?)?;

        self.state = HierarchyState::Incorporated;
        tracing::info!(cores = self.num_cores, "incorporated cache hierarchy");
        Ok(())
    }

    /// Checks every binding to a port the system owns, so wiring cannot fail halfway.
    fn check_external_ports<S>(&self, system: &mut S) -> Result<()>
    where
        S: SystemAssembly + ?Sized,
    {
        check_connect(&self.membus.mem_side_ports, system.mem_port())?;

        let l1_pairs = self.l1_icaches.iter().zip(self.l1_dcaches.iter());
        for ((icache, dcache), core) in l1_pairs.zip(system.cores_mut()?.iter()) {
            check_connect(&core.icache_port, &icache.cpu_side)?;
            check_connect(&core.dcache_port, &dcache.cpu_side)?;
        }
        Ok(())
    }

    fn connect_membus(&mut self, mem_port: &mut Port) -> Result<()> {
        connect(&mut self.membus.mem_side_ports, mem_port)
    }

    fn connect_l2(&mut self) -> Result<()> {
        ensure_downstream(&self.membus.mem_side_ports)?;
        connect(&mut self.l2_cache.mem_side, &mut self.membus.cpu_side_ports)
    }

    fn connect_l2_bus(&mut self) -> Result<()> {
        ensure_downstream(&self.l2_cache.mem_side)?;
        connect(&mut self.l2_bus.mem_side_ports, &mut self.l2_cache.cpu_side)
    }

    fn connect_l1s(&mut self, cores: &mut [Core]) -> Result<()> {
        ensure_downstream(&self.l2_bus.mem_side_ports)?;

        let l1_pairs = self.l1_icaches.iter_mut().zip(self.l1_dcaches.iter_mut());
        for ((icache, dcache), core) in l1_pairs.zip(cores.iter_mut()) {
            connect(&mut icache.mem_side, &mut self.l2_bus.cpu_side_ports)?;
            connect(&mut dcache.mem_side, &mut self.l2_bus.cpu_side_ports)?;
            connect(&mut core.icache_port, &mut icache.cpu_side)?;
            connect(&mut core.dcache_port, &mut dcache.cpu_side)?;
        }
        Ok(())
    }

    /// Number of cores the hierarchy was allocated for.
    pub const fn num_cores(&self) -> usize {
        self.num_cores
    }

    /// Current lifecycle phase.
    pub const fn state(&self) -> HierarchyState {
        self.state
    }

    /// Private L1 instruction caches, in core order.
    pub fn l1_icaches(&self) -> &[CacheNode] {
        &self.l1_icaches
    }

    /// Private L1 data caches, in core order.
    pub fn l1_dcaches(&self) -> &[CacheNode] {
        &self.l1_dcaches
    }

    /// Shared L2 cache.
    pub const fn l2_cache(&self) -> &CacheNode {
        &self.l2_cache
    }

    /// Crossbar between the L1s and the L2.
    pub const fn l2_bus(&self) -> &Interconnect {
        &self.l2_bus
    }

    /// Crossbar between the L2 and memory.
    pub const fn membus(&self) -> &Interconnect {
        &self.membus
    }

    /// Every cache node: L1 instruction caches, L1 data caches, then the L2.
    pub fn cache_nodes(&self) -> impl Iterator<Item = &CacheNode> {
        self.l1_icaches
            .iter()
            .chain(self.l1_dcaches.iter())
            .chain(std::iter::once(&self.l2_cache))
    }

    /// Both crossbars, L2 crossbar first.
    pub fn interconnects(&self) -> [&Interconnect; 2] {
        [&self.l2_bus, &self.membus]
    }

    /// Every port owned by the hierarchy.
    pub fn ports(&self) -> Vec<&Port> {
        let caches = self
            .cache_nodes()
            .flat_map(|node| [&node.cpu_side, &node.mem_side]);
        let buses = self
            .interconnects()
            .into_iter()
            .flat_map(|bus| [&bus.cpu_side_ports, &bus.mem_side_ports]);
        caches.chain(buses).collect()
    }
}
