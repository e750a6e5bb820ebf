//! Ports and port identities.
//!
//! Components in the topology talk to each other through ports. This module provides:
//! 1. **Identity:** [`Endpoint`] and [`PortName`] combine into a [`PortRef`] such as `l1d[1].mem_side`.
//! 2. **Multiplicity:** Single ports accept one peer; vector ports (crossbar sides) accept many.
//! 3. **Binding:** [`Port::bind`] records one side of a connection and [`connect`] records both.
//!
//! Ports are plain values owned by their component. A binding only stores the peer's
//! [`PortRef`], so components owned by different parents can be wired without shared ownership.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::common::error::{ConfigError, Result};

/// A component that owns ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    /// Main memory.
    Memory,
    /// System crossbar between the L2 and memory.
    MemBus,
    /// Mid-level crossbar between the L1s and the L2.
    L2Bus,
    /// Shared L2 cache.
    L2Cache,
    /// Private L1 instruction cache of core `n`.
    L1ICache(usize),
    /// Private L1 data cache of core `n`.
    L1DCache(usize),
    /// Processing core `n`.
    Core(usize),
    /// Interrupt controller attached to core `n`.
    Interrupts(usize),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::MemBus => write!(f, "membus"),
            Self::L2Bus => write!(f, "l2_bus"),
            Self::L2Cache => write!(f, "l2_cache"),
            Self::L1ICache(n) => write!(f, "l1i[{n}]"),
            Self::L1DCache(n) => write!(f, "l1d[{n}]"),
            Self::Core(n) => write!(f, "core[{n}]"),
            Self::Interrupts(n) => write!(f, "core[{n}].interrupts"),
        }
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Name of a port on its owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PortName {
    /// Core-facing side of a cache.
    CpuSide,
    /// Memory-facing side of a cache.
    MemSide,
    /// Upstream vector side of a crossbar.
    CpuSidePorts,
    /// Downstream vector side of a crossbar.
    MemSidePorts,
    /// Instruction fetch port of a core.
    ICache,
    /// Data access port of a core.
    DCache,
    /// Memory controller port.
    Port,
    /// Programmed I/O port of an interrupt controller.
    Pio,
    /// Interrupt request port of an interrupt controller.
    IntRequestor,
}

impl PortName {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CpuSide => "cpu_side",
            Self::MemSide => "mem_side",
            Self::CpuSidePorts => "cpu_side_ports",
            Self::MemSidePorts => "mem_side_ports",
            Self::ICache => "icache_port",
            Self::DCache => "dcache_port",
            Self::Port => "port",
            Self::Pio => "pio",
            Self::IntRequestor => "int_requestor",
        }
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Globally unique identity of a port: owning endpoint plus port name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortRef {
    /// Component that owns the port.
    pub endpoint: Endpoint,
    /// Port name on that component.
    pub port: PortName,
}

impl PortRef {
    /// Creates a port identity.
    pub const fn new(endpoint: Endpoint, port: PortName) -> Self {
        Self { endpoint, port }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.endpoint, self.port)
    }
}

impl Serialize for PortRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many peers a port accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// Exactly one peer.
    Single,
    /// Any number of peers.
    Vector,
}

/// A connection point owned by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    id: PortRef,
    multiplicity: Multiplicity,
    peers: Vec<PortRef>,
}

impl Port {
    /// Creates an unconnected single port.
    pub const fn single(endpoint: Endpoint, name: PortName) -> Self {
        Self {
            id: PortRef::new(endpoint, name),
            multiplicity: Multiplicity::Single,
            peers: Vec::new(),
        }
    }

    /// Creates an unconnected vector port.
    pub const fn vector(endpoint: Endpoint, name: PortName) -> Self {
        Self {
            id: PortRef::new(endpoint, name),
            multiplicity: Multiplicity::Vector,
            peers: Vec::new(),
        }
    }

    /// Returns this port's identity.
    pub const fn id(&self) -> PortRef {
        self.id
    }

    /// Returns whether the port accepts one or many peers.
    pub const fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Returns `true` if at least one peer is bound.
    pub fn is_connected(&self) -> bool {
        !self.peers.is_empty()
    }

    /// Returns the bound peers in binding order.
    pub fn peers(&self) -> &[PortRef] {
        &self.peers
    }

    /// Returns the single peer, if any (the first peer for vector ports).
    pub fn peer(&self) -> Option<PortRef> {
        self.peers.first().copied()
    }

    /// Returns `true` if `other` is among the bound peers.
    pub fn is_bound_to(&self, other: PortRef) -> bool {
        self.peers.contains(&other)
    }

    /// Fails if binding `peer` would overfill a single port or repeat a binding.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PortAlreadyBound`] under the same conditions as [`Port::bind`].
    pub fn check_bindable(&self, peer: PortRef) -> Result<()> {
        if let Some(existing) = self.peers.iter().find(|p| **p == peer) {
            return Err(ConfigError::PortAlreadyBound {
                port: self.id,
                peer: *existing,
            });
        }
        match (self.multiplicity, self.peers.first()) {
            (Multiplicity::Single, Some(existing)) => Err(ConfigError::PortAlreadyBound {
                port: self.id,
                peer: *existing,
            }),
            _ => Ok(()),
        }
    }

    /// Records `peer` on this side only.
    ///
    /// Use this when the other side is owned elsewhere and bound separately.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PortAlreadyBound`] if this is a single port that already has a
    /// peer, or if `peer` is already bound.
    pub fn bind(&mut self, peer: PortRef) -> Result<()> {
        self.check_bindable(peer)?;
        self.peers.push(peer);
        Ok(())
    }
}

/// Checks that `a` and `b` could be bound to each other, without binding them.
///
/// # Errors
///
/// Returns [`ConfigError::PortAlreadyBound`] if either side would refuse the binding.
pub fn check_connect(a: &Port, b: &Port) -> Result<()> {
    a.check_bindable(b.id)?;
    b.check_bindable(a.id)
}

/// Binds `a` and `b` to each other.
///
/// Both sides are checked before either is modified, so a failed connection leaves both
/// ports unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::PortAlreadyBound`] if either side refuses the binding.
pub fn connect(a: &mut Port, b: &mut Port) -> Result<()> {
    check_connect(a, b)?;
    a.peers.push(b.id);
    b.peers.push(a.id);
    tracing::debug!(from = %a.id, to = %b.id, "bound ports");
    Ok(())
}
