//! Crossbar interconnects.
//!
//! Two crossbars sit in the hierarchy:
//! 1. **L2 crossbar:** Fans the L1 instruction and data caches of every core in toward the L2.
//! 2. **System crossbar:** Fans the L2 out toward main memory.
//!
//! Both expose a vector `cpu_side_ports` (upstream) and a vector `mem_side_ports`
//! (downstream). Timing parameters are the engine's stock values for each crossbar type.

use serde::Serialize;

use crate::soc::port::{Endpoint, Port, PortName};

/// Crossbar flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrossbarKind {
    /// Mid-level crossbar between the private L1s and the shared L2.
    L2,
    /// System crossbar between the L2 and memory.
    System,
}

/// Crossbar timing in cycles and datapath width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrossbarTiming {
    /// Datapath width in bytes.
    pub width: u32,
    /// Cycles from request arrival to forwarding decision.
    pub frontend_latency: u64,
    /// Cycles to forward a request downstream.
    pub forward_latency: u64,
    /// Cycles to return a response upstream.
    pub response_latency: u64,
    /// Cycles to return a snoop response.
    pub snoop_response_latency: u64,
}

impl CrossbarKind {
    /// Stock timing for this crossbar type.
    pub const fn timing(self) -> CrossbarTiming {
        match self {
            Self::L2 => CrossbarTiming {
                width: 32,
                frontend_latency: 1,
                forward_latency: 0,
                response_latency: 1,
                snoop_response_latency: 1,
            },
            Self::System => CrossbarTiming {
                width: 16,
                frontend_latency: 3,
                forward_latency: 4,
                response_latency: 2,
                snoop_response_latency: 4,
            },
        }
    }

    const fn endpoint(self) -> Endpoint {
        match self {
            Self::L2 => Endpoint::L2Bus,
            Self::System => Endpoint::MemBus,
        }
    }
}

/// A crossbar node with vector ports on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interconnect {
    kind: CrossbarKind,
    timing: CrossbarTiming,
    /// Upstream side; accepts any number of requestors.
    pub cpu_side_ports: Port,
    /// Downstream side.
    pub mem_side_ports: Port,
}

impl Interconnect {
    /// Creates an unconnected crossbar of the given kind.
    pub const fn new(kind: CrossbarKind) -> Self {
        let endpoint = kind.endpoint();
        Self {
            kind,
            timing: kind.timing(),
            cpu_side_ports: Port::vector(endpoint, PortName::CpuSidePorts),
            mem_side_ports: Port::vector(endpoint, PortName::MemSidePorts),
        }
    }

    /// Crossbar flavour.
    pub const fn kind(&self) -> CrossbarKind {
        self.kind
    }

    /// Timing parameters.
    pub const fn timing(&self) -> CrossbarTiming {
        self.timing
    }

    /// Identity of the crossbar in the topology.
    pub const fn endpoint(&self) -> Endpoint {
        self.kind.endpoint()
    }
}
