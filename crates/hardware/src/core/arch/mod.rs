//! Instruction-set descriptors and interrupt delivery.
//!
//! Each instruction set decides how interrupts reach a core:
//! 1. **X86:** Constructs a local interrupt controller whose `pio` and `int_requestor` ports
//!    must be bound to the memory side of the system.
//! 2. **RISCV:** Uses a self-contained, parameterless interrupt object with no ports.
//! 3. **ARM:** Needs nothing from the builder; the ARM core model instantiates its own
//!    interrupt controller, so the configurator leaves the core untouched.

use serde::Serialize;

use crate::common::resolve::SymbolicOption;
use crate::soc::port::{Endpoint, Port, PortName};

/// Instruction set architecture of the simulated cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Isa {
    /// x86-64.
    X86,
    /// RISC-V (RV64).
    Riscv,
    /// ARMv8.
    Arm,
}

impl SymbolicOption for Isa {
    const CATEGORY: &'static str = "ISA";
    const FALLBACK: Self = Self::X86;
    const NAMES: &'static [(&'static str, Self)] = &[
        ("X86", Self::X86),
        ("RISCV", Self::Riscv),
        ("ARM", Self::Arm),
    ];
}

/// How interrupt delivery is set up for a core of a given ISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterruptBinding {
    /// Build a controller through the ISA descriptor and bind its ports to the memory side.
    ExplicitController,
    /// Attach a parameterless interrupt object; nothing to bind.
    SelfContained,
    /// Nothing to do for this ISA.
    Unhandled,
}

impl Isa {
    /// Returns the interrupt-delivery strategy for this ISA.
    pub const fn interrupt_binding(self) -> InterruptBinding {
        match self {
            Self::X86 => InterruptBinding::ExplicitController,
            Self::Riscv => InterruptBinding::SelfContained,
            Self::Arm => InterruptBinding::Unhandled,
        }
    }

    /// Creates the interrupt controller for core `core`, if this ISA has one to create.
    ///
    /// Returned ports are unconnected; binding them is the configurator's job.
    pub fn create_interrupt_controller(self, core: usize) -> Option<InterruptController> {
        match self.interrupt_binding() {
            InterruptBinding::ExplicitController => {
                Some(InterruptController::X86(X86LocalApic::new(core)))
            }
            InterruptBinding::SelfContained => Some(InterruptController::Riscv),
            InterruptBinding::Unhandled => None,
        }
    }
}

/// x86 local APIC with its I/O and interrupt-request ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct X86LocalApic {
    /// Programmed I/O port.
    pub pio: Port,
    /// Port used to send interrupt requests.
    pub int_requestor: Port,
}

impl X86LocalApic {
    /// Creates an unbound local APIC for core `core`.
    pub const fn new(core: usize) -> Self {
        Self {
            pio: Port::single(Endpoint::Interrupts(core), PortName::Pio),
            int_requestor: Port::single(Endpoint::Interrupts(core), PortName::IntRequestor),
        }
    }
}

/// An interrupt controller attached to a core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InterruptController {
    /// x86 local APIC, wired into the memory fabric.
    X86(X86LocalApic),
    /// RISC-V interrupt object; self-contained.
    Riscv,
}

impl InterruptController {
    /// Returns the controller's ports (empty for self-contained controllers).
    pub fn ports(&self) -> Vec<&Port> {
        match self {
            Self::X86(apic) => vec![&apic.pio, &apic.int_requestor],
            Self::Riscv => Vec::new(),
        }
    }

    /// Returns the ports that must be bound to the memory side of the system.
    pub fn memory_ports_mut(&mut self) -> Vec<&mut Port> {
        match self {
            Self::X86(apic) => vec![&mut apic.pio, &mut apic.int_requestor],
            Self::Riscv => Vec::new(),
        }
    }
}
