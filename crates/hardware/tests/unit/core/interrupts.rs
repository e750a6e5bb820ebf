//! # Interrupt Binding Tests
//!
//! Verifies the per-ISA interrupt strategy: x86 builds a controller wired to the memory side,
//! RISC-V attaches a portless controller, ARM is left alone.

use pretty_assertions::assert_eq;
use simtopo_core::ConfigError;
use simtopo_core::core::arch::{InterruptBinding, InterruptController, Isa};
use simtopo_core::core::pipeline::{PipelineSpec, configure_cores};
use simtopo_core::soc::SystemAssembly;
use simtopo_core::soc::port::{Endpoint, PortName, PortRef};

use crate::common::harness::init_tracing;
use crate::common::mocks::MockSystem;

const MEMORY_PORT: PortRef = PortRef::new(Endpoint::Memory, PortName::Port);

#[test]
fn binding_per_isa() {
    assert_eq!(Isa::X86.interrupt_binding(), InterruptBinding::ExplicitController);
    assert_eq!(Isa::Riscv.interrupt_binding(), InterruptBinding::SelfContained);
    assert_eq!(Isa::Arm.interrupt_binding(), InterruptBinding::Unhandled);
}

#[test]
fn x86_controller_ports_bound_to_memory() {
    init_tracing();
    let mut system = MockSystem::with_cores(2, Isa::X86);
    configure_cores(&mut system, &PipelineSpec::default()).unwrap();

    for core in system.cores() {
        let Some(InterruptController::X86(apic)) = &core.interrupts else {
            panic!("core {} has no x86 interrupt controller", core.index());
        };
        assert_eq!(apic.pio.peer(), Some(MEMORY_PORT));
        assert_eq!(apic.int_requestor.peer(), Some(MEMORY_PORT));
        assert!(system.mem_port().is_bound_to(apic.pio.id()));
        assert!(system.mem_port().is_bound_to(apic.int_requestor.id()));
    }
    assert_eq!(system.mem_port().peers().len(), 4);
}

#[test]
fn riscv_controller_has_nothing_to_bind() {
    let mut system = MockSystem::with_cores(2, Isa::Riscv);
    configure_cores(&mut system, &PipelineSpec::default()).unwrap();

    assert!(
        system
            .cores()
            .iter()
            .all(|core| core.interrupts == Some(InterruptController::Riscv))
    );
    assert!(!system.mem_port().is_connected());
}

#[test]
fn arm_is_left_untouched() {
    init_tracing();
    let mut system = MockSystem::with_cores(1, Isa::Arm);
    configure_cores(&mut system, &PipelineSpec::default()).unwrap();

    assert_eq!(system.cores()[0].interrupts, None);
    assert!(!system.mem_port().is_connected());
}

#[test]
fn controller_ports_are_named_per_core() {
    let Some(InterruptController::X86(apic)) = Isa::X86.create_interrupt_controller(3) else {
        panic!("x86 must create a controller");
    };
    assert_eq!(apic.pio.id().to_string(), "core[3].interrupts.pio");
    assert!(!apic.int_requestor.is_connected());
    assert_eq!(Isa::Arm.create_interrupt_controller(0), None);
}

#[test]
fn refused_interrupt_port_leaves_cores_untouched() {
    let mut system = MockSystem::with_cores(2, Isa::X86);
    let pio = PortRef::new(Endpoint::Interrupts(0), PortName::Pio);
    system.mem_port.bind(pio).unwrap();
    let spec = PipelineSpec {
        issue_width: 2,
        ..PipelineSpec::default()
    };

    assert_eq!(
        configure_cores(&mut system, &spec),
        Err(ConfigError::PortAlreadyBound {
            port: MEMORY_PORT,
            peer: pio,
        })
    );
    assert_eq!(system.mem_port().peers(), &[pio]);
    for core in system.cores() {
        assert_eq!(core.pipeline.issue_width, 8);
        assert_eq!(core.interrupts, None);
        assert!(!core.is_configured());
    }
}
