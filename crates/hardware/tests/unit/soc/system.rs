//! # System Assembly Tests
//!
//! End-to-end assembly from configuration: node counts, the full netlist of a two-core
//! system, memory and clock settings, and failure propagation.

use pretty_assertions::assert_eq;
use simtopo_core::ConfigError;
use simtopo_core::System;
use simtopo_core::common::MemorySize;
use simtopo_core::core::arch::Isa;
use simtopo_core::core::units::bru::BranchPredictor;
use simtopo_core::core::units::cache::policies::ReplacementPolicy;
use simtopo_core::core::units::prefetch::Prefetcher;
use simtopo_core::soc::builder::Binding;
use simtopo_core::soc::port::{Endpoint, PortName, PortRef};
use simtopo_core::soc::{Board, SystemAssembly};

use crate::common::harness::{assemble, config_with_cores};

const fn port(endpoint: Endpoint, name: PortName) -> PortRef {
    PortRef::new(endpoint, name)
}

// ══════════════════════════════════════════════════════════
// 1. Two-core reference system
// ══════════════════════════════════════════════════════════

#[test]
fn two_core_system_node_counts() {
    let mut config = config_with_cores(2);
    config.processor.isa = "RISCV".into();
    let system = assemble(&config);

    let hierarchy = system.board.cache_hierarchy().unwrap();
    assert_eq!(hierarchy.l1_icaches().len(), 2);
    assert_eq!(hierarchy.l1_dcaches().len(), 2);
    assert_eq!(hierarchy.cache_nodes().count(), 5);
    assert_eq!(hierarchy.interconnects().len(), 2);
    assert_eq!(hierarchy.l1_dcaches()[0].spec().size, MemorySize::kib(16));
    assert_eq!(hierarchy.l2_cache().spec().size, MemorySize::kib(256));
    assert_eq!(system.board.memory().size(), MemorySize::gib(8));
}

#[test]
fn two_core_system_netlist() {
    let mut config = config_with_cores(2);
    config.processor.isa = "RISCV".into();
    let system = assemble(&config);

    let mut expected = vec![
        Binding::new(
            port(Endpoint::Memory, PortName::Port),
            port(Endpoint::MemBus, PortName::MemSidePorts),
        ),
        Binding::new(
            port(Endpoint::MemBus, PortName::CpuSidePorts),
            port(Endpoint::L2Cache, PortName::MemSide),
        ),
        Binding::new(
            port(Endpoint::L2Bus, PortName::MemSidePorts),
            port(Endpoint::L2Cache, PortName::CpuSide),
        ),
    ];
    for core in 0..2 {
        expected.extend([
            Binding::new(
                port(Endpoint::L1ICache(core), PortName::MemSide),
                port(Endpoint::L2Bus, PortName::CpuSidePorts),
            ),
            Binding::new(
                port(Endpoint::L1DCache(core), PortName::MemSide),
                port(Endpoint::L2Bus, PortName::CpuSidePorts),
            ),
            Binding::new(
                port(Endpoint::Core(core), PortName::ICache),
                port(Endpoint::L1ICache(core), PortName::CpuSide),
            ),
            Binding::new(
                port(Endpoint::Core(core), PortName::DCache),
                port(Endpoint::L1DCache(core), PortName::CpuSide),
            ),
        ]);
    }
    expected.sort();

    assert_eq!(system.netlist(), expected);
}

#[test]
fn x86_netlist_includes_interrupt_ports() {
    let system = assemble(&config_with_cores(2));
    let netlist = system.netlist();
    let memory = port(Endpoint::Memory, PortName::Port);

    // 11 cache/bus bindings plus pio and int_requestor per core.
    assert_eq!(netlist.len(), 15);
    for core in 0..2 {
        assert!(
            netlist
                .iter()
                .any(|b| b.joins(port(Endpoint::Interrupts(core), PortName::Pio), memory))
        );
        assert!(netlist.iter().any(|b| b.joins(
            memory,
            port(Endpoint::Interrupts(core), PortName::IntRequestor)
        )));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Configuration flowing through
// ══════════════════════════════════════════════════════════

#[test]
fn options_reach_nodes_and_cores() {
    let mut config = config_with_cores(1);
    config.cache.l2.policy = "SRRIP".into();
    config.cache.l2.prefetcher = "DCPTPrefetcher".into();
    config.cache.l1_d.prefetcher = "StridePrefetcher".into();
    config.pipeline.branch_predictor_enable = true;
    config.pipeline.branch_predictor = "GShareBP".into();
    config.pipeline.mem_dep_pred_enable = true;
    let system = assemble(&config);

    let hierarchy = system.board.cache_hierarchy().unwrap();
    assert_eq!(hierarchy.l2_cache().replacement_policy(), ReplacementPolicy::Fifo);
    assert_eq!(hierarchy.l2_cache().prefetcher(), Some(Prefetcher::Dcpt));
    assert_eq!(hierarchy.l1_dcaches()[0].prefetcher(), Some(Prefetcher::Stride));
    assert_eq!(hierarchy.l1_icaches()[0].prefetcher(), None);

    let core = &system.board.processor().unwrap().cores()[0];
    assert_eq!(core.pipeline.branch_predictor, BranchPredictor::BiMode);
    assert_eq!(core.pipeline.ssit_size, 512);
    assert_eq!(core.isa(), Isa::X86);
}

#[test]
fn clock_and_run_limits() {
    let mut config = config_with_cores(1);
    config.system.clock_frequency = "2GHz".into();
    config.system.max_tick = 5_000;
    let system = assemble(&config);

    assert_eq!(system.board.clock().period_ticks(), 500);
    assert_eq!(system.max_tick, 5_000);
    assert_eq!(
        system.board.workload().unwrap().binary.to_str(),
        Some("tests/bin/hello")
    );
    assert_eq!(system.board.memory().address_range(), (0, 8 << 30));
}

#[test]
fn report_serializes_to_json() {
    let system = assemble(&config_with_cores(1));
    let report = serde_json::to_value(system.report()).unwrap();

    assert_eq!(report["memory"]["size"], 8_u64 << 30);
    assert_eq!(report["memory"]["technology"], "DDR3_1600_8x8");
    assert_eq!(report["caches"].as_array().unwrap().len(), 3);
    assert_eq!(report["caches"][0]["name"], "l1i[0]");
    assert_eq!(report["interconnects"][1]["name"], "membus");
    assert_eq!(
        report["bindings"][0]["a"],
        "memory.port",
        "bindings are sorted by port"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Failures
// ══════════════════════════════════════════════════════════

#[test]
fn zero_rob_fails_assembly() {
    let mut config = config_with_cores(1);
    config.pipeline.rob_entries = 0;
    assert_eq!(
        System::assemble(&config).unwrap_err(),
        ConfigError::invalid("pipeline.rob_entries", "must be a positive integer")
    );
}

#[test]
fn bad_quantities_fail_assembly() {
    let mut config = config_with_cores(1);
    config.cache.l1_i.size = Some("sixteen".into());
    assert!(matches!(
        System::assemble(&config),
        Err(ConfigError::InvalidQuantity { kind: "memory size", .. })
    ));

    let mut config = config_with_cores(1);
    config.system.clock_frequency = "3 parsecs".into();
    assert!(matches!(
        System::assemble(&config),
        Err(ConfigError::InvalidQuantity { kind: "frequency", .. })
    ));
}

#[test]
fn empty_binary_and_zero_ticks_rejected() {
    let mut config = config_with_cores(1);
    config.workload.binary = "".into();
    assert!(matches!(
        System::assemble(&config),
        Err(ConfigError::InvalidParameter { parameter, .. }) if parameter == "workload.binary"
    ));

    let mut config = config_with_cores(1);
    config.system.max_tick = 0;
    assert!(System::assemble(&config).is_err());
}

#[test]
fn board_without_processor_cannot_take_a_hierarchy() {
    use simtopo_core::common::Frequency;
    use simtopo_core::soc::board::ClockDomain;
    use simtopo_core::soc::hierarchy::{CacheHierarchy, HierarchySpec};
    use simtopo_core::soc::memory::MemoryNode;

    let memory = MemoryNode::ddr3_1600_single_channel(MemorySize::gib(1)).unwrap();
    let mut board = Board::new(
        ClockDomain {
            frequency: Frequency::from_hz(1_000_000_000),
        },
        memory,
    );
    let hierarchy = CacheHierarchy::allocate(&HierarchySpec::default(), 1).unwrap();

    assert_eq!(
        board.incorporate_cache(hierarchy),
        Err(ConfigError::CoresUnavailable)
    );
    assert!(board.cache_hierarchy().is_none());
    assert!(!board.mem_port().is_connected());
}

#[test]
fn failed_incorporation_leaves_board_unwired() {
    use simtopo_core::common::Frequency;
    use simtopo_core::core::{CpuType, Processor};
    use simtopo_core::soc::board::ClockDomain;
    use simtopo_core::soc::hierarchy::{CacheHierarchy, HierarchySpec};
    use simtopo_core::soc::memory::MemoryNode;

    let memory = MemoryNode::ddr3_1600_single_channel(MemorySize::gib(1)).unwrap();
    let mut board = Board::new(
        ClockDomain {
            frequency: Frequency::from_hz(1_000_000_000),
        },
        memory,
    );
    let mut processor = Processor::new(CpuType::O3, Isa::X86, 1).unwrap();
    let stale = port(Endpoint::L1ICache(3), PortName::CpuSide);
    processor.cores_mut()[0].icache_port.bind(stale).unwrap();
    board.set_processor(processor);

    let hierarchy = CacheHierarchy::allocate(&HierarchySpec::default(), 1).unwrap();
    assert_eq!(
        board.incorporate_cache(hierarchy),
        Err(ConfigError::PortAlreadyBound {
            port: port(Endpoint::Core(0), PortName::ICache),
            peer: stale,
        })
    );
    assert!(board.cache_hierarchy().is_none());
    assert!(!board.mem_port().is_connected());

    // Nothing stale on the memory port, so a clean processor can be wired afterwards.
    board.set_processor(Processor::new(CpuType::O3, Isa::X86, 1).unwrap());
    let hierarchy = CacheHierarchy::allocate(&HierarchySpec::default(), 1).unwrap();
    board.incorporate_cache(hierarchy).unwrap();
    assert_eq!(board.mem_port().peers(), &[port(Endpoint::MemBus, PortName::MemSidePorts)]);
}
