//! # Error Tests
//!
//! Checks that every error names the offending parameter or port.

use simtopo_core::ConfigError;
use simtopo_core::common::error::ensure_positive;
use simtopo_core::soc::port::{Endpoint, PortName, PortRef};

#[test]
fn ensure_positive_rejects_zero_only() {
    assert!(ensure_positive("cache.l1_d.assoc", 2_u32).is_ok());
    assert_eq!(
        ensure_positive("cache.l1_d.assoc", 0_u32),
        Err(ConfigError::invalid("cache.l1_d.assoc", "must be a positive integer"))
    );
}

#[test]
fn messages_name_the_culprit() {
    let err = ConfigError::invalid("pipeline.rob_entries", "must be a positive integer");
    assert!(err.to_string().contains("pipeline.rob_entries"));

    let err = ConfigError::DanglingPort {
        port: PortRef::new(Endpoint::MemBus, PortName::MemSidePorts),
    };
    assert_eq!(err.to_string(), "port `membus.mem_side_ports` has no downstream connection");

    let err = ConfigError::CoreCountMismatch {
        allocated: 4,
        exposed: 2,
    };
    assert!(err.to_string().contains("4 cores"));
    assert!(err.to_string().contains("exposes 2"));
}

#[test]
fn port_names_render_like_attribute_paths() {
    let port = PortRef::new(Endpoint::L1DCache(1), PortName::MemSide);
    assert_eq!(port.to_string(), "l1d[1].mem_side");

    let port = PortRef::new(Endpoint::Interrupts(0), PortName::IntRequestor);
    assert_eq!(port.to_string(), "core[0].interrupts.int_requestor");
}
