//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, per-level cache specs, and file
//! loading.

use std::io::Write;

use pretty_assertions::assert_eq;
use simtopo_core::ConfigError;
use simtopo_core::common::MemorySize;
use simtopo_core::config::*;
use simtopo_core::core::units::bru::BranchPredictor;
use simtopo_core::core::units::cache::CacheSpec;
use simtopo_core::core::units::cache::policies::ReplacementPolicy;
use simtopo_core::core::units::prefetch::Prefetcher;
use simtopo_core::soc::hierarchy::HierarchySpec;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.processor.cpu_type, "O3");
    assert_eq!(config.processor.isa, "X86");
    assert_eq!(config.processor.num_cores, 1);
    assert_eq!(config.pipeline.issue_width, 4);
    assert_eq!(config.pipeline.commit_width, 4);
    assert_eq!(config.pipeline.rob_entries, 192);
    assert!(!config.pipeline.branch_predictor_enable);
    assert_eq!(config.pipeline.branch_predictor, "BiModeBP");
    assert!(!config.pipeline.mem_dep_pred_enable);
    assert_eq!(config.system.memory_size, "8GiB");
    assert_eq!(config.system.clock_frequency, "3GHz");
    assert_eq!(config.system.max_tick, 1_000_000_000);
    assert!(config.workload.binary.as_os_str().is_empty());
}

#[test]
fn test_default_hierarchy_spec() {
    let spec = CacheHierarchyConfig::default().to_spec().unwrap();
    assert_eq!(spec, HierarchySpec::default());
    assert_eq!(spec.l1i, CacheSpec::l1(MemorySize::kib(16), 2));
    assert_eq!(spec.l2, CacheSpec::l2(MemorySize::kib(256), 8));
}

#[test]
fn test_minimal_json_fills_defaults() {
    let config = Config::from_json(r#"{ "workload": { "binary": "mm" } }"#).unwrap();
    assert_eq!(config.processor.num_cores, 1);
    assert_eq!(config.cache.l2.policy, "LRU");
    assert_eq!(config.cache.l1_d.size, None);
    assert_eq!(config.workload.binary.to_str(), Some("mm"));
}

#[test]
fn test_json_overrides_per_level() {
    let json = r#"{
        "processor": { "cpu_type": "TimingSimple", "isa": "ARM", "num_cores": 4 },
        "cache": {
            "l1_i": { "size": "32KiB", "assoc": 4, "policy": "BIP" },
            "l2": { "size": "1MiB", "tag_latency": 12, "mshrs": 32, "prefetcher": "TaggedPrefetcher" }
        },
        "pipeline": { "rob_entries": 320, "branch_predictor_enable": true, "branch_predictor": "LocalBP" },
        "system": { "memory_size": "2GiB", "max_tick": 42 },
        "workload": { "binary": "/bin/true" }
    }"#;
    let config = Config::from_json(json).unwrap();
    let spec = config.cache.to_spec().unwrap();

    assert_eq!(spec.l1i.size, MemorySize::kib(32));
    assert_eq!(spec.l1i.assoc, 4);
    assert_eq!(spec.l1i.replacement_policy, ReplacementPolicy::Bip);
    assert_eq!(spec.l1i.tag_latency, 2);
    assert_eq!(spec.l1d, CacheSpec::l1(MemorySize::kib(16), 2));
    assert_eq!(spec.l2.size, MemorySize::kib(1024));
    assert_eq!(spec.l2.assoc, 8);
    assert_eq!(spec.l2.tag_latency, 12);
    assert_eq!(spec.l2.data_latency, 20);
    assert_eq!(spec.l2.mshrs, 32);
    assert_eq!(spec.l2.prefetcher, Prefetcher::Tagged);

    let pipeline = config.pipeline.to_spec();
    assert_eq!(pipeline.rob_entries, 320);
    assert_eq!(pipeline.branch_predictor, Some(BranchPredictor::Local));
    assert_eq!(config.system.memory_size().unwrap(), MemorySize::gib(2));
    assert_eq!(config.system.max_tick, 42);
}

#[test]
fn test_disabled_predictor_is_not_resolved() {
    let pipeline = PipelineConfig {
        branch_predictor: "TournamentBP".into(),
        ..PipelineConfig::default()
    };
    assert_eq!(pipeline.to_spec().branch_predictor, None);
}

#[test]
fn test_unknown_names_fall_back() {
    let processor = ProcessorConfig {
        cpu_type: "Minor".into(),
        isa: "SPARC".into(),
        num_cores: 1,
    };
    assert_eq!(
        processor.resolve_cpu_type(),
        simtopo_core::core::cpu::CpuType::O3
    );
    assert_eq!(processor.resolve_isa(), simtopo_core::core::arch::Isa::X86);

    let level = CacheLevelConfig {
        policy: "SRRIP".into(),
        prefetcher: "Markov".into(),
        ..CacheLevelConfig::default()
    };
    let spec = level.to_spec(CacheLevel::L1, "cache.l1_d").unwrap();
    assert_eq!(spec.replacement_policy, ReplacementPolicy::Fifo);
    assert_eq!(spec.prefetcher, Prefetcher::None);
}

#[test]
fn test_missing_workload_is_an_error() {
    let err = Config::from_json(r#"{ "processor": { "num_cores": 2 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigFile { ref path, .. } if path == "<inline>"));
}

#[test]
fn test_wrong_type_is_an_error() {
    let json = r#"{ "pipeline": { "issue_width": "wide" }, "workload": { "binary": "a" } }"#;
    assert!(matches!(
        Config::from_json(json),
        Err(ConfigError::ConfigFile { .. })
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "processor": {{ "num_cores": 2 }}, "workload": {{ "binary": "mm" }} }}"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.processor.num_cores, 2);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ConfigFile { ref path, .. } if path.ends_with("absent.json")
    ));
}
