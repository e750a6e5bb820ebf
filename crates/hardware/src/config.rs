//! Configuration system for the topology builder.
//!
//! This module defines the user-facing configuration structures. It provides:
//! 1. **Defaults:** The stock core, cache, pipeline, and system parameters.
//! 2. **Structures:** Hierarchical config for processor, caches, pipeline, system, and workload.
//! 3. **Conversion:** Resolution of symbolic names and quantity strings into typed specs.
//!
//! Configuration is supplied as JSON (see [`Config::load`]) or built directly by the CLI.
//! Every field except `workload.binary` has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::{ConfigError, Result};
use crate::common::resolve::resolve_logged;
use crate::common::units::{Frequency, MemorySize};
use crate::core::arch::Isa;
use crate::core::cpu::CpuType;
use crate::core::pipeline::PipelineSpec;
use crate::core::units::bru::BranchPredictor;
use crate::core::units::cache::CacheSpec;
use crate::core::units::cache::policies::ReplacementPolicy;
use crate::core::units::prefetch::Prefetcher;
use crate::soc::hierarchy::HierarchySpec;

/// Default configuration constants.
///
/// These values define the baseline system when not explicitly overridden.
mod defaults {
    /// Core model.
    pub const CPU_TYPE: &str = "O3";

    /// Instruction set.
    pub const ISA: &str = "X86";

    /// Number of cores.
    pub const NUM_CORES: usize = 1;

    /// Capacity of each private L1 cache.
    pub const L1_SIZE: &str = "16KiB";

    /// Associativity of each private L1 cache.
    pub const L1_ASSOC: u32 = 2;

    /// Capacity of the shared L2 cache.
    pub const L2_SIZE: &str = "256KiB";

    /// Associativity of the shared L2 cache.
    pub const L2_ASSOC: u32 = 8;

    /// Replacement policy of every cache.
    pub const REPLACEMENT_POLICY: &str = "LRU";

    /// Prefetcher of every cache.
    pub const PREFETCHER: &str = "None";

    /// Instructions issued per cycle.
    pub const ISSUE_WIDTH: u32 = 4;

    /// Instructions committed per cycle.
    pub const COMMIT_WIDTH: u32 = 4;

    /// Reorder buffer entries.
    pub const ROB_ENTRIES: u32 = 192;

    /// Branch predictor installed when prediction is enabled.
    pub const BRANCH_PREDICTOR: &str = "BiModeBP";

    /// Main memory capacity.
    pub const MEMORY_SIZE: &str = "8GiB";

    /// Board clock.
    pub const CLOCK_FREQUENCY: &str = "3GHz";

    /// Simulated ticks before the run is cut off.
    pub const MAX_TICK: u64 = 1_000_000_000;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use simtopo_core::config::Config;
///
/// let json = r#"{
///     "processor": { "isa": "RISCV", "num_cores": 2 },
///     "cache": {
///         "l1_d": { "size": "32KiB", "assoc": 4, "prefetcher": "StridePrefetcher" },
///         "l2": { "policy": "SRRIP" }
///     },
///     "pipeline": { "branch_predictor_enable": true, "branch_predictor": "TournamentBP" },
///     "workload": { "binary": "hello" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.processor.num_cores, 2);
/// assert_eq!(config.cache.l1_d.size.as_deref(), Some("32KiB"));
/// assert_eq!(config.pipeline.rob_entries, 192);
/// assert_eq!(config.system.memory_size, "8GiB");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Core type, instruction set, and core count
    #[serde(default)]
    pub processor: ProcessorConfig,
    /// Cache hierarchy configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Pipeline and branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Memory, clock, and run limits
    #[serde(default)]
    pub system: SystemConfig,
    /// Program to run
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigFile`] if the JSON is malformed or `workload` is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>")
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigFile`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&json, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::ConfigFile {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Processor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Core model name (`O3`, `TimingSimple`, `Atomic`)
    #[serde(default = "ProcessorConfig::default_cpu_type")]
    pub cpu_type: String,

    /// Instruction set name (`X86`, `RISCV`, `ARM`)
    #[serde(default = "ProcessorConfig::default_isa")]
    pub isa: String,

    /// Number of cores
    #[serde(default = "ProcessorConfig::default_num_cores")]
    pub num_cores: usize,
}

impl ProcessorConfig {
    fn default_cpu_type() -> String {
        defaults::CPU_TYPE.to_string()
    }

    fn default_isa() -> String {
        defaults::ISA.to_string()
    }

    const fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    /// Resolves the core model, falling back to O3.
    pub fn resolve_cpu_type(&self) -> CpuType {
        resolve_logged("processor.cpu_type", &self.cpu_type)
    }

    /// Resolves the instruction set, falling back to X86.
    pub fn resolve_isa(&self) -> Isa {
        resolve_logged("processor.isa", &self.isa)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            cpu_type: Self::default_cpu_type(),
            isa: Self::default_isa(),
            num_cores: defaults::NUM_CORES,
        }
    }
}

/// Cache hierarchy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Private L1 instruction caches
    #[serde(default)]
    pub l1_i: CacheLevelConfig,
    /// Private L1 data caches
    #[serde(default)]
    pub l1_d: CacheLevelConfig,
    /// Shared L2 cache
    #[serde(default)]
    pub l2: CacheLevelConfig,
}

impl CacheHierarchyConfig {
    /// Converts the three levels into a hierarchy spec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if a size string does not parse.
    pub fn to_spec(&self) -> Result<HierarchySpec> {
        Ok(HierarchySpec {
            l1i: self.l1_i.to_spec(CacheLevel::L1, "cache.l1_i")?,
            l1d: self.l1_d.to_spec(CacheLevel::L1, "cache.l1_d")?,
            l2: self.l2.to_spec(CacheLevel::L2, "cache.l2")?,
        })
    }
}

/// Cache level, selecting the stock size and timing a level starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLevel {
    /// Private first-level cache.
    L1,
    /// Shared second-level cache.
    L2,
}

/// Configuration of one cache level.
///
/// Unset sizing and timing fields take the stock values of the level the config is applied to.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheLevelConfig {
    /// Capacity with unit (e.g. `"16KiB"`)
    #[serde(default)]
    pub size: Option<String>,

    /// Associativity
    #[serde(default)]
    pub assoc: Option<u32>,

    /// Replacement policy name
    #[serde(default = "CacheLevelConfig::default_policy")]
    pub policy: String,

    /// Prefetcher name
    #[serde(default = "CacheLevelConfig::default_prefetcher")]
    pub prefetcher: String,

    /// Tag lookup latency override in cycles
    #[serde(default)]
    pub tag_latency: Option<u64>,

    /// Data access latency override in cycles
    #[serde(default)]
    pub data_latency: Option<u64>,

    /// Response latency override in cycles
    #[serde(default)]
    pub response_latency: Option<u64>,

    /// MSHR count override
    #[serde(default)]
    pub mshrs: Option<u32>,

    /// Targets-per-MSHR override
    #[serde(default)]
    pub tgts_per_mshr: Option<u32>,
}

impl CacheLevelConfig {
    fn default_policy() -> String {
        defaults::REPLACEMENT_POLICY.to_string()
    }

    fn default_prefetcher() -> String {
        defaults::PREFETCHER.to_string()
    }

    /// Builds the spec for this level.
    ///
    /// # Arguments
    ///
    /// * `level` - Level whose stock size and timing fill unset fields.
    /// * `parameter` - Dotted config path used in log and error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if `size` does not parse.
    pub fn to_spec(&self, level: CacheLevel, parameter: &str) -> Result<CacheSpec> {
        let (default_size, default_assoc) = match level {
            CacheLevel::L1 => (defaults::L1_SIZE, defaults::L1_ASSOC),
            CacheLevel::L2 => (defaults::L2_SIZE, defaults::L2_ASSOC),
        };
        let size = MemorySize::parse(self.size.as_deref().unwrap_or(default_size))?;
        let assoc = self.assoc.unwrap_or(default_assoc);

        let mut spec = match level {
            CacheLevel::L1 => CacheSpec::l1(size, assoc),
            CacheLevel::L2 => CacheSpec::l2(size, assoc),
        };
        if let Some(latency) = self.tag_latency {
            spec.tag_latency = latency;
        }
        if let Some(latency) = self.data_latency {
            spec.data_latency = latency;
        }
        if let Some(latency) = self.response_latency {
            spec.response_latency = latency;
        }
        if let Some(mshrs) = self.mshrs {
            spec.mshrs = mshrs;
        }
        if let Some(tgts) = self.tgts_per_mshr {
            spec.tgts_per_mshr = tgts;
        }

        let policy: ReplacementPolicy =
            resolve_logged(&format!("{parameter}.policy"), &self.policy);
        let prefetcher: Prefetcher =
            resolve_logged(&format!("{parameter}.prefetcher"), &self.prefetcher);
        Ok(spec
            .with_replacement_policy(policy)
            .with_prefetcher(prefetcher))
    }
}

impl Default for CacheLevelConfig {
    fn default() -> Self {
        Self {
            size: None,
            assoc: None,
            policy: Self::default_policy(),
            prefetcher: Self::default_prefetcher(),
            tag_latency: None,
            data_latency: None,
            response_latency: None,
            mshrs: None,
            tgts_per_mshr: None,
        }
    }
}

/// Pipeline and branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Instructions issued per cycle
    #[serde(default = "PipelineConfig::default_issue_width")]
    pub issue_width: u32,

    /// Instructions committed per cycle
    #[serde(default = "PipelineConfig::default_commit_width")]
    pub commit_width: u32,

    /// Reorder buffer entries
    #[serde(default = "PipelineConfig::default_rob_entries")]
    pub rob_entries: u32,

    /// Install `branch_predictor` instead of the core's default predictor
    #[serde(default)]
    pub branch_predictor_enable: bool,

    /// Branch predictor name
    #[serde(default = "PipelineConfig::default_branch_predictor")]
    pub branch_predictor: String,

    /// Enable store-set memory-dependence prediction
    #[serde(default)]
    pub mem_dep_pred_enable: bool,
}

impl PipelineConfig {
    const fn default_issue_width() -> u32 {
        defaults::ISSUE_WIDTH
    }

    const fn default_commit_width() -> u32 {
        defaults::COMMIT_WIDTH
    }

    const fn default_rob_entries() -> u32 {
        defaults::ROB_ENTRIES
    }

    fn default_branch_predictor() -> String {
        defaults::BRANCH_PREDICTOR.to_string()
    }

    /// Converts to a pipeline spec, resolving the predictor only when it is enabled.
    pub fn to_spec(&self) -> PipelineSpec {
        let branch_predictor = self.branch_predictor_enable.then(|| {
            resolve_logged::<BranchPredictor>("pipeline.branch_predictor", &self.branch_predictor)
        });
        PipelineSpec {
            issue_width: self.issue_width,
            commit_width: self.commit_width,
            rob_entries: self.rob_entries,
            branch_predictor,
            mem_dep_pred_enable: self.mem_dep_pred_enable,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            issue_width: defaults::ISSUE_WIDTH,
            commit_width: defaults::COMMIT_WIDTH,
            rob_entries: defaults::ROB_ENTRIES,
            branch_predictor_enable: false,
            branch_predictor: Self::default_branch_predictor(),
            mem_dep_pred_enable: false,
        }
    }
}

/// Memory, clock, and run-limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Main memory capacity with unit (e.g. `"8GiB"`)
    #[serde(default = "SystemConfig::default_memory_size")]
    pub memory_size: String,

    /// Board clock with unit (e.g. `"3GHz"`)
    #[serde(default = "SystemConfig::default_clock_frequency")]
    pub clock_frequency: String,

    /// Simulated ticks before the run is cut off
    #[serde(default = "SystemConfig::default_max_tick")]
    pub max_tick: u64,
}

impl SystemConfig {
    fn default_memory_size() -> String {
        defaults::MEMORY_SIZE.to_string()
    }

    fn default_clock_frequency() -> String {
        defaults::CLOCK_FREQUENCY.to_string()
    }

    const fn default_max_tick() -> u64 {
        defaults::MAX_TICK
    }

    /// Parses `memory_size`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if the string does not parse.
    pub fn memory_size(&self) -> Result<MemorySize> {
        MemorySize::parse(&self.memory_size)
    }

    /// Parses `clock_frequency`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if the string does not parse.
    pub fn clock_frequency(&self) -> Result<Frequency> {
        Frequency::parse(&self.clock_frequency)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            memory_size: Self::default_memory_size(),
            clock_frequency: Self::default_clock_frequency(),
            max_tick: defaults::MAX_TICK,
        }
    }
}

/// Workload configuration.
///
/// The default has an empty binary path, which assembly rejects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkloadConfig {
    /// Path of the binary to run
    pub binary: PathBuf,
}
