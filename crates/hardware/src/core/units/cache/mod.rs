//! Cache specifications and the cache node factory.
//!
//! This module turns a [`CacheSpec`] into a [`CacheNode`]: one cache instance sized and timed
//! per its spec, carrying its replacement policy and, when one is selected, its prefetcher.
//! Nodes come out of [`CacheNode::build`] with both ports unconnected; wiring happens only
//! when a hierarchy is incorporated into a system.

/// Cache replacement policy selection.
pub mod policies;

use serde::Serialize;

use self::policies::ReplacementPolicy;
use crate::common::MemorySize;
use crate::common::error::{Result, ensure_positive};
use crate::core::units::prefetch::Prefetcher;
use crate::soc::port::{Endpoint, Port, PortName};

/// Cache line size in bytes assumed by the execution engine.
pub const LINE_BYTES: u64 = 64;

/// Sizing, timing, and queueing parameters of one cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSpec {
    /// Total capacity.
    pub size: MemorySize,
    /// Associativity (number of ways).
    pub assoc: u32,
    /// Tag lookup latency in cycles.
    pub tag_latency: u64,
    /// Data array access latency in cycles.
    pub data_latency: u64,
    /// Latency to forward a response upstream, in cycles.
    pub response_latency: u64,
    /// Maximum outstanding misses (MSHR entries).
    pub mshrs: u32,
    /// Maximum targets queued per outstanding miss.
    pub tgts_per_mshr: u32,
    /// Victim selection policy.
    pub replacement_policy: ReplacementPolicy,
    /// Hardware prefetcher; `Prefetcher::None` attaches nothing.
    pub prefetcher: Prefetcher,
}

impl CacheSpec {
    /// Private L1 cache with the default L1 timing (2-cycle tag/data/response, 4 MSHRs).
    pub const fn l1(size: MemorySize, assoc: u32) -> Self {
        Self {
            size,
            assoc,
            tag_latency: 2,
            data_latency: 2,
            response_latency: 2,
            mshrs: 4,
            tgts_per_mshr: 20,
            replacement_policy: ReplacementPolicy::Lru,
            prefetcher: Prefetcher::None,
        }
    }

    /// Shared L2 cache with the default L2 timing (20-cycle tag/data/response, 20 MSHRs).
    pub const fn l2(size: MemorySize, assoc: u32) -> Self {
        Self {
            size,
            assoc,
            tag_latency: 20,
            data_latency: 20,
            response_latency: 20,
            mshrs: 20,
            tgts_per_mshr: 20,
            replacement_policy: ReplacementPolicy::Lru,
            prefetcher: Prefetcher::None,
        }
    }

    /// Returns the spec with `policy` as its replacement policy.
    #[must_use]
    pub const fn with_replacement_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.replacement_policy = policy;
        self
    }

    /// Returns the spec with `prefetcher` selected.
    #[must_use]
    pub const fn with_prefetcher(mut self, prefetcher: Prefetcher) -> Self {
        self.prefetcher = prefetcher;
        self
    }

    /// Number of sets implied by size, associativity, and [`LINE_BYTES`].
    pub const fn num_sets(&self) -> u64 {
        if self.assoc == 0 {
            return 0;
        }
        self.size.bytes() / (LINE_BYTES * self.assoc as u64)
    }

    /// Checks that every size, latency, and capacity is positive.
    ///
    /// # Arguments
    ///
    /// * `node` - Name of the node being built, used as the parameter prefix in errors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::InvalidParameter`] naming the first zero field.
    pub fn validate(&self, node: &str) -> Result<()> {
        ensure_positive(format!("{node}.size"), self.size.bytes())?;
        ensure_positive(format!("{node}.assoc"), self.assoc)?;
        ensure_positive(format!("{node}.tag_latency"), self.tag_latency)?;
        ensure_positive(format!("{node}.data_latency"), self.data_latency)?;
        ensure_positive(format!("{node}.response_latency"), self.response_latency)?;
        ensure_positive(format!("{node}.mshrs"), self.mshrs)?;
        ensure_positive(format!("{node}.tgts_per_mshr"), self.tgts_per_mshr)?;
        Ok(())
    }
}

/// A constructed cache instance.
///
/// `cpu_side` faces the cores (upstream) and `mem_side` faces memory (downstream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheNode {
    endpoint: Endpoint,
    spec: CacheSpec,
    prefetcher: Option<Prefetcher>,
    /// Core-facing port.
    pub cpu_side: Port,
    /// Memory-facing port.
    pub mem_side: Port,
}

impl CacheNode {
    /// Builds one cache node from its spec.
    ///
    /// The replacement policy is always attached; the prefetcher is attached only when the
    /// spec selects one. No wiring is performed.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Identity of the node in the topology (e.g., `Endpoint::L1DCache(0)`).
    /// * `spec` - Size, timing, policy, and prefetcher selection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::InvalidParameter`] if the spec has a zero size,
    /// associativity, latency, or capacity.
    pub fn build(endpoint: Endpoint, spec: &CacheSpec) -> Result<Self> {
        spec.validate(&endpoint.to_string())?;

        let prefetcher = spec.prefetcher.attachment();
        tracing::debug!(
            node = %endpoint,
            size = %spec.size,
            assoc = spec.assoc,
            sets = spec.num_sets(),
            policy = ?spec.replacement_policy,
            prefetcher = ?prefetcher,
            "built cache node"
        );

        Ok(Self {
            endpoint,
            spec: spec.clone(),
            prefetcher,
            cpu_side: Port::single(endpoint, PortName::CpuSide),
            mem_side: Port::single(endpoint, PortName::MemSide),
        })
    }

    /// Returns the node's identity.
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the spec the node was built from.
    pub const fn spec(&self) -> &CacheSpec {
        &self.spec
    }

    /// Returns the attached replacement policy.
    pub const fn replacement_policy(&self) -> ReplacementPolicy {
        self.spec.replacement_policy
    }

    /// Returns the attached prefetcher, if any.
    pub const fn prefetcher(&self) -> Option<Prefetcher> {
        self.prefetcher
    }

    /// Returns `true` if neither port has been bound.
    pub fn is_unwired(&self) -> bool {
        !self.cpu_side.is_connected() && !self.mem_side.is_connected()
    }
}
