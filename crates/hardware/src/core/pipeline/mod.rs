//! Pipeline configuration.
//!
//! This module applies per-core timing and prediction parameters once the system has
//! exposed its cores. It includes the following components:
//! 1. **State:** The parameters a core's out-of-order pipeline runs with.
//! 2. **Spec:** The user-selected widths, ROB depth, and predictor switches.
//! 3. **Store Sets:** The memory-dependence predictor sizing for the enabled/disabled cases.
//! 4. **Configurator:** A one-shot pass over the cores, including interrupt delivery.

use serde::Serialize;

use crate::common::error::{ConfigError, Result, ensure_positive};
use crate::core::arch::InterruptBinding;
use crate::core::units::bru::BranchPredictor;
use crate::soc::port::check_connect;
use crate::soc::traits::SystemAssembly;

/// Out-of-order engine defaults for a freshly created core.
mod defaults {
    use crate::core::units::bru::BranchPredictor;

    /// Instructions issued per cycle.
    pub const ISSUE_WIDTH: u32 = 8;

    /// Instructions committed per cycle.
    pub const COMMIT_WIDTH: u32 = 8;

    /// Reorder buffer entries.
    pub const ROB_ENTRIES: u32 = 192;

    /// Store-set ID table entries.
    pub const SSIT_SIZE: u32 = 1024;

    /// Last fetched store table entries.
    pub const LFST_SIZE: u32 = 1024;

    /// Cycles between store-set table clears.
    pub const STORE_SET_CLEAR_PERIOD: u64 = 250_000;

    /// Predictor the engine instantiates when none is configured.
    pub const BRANCH_PREDICTOR: BranchPredictor = BranchPredictor::Tournament;
}

/// Pipeline parameters carried by a core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    /// Maximum instructions issued per cycle.
    pub issue_width: u32,
    /// Maximum instructions committed per cycle.
    pub commit_width: u32,
    /// Reorder buffer capacity.
    pub num_rob_entries: u32,
    /// Active branch predictor.
    pub branch_predictor: BranchPredictor,
    /// Store-set ID table size.
    pub ssit_size: u32,
    /// Last fetched store table size.
    pub lfst_size: u32,
    /// Cycles between store-set table clears.
    pub store_set_clear_period: u64,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            issue_width: defaults::ISSUE_WIDTH,
            commit_width: defaults::COMMIT_WIDTH,
            num_rob_entries: defaults::ROB_ENTRIES,
            branch_predictor: defaults::BRANCH_PREDICTOR,
            ssit_size: defaults::SSIT_SIZE,
            lfst_size: defaults::LFST_SIZE,
            store_set_clear_period: defaults::STORE_SET_CLEAR_PERIOD,
        }
    }
}

/// Store-set predictor sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreSetParams {
    /// Store-set ID table size.
    pub ssit_size: u32,
    /// Last fetched store table size.
    pub lfst_size: u32,
    /// Cycles between table clears.
    pub clear_period: u64,
}

impl StoreSetParams {
    /// Large tables with an aggressive periodic reset.
    pub const ENABLED: Self = Self {
        ssit_size: 512,
        lfst_size: 128,
        clear_period: 100_000,
    };

    /// Single-entry tables that effectively never clear within a run.
    ///
    /// The engine has no switch to turn the predictor off, so prediction is starved instead.
    pub const DISABLED: Self = Self {
        ssit_size: 1,
        lfst_size: 1,
        clear_period: 10_000_000,
    };

    /// Returns the sizing for memory-dependence prediction `enabled` or not.
    pub const fn for_prediction(enabled: bool) -> Self {
        if enabled { Self::ENABLED } else { Self::DISABLED }
    }
}

/// User-selected pipeline parameters, applied uniformly to every core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSpec {
    /// Maximum instructions issued per cycle.
    pub issue_width: u32,
    /// Maximum instructions committed per cycle.
    pub commit_width: u32,
    /// Reorder buffer capacity.
    pub rob_entries: u32,
    /// Predictor to install; `None` keeps each core's default predictor.
    pub branch_predictor: Option<BranchPredictor>,
    /// Whether store-set memory-dependence prediction is enabled.
    pub mem_dep_pred_enable: bool,
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            issue_width: 4,
            commit_width: 4,
            rob_entries: 192,
            branch_predictor: None,
            mem_dep_pred_enable: false,
        }
    }
}

impl PipelineSpec {
    /// Checks that widths and ROB depth are positive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::InvalidParameter`] naming the first zero field.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("pipeline.issue_width", self.issue_width)?;
        ensure_positive("pipeline.commit_width", self.commit_width)?;
        ensure_positive("pipeline.rob_entries", self.rob_entries)?;
        Ok(())
    }

    /// Writes this spec into one core's pipeline state.
    fn apply(&self, state: &mut PipelineState) {
        if let Some(predictor) = self.branch_predictor {
            state.branch_predictor = predictor;
        }

        state.issue_width = self.issue_width;
        state.commit_width = self.commit_width;
        state.num_rob_entries = self.rob_entries;

        let store_sets = StoreSetParams::for_prediction(self.mem_dep_pred_enable);
        state.ssit_size = store_sets.ssit_size;
        state.lfst_size = store_sets.lfst_size;
        state.store_set_clear_period = store_sets.clear_period;
    }
}

/// Applies `spec` and interrupt delivery to every core of `system`.
///
/// For each core, in index order:
/// 1. installs the selected branch predictor, or leaves the default one in place;
/// 2. sets issue width, commit width, and ROB entries;
/// 3. sizes the store-set predictor;
/// 4. sets up interrupt delivery according to the core's ISA.
///
/// May run before or after the cache hierarchy is incorporated, but only once per core.
/// Interrupt controllers are built and their memory-side bindings checked before any core
/// changes, so a failed call leaves every core and the memory port as they were.
///
/// # Errors
///
/// * [`ConfigError::InvalidParameter`] for a zero width or ROB depth.
/// * [`ConfigError::CoresUnavailable`] if the system has not exposed its cores.
/// * [`ConfigError::CoreAlreadyConfigured`] on a second pass, whatever the ISA.
/// * [`ConfigError::PortAlreadyBound`] if the memory port refuses an interrupt port.
pub fn configure_cores<S>(system: &mut S, spec: &PipelineSpec) -> Result<()>
where
    S: SystemAssembly + ?Sized,
{
    spec.validate()?;

    let mut controllers = Vec::new();
    for core in system.cores_mut()?.iter() {
        if core.is_configured() {
            return Err(ConfigError::CoreAlreadyConfigured { core: core.index() });
        }
        controllers.push(core.isa().create_interrupt_controller(core.index()));
    }

    let mem_port = system.mem_port();
    for controller in controllers.iter().flatten() {
        for port in controller.ports() {
            check_connect(port, mem_port)?;
        }
    }

    let mem_port_id = mem_port.id();
    let mut interrupt_ports = Vec::new();
    for controller in controllers.iter_mut().flatten() {
        for port in controller.memory_ports_mut() {
            port.bind(mem_port_id)?;
            interrupt_ports.push(port.id());
        }
    }

    let port = system.mem_port_mut();
    for peer in interrupt_ports {
        port.bind(peer)?;
    }

    for (core, controller) in system.cores_mut()?.iter_mut().zip(controllers) {
        let index = core.index();
        if !core.cpu_type().is_out_of_order() {
            tracing::debug!(
                core = index,
                cpu_type = ?core.cpu_type(),
                "pipeline parameters recorded but not consumed by this core type"
            );
        }
        spec.apply(&mut core.pipeline);

        let isa = core.isa();
        if isa.interrupt_binding() == InterruptBinding::Unhandled {
            tracing::debug!(core = index, isa = ?isa, "no interrupt controller to attach");
        }
        core.interrupts = controller;
        core.mark_configured();
    }

    tracing::info!(
        issue_width = spec.issue_width,
        commit_width = spec.commit_width,
        rob_entries = spec.rob_entries,
        branch_predictor = ?spec.branch_predictor,
        mem_dep_pred = spec.mem_dep_pred_enable,
        "configured core pipelines"
    );
    Ok(())
}
