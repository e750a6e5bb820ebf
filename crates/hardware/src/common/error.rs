//! Configuration error definitions.
//!
//! This module defines the single error type raised while building a topology. It covers:
//! 1. **Invalid specifications:** Zero sizes, associativities, latencies, widths, and counts.
//! 2. **Quantity parsing:** Size and frequency strings that do not parse.
//! 3. **Wiring violations:** Incorporation ordering, core-count, and port binding errors.
//! 4. **Config files:** JSON configuration files that cannot be read or deserialized.
//!
//! Unrecognized symbolic option names are not errors; see [`crate::common::resolve`].

use crate::soc::port::PortRef;

/// Errors raised while specifying, allocating, or wiring a topology.
///
/// Every variant is fatal to setup: no partial topology is handed on once one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric parameter is outside its domain (e.g., a zero associativity).
    #[error("invalid value for `{parameter}`: {reason}")]
    InvalidParameter {
        /// Dotted name of the offending parameter (e.g., `l1d[0].assoc`).
        parameter: String,
        /// What is wrong with the supplied value.
        reason: String,
    },

    /// A size or frequency string could not be parsed.
    #[error("cannot parse {kind} `{value}`")]
    InvalidQuantity {
        /// Quantity being parsed (`"memory size"` or `"frequency"`).
        kind: &'static str,
        /// The raw string that failed to parse.
        value: String,
    },

    /// The hierarchy was incorporated into a system more than once.
    #[error("cache hierarchy has already been incorporated into a system")]
    AlreadyIncorporated,

    /// The pipeline configurator already ran on this core.
    #[error("core {core} has already been configured")]
    CoreAlreadyConfigured {
        /// Index of the core.
        core: usize,
    },

    /// The system has not exposed its core handles yet.
    #[error("system has not exposed its core handles; attach a processor before incorporating")]
    CoresUnavailable,

    /// The system exposes a different number of cores than the hierarchy was allocated for.
    #[error("cache hierarchy was allocated for {allocated} cores but the system exposes {exposed}")]
    CoreCountMismatch {
        /// Core count used at allocation.
        allocated: usize,
        /// Core count exposed by the system at incorporation.
        exposed: usize,
    },

    /// A port was wired before the port it forwards to was connected.
    #[error("port `{port}` has no downstream connection")]
    DanglingPort {
        /// The port that is still unconnected.
        port: PortRef,
    },

    /// A single port was bound a second time.
    #[error("port `{port}` is already bound to `{peer}`")]
    PortAlreadyBound {
        /// The port being bound.
        port: PortRef,
        /// Its existing peer.
        peer: PortRef,
    },

    /// A configuration file could not be read or deserialized.
    #[error("failed to load configuration `{path}`: {reason}")]
    ConfigFile {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O or JSON error message.
        reason: String,
    },
}

impl ConfigError {
    /// Builds a [`ConfigError::InvalidParameter`] for `parameter`.
    pub fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fails with [`ConfigError::InvalidParameter`] when `value` is zero.
///
/// # Arguments
///
/// * `parameter` - Dotted parameter name used in the error message.
/// * `value` - The value to check.
pub fn ensure_positive<T>(parameter: impl Into<String>, value: T) -> Result<()>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(ConfigError::invalid(parameter, "must be a positive integer"));
    }
    Ok(())
}
