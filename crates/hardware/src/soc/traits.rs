//! System Assembly interface.
//!
//! The owning system (board) is built outside the cache hierarchy and the pipeline
//! configurator; both reach it only through [`SystemAssembly`]. It provides:
//! 1. **Memory side:** The port the system crossbar and interrupt controllers bind to.
//! 2. **Cores:** The ordered core handles, available only once a processor is attached.

use crate::common::error::Result;
use crate::core::Core;
use crate::soc::port::Port;

/// The late-bound system a cache hierarchy is incorporated into.
pub trait SystemAssembly {
    /// Returns the memory-side port of the system.
    fn mem_port(&self) -> &Port;

    /// Returns the memory-side port of the system for binding.
    fn mem_port_mut(&mut self) -> &mut Port;

    /// Returns the number of exposed cores, or `None` before the cores exist.
    fn num_cores(&self) -> Option<usize>;

    /// Returns the ordered core handles.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::ConfigError::CoresUnavailable`] before the cores exist.
    fn cores_mut(&mut self) -> Result<&mut [Core]>;
}
