use simtopo_core::System;
use simtopo_core::config::Config;

/// Installs a test-writer subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("simtopo_core=debug")
        .try_init();
}

/// Default configuration running `binary` on `num_cores` cores.
pub fn config_with_cores(num_cores: usize) -> Config {
    let mut config = Config::default();
    config.processor.num_cores = num_cores;
    config.workload.binary = "tests/bin/hello".into();
    config
}

/// Assembles `config`, failing the test on error.
pub fn assemble(config: &Config) -> System {
    init_tracing();
    System::assemble(config).unwrap_or_else(|e| panic!("assembly failed: {e}"))
}
