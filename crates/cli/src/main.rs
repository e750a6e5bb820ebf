//! Topology builder CLI.
//!
//! This binary assembles a wired system and prints its topology. It supports:
//! 1. **Flag run:** Every parameter as a command-line flag, with the stock defaults.
//! 2. **Config run:** A JSON configuration file.
//!
//! Both print a human-readable summary, or the full topology report as JSON with `--json`.
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use simtopo_core::config::{
    CacheHierarchyConfig, CacheLevelConfig, Config, PipelineConfig, ProcessorConfig, SystemConfig,
    WorkloadConfig,
};
use simtopo_core::soc::builder::TopologyReport;
use simtopo_core::System;

#[derive(Parser, Debug)]
#[command(
    name = "simtopo",
    author,
    version,
    about = "Multi-core cache hierarchy and pipeline topology builder",
    long_about = "Build and wire a private-L1 / shared-L2 topology and print it.\n\nExamples:\n  simtopo run --binary mm --num-cores 2 --l2-size 512KiB\n  simtopo --json load system.json"
)]
struct Cli {
    /// Print the topology report as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a system from command-line flags.
    Run(RunArgs),

    /// Assemble a system from a JSON configuration file.
    Load {
        /// Configuration file path.
        config: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Type of CPU to use in the simulation.
    #[arg(long, default_value = "O3", value_parser = ["O3", "TimingSimple", "Atomic"])]
    cpu_type: String,

    /// Number of reorder buffer entries.
    #[arg(long = "ROB-entries", alias = "rob-entries", default_value_t = 192)]
    rob_entries: u32,

    /// Issue width.
    #[arg(long, default_value_t = 4)]
    issue_width: u32,

    /// Commit width.
    #[arg(long, default_value_t = 4)]
    commit_width: u32,

    /// Size of each L1 data cache.
    #[arg(long, default_value = "16KiB")]
    l1d_size: String,

    /// Size of each L1 instruction cache.
    #[arg(long, default_value = "16KiB")]
    l1i_size: String,

    /// Associativity of each L1 data cache.
    #[arg(long, default_value_t = 2)]
    l1d_assoc: u32,

    /// Associativity of each L1 instruction cache.
    #[arg(long, default_value_t = 2)]
    l1i_assoc: u32,

    /// Size of the L2 cache.
    #[arg(long, default_value = "256KiB")]
    l2_size: String,

    /// Associativity of the L2 cache.
    #[arg(long, default_value_t = 8)]
    l2_assoc: u32,

    /// L1 instruction cache replacement policy.
    #[arg(long, default_value = "LRU", value_parser = POLICIES)]
    l1i_replace_policy: String,

    /// L1 data cache replacement policy.
    #[arg(long, default_value = "LRU", value_parser = POLICIES)]
    l1d_replace_policy: String,

    /// L2 cache replacement policy.
    #[arg(long, default_value = "LRU", value_parser = POLICIES)]
    l2_replace_policy: String,

    /// Install the selected branch predictor.
    #[arg(long)]
    branch_predictor_enable: bool,

    /// Branch predictor to install.
    #[arg(
        long,
        default_value = "BiModeBP",
        value_parser = ["BiModeBP", "TournamentBP", "LocalBP", "GShareBP"]
    )]
    branch_predictor_type: String,

    /// Enable store-set memory-dependence prediction.
    #[arg(long)]
    mem_dep_pred_enable: bool,

    /// L1 data cache prefetcher.
    #[arg(long, default_value = "None", value_parser = ["StridePrefetcher", "None"])]
    l1d_prefetcher_type: String,

    /// L2 cache prefetcher.
    #[arg(
        long,
        default_value = "None",
        value_parser = ["DCPTPrefetcher", "TaggedPrefetcher", "None"]
    )]
    l2_prefetcher_type: String,

    /// Size of main memory.
    #[arg(long, default_value = "8GiB")]
    memory_size: String,

    /// Board clock frequency.
    #[arg(long, default_value = "3GHz")]
    clock_frequency: String,

    /// Binary to run.
    #[arg(long)]
    binary: PathBuf,

    /// Number of cores.
    #[arg(long, default_value_t = 1)]
    num_cores: usize,

    /// Instruction set of the cores.
    #[arg(long, default_value = "X86", value_parser = ["X86", "RISCV", "ARM"])]
    isa: String,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 1_000_000_000)]
    max_tick: u64,
}

/// Replacement policy choices; `SRRIP` and `BRRIP` are accepted and fall back to FIFO.
const POLICIES: [&str; 6] = ["LRU", "Random", "LFU", "SRRIP", "BRRIP", "BIP"];

impl RunArgs {
    /// Builds the configuration these flags describe.
    fn into_config(self) -> Config {
        let level = |size: String, assoc: u32, policy: String, prefetcher: Option<String>| {
            let mut config = CacheLevelConfig {
                size: Some(size),
                assoc: Some(assoc),
                policy,
                ..CacheLevelConfig::default()
            };
            if let Some(prefetcher) = prefetcher {
                config.prefetcher = prefetcher;
            }
            config
        };

        Config {
            processor: ProcessorConfig {
                cpu_type: self.cpu_type,
                isa: self.isa,
                num_cores: self.num_cores,
            },
            cache: CacheHierarchyConfig {
                l1_i: level(self.l1i_size, self.l1i_assoc, self.l1i_replace_policy, None),
                l1_d: level(
                    self.l1d_size,
                    self.l1d_assoc,
                    self.l1d_replace_policy,
                    Some(self.l1d_prefetcher_type),
                ),
                l2: level(
                    self.l2_size,
                    self.l2_assoc,
                    self.l2_replace_policy,
                    Some(self.l2_prefetcher_type),
                ),
            },
            pipeline: PipelineConfig {
                issue_width: self.issue_width,
                commit_width: self.commit_width,
                rob_entries: self.rob_entries,
                branch_predictor_enable: self.branch_predictor_enable,
                branch_predictor: self.branch_predictor_type,
                mem_dep_pred_enable: self.mem_dep_pred_enable,
            },
            system: SystemConfig {
                memory_size: self.memory_size,
                clock_frequency: self.clock_frequency,
                max_tick: self.max_tick,
            },
            workload: WorkloadConfig {
                binary: self.binary,
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");
    if let Err(e) = execute(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Assembles the system the command describes and prints its topology.
fn execute(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match cli.command {
        Commands::Run(args) => args.into_config(),
        Commands::Load { config } => Config::load(&config)?,
    };

    let system = System::assemble(&config)?;
    let report = system.report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Prints a human-readable topology summary.
fn print_summary(report: &TopologyReport) {
    println!(
        "System: {} core(s), cpu={:?} isa={:?}",
        report.cores.len(),
        report.cpu_type,
        report.isa
    );
    println!(
        "  Clock: {} ({} ticks/cycle)  Memory: {} {} x{}  Max tick: {}",
        report.clock,
        report.clock_period_ticks,
        report.memory.size,
        report.memory.technology,
        report.memory.channels,
        report.max_tick
    );
    if let Some(binary) = &report.binary {
        println!("  Workload: {}", binary.display());
    }
    if let Some(core) = report.cores.first() {
        let pipeline = &core.pipeline;
        println!(
            "  Pipeline: issue={} commit={} rob={} bp={:?} ssit={} lfst={} clear={}",
            pipeline.issue_width,
            pipeline.commit_width,
            pipeline.num_rob_entries,
            pipeline.branch_predictor,
            pipeline.ssit_size,
            pipeline.lfst_size,
            pipeline.store_set_clear_period
        );
    }
    println!();

    println!("Caches:");
    for cache in &report.caches {
        let spec = &cache.spec;
        println!(
            "  {:<10} {:>8} {:>2}-way {:>5} sets  lat {}/{}/{}  mshrs {:>2}  policy {:?}  prefetch {:?}",
            cache.name,
            spec.size.to_string(),
            spec.assoc,
            cache.num_sets,
            spec.tag_latency,
            spec.data_latency,
            spec.response_latency,
            spec.mshrs,
            spec.replacement_policy,
            spec.prefetcher
        );
    }

    println!("Interconnects:");
    for bus in &report.interconnects {
        let timing = bus.timing;
        println!(
            "  {:<10} width {:>2}B  frontend {} forward {} response {} snoop {}",
            bus.name,
            timing.width,
            timing.frontend_latency,
            timing.forward_latency,
            timing.response_latency,
            timing.snoop_response_latency
        );
    }

    println!("Bindings:");
    for binding in &report.bindings {
        println!("  {} <-> {}", binding.a, binding.b);
    }
}
