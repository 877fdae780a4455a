//! `sturmwalk` - Simulates the blind torus walk and audits its generators.
//!
//! **Modes:**
//! - `boards <AxB>...` - simulate the listed boards
//! - `sample` - simulate random boards with `S < max_area`
//! - `all` - simulate every board with `S < max_area`
//! - `theorem` - audit every height below `max_area` for degenerate channels
//! - `probe` - per-channel block statistics
//! - `selftest <AxB>...` - inlined walk cross-checked against the driver
//!
//! **Usage:**
//! ```text
//! sturmwalk boards 18x26226 6x31245 --no-cap
//! sturmwalk --strategy reference sample --samples 5000
//! sturmwalk --config sweep.toml --json all --max-area 20000
//! sturmwalk --threads 4 all --max-area 100000
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); reports go to stdout.
//! Exits non-zero if any board fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sturmwalk::ChannelSet;
use sturmwalk_sim::{
    audit_heights, board_count, configure_threads, probe, sample_boards, selftest, simulate_cover,
    sweep, sweep_all, Board, SimConfig, StrategyKind, SweepReport,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Blind torus walk simulator.
#[derive(Parser)]
#[command(
    name = "sturmwalk",
    version,
    about = "Simulate grid-blind torus coverage and audit the move generators"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every mode. Flags override the configuration file.
#[derive(Args)]
struct GlobalArgs {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bit generator.
    #[arg(long, global = true, value_enum)]
    strategy: Option<StrategyArg>,

    /// Channel count for the seeded generator.
    #[arg(long, global = true)]
    channels: Option<usize>,

    /// Scheduler jump for the seeded generator (default: nearest unit to 0.618·K).
    #[arg(long, global = true)]
    rotation: Option<u64>,

    /// Parameter seed for the seeded generator (decimal or 0x-hex).
    #[arg(long, global = true, value_parser = parse_u64)]
    seed: Option<u64>,

    /// A board fails after cap_factor·S moves.
    #[arg(long, global = true)]
    cap_factor: Option<f64>,

    /// Run every board until it is covered.
    #[arg(long, global = true)]
    no_cap: bool,

    /// Print the report as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Sweep worker threads (default: one per core).
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// The Fibonacci word alone.
    Sturmian,
    /// Seeded multichannel set (--channels, --rotation, --seed).
    Seeded,
    /// Fixed four-channel preset.
    Reference,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sturmian => Self::Sturmian,
            StrategyArg::Seeded => Self::Seeded,
            StrategyArg::Reference => Self::Reference,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the listed boards.
    Boards {
        /// Boards as AxB.
        #[arg(required = true)]
        boards: Vec<Board>,
        /// Print the channel probe first.
        #[arg(long)]
        probe: bool,
    },
    /// Simulate randomly drawn boards.
    Sample {
        /// Number of boards.
        #[arg(long)]
        samples: Option<usize>,
        /// Board RNG seed.
        #[arg(long, value_parser = parse_u64)]
        sample_seed: Option<u64>,
        /// Exclusive area bound.
        #[arg(long)]
        max_area: Option<u64>,
        /// Print the channel probe first.
        #[arg(long)]
        probe: bool,
    },
    /// Simulate every board below the area bound.
    All {
        /// Exclusive area bound.
        #[arg(long)]
        max_area: Option<u64>,
        /// Print the channel probe first.
        #[arg(long)]
        probe: bool,
    },
    /// Check that no height below the bound is degenerate for every channel.
    Theorem {
        /// Exclusive height bound.
        #[arg(long)]
        max_area: Option<u64>,
    },
    /// Per-channel block counts and leading block lengths.
    Probe {
        /// Blocks to inspect.
        #[arg(long)]
        blocks: Option<usize>,
    },
    /// Walk with an inlined block loop and compare against the driver.
    Selftest {
        /// Boards as AxB.
        #[arg(required = true)]
        boards: Vec<Board>,
        /// Print the channel probe first, over this many blocks.
        #[arg(long)]
        probe_blocks: Option<usize>,
    },
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("`{s}` is not a u64: {e}"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(args: &GlobalArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    if let Some(channels) = args.channels {
        config.channels = channels;
    }
    if args.rotation.is_some() {
        config.rotation = args.rotation;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(factor) = args.cap_factor {
        config.cap_factor = factor;
    }
    if args.no_cap {
        config.use_cap = false;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    Ok(config)
}

fn channel_set(config: &SimConfig) -> Result<ChannelSet> {
    match config.strategy().channel_set()? {
        Some(set) => Ok(set),
        None => bail!("the sturmian strategy has no channels; use --strategy seeded or reference"),
    }
}

fn print_probe(config: &SimConfig, blocks: usize, json: bool) -> Result<()> {
    let probes = probe(&channel_set(config)?, blocks);
    if json {
        println!("{}", serde_json::to_string_pretty(&probes)?);
        return Ok(());
    }
    for p in &probes {
        println!(
            "[probe] ch{}: M={}, P={}, alpha={:.6}, t=1:{}, t=2:{}, ratio1={:.3}",
            p.index,
            p.modulus,
            p.increment,
            p.alpha,
            p.short_blocks,
            p.long_blocks,
            p.short_ratio()
        );
        println!("         head t: {:?}", p.head);
    }
    Ok(())
}

fn print_sweep(report: &SweepReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for failure in &report.failures {
        println!("{failure}");
    }
    print!(
        "[DONE] {}: checked={}, fails={}, mean={:.3}·S",
        report.strategy,
        report.checked,
        report.failure_count(),
        report.mean_ratio
    );
    match &report.worst {
        Some(worst) => println!(", worst={} ({:.3}·S)", worst.board(), worst.ratio()),
        None => println!(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli.global)?;
    configure_threads(config.threads).context("Failed to start sweep workers")?;
    let strategy = config.strategy();
    let cap = config.cap();
    let json = cli.global.json;

    let failed = match cli.command {
        Command::Boards { boards, probe } => {
            if probe {
                print_probe(&config, config.probe_blocks, json)?;
            }
            let results = boards
                .into_iter()
                .map(|board| simulate_cover(board, &strategy, cap))
                .collect::<Result<Vec<_>, _>>()?;
            if json {
                let value = serde_json::json!({
                    "strategy": strategy.to_string(),
                    "results": &results,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for result in &results {
                    println!("{result}");
                }
            }
            results.iter().filter(|r| !r.ok).count()
        }
        Command::Sample {
            samples,
            sample_seed,
            max_area,
            probe,
        } => {
            if probe {
                print_probe(&config, config.probe_blocks, json)?;
            }
            let boards = sample_boards(
                samples.unwrap_or(config.samples),
                max_area.unwrap_or(config.max_area),
                sample_seed.unwrap_or(config.sample_seed),
            );
            let report = sweep(boards, &strategy, cap)?;
            print_sweep(&report, json)?;
            report.failure_count()
        }
        Command::All { max_area, probe } => {
            if probe {
                print_probe(&config, config.probe_blocks, json)?;
            }
            let max_area = max_area.unwrap_or(config.max_area);
            tracing::info!(
                boards = board_count(max_area),
                max_area,
                "enumerating every board"
            );
            let report = sweep_all(max_area, &strategy, cap)?;
            print_sweep(&report, json)?;
            report.failure_count()
        }
        Command::Theorem { max_area } => {
            let set = channel_set(&config)?;
            let report = audit_heights(&set, max_area.unwrap_or(config.max_area));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if let Some(height) = report.degenerate {
                println!("[FAIL] height {height}: (B·P) mod M = 0 on every channel");
            } else {
                println!(
                    "[OK]   every height B < {} has a channel with (B·P) mod M != 0",
                    report.max_height
                );
                if let Some(height) = report.weakest_height {
                    println!(
                        "       weakest height {height}: best channel distance {:.3e}",
                        report.weakest_distance
                    );
                }
            }
            usize::from(!report.passed())
        }
        Command::Probe { blocks } => {
            print_probe(&config, blocks.unwrap_or(config.probe_blocks), json)?;
            0
        }
        Command::Selftest {
            boards,
            probe_blocks,
        } => {
            if let Some(blocks) = probe_blocks {
                print_probe(&config, blocks, json)?;
            }
            let results = boards
                .into_iter()
                .map(|board| selftest(board, &strategy, cap))
                .collect::<Result<Vec<_>, _>>()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for r in &results {
                    let agreement = if r.agrees() { "agrees" } else { "DISAGREES" };
                    println!("{} driver={} {agreement}", r.inline, r.driver_steps);
                }
            }
            results.iter().filter(|r| !r.inline.ok || !r.agrees()).count()
        }
    };

    if failed > 0 {
        eprintln!("sturmwalk: {failed} board(s) failed.");
        process::exit(1);
    }
    Ok(())
}
