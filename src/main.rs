//! Benchmark runner for the cache-locality experiments.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use blockbench::harness::clock::CpuClock;
use blockbench::harness::loop_order::{self, LoopOrder, LoopOrderConfig, loop_order_header};
use blockbench::harness::report::{Listing, ListingHeader, create_listing_file};
use blockbench::harness::stride::{StrideConfig, run_stride, stride_header};
use blockbench::harness::sweep::{self, BaselinePolicy, BlockSweep, SweepConfig, sweep_header};
use blockbench::{Result, lifecycle};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Memory access pattern microbenchmarks (single core, CPU time)
#[derive(Parser)]
#[command(name = "blockbench")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep tile sizes of a blocked matrix multiply (default)
    Blocked(BlockedArgs),
    /// Compare i-j-k and i-k-j loop orders
    LoopOrder {
        /// Matrix dimension N
        #[arg(short = 'n', long, default_value_t = sweep::DEFAULT_DIM)]
        size: usize,

        /// Seed for the input matrices
        #[arg(long, default_value_t = sweep::DEFAULT_SEED)]
        seed: u64,

        /// Result listing destination
        #[arg(short, long, default_value = loop_order::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Sum a fixed number of elements at increasing strides
    Stride {
        /// Elements summed per stride
        #[arg(long, default_value_t = 1_000_000)]
        touches: usize,

        /// Largest stride
        #[arg(long, default_value_t = 20)]
        max_stride: usize,
    },
    /// Allocate, duplicate and release a small buffer
    Lifecycle {
        /// Number of elements
        #[arg(long, default_value_t = lifecycle::DEFAULT_LEN)]
        len: usize,
    },
}

#[derive(Args)]
struct BlockedArgs {
    /// Matrix dimension N
    #[arg(short = 'n', long, default_value_t = sweep::DEFAULT_DIM)]
    size: usize,

    /// Tile edges to sweep, in order
    #[arg(short, long, value_delimiter = ',', default_values_t = sweep::DEFAULT_BLOCK_SIZES)]
    block_sizes: Vec<usize>,

    /// Seed for the input matrices
    #[arg(long, default_value_t = sweep::DEFAULT_SEED)]
    seed: u64,

    /// What the speedup column is relative to
    #[arg(long, value_enum, default_value_t = Baseline::FirstSwept)]
    baseline: Baseline,

    /// Result listing destination
    #[arg(short, long, default_value = sweep::DEFAULT_OUTPUT)]
    output: PathBuf,
}

impl Default for BlockedArgs {
    fn default() -> Self {
        Self {
            size: sweep::DEFAULT_DIM,
            block_sizes: sweep::DEFAULT_BLOCK_SIZES.to_vec(),
            seed: sweep::DEFAULT_SEED,
            baseline: Baseline::FirstSwept,
            output: PathBuf::from(sweep::DEFAULT_OUTPUT),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Baseline {
    /// First configuration in the list (or the one whose block size equals N)
    FirstSwept,
    /// A separate unblocked run made before the sweep
    Unblocked,
}

impl From<Baseline> for BaselinePolicy {
    fn from(value: Baseline) -> Self {
        match value {
            Baseline::FirstSwept => BaselinePolicy::FirstSwept,
            Baseline::Unblocked => BaselinePolicy::Unblocked,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command.unwrap_or(Commands::Blocked(BlockedArgs::default())) {
        Commands::Blocked(args) => cmd_blocked(args),
        Commands::LoopOrder { size, seed, output } => {
            cmd_loop_order(LoopOrderConfig { n: size, seed }, &output)
        }
        Commands::Stride {
            touches,
            max_stride,
        } => cmd_stride(StrideConfig {
            touches,
            max_stride,
        }),
        Commands::Lifecycle { len } => lifecycle::run(len, &mut io::stdout()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

type FileListing = Listing<Stdout, io::BufWriter<std::fs::File>>;

fn open_listing(header: &ListingHeader, output: &Path) -> Result<FileListing> {
    let file = create_listing_file(output)?;
    let mut listing = Listing::new(io::stdout(), Some(file));
    listing.header(header)?;
    Ok(listing)
}

fn cmd_blocked(args: BlockedArgs) -> Result<()> {
    let config = SweepConfig {
        n: args.size,
        block_sizes: args.block_sizes,
        seed: args.seed,
        baseline: args.baseline.into(),
    };

    // Allocate before the listing file exists so a failure leaves no file behind.
    let mut sweep = BlockSweep::new(config, CpuClock::new())?;
    let mut listing = open_listing(&sweep_header(sweep.config().n), &args.output)?;
    sweep.run(&mut listing)?;
    drop(sweep);
    listing.finish()?;

    println!("\nResults saved to {}", args.output.display());
    Ok(())
}

fn cmd_loop_order(config: LoopOrderConfig, output: &Path) -> Result<()> {
    let mut experiment = LoopOrder::new(&config)?;
    let mut listing = open_listing(&loop_order_header(experiment.dim()), output)?;
    experiment.run(&mut CpuClock::new(), &mut listing)?;
    drop(experiment);
    listing.finish()?;

    println!("\nResults saved to {}", output.display());
    Ok(())
}

fn cmd_stride(config: StrideConfig) -> Result<()> {
    let mut listing: Listing<Stdout, io::Sink> = Listing::new(io::stdout(), None);
    listing.header(&stride_header())?;
    run_stride(&config, &mut CpuClock::new(), &mut listing)?;
    listing.finish()?;
    Ok(())
}
