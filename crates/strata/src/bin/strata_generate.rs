//! strata_generate - runs one terrain generation pass from a settings file
//! and logs what it produced.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strata::{
    init_logging, run_generation, AppResult, CountingSink, PrefabRegistry, WorldSettings,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate voxel terrain from a STRATA world file",
    long_about = None
)]
struct Args {
    /// World settings file (TOML); built-in defaults if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the noise seed (0 draws one at startup)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the worker thread count (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> AppResult<()> {
    let mut settings = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading world settings");
            WorldSettings::load(path)?
        }
        None => WorldSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.noise.seed = seed;
    }
    if let Some(threads) = args.threads {
        settings.execution.worker_threads = threads;
    }

    let mut sink = CountingSink::new();
    let report = run_generation(&settings, &PrefabRegistry::with_builtin(), &mut sink)?;

    info!(
        seed = report.seed,
        seed_source = ?report.seed_source,
        chunks = report.chunks_generated(),
        cells = report.total_cells(),
        solid = report.solid_blocks(),
        placed = sink.placed(),
        culled = report.culled(),
        elapsed = ?report.elapsed,
        "generation report"
    );
    if let Some(bounds) = sink.bounds() {
        info!(min = ?bounds.min, max = ?bounds.max, "placement bounds");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(args.verbose) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
