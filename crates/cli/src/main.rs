use anyhow::{Context, Result};
use clap::Parser;
use gridsent_engine::ScanJob;
use gridsent_grid::GridIndex;
use gridsent_lexicon::Lexicon;
use std::path::PathBuf;
use std::time::Instant;

mod report;

#[derive(Parser)]
#[command(name = "gridsent")]
#[command(about = "Count tweets and sum sentiment scores per grid cell", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the grid definition JSON file
    #[arg(long, default_value = "melbGrid.json")]
    grid_file: PathBuf,

    /// Path to the line-delimited tweet file
    #[arg(long, default_value = "smallTwitter.json")]
    input_file: PathBuf,

    /// Path to the sentiment score file
    #[arg(long, default_value = "AFINN.txt")]
    score_file: PathBuf,

    /// Number of scan workers (default: available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for the report)
    #[arg(long)]
    quiet: bool,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let started = Instant::now();

    let grid = GridIndex::load(&cli.grid_file)
        .with_context(|| format!("Failed to load grid file {}", cli.grid_file.display()))?;
    let lexicon = Lexicon::load(&cli.score_file)
        .with_context(|| format!("Failed to load score file {}", cli.score_file.display()))?;

    let workers = cli.workers.unwrap_or_else(default_workers).max(1);
    let job = ScanJob::new(&grid, &lexicon, &cli.input_file);
    let counter = job
        .run(workers)
        .with_context(|| format!("Failed to scan {}", cli.input_file.display()))?;

    print!("{}", report::render(&grid, &counter));
    log::info!("Total time: {:.3}s", started.elapsed().as_secs_f64());

    Ok(())
}
