//! Cluster a point file with DBSCAN, estimating whichever parameter is omitted.
//!
//! # Usage
//!
//! ```bash
//! dbscan-auto points.csv 4 0.5   # min_samples = 4, eps = 0.5
//! dbscan-auto points.csv 0.5     # eps = 0.5, min_samples estimated
//! dbscan-auto points.csv 4       # min_samples = 4, eps estimated
//! ```
//!
//! The input has one `id,x,y` record per line and no header.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dbscan_auto::{ClusterReport, ClusteringConfig, Dataset, run};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "dbscan-auto")]
#[command(about = "DBSCAN clustering with automatic eps / min_samples estimation")]
struct Args {
    /// Input file of `id,x,y` records.
    input: PathBuf,

    /// `<eps>` or `<min_samples>` alone (a value containing '.' is eps), or
    /// `<min_samples> <eps>`.
    #[arg(num_args = 1..=2, required = true)]
    params: Vec<String>,

    /// Also write the report to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Cache pairwise distances instead of rescanning for every query.
    #[arg(long)]
    precompute: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> dbscan_auto::Result<()> {
    let config =
        ClusteringConfig::from_positional(args.params.as_slice())?.precompute_distances(args.precompute);
    let data = Dataset::load(&args.input)?;
    info!(path = %args.input.display(), n_samples = data.n_samples(), "loaded dataset");

    let result = run(&data, &config)?;
    let report = ClusterReport::new(&data, &result);
    print!("{report}");

    if let Some(path) = &args.output {
        report.save(path)?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}
