use clap::Parser;
use pnp_cli::format::{build_event_table, read_setup, write_sequence};
use pnp_cli::CliError;
use pnp_core::solver::mip::SolverOptions;
use pnp_core::solver::{ArcTimePolicy, Config, Engine};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Computes a pick-and-place execution schedule from a setup directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Setup directory holding machine.csv, feeders.csv, jobs.csv and
    /// placements.csv
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the result table and figures are written to
    #[arg(short, long)]
    output: PathBuf,

    /// Relative MIP gap of the per-cluster routing solve
    #[arg(long, default_value_t = 0.001)]
    mip_gap: f64,

    /// Wall-clock limit in seconds per routing solve
    #[arg(long)]
    time_limit: Option<f64>,

    /// Bill the return-to-feeder arc pure travel time instead of the
    /// amortised per-pick overhead
    #[arg(long)]
    pure_return_travel: bool,

    /// Render one figure per unique job
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot: bool,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let setup = read_setup(&args.input)?;

    let config = Config {
        solver_options: SolverOptions { mip_gap: args.mip_gap, time_limit: args.time_limit },
        arc_time_policy: if args.pure_return_travel {
            ArcTimePolicy::PureReturnTravel
        } else {
            ArcTimePolicy::AmortizedOverhead
        },
    };

    let mut engine = Engine::new(setup).with_config(config);
    let sequences = engine.run()?;

    std::fs::create_dir_all(&args.output)
        .map_err(|err| CliError::Io { path: args.output.clone(), source: err })?;

    let rows = build_event_table(sequences.as_slice());
    let table_path = args.output.join("full_sequence.csv");
    write_sequence(&table_path, rows.as_slice())?;
    info!(rows = rows.len(), path = %table_path.display(), "result table written");

    #[cfg(feature = "plot")]
    if args.plot {
        for (job, _) in engine.setup().jobs.iter() {
            if let Some(sequence) = sequences.iter().find(|sequence| sequence.job_id == job.id) {
                let figure_path = args.output.join(format!("{}.png", job.id));
                pnp_cli::plot::render_job_figure(job, sequence, &figure_path)?;
                info!(path = %figure_path.display(), "figure written");
            }
        }
    }

    Ok(())
}
