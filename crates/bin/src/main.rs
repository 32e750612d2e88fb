//! Paysheet CLI binary.
//!
//! Runs the employee/timesheet to branch payroll pipeline.

mod report;

use clap::{Parser, Subcommand};
use paysheet::{Pipeline, PipelineConfig, PipelineError, Sources, tables};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "paysheet")]
#[command(about = "Paysheet: branch payroll ETL from employee and timesheet exports", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, transform and load
    Run {
        #[command(flatten)]
        sources: SourceArgs,

        /// Stop after the transform and print the branch payroll table
        #[arg(long)]
        dry_run: bool,
    },

    /// Create the declared tables only
    Schema {
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Database connection string (overrides the config file)
        #[arg(long)]
        database: Option<String>,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Employee CSV export (overrides the config file)
    #[arg(long, requires = "timesheets")]
    employees: Option<PathBuf>,

    /// Timesheet CSV export (overrides the config file)
    #[arg(long, requires = "employees")]
    timesheets: Option<PathBuf>,

    /// Database connection string (overrides the config file)
    #[arg(long)]
    database: Option<String>,
}

/// Error type for argument handling.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Neither a config file nor both CSV paths were given.
    #[error("pass --config or both --employees and --timesheets")]
    MissingSources,
    /// Pipeline error.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run { sources, dry_run } => {
            let config = pipeline_config(
                sources.config,
                sources.employees.zip(sources.timesheets),
                sources.database,
            )?;
            let pipeline = Pipeline::new(config)?;

            if dry_run {
                let derived = pipeline.transform(pipeline.extract()?)?;
                report::print_branch_salary(derived.get(tables::BRANCH_SALARY)?)?;
            } else {
                let derived = pipeline.run()?;
                let rows = derived.get(tables::BRANCH_SALARY)?.height();
                info!(rows, database = %pipeline.config().database_url(), "pipeline finished");
            }
        }
        Commands::Schema { config, database } => {
            let config = match config {
                Some(path) => PipelineConfig::from_file(path)?,
                None => PipelineConfig::default(),
            };
            let config = match database {
                Some(url) => config.with_database(url),
                None => config,
            };
            let url = config.database_url();
            paysheet::store::Store::connect(&url)?.build_schema()?;
            info!(database = %url, "schema ready");
        }
    }

    Ok(())
}

/// Build the pipeline configuration from a config file and/or flags.
fn pipeline_config(
    config_file: Option<PathBuf>,
    csv_paths: Option<(PathBuf, PathBuf)>,
    database: Option<String>,
) -> Result<PipelineConfig, CliError> {
    let mut config = match (config_file, &csv_paths) {
        (Some(path), _) => PipelineConfig::from_file(path)?,
        (None, Some(_)) => PipelineConfig::default(),
        (None, None) => return Err(CliError::MissingSources),
    };

    if let Some((employees, timesheets)) = csv_paths {
        let standard = Sources::standard(employees, timesheets);
        for (name, spec) in standard.iter() {
            config.sources = config.sources.with(name, spec.clone());
        }
    }
    if let Some(url) = database {
        config = config.with_database(url);
    }

    Ok(config)
}
