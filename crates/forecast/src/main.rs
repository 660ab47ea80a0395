use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use forecast::commands::{self, AmortizeOptions, ProjectOptions};
use forecast::{CliConfig, OutputFormat, ProjectionWindow, default_data_dir, init_logging};
use jiff::civil::Date;

#[derive(Parser, Debug)]
#[command(name = "forecast")]
#[command(about = "Year-by-year financial projections from age-bucketed plans")]
struct Args {
    /// Path to the data directory (default: ~/.forecast/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a plan year by year
    Project {
        plan: PathBuf,
        #[arg(long)]
        start_year: Option<i16>,
        #[arg(long)]
        end_year: Option<i16>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Fail on years no bucket covers instead of skipping them
        #[arg(long)]
        strict_buckets: bool,
        /// Date ages are measured from (default: today)
        #[arg(long)]
        as_of: Option<Date>,
    },
    /// Check a plan's scenario without projecting it
    Validate { plan: PathBuf },
    /// Print a mortgage's amortization schedule
    Amortize {
        plan: PathBuf,
        #[arg(long)]
        mortgage: String,
        /// One row per payment instead of per calendar year
        #[arg(long)]
        monthly: bool,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;
    let config = CliConfig::load(&data_dir).wrap_err("failed to load config")?;

    let output = match args.command {
        Command::Project {
            plan,
            start_year,
            end_year,
            format,
            strict_buckets,
            as_of,
        } => {
            let opts = ProjectOptions {
                window: ProjectionWindow {
                    start_year,
                    end_year,
                },
                as_of,
                strict_buckets,
                format,
            };
            commands::project(&plan, &opts, &config)?
        }
        Command::Validate { plan } => commands::validate(&plan)?,
        Command::Amortize {
            plan,
            mortgage,
            monthly,
            format,
        } => commands::amortize(
            &plan,
            &AmortizeOptions {
                mortgage,
                monthly,
                format,
            },
            &config,
        )?,
    };

    println!("{output}");
    tracing::debug!("done");
    Ok(())
}
