use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendlab::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "trendlab",
    version,
    about = "Naver DataLab search trend collector with demographic breakdowns",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect demographic trend breakdowns for one window
    Collect {
        /// Keyword groups definition file (TOML)
        #[arg(short, long)]
        groups: PathBuf,

        /// Window start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Window end date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Dataset label used in logs
        #[arg(short, long, default_value = "demographics")]
        label: String,

        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Collect two long-term windows and stitch them at a cutover date
    Longterm {
        /// Keyword groups definition file (TOML)
        #[arg(short, long)]
        groups: PathBuf,

        /// First window start date (YYYY-MM-DD)
        #[arg(long)]
        first_start: NaiveDate,

        /// First window end date (YYYY-MM-DD)
        #[arg(long)]
        first_end: NaiveDate,

        /// Second window start date (YYYY-MM-DD)
        #[arg(long)]
        second_start: NaiveDate,

        /// Second window end date (YYYY-MM-DD)
        #[arg(long)]
        second_end: NaiveDate,

        /// Cutover date; defaults to the second window's start
        #[arg(long)]
        cutover: Option<NaiveDate>,

        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    tracing::info!("trendlab collector starting");

    match cli.command {
        Commands::Collect {
            groups,
            start,
            end,
            label,
            out,
        } => {
            tracing::info!(
                groups = %groups.display(),
                start = %start,
                end = %end,
                label = %label,
                "Starting collect command"
            );
            commands::collect::collect(config, groups, start, end, label, out).await?;
        }

        Commands::Longterm {
            groups,
            first_start,
            first_end,
            second_start,
            second_end,
            cutover,
            out,
        } => {
            tracing::info!(
                groups = %groups.display(),
                first_start = %first_start,
                first_end = %first_end,
                second_start = %second_start,
                second_end = %second_end,
                cutover = ?cutover,
                "Starting longterm command"
            );
            commands::longterm::longterm(
                config,
                groups,
                first_start,
                first_end,
                second_start,
                second_end,
                cutover,
                out,
            )
            .await?;
        }
    }

    tracing::info!("trendlab completed");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendlab=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("trendlab=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
