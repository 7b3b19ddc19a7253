//! Reserving Client CLI
//!
//! Command-line front end for submitting loss triangles to the reserving
//! service and printing the results

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reserving_client::{
    display::{DisplayModel, ResultsView},
    request::load_triangle_file,
    build, AnalysisSession, ClientConfig, FormValues, NumberFormat, ResultProjector, ReservingClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "reserving-client", version, about = "Analyze loss triangles with the reserving service")]
struct Cli {
    /// Service base URL (falls back to API_BASE_URL, then http://localhost:8000)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Abort a request that takes longer than this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a triangle CSV and print the reserving estimates
    Analyze {
        /// Triangle dataset (CSV with origin, development and value columns)
        csv: PathBuf,

        /// Column holding the origin period
        #[arg(long)]
        origin_col: Option<String>,

        /// Column holding the development period
        #[arg(long)]
        dev_col: Option<String>,

        /// Column holding the observed value
        #[arg(long)]
        value_col: Option<String>,

        /// Values are incremental per development period
        #[arg(long, conflicts_with = "cumulative")]
        incremental: bool,

        /// Cumulative switch as text; anything but false/0/no/off means cumulative
        #[arg(long)]
        cumulative: Option<String>,

        /// Number locale for estimates (en-US, de-DE, fr-FR)
        #[arg(long, default_value = "en-US")]
        locale: NumberFormat,

        /// Print the display model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ClientConfig::resolve(cli.base_url);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = ReservingClient::new(config).context("Failed to create HTTP client")?;

    match cli.command {
        Command::Health => {
            let health = client
                .check_health()
                .await
                .with_context(|| format!("Service at {} is not healthy", client.config().base_url))?;
            println!("{}: {}", client.config().base_url, health.status);
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze {
            csv,
            origin_col,
            dev_col,
            value_col,
            incremental,
            cumulative,
            locale,
            json,
        } => {
            let file = load_triangle_file(&csv)
                .with_context(|| format!("Unable to read {}", csv.display()))?;

            let form = FormValues {
                origin_col,
                dev_col,
                value_col,
                cumulative: if incremental { Some("false".to_string()) } else { cumulative },
            };

            let request = build(Some(file), &form)
                .with_context(|| format!("Cannot submit {}", csv.display()))?;
            for column in request.missing_columns() {
                log::warn!("Column '{}' not found in the header of {}", column, csv.display());
            }

            let mut session = AnalysisSession::with_projector(client, ResultProjector::new(locale));
            session.submit(request).await;
            let model = session.display();

            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                print_model(&model);
            }

            Ok(match model {
                DisplayModel::Error { .. } => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
    }
}

fn print_model(model: &DisplayModel) {
    match model {
        DisplayModel::Idle => println!("Nothing submitted."),
        DisplayModel::InProgress => println!("Analyzing triangle data..."),
        DisplayModel::Error { message } => println!("Error: {}", message),
        DisplayModel::Results(view) => print_results(view),
    }
}

fn print_results(view: &ResultsView) {
    println!("Analysis Results");
    println!("================\n");

    println!("Ultimate Estimates:");
    println!("  Mack Ultimate:     {:>20}", view.mack_ultimate);
    if let Some(mse) = &view.mack_mse {
        println!("  Mack MSE:          {:>20}", mse);
    }
    println!("  Cape Cod Ultimate: {:>20}", view.cape_cod_ultimate);

    if let Some(table) = &view.factor_table {
        println!("\nAge-to-Age LDFs ({} rows):", table.len());
        println!("{:>14} {:>20} {:>10}", "Origin Period", "Development Period", "LDF");
        println!("{}", "-".repeat(46));
        for row in table.rows() {
            println!("{:>14} {:>20} {:>10}", row.origin, row.development, row.factor);
        }
    }
}
