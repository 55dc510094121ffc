use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};

use ytgrowth::analysis_request::{AnalysisForm, DEFAULT_RESULT_COUNT};
use ytgrowth::chart;
use ytgrowth::config::{parse_timezone, AppConfig};
use ytgrowth::logging::{init_logging, LoggingConfig};
use ytgrowth::web::{self, DashboardState};
use ytgrowth::{AnalysisRequest, ChannelGrowthAnalyzer};

#[derive(Parser, Debug)]
#[command(
    name = "ytgrowth",
    about = "Compare YouTube channel growth for a search term",
    version,
    long_about = None
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// IANA timezone used for creation dates, overrides YTGROWTH_TIMEZONE
    #[arg(long, global = true)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard over HTTP
    Serve {
        /// Address to bind, overrides YTGROWTH_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run a single analysis and print the ranking
    Analyze {
        /// Search term
        #[arg(short, long)]
        query: String,

        /// Number of channels to fetch (5-50)
        #[arg(short = 'n', long, default_value_t = DEFAULT_RESULT_COUNT as i64)]
        count: i64,

        /// Earliest creation date (YYYY-MM-DD), defaults to five years ago
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest creation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Write the results table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write one SVG per comparison chart into this directory
        #[arg(long)]
        charts_dir: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(name) = &cli.timezone {
        config.timezone = parse_timezone(name).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

async fn run_analyze(
    config: &AppConfig,
    query: &str,
    count: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    csv: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
) -> Result<()> {
    let now = Utc::now();
    let defaults = AnalysisForm::with_defaults(now.with_timezone(&config.timezone).date_naive());
    let created_from = match from {
        Some(date) => date,
        None => NaiveDate::parse_from_str(&defaults.created_from, "%Y-%m-%d")?,
    };
    let created_to = match to {
        Some(date) => date,
        None => NaiveDate::parse_from_str(&defaults.created_to, "%Y-%m-%d")?,
    };

    // Validation happens before the client is even built.
    let request = AnalysisRequest::new(query, count, created_from, created_to)?;
    let analyzer = ChannelGrowthAnalyzer::from_config(config)?;
    let report = analyzer.analyze(request, now).await?;

    if report.results.is_empty() {
        println!("No channels were found.");
        return Ok(());
    }

    let table = &report.table;
    println!(
        "\n--- Channel Growth Ranking: {} channels ({} returned by the search) ---",
        report.results.len(),
        report.fetched_count
    );
    println!("{}", table.rounded_frame()?);

    println!("\nFastest growing channels:");
    for result in report.top_growth() {
        println!(
            "{}. {} ({}): growth rate {:.2}% (created {}, {} days ago)",
            result.rank,
            result.channel.title,
            result.channel.url(),
            result.metrics.growth_rate,
            result.creation_date.format("%Y-%m-%d"),
            result.metrics.elapsed_days
        );
    }

    if let Some(path) = csv {
        fs::write(&path, table.to_csv()?).with_context(|| format!("Failed to write {:?}", path))?;
        info!("Wrote results table to {:?}", path);
    }

    if let Some(dir) = charts_dir {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
        for (metric, svg) in chart::render_all(&report.results)? {
            let path = dir.join(format!("{}.svg", metric.file_stem()));
            fs::write(&path, svg).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote chart to {:?}", path);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::verbose(cli.verbose)).context("Failed to initialize logging")?;

    let config = load_config(&cli)?;

    let outcome = match cli.command {
        Command::Serve { bind } => {
            let analyzer = ChannelGrowthAnalyzer::from_config(&config)?;
            let bind_addr = bind.unwrap_or(config.bind_addr);
            web::serve(DashboardState::new(analyzer), bind_addr)
                .await
                .context("Dashboard server failed")
        }
        Command::Analyze { query, count, from, to, csv, charts_dir } => {
            run_analyze(&config, &query, count, from, to, csv, charts_dir).await
        }
    };

    if let Err(e) = &outcome {
        error!("Error: {:#}", e);
    }
    outcome
}
