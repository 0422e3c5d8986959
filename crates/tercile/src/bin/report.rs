//! Tercile portfolio report CLI tool.
//!
//! Loads fundamentals, returns and the ticker universe from CSV files, runs the full
//! pipeline and writes every result set to an output directory.
//!
//! Usage: `cargo run --features cli --bin report -- --fundamentals F --returns R --tickers T`
//!
//! Logging follows `RUST_LOG` (default `info`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tercile::{
    io::{CsvLoader, CsvUniverseProvider, ExportFormat, FileWriter, ReturnColumns},
    model::{Pipeline, PipelineConfig, PipelineReport},
    primitives::PortfolioLabel,
    traits::{FiscalYear, Loader, UniverseProvider, Writer},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "report", version, about = "Liquidity and growth tercile portfolio report")]
struct Cli {
    /// Annual fundamentals CSV
    #[arg(long)]
    fundamentals: PathBuf,

    /// Daily security returns CSV
    #[arg(long)]
    returns: PathBuf,

    /// CSV with the admissible tickers
    #[arg(long)]
    tickers: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Number of rank groups (overrides the config file)
    #[arg(long)]
    groups: Option<u8>,

    /// Rank periods one at a time
    #[arg(long)]
    sequential: bool,

    /// Map return dates to fiscal years ending in this month instead of calendar years
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    fiscal_year_end: Option<u32>,

    /// Rows scanned to infer fundamentals column types (0 scans the whole file)
    #[arg(long, default_value_t = 10_000)]
    infer_schema_rows: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
    PrettyJson,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::PrettyJson => Self::PrettyJson,
        }
    }
}

/// Layout of the TOML configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    pipeline: PipelineConfig,
    returns: ReturnColumns,
    universe_column: Option<String>,
}

impl FileConfig {
    fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut file = FileConfig::load(cli.config.as_deref())?;
    if let Some(groups) = cli.groups {
        file.pipeline.ranker.n_groups = groups;
    }
    if cli.sequential {
        file.pipeline.ranker.parallel = false;
    }

    let infer = (cli.infer_schema_rows > 0).then_some(cli.infer_schema_rows);
    let loader = CsvLoader::with_return_columns(file.returns).with_infer_schema_length(infer);
    let provider =
        file.universe_column.map_or_else(CsvUniverseProvider::default, CsvUniverseProvider::new);

    let raw = loader.load_panel(&cli.fundamentals)?;
    let loaded = loader.load_returns(&cli.returns)?;
    let universe = provider.load_universe(&cli.tickers)?;
    if loaded.skipped > 0 {
        tracing::warn!(skipped = loaded.skipped, "return records skipped while loading");
    }

    let report = match cli.fiscal_year_end {
        Some(end_month) => {
            let mapping = FiscalYear::new(end_month).ok_or("fiscal year end must be 1..=12")?;
            Pipeline::with_mapping(file.pipeline, mapping).run(
                &raw,
                &universe,
                &loaded.observations,
            )?
        }
        None => Pipeline::new(file.pipeline).run(&raw, &universe, &loaded.observations)?,
    };

    write_outputs(&report, cli.format.into(), &cli.output)?;
    print_summary(&report);
    Ok(())
}

fn write_outputs(
    report: &PipelineReport,
    format: ExportFormat,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let writer = FileWriter::new(format);
    writer.write_panel(&report.ranked, dir)?;
    writer.write_metrics(&report.metrics, dir)?;
    writer.write_regression(&report.regressions, dir)?;

    let returns: Vec<_> = report.aligned.iter().cloned().collect();
    writer.write_series("returns", &returns, dir)?;
    writer.write_series("cumulative", &report.cumulative(), dir)?;
    writer.write_series("drawdowns", &report.drawdowns(), dir)?;

    writer.write_json("tercile_summary", &report.ranked.tercile_summary(), dir)?;
    writer.write_json("tercile_distribution", &report.tercile_distribution, dir)?;
    writer.write_json("correlations", &report.correlations, dir)?;
    writer.write_json("stage_reports", &StageReports::from(report), dir)?;
    Ok(())
}

/// Counts from every stage, exported together.
#[derive(Debug, Serialize)]
struct StageReports<'a> {
    cleaning: &'a tercile::panel::CleaningReport,
    signals: &'a tercile::panel::SignalReport,
    ranking: &'a tercile::model::RankingReport,
    join: &'a tercile::model::JoinReport,
    missing_periods: &'a [tercile::primitives::Period],
    regression_failures: &'a [tercile::model::RegressionFailure],
}

impl<'a> From<&'a PipelineReport> for StageReports<'a> {
    fn from(report: &'a PipelineReport) -> Self {
        Self {
            cleaning: &report.cleaning,
            signals: &report.signal_report,
            ranking: &report.ranking,
            join: &report.join,
            missing_periods: &report.missing_periods,
            regression_failures: &report.regression_failures,
        }
    }
}

fn print_summary(report: &PipelineReport) {
    println!();
    println!("{}", "=".repeat(78));
    println!("  TERCILE PORTFOLIO REPORT");
    println!("{}", "=".repeat(78));
    println!(
        "  firms ranked: {}   periods: {}   skipped periods: {}   dates: {}",
        report.ranking.firms_ranked,
        report.ranking.periods_ranked,
        report.ranking.skipped.len(),
        report.aligned.common_dates().len(),
    );
    if !report.missing_periods.is_empty() {
        let years: Vec<String> = report.missing_periods.iter().map(ToString::to_string).collect();
        println!("  periods without ranked firms: {}", years.join(", "));
    }
    let shares: Vec<String> = report
        .tercile_distribution
        .iter()
        .map(|(tercile, share)| format!("{tercile}: {:.1}%", share * 100.0))
        .collect();
    println!("  group shares: {}", shares.join("   "));

    let windows: Vec<String> = {
        let mut names: Vec<String> = Vec::new();
        for m in &report.metrics {
            if !names.contains(&m.window) {
                names.push(m.window.clone());
            }
        }
        names
    };

    for window in &windows {
        println!();
        println!("  [{window}]");
        println!(
            "  {:<12} {:>8} {:>10} {:>10} {:>8} {:>10} {:>8} {:>8}",
            "portfolio", "n", "ann.ret", "ann.vol", "sharpe", "max.dd", "beta", "alpha.t"
        );
        println!("  {}", "-".repeat(76));
        for m in report.metrics_for(window) {
            let fit = report.regressions_for(window).find(|r| r.label == m.label);
            let (beta, t) = fit.map_or((f64::NAN, f64::NAN), |r| (r.beta, r.alpha_t_stat));
            println!(
                "  {:<12} {:>8} {:>9.2}% {:>9.2}% {:>8.3} {:>9.2}% {:>8.3} {:>8.2}",
                m.label.to_string(),
                m.n_obs,
                m.annualized_return * 100.0,
                m.annualized_volatility * 100.0,
                m.sharpe_ratio,
                m.max_drawdown * 100.0,
                beta,
                t,
            );
        }
        if let Some(best) = report.best_sharpe(window) {
            println!("  best Sharpe ratio: {best}");
        }
    }

    if let Some(rho) = report.correlations.get(PortfolioLabel::LongShort, PortfolioLabel::Market)
    {
        println!();
        println!("  corr(Long-Short, Market): {rho:.3}");
    }
    println!("{}", "=".repeat(78));
}
