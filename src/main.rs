use std::env::VarError;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use procurement_dashboard::{analytics, export, ml, report, risk, DatasetGenerator, GeneratorConfig};

const SEED_ENV: &str = "DASHBOARD_SEED";

#[derive(Parser)]
#[command(name = "procurement-dashboard")]
#[command(about = "Mock procurement analytics data for the vendor dashboard", long_about = None)]
struct Cli {
    /// Seed for reproducible data (falls back to DASHBOARD_SEED, then a fresh seed)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Reference date ending the spend history (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,
    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the generated dataset
    Generate {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// JSON file, or directory for CSV output
        #[arg(long, default_value = "dataset.json")]
        out: PathBuf,
    },
    /// Search vendors by name or category
    Vendors {
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List contracts expiring within a window
    Contracts {
        #[arg(long, default_value_t = 90)]
        within_days: i64,
    },
    /// Show the vendor risk matrix
    Risk {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, default_value_t = 90)]
        within_days: i64,
    },
    /// Print the model summaries as JSON
    Models,
    /// Check the generated dataset's invariants
    Validate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let seed = match cli.seed {
        Some(seed) => Some(seed),
        None => seed_from_env()?,
    };
    let generator = DatasetGenerator::new(GeneratorConfig {
        seed,
        as_of: cli.as_of,
    })
    .context("failed to prepare dataset generator")?;
    let seed = generator.seed();
    let as_of = generator.as_of();
    info!(seed, %as_of, "generating dataset");
    let (dataset, mut rng) = generator.generate_with_rng();

    match cli.command {
        Commands::Generate { format, out } => match format {
            ExportFormat::Json => {
                export::write_json_file(&dataset, &out)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Dataset written to {} (seed {seed}).", out.display());
            }
            ExportFormat::Csv => {
                let paths = export::write_csv_dir(&dataset, &out)
                    .with_context(|| format!("failed to write CSV files to {}", out.display()))?;
                for path in paths {
                    println!("Wrote {}.", path.display());
                }
                println!("Seed {seed}.");
            }
        },
        Commands::Vendors { filter, limit } => {
            let vendors = analytics::filter_vendors(&dataset.vendors, &filter);
            debug!(query = %filter, matches = vendors.len(), "filtered vendors");

            if vendors.is_empty() {
                println!("No vendors match \"{filter}\".");
                return Ok(());
            }

            println!("Vendors ({} of {}):", vendors.len().min(limit), vendors.len());
            for vendor in vendors.iter().take(limit) {
                println!(
                    "- {} {} ({}) {} risk, SLA {:.1}%, spend {}, trend {:+.1}%, {}",
                    vendor.id,
                    vendor.name,
                    vendor.category,
                    vendor.risk,
                    vendor.sla,
                    report::format_eur(vendor.spend),
                    vendor.trend,
                    vendor.status
                );
            }
        }
        Commands::Contracts { within_days } => {
            let cutoff = cutoff_date(as_of, within_days);
            let expiring = analytics::expiring_contracts(&dataset.contracts, cutoff);

            if expiring.is_empty() {
                println!("No contracts expire before {cutoff}.");
                return Ok(());
            }

            println!(
                "{} of {} contracts expire before {cutoff}. Total value exposure: {}.",
                expiring.len(),
                dataset.contracts.len(),
                report::format_eur(analytics::exposure(expiring.iter().copied()))
            );
            for contract in expiring.iter() {
                println!(
                    "- {} {} ends {} ({}, notice {} days) {}",
                    contract.id,
                    contract.vendor_name,
                    contract.end_date,
                    contract.renewal_type,
                    contract.notice_period,
                    report::format_eur(contract.value)
                );
            }
        }
        Commands::Risk { limit } => {
            let points = risk::risk_matrix(&dataset.vendors, &mut rng);
            let critical = points.iter().filter(|point| point.is_critical()).count();

            println!("Risk matrix ({critical} critical):");
            for point in points.iter().take(limit) {
                println!(
                    "- {} {} ({} risk) likelihood {:.1}% impact {:.1}{}",
                    point.vendor_id,
                    point.vendor_name,
                    point.risk,
                    point.likelihood,
                    point.impact,
                    if point.is_critical() { " CRITICAL" } else { "" }
                );
            }
        }
        Commands::Report { out, within_days } => {
            let cutoff = cutoff_date(as_of, within_days);
            let markdown = report::build_report(&dataset, as_of, cutoff);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Models => {
            let summaries = serde_json::to_string_pretty(&ml::model_summaries())?;
            println!("{summaries}");
        }
        Commands::Validate => {
            analytics::validate(&dataset).context("generated dataset failed validation")?;
            println!(
                "Dataset valid: {} vendors, {} months, {} contracts (seed {seed}).",
                dataset.vendors.len(),
                dataset.spend_history.len(),
                dataset.contracts.len()
            );
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn seed_from_env() -> anyhow::Result<Option<u64>> {
    parse_seed(std::env::var(SEED_ENV))
}

fn parse_seed(value: Result<String, VarError>) -> anyhow::Result<Option<u64>> {
    match value {
        Ok(raw) => {
            let seed = raw
                .trim()
                .parse()
                .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))?;
            Ok(Some(seed))
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(err @ VarError::NotUnicode(_)) => {
            Err(err).with_context(|| format!("{SEED_ENV} must be valid UTF-8"))
        }
    }
}

fn cutoff_date(as_of: NaiveDate, within_days: i64) -> NaiveDate {
    as_of
        .checked_add_signed(Duration::days(within_days.clamp(0, 36_500)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parses_from_env_value() {
        assert_eq!(parse_seed(Ok(" 42 ".to_string())).unwrap(), Some(42));
        assert_eq!(parse_seed(Err(VarError::NotPresent)).unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_seed() {
        let err = parse_seed(Ok("forty-two".to_string())).unwrap_err();
        assert!(err.to_string().contains(SEED_ENV));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_utf8_seed() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"12\xff".to_vec());
        let err = parse_seed(Err(VarError::NotUnicode(raw))).unwrap_err();
        assert!(err.to_string().contains("valid UTF-8"));
    }

    #[test]
    fn cutoff_clamps_negative_windows() {
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(cutoff_date(as_of, -5), as_of);
        assert_eq!(
            cutoff_date(as_of, 90),
            NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
        );
    }
}
