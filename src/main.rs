use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};

mod aggregate;
mod chart;
mod models;
mod normalize;
mod parser;
mod pipeline;
mod report;
mod source;

use models::Snapshot;
use pipeline::ColumnMode;
use source::{DataSource, FetchError, DEFAULT_SHEET_URL};

#[derive(Parser)]
#[command(name = "registration-analytics")]
#[command(about = "Summary statistics and chart series for webinar registrations", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Spreadsheet CSV export to fetch
    #[arg(long, global = true, env = "REGISTRATIONS_CSV_URL", default_value = DEFAULT_SHEET_URL)]
    url: String,
    /// Read registrations from a local file instead of fetching (overrides --url)
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Locate columns by header name instead of position
    #[arg(long, global = true)]
    header_columns: bool,
    /// Request timeout for the fetch
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,
}

impl SourceArgs {
    fn data_source(&self) -> DataSource {
        match &self.file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Url(self.url.clone()),
        }
    }

    fn column_mode(&self) -> ColumnMode {
        if self.header_columns {
            ColumnMode::Header
        } else {
            ColumnMode::Positional
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Series {
    Region,
    Study,
    Interests,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics and chart series
    Summary {
        /// Emit the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the most recent registrations
    Records {
        #[arg(long, default_value_t = report::DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
    /// Write a chart series as CSV
    Export {
        #[arg(long, value_enum, default_value_t = Series::Region)]
        series: Series,
        #[arg(long)]
        out: PathBuf,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let source = cli.source.data_source();
    let timeout = Duration::from_secs(cli.source.timeout_secs.max(1));

    let loaded = match source.fetch(timeout).await {
        Ok(text) => Ok(pipeline::run(&text, cli.source.column_mode())),
        Err(err) => {
            error!("Error loading analytics - source={}, error={}", source.describe(), err);
            Err(err)
        }
    };

    run_command(cli.command, &source.describe(), loaded)
}

const FETCH_FAILED: &str = "Failed to fetch registration data";

/// Stdout commands still show the empty snapshot after a failed fetch.
/// Commands that write files stop first so existing output is left alone.
fn run_command(
    command: Commands,
    origin: &str,
    loaded: Result<Snapshot, FetchError>,
) -> anyhow::Result<()> {
    let (snapshot, mut failure) = match loaded {
        Ok(snapshot) => (snapshot, None),
        Err(err) => (Snapshot::default(), Some(err)),
    };

    match command {
        Commands::Summary { json } => {
            if json {
                println!("{}", report::to_json(&snapshot)?);
            } else {
                print!("{}", report::build_report(origin, &snapshot, 0));
            }
        }
        Commands::Records { limit } => {
            print!("{}", report::recent_table(&snapshot.records, limit));
        }
        Commands::Export { series, out } => {
            if let Some(err) = failure.take() {
                return Err(err).context(FETCH_FAILED);
            }
            let entries = match series {
                Series::Region => &snapshot.region_series,
                Series::Study => &snapshot.study_series,
                Series::Interests => &snapshot.interest_series,
            };
            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            report::write_series_csv(file, entries)?;
            info!("Series written - path={}, entries={}", out.display(), entries.len());
            println!("Wrote {} entries to {}.", entries.len(), out.display());
        }
        Commands::Report { out } => {
            if let Some(err) = failure.take() {
                return Err(err).context(FETCH_FAILED);
            }
            let text = report::build_report(origin, &snapshot, report::DEFAULT_RECENT_LIMIT);
            std::fs::write(&out, text)?;
            println!("Report written to {}.", out.display());
        }
    }

    if let Some(err) = failure {
        return Err(err).context(FETCH_FAILED);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_failure() -> FetchError {
        FetchError::Decode {
            origin: "registrations.csv".to_string(),
        }
    }

    #[test]
    fn failed_fetch_leaves_export_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("series.csv");
        std::fs::write(&out, "label,count\nTamil Nadu,40\n").unwrap();

        let command = Commands::Export {
            series: Series::Region,
            out: out.clone(),
        };
        let err = run_command(command, "registrations.csv", Err(fetch_failure())).unwrap_err();

        assert_eq!(err.to_string(), FETCH_FAILED);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "label,count\nTamil Nadu,40\n"
        );
    }

    #[test]
    fn failed_fetch_does_not_create_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.md");

        let command = Commands::Report { out: out.clone() };
        assert!(run_command(command, "registrations.csv", Err(fetch_failure())).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn failed_fetch_still_errors_for_stdout_commands() {
        let command = Commands::Records { limit: 5 };
        let err = run_command(command, "registrations.csv", Err(fetch_failure())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn successful_load_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("series.csv");
        let snapshot = pipeline::run("h\na,,,ka\nb,,,KA", ColumnMode::Positional);

        let command = Commands::Export {
            series: Series::Region,
            out: out.clone(),
        };
        run_command(command, "registrations.csv", Ok(snapshot)).unwrap();

        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "label,count\nKarnataka,2\n"
        );
    }
}
