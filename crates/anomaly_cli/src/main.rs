//! anomaly-cli - terminal driver for the anomaly detection page
//!
//! Runs the page components against the built-in threshold module, so the
//! initialize / read / detect / render flow can be exercised without a
//! browser. Values come from the command line (positional, and/or a
//! comma-separated `--input` batch) or, when none are given, one per line on
//! stdin. A summary line with counts and elapsed time closes the run.
//!
//! Config lookup order:
//! - `--config <path>` (or `ANOMALY_DEMO_CONFIG`)
//! - Linux: ~/.config/anomaly_demo/config.json
//! - Windows: %APPDATA%\anomaly_demo\config.json
//! - MacOS: ~/Library/Application Support/anomaly_demo/config.json
//!
//! Exit status is non-zero if any value was rejected or faulted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anomaly_demo::prelude::*;
use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod paths;
mod terminal;

use paths::AppPaths;
use terminal::{TerminalResults, TerminalStatus};

#[derive(Parser, Debug)]
#[command(name = "anomaly-cli")]
#[command(about = "Check values with the anomaly detection module", long_about = None)]
struct Args {
    /// Values to check. Read from stdin, one per line, when neither these nor
    /// `--input` are given.
    values: Vec<String>,

    /// Comma-separated batch of values, e.g. "0.1,0.2,0.9".
    #[arg(short, long)]
    input: Option<String>,

    /// JSON config file.
    #[arg(short, long, env = "ANOMALY_DEMO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the built-in module's threshold.
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Propagate detection faults instead of rendering them.
    #[arg(long)]
    no_guard: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Demo(#[from] DemoError),
    #[error("failed to read stdin")]
    Stdin(#[from] io::Error),
    #[error("failed to write output: {0}")]
    Output(io::ErrorKind),
}

type Page<W> = DemoPage<BuiltinModule, TerminalStatus<W>, TerminalResults<W>>;

fn load_config(args: &Args) -> Result<DemoConfig, CliError> {
    let config = match &args.config {
        Some(path) => {
            info!("using config {}", path.display());
            DemoConfig::load(path)?
        }
        None => match AppPaths::locate().map(|p| p.config_file()) {
            Some(path) if path.exists() => {
                info!("using config {}", path.display());
                DemoConfig::load(&path)?
            }
            _ => {
                debug!("no config file; using defaults");
                DemoConfig::default()
            }
        },
    };
    Ok(apply_overrides(config, args))
}

fn apply_overrides(mut config: DemoConfig, args: &Args) -> DemoConfig {
    if let Some(t) = args.threshold {
        config.threshold = t;
    }
    if args.no_guard {
        config.guard_detection = false;
    }
    config
}

/// Positional values first, then the `--input` batch. Batch items are passed
/// through untrimmed; the input reader skips leading whitespace itself.
fn command_line_values(args: &Args) -> Vec<&str> {
    let mut values: Vec<&str> = args.values.iter().map(String::as_str).collect();
    if let Some(batch) = &args.input {
        values.extend(batch.split(','));
    }
    values
}

/// Per-outcome counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    anomalous: usize,
    normal: usize,
    rejected: usize,
    faulted: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Detected(d) if d.anomaly => self.anomalous += 1,
            Outcome::Detected(_) => self.normal += 1,
            Outcome::Rejected(_) => self.rejected += 1,
            Outcome::Faulted(_) => self.faulted += 1,
        }
    }

    fn checked(&self) -> usize {
        self.anomalous + self.normal + self.rejected + self.faulted
    }

    /// Every value produced a verdict.
    fn all_ok(&self) -> bool {
        self.rejected == 0 && self.faulted == 0
    }

    fn exit_code(&self) -> ExitCode {
        if self.all_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    fn line(&self, elapsed: Duration) -> String {
        format!(
            "checked {} values in {elapsed:?}: {} anomalous, {} normal, {} rejected, {} faulted",
            self.checked(),
            self.anomalous,
            self.normal,
            self.rejected,
            self.faulted
        )
    }
}

fn output_failure<W: Write>(page: &Page<W>) -> Option<io::ErrorKind> {
    page.status_view()
        .failure()
        .or_else(|| page.result_view().failure())
}

/// Run one value through the page. Stops on an unguarded fault or once the
/// terminal stops accepting output.
fn check<W: Write>(page: &mut Page<W>, summary: &mut Summary, raw: &str) -> Result<(), CliError> {
    let outcome = page.trigger(raw)?;
    summary.record(&outcome);
    if let Err(e) = outcome.into_result() {
        warn!(input = raw, "{e}");
    }
    match output_failure(page) {
        Some(kind) => Err(CliError::Output(kind)),
        None => Ok(()),
    }
}

fn check_all<'a, W: Write>(
    page: &mut Page<W>,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<Summary, CliError> {
    let mut summary = Summary::default();
    for raw in values {
        check(page, &mut summary, raw)?;
    }
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let module = BuiltinModule::new(ThresholdDetector::new(config.threshold));
    let mut page: Page<io::Stdout> = DemoPage::new(
        module,
        TerminalStatus::new(io::stdout()),
        TerminalResults::new(io::stdout()),
        config,
    );
    page.start().await?;

    let started = Instant::now();
    let values = command_line_values(&args);
    let summary = if values.is_empty() {
        let mut summary = Summary::default();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            check(&mut page, &mut summary, &line)?;
        }
        summary
    } else {
        check_all(&mut page, values)?
    };
    let elapsed = started.elapsed();

    info!(checked = summary.checked(), ?elapsed, "run finished");
    writeln!(io::stdout(), "{}", summary.line(elapsed))
        .map_err(|e| CliError::Output(e.kind()))?;

    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from(["anomaly-cli", "--threshold", "2.5", "--no-guard", "3"])
            .unwrap();
        let cfg = apply_overrides(DemoConfig::default(), &args);
        assert_eq!(cfg.threshold, 2.5);
        assert!(!cfg.guard_detection);
        assert_eq!(args.values, vec!["3".to_string()]);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::try_parse_from(["anomaly-cli"]).unwrap();
        let base = DemoConfig {
            threshold: 9.0,
            ..DemoConfig::default()
        };
        assert_eq!(apply_overrides(base.clone(), &args), base);
        assert!(args.values.is_empty());
    }

    #[test]
    fn negative_values_are_positional() {
        let args = Args::try_parse_from(["anomaly-cli", "--", "-2", "0.7"]).unwrap();
        assert_eq!(args.values, vec!["-2".to_string(), "0.7".to_string()]);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let args =
            Args::try_parse_from(["anomaly-cli", "--config", "/no/such/anomaly.json"]).unwrap();
        assert!(matches!(
            load_config(&args),
            Err(CliError::Config(ConfigError::Io { .. }))
        ));
    }

    #[test]
    fn batch_input_follows_positional_values() {
        let args =
            Args::try_parse_from(["anomaly-cli", "--input", "0.1, abc,0.9", "2"]).unwrap();
        assert_eq!(command_line_values(&args), vec!["2", "0.1", " abc", "0.9"]);

        let none = Args::try_parse_from(["anomaly-cli"]).unwrap();
        assert!(command_line_values(&none).is_empty());
    }

    #[test]
    fn page_flow_over_terminal_views() {
        let mut page = buffered_page(DemoConfig::default());
        start_blocking(&mut page);

        let mut summary = Summary::default();
        check(&mut page, &mut summary, "0.9").unwrap();
        check(&mut page, &mut summary, "abc").unwrap();
        assert_eq!(summary.anomalous, 1);
        assert_eq!(summary.rejected, 1);

        let results = String::from_utf8(page.result_view().get_ref().clone()).unwrap();
        assert_eq!(results, "[!!] Anomaly detected at 0.9\n[!!] Please enter a number\n");
    }

    #[test]
    fn mixed_batch_is_not_all_ok() {
        let mut page = buffered_page(DemoConfig::default());
        start_blocking(&mut page);

        let summary = check_all(&mut page, ["0.9", "abc", "0.1"]).unwrap();
        assert_eq!(
            summary,
            Summary {
                anomalous: 1,
                normal: 1,
                rejected: 1,
                faulted: 0,
            }
        );
        assert_eq!(summary.checked(), 3);
        assert!(!summary.all_ok());
    }

    #[test]
    fn clean_batch_is_all_ok() {
        let mut page = buffered_page(DemoConfig::default());
        start_blocking(&mut page);

        let summary = check_all(&mut page, ["0.9", " 0.2", "1e-3"]).unwrap();
        assert_eq!(summary.checked(), 3);
        assert!(summary.all_ok());
    }

    #[test]
    fn summary_line_lists_counts() {
        let summary = Summary {
            anomalous: 2,
            normal: 1,
            rejected: 0,
            faulted: 1,
        };
        assert_eq!(
            summary.line(Duration::from_millis(3)),
            "checked 4 values in 3ms: 2 anomalous, 1 normal, 0 rejected, 1 faulted"
        );
    }

    #[test]
    fn closed_stdout_stops_the_run() {
        use terminal::tests::ClosedPipe;

        let mut page: Page<ClosedPipe> = DemoPage::new(
            BuiltinModule::default(),
            TerminalStatus::new(ClosedPipe::default()),
            TerminalResults::new(ClosedPipe::default()),
            DemoConfig::default(),
        );
        start_blocking(&mut page);

        let err = check_all(&mut page, ["0.9", "0.1"]).unwrap_err();
        assert!(matches!(err, CliError::Output(io::ErrorKind::BrokenPipe)));
        assert_eq!(page.result_view().get_ref().attempts, 1);
    }

    fn buffered_page(config: DemoConfig) -> Page<Vec<u8>> {
        DemoPage::new(
            BuiltinModule::new(ThresholdDetector::new(config.threshold)),
            TerminalStatus::new(Vec::new()),
            TerminalResults::new(Vec::new()),
            config,
        )
    }

    fn start_blocking<W: Write>(page: &mut Page<W>) {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(page.start())
            .unwrap();
    }
}
