//! livetab - live telemetry dashboard.
//!
//! Usage:
//!   livetab --demo                       # simulated vehicle feed
//!   livetab --input log.jsonl 0.5        # JSON lines, poll every 0.5s
//!   some-logger | livetab --input -      # JSON lines from stdin
//!   livetab --input log.jsonl --dump csv # print the table and exit

use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use livetab::clipboard::SystemClipboard;
use livetab::config::TableConfig;
use livetab::provider::{
    DemoProvider, JsonLinesProvider, ProviderError, SnapshotProvider, parse_lines,
};
use livetab::store::FileStore;
use livetab::table::LiveTable;
use livetab::tui::{App, Mount};

/// Export format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    Json,
    Csv,
}

/// Live telemetry table for the terminal.
#[derive(Parser)]
#[command(name = "livetab", about = "Live telemetry table")]
struct Args {
    /// Refresh interval in seconds (default: 1).
    #[arg(value_name = "INTERVAL")]
    interval: Option<f64>,

    /// JSON config file (hidden keys, important order, thresholds).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON-lines snapshot source, `-` for stdin.
    #[arg(short, long, value_name = "PATH", conflicts_with = "demo")]
    input: Option<String>,

    /// Use the built-in simulated vehicle feed.
    #[arg(long)]
    demo: bool,

    /// Directory for the hidden-keys preference file.
    /// Default: the platform state directory.
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Feed the whole input through the table, print the export and exit.
    #[arg(long, value_enum, value_name = "FORMAT")]
    dump: Option<DumpFormat>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Verbose output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only).
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    init_logging(args.verbose, args.quiet, args.log_file.as_deref(), args.dump.is_some())?;

    if args.input.is_none() && !args.demo {
        return Err("no data source: use --input PATH or --demo".into());
    }
    let tick_rate = parse_interval(args.interval)?;

    let config = match &args.config {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };
    let state_dir = match args.state_dir.clone() {
        Some(dir) => dir,
        None => FileStore::default_dir()
            .ok_or("cannot resolve a state directory; use --state-dir")?,
    };
    info!(state_dir = %state_dir.display(), "preference store");
    let mut table = LiveTable::new(&config, Box::new(FileStore::new(state_dir)))?;

    if let Some(format) = args.dump {
        dump(&mut table, args.input.as_deref(), format)?;
        return Ok(());
    }

    // No terminal, no reader thread
    let mount = Mount::stdout()?;
    let provider: Box<dyn SnapshotProvider> = match args.input.as_deref() {
        Some(path) => Box::new(JsonLinesProvider::open(path)?),
        None => Box::new(DemoProvider::new()),
    };
    let app = App::new(mount, &config, table, provider, Box::new(SystemClipboard::new()));
    let table = app
        .run(tick_rate)
        .map_err(|e| format!("TUI failed: {}", e))?;
    info!(rows = table.row_count(), hidden = table.user_hidden().len(), "exiting");
    Ok(())
}

/// Refresh interval in seconds; one second when not given.
fn parse_interval(secs: Option<f64>) -> Result<Duration, String> {
    let Some(secs) = secs else {
        return Ok(Duration::from_secs(1));
    };
    match Duration::try_from_secs_f64(secs) {
        Ok(interval) if !interval.is_zero() => Ok(interval),
        _ => Err(format!("invalid interval: {}", secs)),
    }
}

/// Feeds every input snapshot through the table and prints the export.
fn dump(
    table: &mut LiveTable,
    input: Option<&str>,
    format: DumpFormat,
) -> Result<(), Box<dyn Error>> {
    match input {
        Some(path) => {
            let reader: Box<dyn BufRead> = if path == "-" {
                Box::new(BufReader::new(io::stdin()))
            } else {
                let file = File::open(path).map_err(|e| format!("{}: {}", path, e))?;
                Box::new(BufReader::new(file))
            };
            for item in parse_lines(reader) {
                match item {
                    Ok(snapshot) => {
                        table.update(snapshot);
                    }
                    Err(ProviderError::Parse(msg)) => warn!(error = %msg, "skipping line"),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        None => {
            let mut demo = DemoProvider::new();
            if let Some(snapshot) = demo.advance().cloned() {
                table.update(snapshot);
            }
        }
    }

    let out = match format {
        DumpFormat::Json => table.export_json()?,
        DumpFormat::Csv => table.export_csv(),
    };
    println!("{}", out);
    Ok(())
}

/// Logs go to `log_file` when given. Without it the TUI logs nothing and
/// headless mode prints errors to stderr.
fn init_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    headless: bool,
) -> Result<(), Box<dyn Error>> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(format!("livetab={}", level)))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::try_new("livetab=error")?)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
        // The TUI owns the terminal
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_defaults_to_one_second() {
        assert_eq!(parse_interval(None), Ok(Duration::from_secs(1)));
        assert_eq!(parse_interval(Some(0.25)), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn out_of_range_interval_is_rejected() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e30] {
            assert!(parse_interval(Some(secs)).is_err(), "{}", secs);
        }
        assert!(parse_interval(Some(1e30)).unwrap_err().starts_with("invalid interval"));
    }
}
