//! JSON-lines snapshot stream.
//!
//! Each input line is one JSON object. A reader thread parses lines and
//! hands snapshots to the provider through a channel; on each advance the
//! newest pending snapshot wins.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use super::{ProviderError, SnapshotProvider};
use crate::model::Snapshot;

/// Parses JSON lines into snapshots. Blank lines are skipped; a malformed
/// line yields an error and parsing continues; an I/O error ends the stream.
pub fn parse_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Snapshot, ProviderError>> {
    let mut failed = false;
    reader
        .lines()
        .enumerate()
        .map_while(move |(n, line)| {
            if failed {
                return None;
            }
            match line {
                Ok(line) => Some((n, Ok(line))),
                Err(e) => {
                    failed = true;
                    Some((n, Err(ProviderError::Io(e.to_string()))))
                }
            }
        })
        .filter_map(|(n, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(
                Snapshot::from_json_str(&line)
                    .map_err(|e| ProviderError::Parse(format!("line {}: {}", n + 1, e))),
            ),
            Err(e) => Some(Err(e)),
        })
}

/// Provider reading JSON-lines snapshots on a background thread.
pub struct JsonLinesProvider {
    rx: Receiver<Result<Snapshot, ProviderError>>,
    current: Option<Snapshot>,
    last_error: Option<ProviderError>,
    exhausted: bool,
    source: String,
}

impl JsonLinesProvider {
    /// Starts reading `reader` on a new thread.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R, source: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        let source = source.into();
        let thread_source = source.clone();

        thread::spawn(move || {
            for item in parse_lines(reader) {
                if let Err(e) = &item {
                    warn!(source = %thread_source, error = %e, "bad snapshot line");
                }
                if tx.send(item).is_err() {
                    break;
                }
            }
            debug!(source = %thread_source, "snapshot stream ended");
        });

        Self {
            rx,
            current: None,
            last_error: None,
            exhausted: false,
            source,
        }
    }

    /// Opens a file, or stdin for `-`.
    pub fn open(path: &str) -> Result<Self, ProviderError> {
        if path == "-" {
            return Ok(Self::spawn(BufReader::new(io::stdin()), "stdin"));
        }
        let file = File::open(path).map_err(|e| ProviderError::Io(format!("{}: {}", path, e)))?;
        Ok(Self::spawn(BufReader::new(file), path))
    }
}

impl SnapshotProvider for JsonLinesProvider {
    fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> Option<&Snapshot> {
        let mut fresh = false;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(snapshot)) => {
                    self.current = Some(snapshot);
                    self.last_error = None;
                    fresh = true;
                }
                Ok(Err(e)) => self.last_error = Some(e),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.exhausted = true;
                    break;
                }
            }
        }
        if fresh { self.current.as_ref() } else { None }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    fn name(&self) -> &str {
        &self.source
    }
}
