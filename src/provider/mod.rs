//! Provider abstraction for snapshot data sources.
//!
//! This module defines the `SnapshotProvider` trait that lets the TUI work
//! with different data sources (a JSON-lines stream or the built-in demo
//! feed) through a unified interface.

mod demo;
mod stream;

pub use demo::DemoProvider;
pub use stream::{JsonLinesProvider, parse_lines};

use crate::model::Snapshot;

/// Error types that can occur while producing snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// I/O error while reading data.
    Io(String),
    /// Error parsing a snapshot.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Abstraction for snapshot data sources.
///
/// The trait is object-safe and designed to be used with
/// `Box<dyn SnapshotProvider>`.
pub trait SnapshotProvider {
    /// Returns the most recent snapshot, if any.
    fn current(&self) -> Option<&Snapshot>;

    /// Fetches the next snapshot.
    ///
    /// Returns `None` when nothing new arrived since the last call
    /// (check `last_error()` for details).
    fn advance(&mut self) -> Option<&Snapshot>;

    /// Returns `true` once the source can produce no more snapshots.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Returns the last error that occurred, if any.
    fn last_error(&self) -> Option<&ProviderError>;

    /// Short description of the source for the header.
    fn name(&self) -> &str;
}
