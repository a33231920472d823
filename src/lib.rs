//! livetab - live telemetry table for the terminal.
//!
//! The library provides:
//! - `table` - the UI-agnostic row registry with visibility, filtering,
//!   ordering, severity classification and export
//! - `provider` - snapshot sources (JSON lines, simulated vehicle feed)
//! - `tui` - the interactive dashboard

pub mod clipboard;
pub mod config;
pub mod model;
pub mod provider;
pub mod store;
pub mod table;
pub mod tui;
pub mod view;
