//! UI-agnostic view models.
//!
//! [`sensors::build_sensor_view`] turns a [`crate::table::LiveTable`] into a
//! [`common::TableViewModel`]; the TUI maps it to ratatui widgets.

pub mod common;
pub mod sensors;
