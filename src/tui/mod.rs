//! Terminal User Interface for the live telemetry table.
//!
//! A single-screen dashboard: header bar, sensor table, footer with the
//! view toggles and copy buttons, plus help and quit popups.

mod app;
mod event;
mod input;
mod mount;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use input::{KeyAction, handle_key};
pub use mount::Mount;
pub use render::render;
pub use state::{COPIED_LABEL, COPY_FAILED_LABEL, FlashLabel, InputMode, PopupState, UiState};
