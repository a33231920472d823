//! TUI widgets.

mod footer;
mod header;
mod help;
mod quit_confirm;
mod sensors;

pub use footer::render_footer;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use sensors::render_sensors;
