//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod operations;
mod preview;
mod progress;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use operations::handle_operations;
pub use preview::handle_preview;
pub use progress::handle_progress;
pub use validate::handle_validate;
