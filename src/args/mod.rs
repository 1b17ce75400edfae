//! Command-line argument parsing and handling.

pub mod account;
pub mod catalog;
pub mod definition;
pub mod list;
pub mod search;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Context, process_args};
pub use utils::determine_log_level;
