//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_calendar, format_entry, format_entry_list, format_profile, format_recommendations,
    format_streak, format_trends,
};
