//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lights")]
#[command(about = "Scattered Lights - wellness journal, chakra check-ins and emotion tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Journal owner (default: login name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set (name, editor, consistency)
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Write a journal entry; opens the editor on a guided prompt when no text is given
    Write {
        /// Entry text
        text: Vec<String>,

        /// Day to file the entry under (e.g., yesterday, last friday, 2025-01-17)
        #[arg(short, long)]
        date: Option<String>,

        /// Chakra to focus the editor prompt on
        #[arg(short, long)]
        chakra: Option<String>,
    },

    /// List entries (newest first)
    List {
        /// Start date (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Show at most N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Only entries with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print a single entry
    Show {
        /// Entry id as shown by `lights list`
        id: String,
    },

    /// Show the current journaling streak and monthly consistency
    Streak,

    /// Show a month calendar of journaled days
    Calendar {
        /// Month as YYYY-MM (default: current month)
        month: Option<String>,
    },

    /// Record a chakra assessment
    Assess {
        /// Chakra values as KEY=VALUE (1-10), e.g. root=4 heart=8
        values: Vec<String>,

        /// Answer the self-assessment questionnaire instead
        #[arg(short, long, conflicts_with = "values")]
        quiz: bool,
    },

    /// Show the chakra profile with status and guidance
    Chakras,

    /// Log how you feel as LABEL=INTENSITY (1-10), e.g. joy=7 anxiety=3
    Feel {
        #[arg(required = true)]
        samples: Vec<String>,
    },

    /// Show averaged emotions over time
    Trends {
        /// Grouping: day, week or month
        #[arg(short, long, default_value = "week")]
        period: String,

        /// Show only the most recent N periods
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show a guided journaling prompt
    Prompt {
        /// Chakra to focus on (default: weakest in your profile)
        #[arg(short, long)]
        chakra: Option<String>,
    },

    /// Suggest practices based on your profile, emotions and streak
    Recommend,

    /// Produce a markdown progress report
    Report {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
