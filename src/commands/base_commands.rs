use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::scenario::ScenarioField;

pub const DEFAULT_SESSION: &str = "portfolio.yaml";

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new session with one default property
    Init {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
    },
    /// Add a property with default values
    Add {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
    },
    /// Edit one field of a property, using the displayed value (percent for rates)
    Set {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
        /// Property number, starting at 1
        #[arg(short, long)]
        position: usize,
        /// Field to edit
        #[arg(short, long, value_enum)]
        field: ScenarioField,
        /// New value as displayed, e.g. 150,000 or 7.5
        #[arg(short, long, allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a property and its result
    Remove {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
        /// Property number, starting at 1
        #[arg(short, long)]
        position: usize,
    },
    /// Print properties, results, summary and value projection
    Show {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
    },
    /// Compute indicators for every property through the calculation service
    Simulate {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
        /// Optional calculation service config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Calculation service base URL, overrides config and environment
        #[arg(short = 'u', long)]
        service_url: Option<String>,
        /// Optional report YAML file
        #[arg(short, long)]
        output: Option<String>,
        /// Write <PREFIX>.indicators.png and <PREFIX>.projection.png
        #[arg(long)]
        charts: Option<String>,
    },
    /// Plot the value projection of every property into a PNG chart
    Project {
        /// Session YAML file
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Converts a 1-based property number into a store index.
pub fn position_to_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}
