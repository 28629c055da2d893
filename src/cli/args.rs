use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frost-processor")]
#[command(about = "Typical-year frost risk per French department")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress spinners")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: frost.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Directory holding raw inputs and derived tables"
    )]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the city and climate tables from the raw inputs
    Preprocess {
        #[arg(long, help = "First year excluded from the history [default: 2025]")]
        cutoff_year: Option<i32>,
    },

    /// List the cities available for selection
    Cities {
        #[arg(short, long, help = "Case-insensitive name filter")]
        search: Option<String>,
    },

    /// Frost report for one city over a day/month window
    Report {
        #[arg(long, help = "City name [default: configured default city]")]
        city: Option<String>,

        #[arg(long, help = "Start day as MM-DD or YYYY-MM-DD (year ignored)")]
        start: Option<String>,

        #[arg(long, help = "End day as MM-DD or YYYY-MM-DD (year ignored)")]
        end: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Answer repeated queries from stdin against one loaded data set
    Explore {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
