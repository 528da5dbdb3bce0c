use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::CleaningRule;
use crate::utils::constants::{ANNUAL_PERIOD, DEFAULT_BASE_YEAR, VALUE_CLEAN_COLUMN};

#[derive(Parser)]
#[command(name = "agdata")]
#[command(about = "Cropland value, crop price and food price index statistics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected 'text' or 'json')", other)),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise all three configured datasets
    Report {
        #[arg(short, long, help = "Config file [default: ./agdata.toml if present]")]
        config: Option<PathBuf>,

        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Latest, earliest, max and min per group
    Groups {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long)]
        group_column: String,

        #[arg(long, default_value = VALUE_CLEAN_COLUMN)]
        value_column: String,

        #[arg(short, long, default_value = "coerce", help = "Value cleaning: comma | coerce")]
        rule: CleaningRule,

        #[arg(short, long, help = "Keep only rows with this Period")]
        period: Option<String>,

        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Price index summary against a base year
    Index {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = ANNUAL_PERIOD)]
        period: String,

        #[arg(short, long, default_value_t = DEFAULT_BASE_YEAR)]
        base_year: i32,

        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Rank groups by value for one year
    Snapshot {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long)]
        group_column: String,

        #[arg(short, long, help = "Year to rank [default: latest year]")]
        year: Option<i32>,

        #[arg(short, long, default_value = "coerce", help = "Value cleaning: comma | coerce")]
        rule: CleaningRule,

        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print selected columns of a dataset
    Show {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = "coerce", help = "Value cleaning: comma | coerce")]
        rule: CleaningRule,

        #[arg(short, long, value_delimiter = ',', default_value = "Year,Value")]
        columns: Vec<String>,

        #[arg(short, long, value_delimiter = ',', default_value = "Year")]
        sort_by: Vec<String>,

        #[arg(short, long, default_value = "0", help = "Maximum rows to print (0 = all)")]
        limit: usize,
    },
}
