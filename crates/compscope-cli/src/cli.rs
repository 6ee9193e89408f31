use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Compscope - Comparable-listing analysis
#[derive(Parser, Debug)]
#[command(name = "compscope")]
#[command(about = "Comparable-listing analysis for a subject property", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./compscope.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate comps for a subject and print the filtered analysis
    Analyze(AnalyzeArgs),

    /// List the built-in filter presets
    Presets,

    /// Show the effective configuration and where each value came from
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Apply a filter preset (starter, luxury, fixers, cashflow)
    #[arg(long)]
    pub preset: Option<String>,

    /// First year of the date window
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of the date window
    #[arg(long)]
    pub to: Option<i32>,

    /// Seed for reproducible comps
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of comps to generate
    #[arg(long)]
    pub count: Option<usize>,

    /// Maximum number of listings to print
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Distance unit for display (miles, kilometers, meters, feet)
    #[arg(long)]
    pub distance_unit: Option<String>,
}

/// Subject property; unset fields fall back to the default subject
#[derive(Args, Debug, Default)]
pub struct SubjectArgs {
    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Living area in square feet
    #[arg(long)]
    pub sqft: Option<u32>,

    #[arg(long)]
    pub beds: Option<u32>,

    #[arg(long)]
    pub baths: Option<f64>,

    #[arg(long)]
    pub year_built: Option<i32>,
}

/// Filter bounds as typed into the dashboard; unparseable text leaves a bound unset
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long, value_name = "PRICE")]
    pub price_min: Option<String>,

    #[arg(long, value_name = "PRICE")]
    pub price_max: Option<String>,

    #[arg(long, value_name = "SQFT")]
    pub sqft_min: Option<String>,

    #[arg(long, value_name = "SQFT")]
    pub sqft_max: Option<String>,

    #[arg(long, value_name = "BEDS")]
    pub min_beds: Option<String>,

    #[arg(long, value_name = "BATHS")]
    pub min_baths: Option<String>,

    #[arg(long, value_name = "YEAR")]
    pub year_built_min: Option<String>,

    #[arg(long, value_name = "YEAR")]
    pub year_built_max: Option<String>,

    /// Maximum distance from the subject in miles
    #[arg(long, value_name = "MILES")]
    pub max_distance: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show only the value of this key
    pub key: Option<String>,
}
