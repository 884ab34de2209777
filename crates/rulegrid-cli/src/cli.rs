use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rulegrid::Proximity;
use rulegrid::rulegrid_core::settings::{EXTEND_LENGTH, INTERSECTION_TOLERANCE, MIN_LINE_LENGTH};

/// Reconstruct ruled tables from the line geometry of PDF pages.
#[derive(Debug, Parser)]
#[command(name = "rulegrid", about, version)]
pub struct Cli {
    /// Log pipeline details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect tables from ruling lines
    Tables {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// List the ruling lines drawn on each page
    Lines {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Segments must be longer than this to count as lines
        #[arg(long, default_value_t = MIN_LINE_LENGTH)]
        min_line_length: f64,
    },
}

/// Table reconstruction tuning shared by subcommands.
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Line proximity test used to group lines
    #[arg(long, value_enum, default_value_t = ProximityArg::Segment)]
    pub proximity: ProximityArg,

    /// Extension applied to each end of a line
    #[arg(long, default_value_t = EXTEND_LENGTH)]
    pub extend_length: f64,

    /// Distance below which two lines belong to the same table
    #[arg(long, default_value_t = INTERSECTION_TOLERANCE)]
    pub intersection_tolerance: f64,

    /// Segments must be longer than this to count as lines
    #[arg(long, default_value_t = MIN_LINE_LENGTH)]
    pub min_line_length: f64,

    /// Merge grid coordinates closer than this distance
    #[arg(long, value_name = "TOLERANCE")]
    pub snap: Option<f64>,
}

/// Output format shared by subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Line proximity test.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProximityArg {
    /// Minimum distance between the two segments
    Segment,
    /// Midpoint of the earlier line to the later segment
    Midpoint,
    /// Midpoint-to-segment distance in both directions
    Symmetric,
}

impl From<ProximityArg> for Proximity {
    fn from(arg: ProximityArg) -> Self {
        match arg {
            ProximityArg::Segment => Proximity::SegmentDistance,
            ProximityArg::Midpoint => Proximity::MidpointToSegment,
            ProximityArg::Symmetric => Proximity::Symmetric,
        }
    }
}
