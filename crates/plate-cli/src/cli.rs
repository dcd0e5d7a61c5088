use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ELISA plate designer - lays out replicate sample groups on assay plates with a reserved standard curve.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out the samples of a design over as many plates as needed.
    Design(DesignArgs),
    /// Print a saved plate layout as a grid.
    Show(ShowArgs),
    /// Apply manual edits to a saved plate layout.
    Edit(EditArgs),
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Path to a design file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory that receives one `plate_layout_p<N>.csv` per plate.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Add an experiment as SUBJECTS:TIMEPOINTS:REPLICATES (e.g. 'M1,M2:3:2').
    /// Can be used multiple times; appended after experiments from the design file.
    #[arg(short, long = "experiment", value_name = "SPEC")]
    pub experiments: Vec<String>,

    // --- Plate Overrides ---
    /// Override the number of plate rows.
    #[arg(long, value_name = "INT")]
    pub rows: Option<usize>,

    /// Override the number of plate columns.
    #[arg(long, value_name = "INT")]
    pub columns: Option<usize>,

    /// Override the number of leading columns reserved for standards.
    #[arg(long, value_name = "INT")]
    pub calibration_columns: Option<usize>,

    /// Leave calibration wells empty instead of placing the standard curve.
    #[arg(long)]
    pub no_standards: bool,

    /// Set a specific configuration value, overriding the design file.
    /// Can be used multiple times. Example: -S plate.start-column=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Do not print the plate grids after writing them.
    #[arg(long)]
    pub no_preview: bool,
}

/// Plate dimensions used to read a saved layout.
#[derive(Args, Debug, Clone, Copy)]
pub struct PlateDimensions {
    /// Number of plate rows.
    #[arg(long, value_name = "INT", default_value_t = 8)]
    pub rows: usize,

    /// Number of plate columns.
    #[arg(long, value_name = "INT", default_value_t = 12)]
    pub columns: usize,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to a plate layout CSV.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub dimensions: PlateDimensions,
}

/// Arguments for the `edit` subcommand.
///
/// Edits are applied in the order moves, clears, then sets.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Path to a plate layout CSV.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the edited layout. Defaults to overwriting the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub dimensions: PlateDimensions,

    /// Move a well's content, e.g. 'B5:A5'. Can be used multiple times.
    #[arg(long = "move", value_name = "SRC:DST")]
    pub moves: Vec<String>,

    /// Clear a well, e.g. 'A4'. Can be used multiple times.
    #[arg(long = "clear", value_name = "WELL")]
    pub clears: Vec<String>,

    /// Set a well to a free-form label, e.g. 'A5=Control'. Can be used multiple times.
    #[arg(long = "set-well", value_name = "WELL=VALUE")]
    pub set_wells: Vec<String>,
}
