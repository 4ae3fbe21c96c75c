//! Command-line parsing for the breakthrough-curve fitter.
//!
//! Keeps **argument parsing** separate from the fitting code. Most fit options
//! can also come from the environment (or a `.env` file), so a workstation can
//! pin its resin name and starting guess.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "dbc",
    version,
    about = "Dynamic binding capacity calculator: fits a sigmoid to breakthrough data"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a breakthrough curve, report DBC 10%, and write the results table and plot.
    Fit(FitArgs),
    /// Write a synthetic breakthrough dataset.
    Simulate(SimulateArgs),
    /// Re-render the plot from a saved fit summary JSON.
    Plot(PlotArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// The location (directory and file name) of the headerless two-column data file.
    #[arg(
        short = 'c',
        long = "csv_data_file",
        alias = "csv-data-file",
        env = "DBC_CSV_DATA_FILE",
        default_value = "tryagain.csv"
    )]
    pub csv_data_file: PathBuf,

    /// Resin type (annotation only).
    #[arg(
        short = 'r',
        long = "resin_type",
        alias = "resin-type",
        env = "DBC_RESIN_TYPE",
        default_value = "No user input"
    )]
    pub resin_type: String,

    /// Residence time with units (annotation only).
    #[arg(
        short = 't',
        long = "time_of_residence",
        alias = "time-of-residence",
        env = "DBC_RESIDENCE_TIME",
        default_value = "No user input"
    )]
    pub time_of_residence: String,

    /// Field delimiter of the data file.
    #[arg(short = 'd', long, default_value_t = ',')]
    pub delimiter: char,

    /// Initial guess for the steepness k.
    #[arg(long, env = "DBC_K0", default_value_t = 0.4, allow_negative_numbers = true)]
    pub k0: f64,

    /// Initial guess for the midpoint x0.
    #[arg(long = "x0", env = "DBC_X0", default_value_t = 70.0, allow_negative_numbers = true)]
    pub x0: f64,

    /// Maximum solver iterations (at least 1).
    #[arg(
        long,
        default_value_t = 200,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_iterations: usize,

    /// Accept the fit when |R^2 - 1| <= tolerance.
    #[arg(long, default_value_t = 0.05)]
    pub tolerance: f64,

    /// Directory for the results table and plot.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Skip the plot image.
    #[arg(long)]
    pub no_plot: bool,

    /// Also write a JSON fit summary to this path.
    #[arg(long, value_name = "JSON")]
    pub summary_json: Option<PathBuf>,

    /// Print the per-sample residual table.
    #[arg(long)]
    pub residuals: bool,
}

/// Options for synthetic data generation.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Output file (headerless two-column CSV).
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// True steepness.
    #[arg(long, default_value_t = 0.15, allow_negative_numbers = true)]
    pub k: f64,

    /// True midpoint.
    #[arg(long = "x0", default_value_t = 80.0, allow_negative_numbers = true)]
    pub x0: f64,

    /// Standard deviation of Gaussian noise on breakthrough.
    #[arg(long, default_value_t = 0.01)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Lowest loading.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Highest loading.
    #[arg(long, default_value_t = 160.0)]
    pub x_max: f64,
}

/// Options for plotting a saved summary.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Summary JSON produced by `dbc fit --summary-json`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,

    /// Output SVG path.
    #[arg(long, value_name = "SVG")]
    pub out: PathBuf,
}
