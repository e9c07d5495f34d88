use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "chainfold CLI - Metropolis Monte Carlo folding of a coarse-grained polymer chain.",
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

    /// Set the number of threads for parallel energy evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fold a straight chain by Metropolis sampling and write the final structure.
    Run(RunArgs),
    /// Write a configuration file populated with the default parameters.
    Init(InitArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Output path prefix. Writes <PREFIX>.positions.csv, <PREFIX>.energy.csv and <PREFIX>.xyz.
    #[arg(short, long, required = true, value_name = "PREFIX")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Chain Overrides ---
    /// Override the number of residues in the chain.
    #[arg(short = 'n', long, value_name = "INT")]
    pub chain_length: Option<usize>,

    /// Override the distance between bonded residues.
    #[arg(short = 'b', long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,

    // --- Sampling Overrides ---
    /// Override the number of Metropolis steps.
    #[arg(short = 's', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Override the sampling temperature.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Seed the random number generator for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override how candidate energies are computed ('full' or 'incremental').
    #[arg(long, value_name = "MODE")]
    pub energy_evaluation: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S potential.radius=0.25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the configuration file to create.
    #[arg(default_value = "chainfold.toml", value_name = "PATH")]
    pub path: PathBuf,

    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
