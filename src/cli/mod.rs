use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use shockcrop::trigger::Polarity;

mod config;
mod demo;
mod extract;
mod info;
mod printout;

/// shockcrop - crop accelerometer recordings around shock events
#[derive(Parser)]
#[command(name = "shockcrop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options of the extract command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Sensor Connect CSV export to process
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file name; numbered per capture when several are written
    /// (default: <input>_trunc.csv)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Maximum mode: crop around the single largest spike only
    #[arg(short = 'm', long)]
    maximum: bool,

    /// Number of captures to extract (default: 3; 1 behaves like maximum mode)
    #[arg(short = 'n', long)]
    number: Option<usize>,

    /// Samples on each side of a trigger in which no further trigger may start
    /// (default: a quarter of the sample size)
    #[arg(short = 'd', long)]
    deadzone: Option<usize>,

    /// Axes that may initiate a trigger, any combination of x, y, z (default: xyz)
    #[arg(short = 'a', long)]
    axis: Option<String>,

    /// Number of samples in each cropped window (default: 300)
    #[arg(short = 's', long)]
    size: Option<usize>,

    /// Trigger on positive spikes (+), negative spikes (-) or both (+-) (default: +-)
    #[arg(short = 'P', long, allow_hyphen_values = true)]
    polarity: Option<Polarity>,

    /// Fraction of each window placed before its trigger, e.g. 1/5 or 0.25 (default: 1/5)
    #[arg(short = 'c', long)]
    coefficient: Option<String>,

    /// Print the cropped samples to the terminal
    #[arg(long)]
    printout: bool,

    /// Render each capture to an SVG file next to its CSV
    #[arg(short = 'p', long)]
    plot: bool,

    /// Plot title (default: the input file name)
    #[arg(short = 't', long)]
    title: Option<String>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop windows around the strongest peaks of a recording
    Extract(ExtractArgs),

    /// Display summary statistics of a recording
    Info {
        /// Sensor Connect CSV export
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic Sensor Connect recording with impact spikes
    Demo {
        /// Output CSV path
        #[arg(value_name = "OUTPUT", default_value = "demo_impacts.csv")]
        output: PathBuf,

        /// Number of samples to generate
        #[arg(long, default_value = "10000")]
        samples: usize,

        /// Number of impact spikes
        #[arg(long, default_value = "4")]
        spikes: usize,

        /// Sample rate in Hz
        #[arg(long, default_value = "1000")]
        rate: u32,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Info { file, json } => info::run(file, json),
        Commands::Demo {
            output,
            samples,
            spikes,
            rate,
        } => demo::run(output, samples, spikes, rate),
    }
}
