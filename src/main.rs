//! # shockcrop
//!
//! A command-line tool that crops LORD MicroStrain Sensor Connect accelerometer
//! exports down to short clips around their largest shock events.
//!
//! ## Usage
//!
//! ```bash
//! # Three captures (default) around the largest spikes on any axis
//! shockcrop extract sample_data.csv
//!
//! # Single largest positive spike on x, 500 samples, trigger 1/4 in
//! shockcrop extract sample_data.csv -m -a x -P + -s 500 -c 1/4
//!
//! # Summary of a recording
//! shockcrop info sample_data.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
