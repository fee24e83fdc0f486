//! # pvstack
//!
//! Command-line front end of the device stack transcoder.
//!
//! ## Usage
//!
//! ```bash
//! # Decode every record column of a table into JSON documents
//! pvstack decode devices.tsv records/
//!
//! # Encode a record document back into a flat table
//! pvstack encode records/device-7.json device-7.tsv
//!
//! # Summarize the records of a table
//! pvstack info devices.csv
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
