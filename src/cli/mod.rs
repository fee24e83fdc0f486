use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pvstack::table::TableFormat;

mod config;
mod decode;
mod encode;
mod info;

pub use config::Config;

/// pvstack - Photovoltaic device stack transcoder
#[derive(Parser)]
#[command(name = "pvstack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Table separator override
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
}

impl From<FormatArg> for TableFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tsv => TableFormat::Tsv,
            FormatArg::Csv => TableFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a flat device table into one JSON document per record
    Decode {
        /// Input table (.tsv or .csv)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (defaults to <INPUT stem>_records next to the input)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Table separator (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write compact instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Encode record documents back into a flat table
    Encode {
        /// Input JSON: a record document, a record or an array of records
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output table (defaults to standard output as TSV)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Summarize the records of a flat device table
    Info {
        /// Input table (.tsv or .csv)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
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
        Commands::Decode {
            input,
            output_dir,
            config,
            format,
            compact,
        } => decode::run(input, output_dir, config, format.map(TableFormat::from), compact),
        Commands::Encode {
            input,
            output,
            config,
        } => encode::run(input, output, config),
        Commands::Info { input, config } => info::run(input, config),
    }
}
