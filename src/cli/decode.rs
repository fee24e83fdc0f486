use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use pvstack::batch::{decode_to_directory, BatchOptions};
use pvstack::table::TableFormat;

use super::Config;

/// Output directory next to the input, named after its stem
fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_records", stem))
}

/// Decode a flat table into one JSON document per record
pub fn run(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: Option<TableFormat>,
    compact: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = Config::load(config_path.as_deref())?;
    let output_dir = output_dir
        .or(config.decode.output_dir)
        .unwrap_or_else(|| default_output_dir(&input));
    let format = format.or(config.decode.format);
    let options = BatchOptions {
        pretty: !(compact || config.decode.compact.unwrap_or(false)),
    };

    info!("pvstack decode");
    info!("  Input: {}", input.display());
    info!("  Output: {}", output_dir.display());
    info!(
        "  Vocabulary: v{}, padding: {:?}",
        config.transcoder.vocabulary.version, config.transcoder.padding
    );

    let report = decode_to_directory(&input, format, &output_dir, &config.transcoder, options)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} record(s) could not be written",
            report.failure_count(),
            report.outcomes.len()
        );
    }
    Ok(())
}
