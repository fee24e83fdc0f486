use anyhow::{Context, Result};
use std::path::PathBuf;

use pvstack::assemble::{decode_record, LayerStackAssembler};
use pvstack::table::Table;

use super::Config;

/// Display a summary of a flat device table
pub fn run(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }

    let config = Config::load(config_path.as_deref())?.transcoder;
    let table = Table::from_path(&input)
        .with_context(|| format!("Failed to read table {}", input.display()))?;
    let assembler = LayerStackAssembler::new(&config);

    println!("pvstack Table Information");
    println!("=========================");
    println!("File: {}", input.display());
    println!();

    println!("Table Statistics:");
    println!("  Records: {}", table.record_ids().len());
    println!("  Labelled rows: {}", table.row_count());
    println!("  Vocabulary version: {}", config.vocabulary.version);
    println!();

    println!("Records:");
    for (id, index) in table.records(&config.aliases) {
        let positions = assembler.positions(&index).len();
        let record = decode_record(&id, &index, &config);
        let steps: usize = record
            .layers
            .iter()
            .map(|layer| layer.synthesis.step_count())
            .sum();
        let stack: Vec<&str> = record
            .layers
            .iter()
            .map(|layer| layer.name.as_deref().unwrap_or("?"))
            .collect();

        println!(
            "  {}: {} position(s), {} layer(s), {} step(s), {} JV scan(s)",
            id,
            positions,
            record.layers.len(),
            steps,
            record.measurements.jv.len()
        );
        if !stack.is_empty() {
            println!("    {}", stack.join(" / "));
        }
    }

    Ok(())
}
