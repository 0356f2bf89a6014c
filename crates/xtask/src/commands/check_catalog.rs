//! Validate a power catalog and print its price table.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use keeper_content::CatalogLoader;
use keeper_core::config::MagicConfig;
use keeper_core::{PowerCatalog, PowerKind, PowerStats};
use strum::IntoEnumIterator;

/// Validate a power catalog and print its price table
#[derive(Parser)]
pub struct CheckCatalog {
    /// Catalog file to check (defaults to `powers.ron` in the data directory)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Custom data directory (defaults to the bundled content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Price per overcharge level
    Table,
    /// Full JSON output
    Json,
}

impl CheckCatalog {
    pub fn execute(self) -> Result<()> {
        let catalog = match self.file {
            Some(path) => CatalogLoader::load(&path)?,
            None => super::factory(self.data_dir).load_catalog()?,
        };

        match self.format {
            OutputFormat::Table => print_table(&catalog),
            OutputFormat::Json => print_json(&catalog)?,
        }

        let missing: Vec<_> = PowerKind::iter()
            .filter(|kind| catalog.get(*kind).is_none())
            .collect();
        if missing.is_empty() {
            println!("{}", style("Catalog OK").bold().green());
        } else {
            let names: Vec<_> = missing.iter().map(|kind| kind.as_ref()).collect();
            println!(
                "{} {}",
                style("Catalog OK, powers without entry:").bold().yellow(),
                names.join(", ")
            );
        }
        Ok(())
    }
}

fn print_table(catalog: &PowerCatalog) {
    println!("{}", style("=== Power Prices ===").bold().green());
    print!("{:<16}", style("power").bold().cyan());
    for level in 0..MagicConfig::OVERCHARGE_LEVELS {
        print!("{:>7}", style(format!("L{level}")).bold().cyan());
    }
    println!("  {}", style("targets").bold().cyan());

    for stats in catalog.iter() {
        print!("{:<16}", stats.kind.as_ref());
        for cost in stats.cost {
            print!("{cost:>7}");
        }
        println!("  {}", targets(stats));
    }
    println!();
}

fn targets(stats: &PowerStats) -> String {
    let kind = stats.kind;
    let mut entries = Vec::new();
    if kind.targets_things() {
        entries.push("thing");
    }
    if kind.targets_locations() {
        entries.push("location");
    }
    if kind.is_untargeted() {
        entries.push("none");
    }
    format!("{} [{:?}]", entries.join("/"), stats.cast_flags)
}

fn print_json(catalog: &PowerCatalog) -> Result<()> {
    let powers: Vec<&PowerStats> = catalog.iter().collect();
    let json =
        serde_json::to_string_pretty(&powers).context("Failed to serialize catalog to JSON")?;
    println!("{}", json);
    Ok(())
}
