//! The `studysense catalog` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studysense_core::config::load_config_from;

use super::resolve_catalog;

pub fn execute(catalog_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = resolve_catalog(catalog_path.or(config.catalog).as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Technique",
        "Type",
        "Effectiveness",
        "Difficulty",
        "Time",
        "Tags",
    ]);
    for t in catalog.iter() {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.name),
            Cell::new(t.technique_type),
            Cell::new(format!("{:.0}%", t.effectiveness * 100.0)),
            Cell::new(t.difficulty),
            Cell::new(format!("{} min", t.estimated_time)),
            Cell::new(t.tags.join(", ")),
        ]);
    }
    println!("{table}");
    println!("{} technique(s)", catalog.len());
    Ok(())
}
