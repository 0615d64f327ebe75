//! The `portquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use portquiz_core::store::{validate_record_set, RecordSet};

use crate::commands::record_table;
use crate::data::{read_sources, resolve_config};

pub fn execute(config_path: Option<PathBuf>, data_dir: Option<PathBuf>, list: bool) -> Result<()> {
    let config = resolve_config(config_path.as_deref(), data_dir)?;
    let files = config.data_files();
    let sources = read_sources(&files)?;
    let records = RecordSet::load(&sources)?;

    for (label, path) in files.iter() {
        println!("{label:>12}: {}", path.display());
    }
    println!("{} records", records.len());

    let warnings = validate_record_set(&records);
    for w in &warnings {
        println!("  [#{}] WARNING: {}", w.index + 1, w.message);
    }

    if list {
        println!("{}", record_table(&records));
    }

    if warnings.is_empty() {
        println!("All records valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
