//! Reading the four data files into raw line lists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use portquiz_core::config::{load_config_from, DataFiles, QuizConfig};
use portquiz_core::store::RecordSources;

/// Load the config and apply command-line overrides.
pub fn resolve_config(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<QuizConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

/// Read all four files. Any unreadable file aborts before a quiz starts.
pub fn read_sources(files: &DataFiles) -> Result<RecordSources> {
    let read = |label: &str, path: &Path| {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {label} file: {}", path.display()))
    };

    let ports = read("ports", &files.ports)?;
    let acronyms = read("acronyms", &files.acronyms)?;
    let descriptions = read("descriptions", &files.descriptions)?;
    let transports = read("transports", &files.transports)?;

    tracing::debug!("read data files from {}", files.ports.display());
    Ok(RecordSources::from_texts(
        &ports,
        &acronyms,
        &descriptions,
        &transports,
    ))
}
