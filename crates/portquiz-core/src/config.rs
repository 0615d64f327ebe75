//! Quiz configuration: where the four data files live and how to seed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level portquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Directory the data files are resolved against.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// One port spec per line.
    #[serde(default = "default_ports_file")]
    pub ports_file: PathBuf,
    /// One protocol acronym per line.
    #[serde(default = "default_acronyms_file")]
    pub acronyms_file: PathBuf,
    /// One description per line.
    #[serde(default = "default_descriptions_file")]
    pub descriptions_file: PathBuf,
    /// One transport spec (TCP, UDP, or both) per line.
    #[serde(default = "default_transports_file")]
    pub transports_file: PathBuf,
    /// Fixed seed for reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_ports_file() -> PathBuf {
    PathBuf::from("Ports.txt")
}
fn default_acronyms_file() -> PathBuf {
    PathBuf::from("Protocol_Acronym.txt")
}
fn default_descriptions_file() -> PathBuf {
    PathBuf::from("Protocol_Desc.txt")
}
fn default_transports_file() -> PathBuf {
    PathBuf::from("TCP_UDP.txt")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ports_file: default_ports_file(),
            acronyms_file: default_acronyms_file(),
            descriptions_file: default_descriptions_file(),
            transports_file: default_transports_file(),
            seed: None,
        }
    }
}

/// Resolved locations of the four data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub ports: PathBuf,
    pub acronyms: PathBuf,
    pub descriptions: PathBuf,
    pub transports: PathBuf,
}

impl DataFiles {
    /// Label/path pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("ports", self.ports.as_path()),
            ("acronyms", self.acronyms.as_path()),
            ("descriptions", self.descriptions.as_path()),
            ("transports", self.transports.as_path()),
        ]
        .into_iter()
    }
}

impl QuizConfig {
    /// Join each data file onto `data_dir`. Absolute file paths are kept.
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            ports: self.data_dir.join(&self.ports_file),
            acronyms: self.data_dir.join(&self.acronyms_file),
            descriptions: self.data_dir.join(&self.descriptions_file),
            transports: self.data_dir.join(&self.transports_file),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `portquiz.toml` in the current directory
/// 2. `~/.config/portquiz/config.toml`
///
/// Environment variable overrides: `PORTQUIZ_DATA_DIR`, `PORTQUIZ_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("portquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    if let Ok(dir) = std::env::var("PORTQUIZ_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(seed) = std::env::var("PORTQUIZ_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("PORTQUIZ_SEED is not a number: '{seed}'"))?;
        config.seed = Some(seed);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.ports_file = resolve_path(&config.ports_file);
    config.acronyms_file = resolve_path(&config.acronyms_file);
    config.descriptions_file = resolve_path(&config.descriptions_file);
    config.transports_file = resolve_path(&config.transports_file);

    Ok(config)
}

/// Parse a TOML string into a `QuizConfig` (useful for testing).
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("portquiz"))
}
