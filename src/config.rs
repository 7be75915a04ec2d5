// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Run configuration, loaded from an optional YAML file. Every field has a
/// default so a bare invocation works against the conventional layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CSV file, or a directory whose `*.csv` files are loaded in lexical
    /// order.
    pub input: PathBuf,
    /// Where the cleaned table lands (CSV + Parquet).
    pub output_dir: PathBuf,
    /// Where report JSON files land.
    pub reports_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("layoffs.csv"),
            output_dir: PathBuf::from("cleaned"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening config file `{}`", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("parsing config file `{}`", path.display()))
    }
}
