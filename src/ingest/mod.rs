// src/ingest/mod.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::glob;
use std::{fs::File, io::BufReader, path::Path};
use tracing::{debug, info};

use crate::table::RawRecord;

/// Column order of the source export. The reader indexes by position so a
/// reordered header is caught by the count check rather than silently
/// shuffling fields.
const COLUMN_COUNT: usize = 9;

/// Load layoff rows from `path`. A directory loads every `*.csv` inside it
/// in lexical order; anything else is read as a single CSV file.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let mut rows = Vec::new();

    if path.is_dir() {
        let pattern = format!("{}/*.csv", path.display());
        let mut matched = 0;
        for entry in glob(&pattern).context("invalid glob pattern for ingest")? {
            let file = entry.context("unreadable glob entry")?;
            rows.extend(load_file(&file)?);
            matched += 1;
        }
        anyhow::ensure!(matched > 0, "no CSV files found in `{}`", path.display());
    } else {
        rows = load_file(path)?;
    }

    info!(rows = rows.len(), "ingest complete");
    Ok(rows)
}

/// Read one CSV file into raw rows. The header row is consumed and the nine
/// data columns are taken positionally.
fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open CSV `{}`", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        anyhow::ensure!(
            record.len() == COLUMN_COUNT,
            "record {} in {} has {} fields, expected {}",
            idx,
            path.display(),
            record.len(),
            COLUMN_COUNT
        );
        rows.push(RawRecord {
            company: cell(&record, 0),
            location: cell(&record, 1),
            industry: cell(&record, 2),
            total_laid_off: cell(&record, 3),
            percentage_laid_off: cell(&record, 4),
            date: cell(&record, 5),
            stage: cell(&record, 6),
            country: cell(&record, 7),
            funds_raised_millions: cell(&record, 8),
        });
    }

    debug!(rows = rows.len(), "loaded {}", path.display());
    Ok(rows)
}

/// Missing cells and the export's literal `NULL` both read as empty.
fn cell(record: &csv::StringRecord, idx: usize) -> String {
    match record.get(idx) {
        Some("NULL") | None => String::new(),
        Some(s) => s.to_string(),
    }
}
