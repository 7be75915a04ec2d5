// src/table.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One layoff observation exactly as it appears in the source CSV: nine text
/// columns, in file order. Ingest normalizes the dataset's literal `NULL`
/// export artifact to the empty string, so the empty string is the single
/// "unknown" sentinel from here on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawRecord {
    pub company: String,
    pub location: String,
    pub industry: String,
    pub total_laid_off: String,
    pub percentage_laid_off: String,
    pub date: String,
    pub stage: String,
    pub country: String,
    pub funds_raised_millions: String,
}

/// A typed layoff observation, produced once by coercion and only mutated by
/// the null-resolution stage afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoffRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<i64>,
    /// Fraction of the workforce laid off, kept as the source text
    /// ("1" means the whole company). See [`LayoffRecord::percentage`].
    pub percentage_laid_off: Option<String>,
    pub date: Option<NaiveDate>,
    pub stage: String,
    pub country: String,
    pub funds_raised_millions: Option<i64>,
}

impl LayoffRecord {
    /// Parse the percentage column into a fraction. Unparsable text reads as
    /// unknown.
    pub fn percentage(&self) -> Option<f64> {
        self.percentage_laid_off
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

/// Mutable working copy of the raw rows. Built by copying, never by
/// aliasing: the source parse stays untouched while the dedup and text
/// standardization stages rewrite this table in place.
#[derive(Debug)]
pub struct StagingTable {
    pub rows: Vec<RawRecord>,
}

impl StagingTable {
    /// Full copy of the source rows.
    pub fn copy_from(source: &[RawRecord]) -> Self {
        Self {
            rows: source.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The typed table the null-resolution stage works on and every report
/// reads from. No writes happen after cleaning completes.
#[derive(Debug)]
pub struct CleanTable {
    pub rows: Vec<LayoffRecord>,
}

impl CleanTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_parses_fraction_text() {
        let mut rec = LayoffRecord {
            company: "Acme".into(),
            location: "SF".into(),
            industry: Some("Retail".into()),
            total_laid_off: Some(10),
            percentage_laid_off: Some("0.25".into()),
            date: None,
            stage: "Series B".into(),
            country: "United States".into(),
            funds_raised_millions: None,
        };
        assert_eq!(rec.percentage(), Some(0.25));

        rec.percentage_laid_off = Some("1".into());
        assert_eq!(rec.percentage(), Some(1.0));

        rec.percentage_laid_off = Some("n/a".into());
        assert_eq!(rec.percentage(), None);

        rec.percentage_laid_off = None;
        assert_eq!(rec.percentage(), None);
    }

    #[test]
    fn staging_copy_does_not_alias_source() {
        let source = vec![RawRecord {
            company: "Acme".into(),
            location: "SF".into(),
            industry: "Retail".into(),
            total_laid_off: "10".into(),
            percentage_laid_off: "".into(),
            date: "1/2/2023".into(),
            stage: "Series B".into(),
            country: "United States".into(),
            funds_raised_millions: "90".into(),
        }];
        let mut staging = StagingTable::copy_from(&source);
        staging.rows[0].company = "Other".into();
        assert_eq!(source[0].company, "Acme");
    }
}
