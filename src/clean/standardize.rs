// src/clean/standardize.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::table::{CleanTable, LayoffRecord, RawRecord, StagingTable};

/// Canonical-collapse rules per column: a value matching the pattern is
/// rewritten to exactly the canonical form; anything else passes through.
static INDUSTRY_RULES: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| vec![(Regex::new(r"^Crypto").unwrap(), "Crypto")]);

static COUNTRY_RULES: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| vec![(Regex::new(r"^United States").unwrap(), "United States")]);

fn collapse(value: &str, rules: &[(Regex, &'static str)]) -> Option<&'static str> {
    rules
        .iter()
        .find(|(re, _)| re.is_match(value))
        .map(|(_, canonical)| *canonical)
}

/// Trim and collapse the text columns in place. Idempotent: a second pass
/// over already-standardized rows changes nothing.
#[tracing::instrument(level = "info", skip(staging), fields(rows = staging.len()))]
pub fn apply_text_rules(staging: &mut StagingTable) {
    let mut rewrites = 0usize;
    for row in &mut staging.rows {
        let trimmed = row.company.trim();
        if trimmed.len() != row.company.len() {
            row.company = trimmed.to_string();
            rewrites += 1;
        }
        if let Some(canonical) = collapse(&row.industry, &INDUSTRY_RULES) {
            if row.industry != canonical {
                row.industry = canonical.to_string();
                rewrites += 1;
            }
        }
        if let Some(canonical) = collapse(&row.country, &COUNTRY_RULES) {
            if row.country != canonical {
                row.country = canonical.to_string();
                rewrites += 1;
            }
        }
    }
    info!(rewrites, "standardized text columns");
}

/// Parse `M/D/YYYY` (zero padding optional) into a date.
pub fn parse_mdy(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let mut parts = s.splitn(3, '/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// One-way typed coercion of the staging rows. Consumes the staging table so
/// the text representation cannot be converted a second time. Empty cells
/// become null; unparsable dates and integers degrade to null with a warning
/// rather than aborting the run.
#[tracing::instrument(level = "info", skip(staging), fields(rows = staging.len()))]
pub fn coerce(staging: StagingTable) -> CleanTable {
    let rows = staging.rows.into_iter().map(coerce_row).collect();
    CleanTable { rows }
}

fn coerce_row(raw: RawRecord) -> LayoffRecord {
    LayoffRecord {
        total_laid_off: coerce_int(&raw.total_laid_off, "total_laid_off", &raw.company),
        funds_raised_millions: coerce_int(
            &raw.funds_raised_millions,
            "funds_raised_millions",
            &raw.company,
        ),
        percentage_laid_off: if raw.percentage_laid_off.trim().is_empty() {
            None
        } else {
            Some(raw.percentage_laid_off)
        },
        date: coerce_date(&raw.date, &raw.company),
        // blank industries stay as-is here; the null-resolution stage owns
        // the blank-to-null rewrite
        industry: Some(raw.industry),
        company: raw.company,
        location: raw.location,
        stage: raw.stage,
        country: raw.country,
    }
}

fn coerce_int(raw: &str, column: &str, company: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(column, company, value = raw, "unparsable integer, treating as null");
            None
        }
    }
}

fn coerce_date(raw: &str, company: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_mdy(raw) {
        Some(d) => Some(d),
        None => {
            warn!(company, value = raw, "unparsable date, treating as null");
            None
        }
    }
}
