// src/report/timeline.rs

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::round2;
use crate::table::LayoffRecord;

/// Global span of the observation dates, ignoring undated rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

pub fn date_range(rows: &[LayoffRecord]) -> DateRange {
    let mut earliest = None;
    let mut latest = None;
    for d in rows.iter().filter_map(|r| r.date) {
        earliest = Some(earliest.map_or(d, |e: NaiveDate| e.min(d)));
        latest = Some(latest.map_or(d, |l: NaiveDate| l.max(d)));
    }
    DateRange { earliest, latest }
}

/// `SUM(total_laid_off)` per calendar year, ascending. Undated rows are
/// skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSumRow {
    pub year: i32,
    pub total_laid_off: Option<i64>,
}

pub fn yearly_sums(rows: &[LayoffRecord]) -> Vec<YearSumRow> {
    let mut sums: BTreeMap<i32, Option<i64>> = BTreeMap::new();
    for r in rows {
        if let Some(year) = r.year() {
            let slot = sums.entry(year).or_insert(None);
            if let Some(v) = r.total_laid_off {
                *slot = Some(slot.unwrap_or(0) + v);
            }
        }
    }
    sums.into_iter()
        .map(|(year, total_laid_off)| YearSumRow {
            year,
            total_laid_off,
        })
        .collect()
}

/// Per-month sum plus a running total over months ascending (unbounded
/// preceding through the current month).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRollingRow {
    /// `YYYY-MM`
    pub month: String,
    pub total_laid_off: i64,
    pub rolling_total: i64,
}

pub fn monthly_cumulative(rows: &[LayoffRecord]) -> Vec<MonthlyRollingRow> {
    let mut sums: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for r in rows {
        if let Some(d) = r.date {
            *sums.entry((d.year(), d.month())).or_insert(0) += r.total_laid_off.unwrap_or(0);
        }
    }
    let mut rolling = 0i64;
    sums.into_iter()
        .map(|((year, month), total)| {
            rolling += total;
            MonthlyRollingRow {
                month: format!("{:04}-{:02}", year, month),
                total_laid_off: total,
                rolling_total: rolling,
            }
        })
        .collect()
}

/// Arithmetic mean of `total_laid_off` per (year, quarter), chronological,
/// rounded to 2 decimals. Rows without a headcount do not enter the mean;
/// quarters without any headcount are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterAvgRow {
    pub year: i32,
    pub quarter: u32,
    pub avg_laid_off: f64,
}

pub fn quarterly_average(rows: &[LayoffRecord]) -> Vec<QuarterAvgRow> {
    let mut groups: BTreeMap<(i32, u32), (i64, u64)> = BTreeMap::new();
    for r in rows {
        if let (Some(d), Some(total)) = (r.date, r.total_laid_off) {
            let quarter = (d.month() - 1) / 3 + 1;
            let slot = groups.entry((d.year(), quarter)).or_insert((0, 0));
            slot.0 += total;
            slot.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|((year, quarter), (sum, count))| QuarterAvgRow {
            year,
            quarter,
            avg_laid_off: round2(sum as f64 / count as f64),
        })
        .collect()
}

/// Year-over-year change per industry: each year's sum against the previous
/// year present for that industry. Gap years are not interpolated, the first
/// year of an industry (and a zero-sum predecessor) has no change value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryYoyRow {
    pub industry: Option<String>,
    pub year: i32,
    pub total_laid_off: i64,
    pub yoy_change_pct: Option<f64>,
}

pub fn industry_yoy(rows: &[LayoffRecord]) -> Vec<IndustryYoyRow> {
    let mut sums: BTreeMap<(Option<String>, i32), i64> = BTreeMap::new();
    for r in rows {
        if let Some(year) = r.year() {
            *sums.entry((r.industry.clone(), year)).or_insert(0) +=
                r.total_laid_off.unwrap_or(0);
        }
    }

    let mut out: Vec<IndustryYoyRow> = Vec::with_capacity(sums.len());
    let mut prev: Option<(Option<String>, i64)> = None;
    for ((industry, year), total) in sums {
        let yoy_change_pct = match &prev {
            Some((prev_industry, prev_total))
                if *prev_industry == industry && *prev_total != 0 =>
            {
                Some(round2(
                    (total - prev_total) as f64 / *prev_total as f64 * 100.0,
                ))
            }
            _ => None,
        };
        prev = Some((industry.clone(), total));
        out.push(IndustryYoyRow {
            industry,
            year,
            total_laid_off: total,
            yoy_change_pct,
        });
    }
    out
}
