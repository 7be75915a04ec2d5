// src/report/totals.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::table::LayoffRecord;

const TOP_FUNDED_LIMIT: usize = 5;

/// One row of the total-shutdown report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShutdownRow {
    pub company: String,
    pub total_laid_off: Option<i64>,
    pub funds_raised_millions: Option<i64>,
    pub date: Option<NaiveDate>,
}

/// Records where the whole workforce was laid off, largest first; rows
/// without a headcount sort last, funds raised breaks ties.
pub fn total_shutdowns(rows: &[LayoffRecord]) -> Vec<ShutdownRow> {
    let mut out: Vec<ShutdownRow> = rows
        .iter()
        .filter(|r| r.percentage() == Some(1.0))
        .map(|r| ShutdownRow {
            company: r.company.clone(),
            total_laid_off: r.total_laid_off,
            funds_raised_millions: r.funds_raised_millions,
            date: r.date,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_laid_off
            .cmp(&a.total_laid_off)
            .then(b.funds_raised_millions.cmp(&a.funds_raised_millions))
            .then_with(|| a.company.cmp(&b.company))
    });
    out
}

/// `SUM(total_laid_off)` per dimension value, descending. A null dimension
/// value forms its own group; a group whose rows all lack a headcount sums
/// to null and sorts last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSumRow {
    pub key: Option<String>,
    pub total_laid_off: Option<i64>,
}

fn sum_by<F>(rows: &[LayoffRecord], key: F) -> Vec<DimensionSumRow>
where
    F: Fn(&LayoffRecord) -> Option<String>,
{
    let mut sums: HashMap<Option<String>, Option<i64>> = HashMap::new();
    for r in rows {
        let slot = sums.entry(key(r)).or_insert(None);
        if let Some(v) = r.total_laid_off {
            *slot = Some(slot.unwrap_or(0) + v);
        }
    }
    let mut out: Vec<DimensionSumRow> = sums
        .into_iter()
        .map(|(key, total_laid_off)| DimensionSumRow {
            key,
            total_laid_off,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_laid_off
            .cmp(&a.total_laid_off)
            .then_with(|| a.key.cmp(&b.key))
    });
    out
}

pub fn sum_by_company(rows: &[LayoffRecord]) -> Vec<DimensionSumRow> {
    sum_by(rows, |r| Some(r.company.clone()))
}

pub fn sum_by_industry(rows: &[LayoffRecord]) -> Vec<DimensionSumRow> {
    sum_by(rows, |r| r.industry.clone())
}

pub fn sum_by_country(rows: &[LayoffRecord]) -> Vec<DimensionSumRow> {
    sum_by(rows, |r| Some(r.country.clone()))
}

pub fn sum_by_stage(rows: &[LayoffRecord]) -> Vec<DimensionSumRow> {
    sum_by(rows, |r| Some(r.stage.clone()))
}

/// One row of the top-funded report: companies ordered by total funds
/// raised, with their total layoffs alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundedRow {
    pub company: String,
    pub funds_raised_millions: Option<i64>,
    pub total_laid_off: Option<i64>,
}

pub fn top_funded(rows: &[LayoffRecord]) -> Vec<FundedRow> {
    let mut sums: HashMap<String, (Option<i64>, Option<i64>)> = HashMap::new();
    for r in rows {
        let slot = sums.entry(r.company.clone()).or_insert((None, None));
        if let Some(v) = r.funds_raised_millions {
            slot.0 = Some(slot.0.unwrap_or(0) + v);
        }
        if let Some(v) = r.total_laid_off {
            slot.1 = Some(slot.1.unwrap_or(0) + v);
        }
    }
    let mut out: Vec<FundedRow> = sums
        .into_iter()
        .map(|(company, (funds_raised_millions, total_laid_off))| FundedRow {
            company,
            funds_raised_millions,
            total_laid_off,
        })
        .collect();
    out.sort_by(|a, b| {
        b.funds_raised_millions
            .cmp(&a.funds_raised_millions)
            .then_with(|| a.company.cmp(&b.company))
    });
    out.truncate(TOP_FUNDED_LIMIT);
    out
}
