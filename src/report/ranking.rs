// src/report/ranking.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::round2;
use crate::table::LayoffRecord;

const TOP_RANK: u32 = 5;
const TOP_PAIR_LIMIT: usize = 3;

/// One row of the top-companies-per-year report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyYearRankRow {
    pub year: i32,
    pub company: String,
    pub total_laid_off: i64,
    pub rank: u32,
}

/// Per (company, year) layoff sums, dense-ranked within each year by sum
/// descending, keeping ranks 1 through 5. Ties share a rank and do not
/// consume extra slots, so a year can return more than five rows. Undated
/// rows are skipped.
pub fn top_companies_per_year(rows: &[LayoffRecord]) -> Vec<CompanyYearRankRow> {
    let mut sums: BTreeMap<(i32, String), i64> = BTreeMap::new();
    for r in rows {
        if let Some(year) = r.year() {
            *sums.entry((year, r.company.clone())).or_insert(0) += r.total_laid_off.unwrap_or(0);
        }
    }

    let mut by_year: BTreeMap<i32, Vec<(String, i64)>> = BTreeMap::new();
    for ((year, company), total) in sums {
        by_year.entry(year).or_default().push((company, total));
    }

    let mut out = Vec::new();
    for (year, mut companies) in by_year {
        companies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let mut rank = 0u32;
        let mut prev_total: Option<i64> = None;
        for (company, total) in companies {
            if prev_total != Some(total) {
                rank += 1;
                prev_total = Some(total);
            }
            if rank > TOP_RANK {
                break;
            }
            out.push(CompanyYearRankRow {
                year,
                company,
                total_laid_off: total,
                rank,
            });
        }
    }
    out
}

/// Mean `total_laid_off` per industry, descending, rounded to 2 decimals.
/// Rows without a headcount do not enter the mean; industries with no
/// headcount at all are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryAvgRow {
    pub industry: Option<String>,
    pub avg_laid_off: f64,
}

pub fn industry_averages(rows: &[LayoffRecord]) -> Vec<IndustryAvgRow> {
    let mut groups: HashMap<Option<String>, (i64, u64)> = HashMap::new();
    for r in rows {
        if let Some(total) = r.total_laid_off {
            let slot = groups.entry(r.industry.clone()).or_insert((0, 0));
            slot.0 += total;
            slot.1 += 1;
        }
    }
    let mut out: Vec<IndustryAvgRow> = groups
        .into_iter()
        .map(|(industry, (sum, count))| IndustryAvgRow {
            industry,
            avg_laid_off: round2(sum as f64 / count as f64),
        })
        .collect();
    out.sort_by(|a, b| {
        b.avg_laid_off
            .partial_cmp(&a.avg_laid_off)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.industry.cmp(&b.industry))
    });
    out
}

/// One row of the heaviest (date, industry) pairs report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateIndustryRow {
    pub date: Option<NaiveDate>,
    pub industry: Option<String>,
    pub total_laid_off: i64,
}

/// Layoff sums per (date, industry) pair, heaviest three pairs only. Null
/// dates and industries group like any other value.
pub fn top_date_industry_pairs(rows: &[LayoffRecord]) -> Vec<DateIndustryRow> {
    let mut sums: BTreeMap<(Option<NaiveDate>, Option<String>), i64> = BTreeMap::new();
    for r in rows {
        *sums.entry((r.date, r.industry.clone())).or_insert(0) += r.total_laid_off.unwrap_or(0);
    }
    let mut out: Vec<DateIndustryRow> = sums
        .into_iter()
        .map(|((date, industry), total_laid_off)| DateIndustryRow {
            date,
            industry,
            total_laid_off,
        })
        .collect();
    out.sort_by(|a, b| b.total_laid_off.cmp(&a.total_laid_off));
    out.truncate(TOP_PAIR_LIMIT);
    out
}
