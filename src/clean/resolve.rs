// src/clean/resolve.rs

use std::collections::HashMap;
use tracing::info;

use crate::table::CleanTable;

/// The empty string and null are the same "unknown industry" state; make
/// that explicit before backfilling. Returns how many cells were cleared.
pub fn blank_industry_to_null(table: &mut CleanTable) -> usize {
    let mut cleared = 0usize;
    for row in &mut table.rows {
        if matches!(row.industry.as_deref(), Some("")) {
            row.industry = None;
            cleared += 1;
        }
    }
    info!(cleared, "cleared blank industries");
    cleared
}

/// Fill null industries from another record of the same company. The donor
/// lookup is built once, before any fill, from the rows that already carry
/// an industry; the fill is a single pass, not a fixed-point iteration, so a
/// company whose rows are all null stays null. Returns how many cells were
/// filled.
pub fn backfill_industry(table: &mut CleanTable) -> usize {
    let mut donors: HashMap<String, String> = HashMap::new();
    for row in &table.rows {
        if let Some(industry) = &row.industry {
            donors
                .entry(row.company.clone())
                .or_insert_with(|| industry.clone());
        }
    }

    let mut filled = 0usize;
    for row in &mut table.rows {
        if row.industry.is_none() {
            if let Some(donor) = donors.get(&row.company) {
                row.industry = Some(donor.clone());
                filled += 1;
            }
        }
    }
    info!(filled, "backfilled industries");
    filled
}

/// Drop rows carrying no usable measurement in either metric column.
/// Returns how many rows were pruned.
pub fn prune_unusable(table: &mut CleanTable) -> usize {
    let before = table.rows.len();
    table
        .rows
        .retain(|r| r.total_laid_off.is_some() || r.percentage_laid_off.is_some());
    let pruned = before - table.rows.len();
    info!(pruned, "pruned rows without any metric");
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LayoffRecord;

    fn rec(company: &str, industry: Option<&str>, total: Option<i64>, pct: Option<&str>) -> LayoffRecord {
        LayoffRecord {
            company: company.to_string(),
            location: "SF".into(),
            industry: industry.map(str::to_string),
            total_laid_off: total,
            percentage_laid_off: pct.map(str::to_string),
            date: None,
            stage: "Series B".into(),
            country: "United States".into(),
            funds_raised_millions: None,
        }
    }

    #[test]
    fn blank_industries_become_null() {
        let mut table = CleanTable {
            rows: vec![
                rec("Acme", Some(""), Some(1), None),
                rec("Globex", Some("Media"), Some(1), None),
            ],
        };
        assert_eq!(blank_industry_to_null(&mut table), 1);
        assert_eq!(table.rows[0].industry, None);
        assert_eq!(table.rows[1].industry.as_deref(), Some("Media"));
    }

    #[test]
    fn backfill_copies_from_same_company() {
        let mut table = CleanTable {
            rows: vec![
                rec("Acme", None, Some(1), None),
                rec("Acme", Some("Retail"), Some(2), None),
                rec("Globex", None, Some(3), None),
            ],
        };
        assert_eq!(backfill_industry(&mut table), 1);
        assert_eq!(table.rows[0].industry.as_deref(), Some("Retail"));
        // no donor anywhere for Globex
        assert_eq!(table.rows[2].industry, None);
    }

    #[test]
    fn backfill_is_single_pass() {
        // every Acme row is null, so nothing can donate even across passes
        let mut table = CleanTable {
            rows: vec![
                rec("Acme", None, Some(1), None),
                rec("Acme", None, Some(2), None),
            ],
        };
        assert_eq!(backfill_industry(&mut table), 0);
        assert!(table.rows.iter().all(|r| r.industry.is_none()));
    }

    #[test]
    fn prune_drops_rows_with_both_metrics_null() {
        let mut table = CleanTable {
            rows: vec![
                rec("Acme", Some("Retail"), None, None),
                rec("Globex", Some("Media"), Some(5), None),
                rec("Initech", Some("Tech"), None, Some("0.5")),
            ],
        };
        assert_eq!(prune_unusable(&mut table), 1);
        assert_eq!(table.rows.len(), 2);
        assert!(table
            .rows
            .iter()
            .all(|r| r.total_laid_off.is_some() || r.percentage_laid_off.is_some()));
    }
}
