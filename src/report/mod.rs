// src/report/mod.rs

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::export;
use crate::table::CleanTable;

pub mod ranking;
pub mod timeline;
pub mod totals;

/// Round to two decimal places, the way the catalog reports averages and
/// percentage changes.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Run every report in the catalog over the cleaned table and write each
/// result as a JSON file under `reports_dir`. Reports are independent and
/// read-only, so the order is cosmetic.
#[tracing::instrument(level = "info", skip(table, reports_dir), fields(rows = table.len()))]
pub fn run_all(table: &CleanTable, reports_dir: &Path) -> Result<()> {
    let rows = &table.rows;

    export::write_report_json(reports_dir, "01_total_shutdowns", &totals::total_shutdowns(rows))?;
    export::write_report_json(reports_dir, "02_sums_by_company", &totals::sum_by_company(rows))?;
    export::write_report_json(reports_dir, "03_sums_by_industry", &totals::sum_by_industry(rows))?;
    export::write_report_json(reports_dir, "04_sums_by_country", &totals::sum_by_country(rows))?;
    export::write_report_json(reports_dir, "05_sums_by_stage", &totals::sum_by_stage(rows))?;
    export::write_report_json(reports_dir, "06_date_range", &timeline::date_range(rows))?;
    export::write_report_json(reports_dir, "07_yearly_sums", &timeline::yearly_sums(rows))?;
    export::write_report_json(
        reports_dir,
        "08_monthly_cumulative",
        &timeline::monthly_cumulative(rows),
    )?;
    export::write_report_json(
        reports_dir,
        "09_top_companies_per_year",
        &ranking::top_companies_per_year(rows),
    )?;
    export::write_report_json(
        reports_dir,
        "10_quarterly_average",
        &timeline::quarterly_average(rows),
    )?;
    export::write_report_json(reports_dir, "11_top_funded", &totals::top_funded(rows))?;
    export::write_report_json(
        reports_dir,
        "12_industry_averages",
        &ranking::industry_averages(rows),
    )?;
    export::write_report_json(reports_dir, "13_industry_yoy", &timeline::industry_yoy(rows))?;
    export::write_report_json(
        reports_dir,
        "14_top_date_industry_pairs",
        &ranking::top_date_industry_pairs(rows),
    )?;

    info!(dir = %reports_dir.display(), "report catalog complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LayoffRecord;
    use tempfile::tempdir;

    #[test]
    fn round2_rounds_half_up_at_two_places() {
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(1.005), 1.0); // 1.005 is stored slightly below 1.005
        assert_eq!(round2(2.675000001), 2.68);
        assert_eq!(round2(-50.0), -50.0);
    }

    #[test]
    fn run_all_writes_every_catalog_file() -> Result<()> {
        let table = CleanTable {
            rows: vec![LayoffRecord {
                company: "Acme".into(),
                location: "SF".into(),
                industry: Some("Retail".into()),
                total_laid_off: Some(10),
                percentage_laid_off: Some("1".into()),
                date: chrono::NaiveDate::from_ymd_opt(2023, 1, 2),
                stage: "Series B".into(),
                country: "United States".into(),
                funds_raised_millions: Some(90),
            }],
        };
        let dir = tempdir()?;
        run_all(&table, dir.path())?;

        let mut names: Vec<String> = std::fs::read_dir(dir.path())?
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "01_total_shutdowns.json");
        assert_eq!(names[13], "14_top_date_industry_pairs.json");
        Ok(())
    }
}
