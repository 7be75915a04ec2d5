// src/clean/mod.rs

use tracing::info;

use crate::table::{CleanTable, RawRecord, StagingTable};

pub mod dedup;
pub mod resolve;
pub mod standardize;

/// Per-stage row accounting for one cleaning run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanSummary {
    pub source_rows: usize,
    pub duplicates_removed: usize,
    pub blank_industries_cleared: usize,
    pub industries_backfilled: usize,
    pub unusable_rows_pruned: usize,
    pub final_rows: usize,
}

/// Run the whole cleaning pipeline over a fresh copy of `source`:
/// deduplicate, standardize text, coerce to typed rows, resolve nulls,
/// prune. The source rows are never mutated.
#[tracing::instrument(level = "info", skip(source), fields(rows = source.len()))]
pub fn run(source: &[RawRecord]) -> (CleanTable, CleanSummary) {
    let mut staging = StagingTable::copy_from(source);

    let duplicates_removed = dedup::remove_duplicates(&mut staging);
    standardize::apply_text_rules(&mut staging);
    let mut table = standardize::coerce(staging);

    let blank_industries_cleared = resolve::blank_industry_to_null(&mut table);
    let industries_backfilled = resolve::backfill_industry(&mut table);
    let unusable_rows_pruned = resolve::prune_unusable(&mut table);

    let summary = CleanSummary {
        source_rows: source.len(),
        duplicates_removed,
        blank_industries_cleared,
        industries_backfilled,
        unusable_rows_pruned,
        final_rows: table.len(),
    };
    info!(
        source = summary.source_rows,
        duplicates = summary.duplicates_removed,
        backfilled = summary.industries_backfilled,
        pruned = summary.unusable_rows_pruned,
        final_rows = summary.final_rows,
        "cleaning complete"
    );
    (table, summary)
}
