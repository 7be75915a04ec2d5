// src/clean/dedup.rs

use std::collections::HashSet;
use tracing::info;

use crate::table::{RawRecord, StagingTable};

/// Remove exact duplicates over the full nine-column tuple. Within a group
/// of identical rows the first occurrence in table order survives and the
/// rest are deleted; rows that are unique in the source are never touched.
/// Returns how many rows were dropped.
pub fn remove_duplicates(staging: &mut StagingTable) -> usize {
    let before = staging.rows.len();
    let mut seen: HashSet<RawRecord> = HashSet::with_capacity(before);
    staging.rows.retain(|row| seen.insert(row.clone()));
    let dropped = before - staging.rows.len();
    info!(before, dropped, "deduplicated staging table");
    dropped
}
