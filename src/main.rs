use anyhow::Result;
use layoffcrunch::{clean, config::PipelineConfig, export, ingest, report};
use std::{env, fs, path::Path};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = match env::args().nth(1) {
        Some(path) => PipelineConfig::load(Path::new(&path))?,
        None => PipelineConfig::default(),
    };
    info!(
        input = %cfg.input.display(),
        output = %cfg.output_dir.display(),
        reports = %cfg.reports_dir.display(),
        "configured"
    );

    for d in [&cfg.output_dir, &cfg.reports_dir] {
        fs::create_dir_all(d)?;
    }

    // ─── 3) ingest source rows ───────────────────────────────────────
    let source = ingest::load_records(&cfg.input)?;

    // ─── 4) clean the staging copy ───────────────────────────────────
    let (table, summary) = clean::run(&source);
    info!(
        source_rows = summary.source_rows,
        final_rows = summary.final_rows,
        "staging table cleaned"
    );

    // ─── 5) export the cleaned table ─────────────────────────────────
    let csv_path = export::write_clean_csv(&table.rows, &cfg.output_dir)?;
    let parquet_path = export::write_clean_parquet(&table.rows, &cfg.output_dir)?;
    info!(
        csv = %csv_path.display(),
        parquet = %parquet_path.display(),
        "wrote cleaned table"
    );

    // ─── 6) run the report catalog ───────────────────────────────────
    report::run_all(&table, &cfg.reports_dir)?;

    info!("all done");
    Ok(())
}
