// src/export/mod.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Array, Int64Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

use crate::table::LayoffRecord;

/// Write the cleaned rows as `cleaned.csv` under `dir`, tmp file first,
/// then rename into place.
pub fn write_clean_csv(rows: &[LayoffRecord], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating `{}`", dir.display()))?;
    let tmp = dir.join("cleaned.csv.tmp");
    let path = dir.join("cleaned.csv");

    {
        let file =
            File::create(&tmp).with_context(|| format!("creating `{}`", tmp.display()))?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
        for row in rows {
            wtr.serialize(row).context("serializing cleaned row")?;
        }
        wtr.flush().context("flushing cleaned CSV")?;
    }

    fs::rename(&tmp, &path)
        .with_context(|| format!("renaming `{}` to `{}`", tmp.display(), path.display()))?;
    debug!(rows = rows.len(), "wrote {}", path.display());
    Ok(path)
}

fn cleaned_schema() -> Schema {
    Schema::new(vec![
        Field::new("company", DataType::Utf8, false),
        Field::new("location", DataType::Utf8, false),
        Field::new("industry", DataType::Utf8, true),
        Field::new("total_laid_off", DataType::Int64, true),
        Field::new("percentage_laid_off", DataType::Utf8, true),
        Field::new("date", DataType::Date32, true),
        Field::new("stage", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("funds_raised_millions", DataType::Int64, true),
    ])
}

/// Write the cleaned rows as a single-batch `cleaned.parquet` under `dir`.
pub fn write_clean_parquet(rows: &[LayoffRecord], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating `{}`", dir.display()))?;
    let schema = Arc::new(cleaned_schema());
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

    let company: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.company.as_str()).collect::<Vec<_>>(),
    ));
    let location: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.location.as_str()).collect::<Vec<_>>(),
    ));
    let industry: ArrayRef = Arc::new(StringArray::from(
        rows.iter()
            .map(|r| r.industry.as_deref())
            .collect::<Vec<Option<&str>>>(),
    ));
    let total: ArrayRef = Arc::new(Int64Array::from(
        rows.iter().map(|r| r.total_laid_off).collect::<Vec<_>>(),
    ));
    let percentage: ArrayRef = Arc::new(StringArray::from(
        rows.iter()
            .map(|r| r.percentage_laid_off.as_deref())
            .collect::<Vec<Option<&str>>>(),
    ));
    let date: ArrayRef = Arc::new(Date32Array::from(
        rows.iter()
            .map(|r| r.date.map(|d| (d - epoch).num_days() as i32))
            .collect::<Vec<_>>(),
    ));
    let stage: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.stage.as_str()).collect::<Vec<_>>(),
    ));
    let country: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
    ));
    let funds: ArrayRef = Arc::new(Int64Array::from(
        rows.iter()
            .map(|r| r.funds_raised_millions)
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            company, location, industry, total, percentage, date, stage, country, funds,
        ],
    )
    .context("building cleaned RecordBatch")?;

    let tmp = dir.join("cleaned.parquet.tmp");
    let path = dir.join("cleaned.parquet");
    let file = File::create(&tmp).with_context(|| format!("creating `{}`", tmp.display()))?;
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), schema, None)
        .context("creating ArrowWriter for cleaned table")?;
    writer.write(&batch).context("writing cleaned batch")?;
    writer.close().context("closing cleaned Parquet")?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("renaming `{}` to `{}`", tmp.display(), path.display()))?;

    debug!(rows = rows.len(), "wrote {}", path.display());
    Ok(path)
}

/// Write one report result as `<name>.json` under `dir`: pretty-printed
/// with a trailing newline, tmp file first, then rename over the target.
pub fn write_report_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating `{}`", dir.display()))?;
    let tmp = dir.join(format!(".{}.json.tmp", name));
    let path = dir.join(format!("{}.json", name));

    let mut file = File::create(&tmp).with_context(|| format!("creating `{}`", tmp.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("serializing report `{}`", name))?;
    file.write_all(b"\n")?;

    fs::rename(&tmp, &path)
        .with_context(|| format!("renaming `{}` to `{}`", tmp.display(), path.display()))?;
    debug!(report = name, "wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<LayoffRecord> {
        vec![
            LayoffRecord {
                company: "Acme".into(),
                location: "SF".into(),
                industry: Some("Retail".into()),
                total_laid_off: Some(100),
                percentage_laid_off: Some("0.1".into()),
                date: NaiveDate::from_ymd_opt(2023, 3, 1),
                stage: "Series B".into(),
                country: "United States".into(),
                funds_raised_millions: Some(90),
            },
            LayoffRecord {
                company: "Globex".into(),
                location: "NYC".into(),
                industry: None,
                total_laid_off: None,
                percentage_laid_off: Some("1".into()),
                date: None,
                stage: "Post-IPO".into(),
                country: "Canada".into(),
                funds_raised_millions: None,
            },
        ]
    }

    #[test]
    fn csv_round_trips_the_cleaned_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = write_clean_csv(&sample_rows(), dir.path())?;

        let mut rdr = csv::Reader::from_path(&path)?;
        let back: Vec<LayoffRecord> = rdr.deserialize().collect::<Result<_, _>>()?;
        assert_eq!(back, sample_rows());
        Ok(())
    }

    #[test]
    fn parquet_holds_every_row_and_the_date_column() -> Result<()> {
        let dir = tempdir()?;
        let path = write_clean_parquet(&sample_rows(), dir.path())?;

        let file = File::open(&path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(1024)
            .build()?;
        let batches: Vec<_> = reader.collect::<Result<_, _>>()?;
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);

        let date_col = batches[0]
            .column(5)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert!(!date_col.is_null(0));
        assert!(date_col.is_null(1));
        Ok(())
    }

    #[test]
    fn report_json_is_pretty_with_trailing_newline() -> Result<()> {
        let dir = tempdir()?;
        let path = write_report_json(dir.path(), "01_example", &sample_rows())?;

        assert_eq!(path.file_name().unwrap(), "01_example.json");
        let text = fs::read_to_string(&path)?;
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value.as_array().unwrap().len(), 2);
        Ok(())
    }
}
