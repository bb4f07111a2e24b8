use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::SalesRecord;

/// Demo dataset compiled into the binary.
const SAMPLE_JSON: &str = include_str!("../../data/sales.json");

/// Columns a CSV dataset must provide.
const CSV_COLUMNS: [&str; 4] = ["date", "category", "region", "sales"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load sales records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "date": "2024-01-05", "category": "..", "region": "..", "sales": 100 }]`
/// * `.csv`  – header row `date,category,region,sales`
pub fn load_file(path: &Path) -> Result<Vec<SalesRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parse: fn(BufReader<File>) -> Result<Vec<SalesRecord>> = match ext.as_str() {
        "json" => records_from_json,
        "csv" => records_from_csv,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records =
        parse(BufReader::new(file)).with_context(|| format!("loading {}", path.display()))?;

    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// The bundled demo dataset.
pub fn sample_records() -> Result<Vec<SalesRecord>> {
    records_from_json(SAMPLE_JSON.as_bytes()).context("parsing bundled sample dataset")
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a top-level JSON array of records. Unknown fields are ignored.
pub fn records_from_json<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
    let records: Vec<SalesRecord> =
        serde_json::from_reader(reader).context("parsing JSON sales records")?;
    validate_records(&records)?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV with a `date,category,region,sales` header (any column order).
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in CSV_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV missing '{column}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let record: SalesRecord = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    validate_records(&records)?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// Data-quality checks
// ---------------------------------------------------------------------------

/// Reject records with empty labels or a negative / non-finite amount.
///
/// Dates are deliberately not checked here; the filter reports them.
pub fn validate_records(records: &[SalesRecord]) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        if record.category.trim().is_empty() {
            bail!("Record {i}: empty category");
        }
        if record.region.trim().is_empty() {
            bail!("Record {i}: empty region");
        }
        if !record.sales.is_finite() || record.sales < 0.0 {
            bail!(
                "Record {i}: sales must be a non-negative number, got {}",
                record.sales
            );
        }
    }
    Ok(())
}
