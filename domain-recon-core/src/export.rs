//! Report export to CSV and JSON files.
//!
//! Output files are named `<domain>.csv` / `<domain>.json` inside the chosen
//! directory and silently overwritten on every run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReconError, ReconResult};
use crate::types::ReconReport;

/// Map a domain to a filesystem-safe file stem (IPv6 colons become `_`).
fn file_stem(domain: &str) -> String {
    domain.replace(':', "_")
}

/// Path of the CSV export for `domain` under `out_dir`.
#[must_use]
pub fn csv_path(out_dir: &Path, domain: &str) -> PathBuf {
    out_dir.join(format!("{}.csv", file_stem(domain)))
}

/// Path of the JSON export for `domain` under `out_dir`.
#[must_use]
pub fn json_path(out_dir: &Path, domain: &str) -> PathBuf {
    out_dir.join(format!("{}.json", file_stem(domain)))
}

/// Write a flat CSV rendering of the report, returning the file path.
///
/// Layout: a `Section,Key,Value` header, one row per WHOIS field from
/// [`WhoisSummary::fields`](crate::WhoisSummary::fields), then one
/// `DNS,<TYPE>,<value>` row per DNS value with a `-` placeholder row for
/// record types that returned nothing.
pub fn write_csv(report: &ReconReport, out_dir: &Path) -> ReconResult<PathBuf> {
    let path = csv_path(out_dir, &report.domain);
    let mut writer = csv::Writer::from_path(&path).map_err(|e| {
        ReconError::ExportError(format!("Failed to create {}: {e}", path.display()))
    })?;

    write_rows(&mut writer, report)
        .map_err(|e| ReconError::ExportError(format!("Failed to write {}: {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| ReconError::ExportError(format!("Failed to flush {}: {e}", path.display())))?;

    Ok(path)
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    report: &ReconReport,
) -> Result<(), csv::Error> {
    writer.write_record(["Section", "Key", "Value"])?;
    for (key, value) in report.whois.fields() {
        writer.write_record(["WHOIS", key, value.as_str()])?;
    }
    for (record_type, values) in &report.dns {
        let record_type = record_type.to_string();
        if values.is_empty() {
            writer.write_record(["DNS", record_type.as_str(), "-"])?;
        } else {
            for value in values {
                writer.write_record(["DNS", record_type.as_str(), value.as_str()])?;
            }
        }
    }
    Ok(())
}

/// Write a pretty-printed JSON rendering of the report, returning the file path.
pub fn write_json(report: &ReconReport, out_dir: &Path) -> ReconResult<PathBuf> {
    let path = json_path(out_dir, &report.domain);
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ReconError::ExportError(format!("Failed to serialize report: {e}")))?;
    fs::write(&path, json)
        .map_err(|e| ReconError::ExportError(format!("Failed to write {}: {e}", path.display())))?;
    Ok(path)
}

/// Write both renderings, returning `(csv_path, json_path)`.
pub fn write_all(report: &ReconReport, out_dir: &Path) -> ReconResult<(PathBuf, PathBuf)> {
    let csv = write_csv(report, out_dir)?;
    let json = write_json(report, out_dir)?;
    Ok((csv, json))
}
