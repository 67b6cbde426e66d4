use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use genometa_model::{AuditFields, RawRecord};

use crate::audit::{Audited, row_hash};
use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_lowercase()
}

/// Field delimiter chosen from the file extension: `.tsv` is tab separated,
/// everything else comma separated.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Column that must appear in the header for each entity.
fn required_column<R: RawRecord>() -> &'static str {
    R::ENTITY.primary_key().unwrap_or("run_id")
}

/// Read every record of a delimited file as raw text, attaching audit fields.
///
/// Cells are kept exactly as written; only header names are normalized
/// (trimmed, lowercased). Unknown columns are ignored and absent ones read
/// as empty.
pub fn read_records<R>(path: &Path, ingested_at: &str) -> Result<Vec<R>>
where
    R: RawRecord + Audited + Default + DeserializeOwned,
{
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: StringRecord = reader
        .headers()
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize_header)
        .collect();
    reader.set_headers(headers.clone());

    let required = required_column::<R>();
    if !headers.iter().any(|header| header == required) {
        return Err(IngestError::MissingColumn {
            column: required,
            path: path.to_path_buf(),
        });
    }
    let probe = R::default();
    let unknown: Vec<&str> = headers
        .iter()
        .filter(|header| probe.cell(header).is_none())
        .collect();
    if !unknown.is_empty() {
        warn!(
            entity = %R::ENTITY,
            columns = ?unknown,
            "ignoring unknown columns"
        );
    }

    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut row: R =
            record
                .deserialize(Some(&headers))
                .map_err(|source| IngestError::Record {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, csv::Position::line),
                    source,
                })?;
        row.set_audit(AuditFields {
            ingested_at: ingested_at.to_string(),
            source_file: source_file.clone(),
            row_hash: row_hash(&headers, &record),
        });
        rows.push(row);
    }
    debug!(entity = %R::ENTITY, rows = rows.len(), "records read");
    Ok(rows)
}
