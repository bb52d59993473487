//! Tolerant loader for exporter CSV files.
//!
//! Exporter files append summary sections (totals, per-group rollups, daily
//! min/max tables) below the line-item rows. The loader keeps only the
//! leading tabular region and parses it as standard CSV with the first
//! surviving line as header.

use csv::ReaderBuilder;

use super::errors::IngestError;

/// Markers that introduce a summary section. The scan stops at the first
/// line containing any of them; nothing after the cutoff is considered,
/// even lines that would otherwise look like valid data.
pub const SUMMARY_MARKERS: [&str; 5] = [
    "Total,",
    "Cost by Group,",
    "Report for",
    "Daily Max",
    "Daily Min",
];

/// A rectangular table: trimmed header names plus data rows normalized to
/// the header width.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Parses raw file text into a [`RawTable`].
///
/// Fails with [`IngestError::Parse`] when no data line survives the
/// truncation scan or the CSV itself is malformed.
pub fn load_table(content: &str) -> Result<RawTable, IngestError> {
    // Exporter files are UTF-8 with an optional BOM.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    // Prefix scan: keep lines up to the first blank line or summary marker.
    let mut data_region = String::new();
    for line in content.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || SUMMARY_MARKERS.iter().any(|m| stripped.contains(m)) {
            break;
        }
        data_region.push_str(line);
        data_region.push('\n');
    }

    if data_region.is_empty() {
        return Err(IngestError::Parse(
            "no tabular data found before the summary section".to_string(),
        ));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false) // headers handled manually for more control
        .flexible(true)
        .from_reader(data_region.as_bytes());

    let mut all_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::Parse(e.to_string()))?;
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        // Drop fully-empty rows.
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        all_rows.push(row);
    }

    let mut iter = all_rows.into_iter();
    let mut headers: Vec<String> = match iter.next() {
        Some(row) => row.iter().map(|h| h.trim().to_string()).collect(),
        None => {
            return Err(IngestError::Parse(
                "no tabular data found before the summary section".to_string(),
            ))
        }
    };
    let mut rows: Vec<Vec<String>> = iter.collect();

    // Normalize row widths to the header count.
    let width = headers.len();
    for (idx, row) in rows.iter_mut().enumerate() {
        if row.len() < width {
            row.resize(width, String::new());
        } else if row.len() > width {
            log::warn!(
                "row {} has {} columns, expected {}; extra columns ignored",
                idx + 1,
                row.len(),
                width
            );
            row.truncate(width);
        }
    }

    // A trailing delimiter on the header line leaves an empty or
    // auto-generated last column; drop it together with its cells.
    if matches!(headers.last(), Some(last) if last.is_empty() || last.contains("Unnamed")) {
        headers.pop();
        let width = headers.len();
        for row in &mut rows {
            row.truncate(width);
        }
    }

    Ok(RawTable { headers, rows })
}
