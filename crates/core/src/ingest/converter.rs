//! Row conversion: one normalized table row into a canonical cost record.
//!
//! Conversion never aborts a file. A row either becomes a record or is
//! reported as a typed skip; the only hard precondition is a parseable
//! usage date, which is also what removes any residual summary rows the
//! loader's prefix scan let through.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::csv_parser::RawTable;
use crate::constants::{
    BASE_CURRENCY, DEFAULT_ENVIRONMENT, ENVIRONMENT_ALIASES, MERGED_PROJECT_ENVIRONMENT,
};
use crate::records::CanonicalCostRecord;

/// Date formats tried in order before the flexible fallback pass.
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Formats accepted by the flexible fallback pass.
const FLEXIBLE_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%b %d, %Y",
    "%d %b %Y",
];

/// Data-center labels appearing in description text, mapped to region
/// codes. First match wins.
pub const REGION_LABELS: [(&str, &str); 10] = [
    ("Asia Pacific (Seoul)", "ap-northeast-2"),
    ("Asia Pacific (Tokyo)", "ap-northeast-1"),
    ("Asia Pacific (Sydney)", "ap-southeast-2"),
    ("US East (Northern Virginia)", "us-east-1"),
    ("US East (Ohio)", "us-east-2"),
    ("US East (Houston)", "us-east-3"),
    ("US West (Oregon)", "us-west-2"),
    ("US West (Northern California)", "us-west-1"),
    ("EU (Germany)", "eu-central-1"),
    ("EU (Ireland)", "eu-west-1"),
];

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("static pattern"));

/// Why a row produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The date cell was absent or blank. Summary rows that survive the
    /// loader's prefix scan land here.
    MissingDate,
    /// The date cell held text none of the known formats accept.
    UnparseableDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSkip {
    pub row_index: usize,
    pub reason: SkipReason,
}

/// Aggregate outcome of converting a table.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub total_rows: usize,
    pub converted: usize,
    pub skipped: Vec<RowSkip>,
}

/// Parses a usage date, trying the fixed format list then the flexible
/// fallback. Returns `None` for text no format accepts.
pub fn parse_usage_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS.iter().chain(FLEXIBLE_DATE_FORMATS.iter()) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }

    None
}

/// Strips currency symbols and separators, then parses the remainder as a
/// decimal. Unparseable text cleans to zero; a negative amount clamps to
/// zero so the non-negative cost invariant holds. Never fails.
pub fn clean_cost_value(raw: &str) -> Decimal {
    let cleaned = NON_NUMERIC.replace_all(raw.trim(), "");
    match cleaned.parse::<Decimal>() {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            log::warn!("negative cost '{}' clamped to zero", raw);
            Decimal::ZERO
        }
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

/// Scans description text for a known data-center label.
pub fn region_from_description(description: &str) -> Option<&'static str> {
    REGION_LABELS
        .iter()
        .find(|(label, _)| description.contains(label))
        .map(|(_, code)| *code)
}

fn parse_usage_amount(raw: &str) -> Option<Decimal> {
    match raw.trim().parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("unparseable usage amount '{}' treated as absent", raw);
            None
        }
    }
}

/// Read access to one row through canonical column names.
struct RowView<'a> {
    index: &'a HashMap<&'a str, usize>,
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    /// The trimmed cell under `name`, or `None` when the column is absent
    /// or the cell is blank.
    fn get(&self, name: &str) -> Option<&'a str> {
        let idx = *self.index.get(name)?;
        let value = self.cells.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Tag lookup across the three naming conventions, in priority order:
    /// the bare field name, then the `tag:` and `user:` prefixed variants.
    fn tag(&self, field: &str) -> Option<&'a str> {
        self.get(field)
            .or_else(|| self.get(&format!("tag:{field}")))
            .or_else(|| self.get(&format!("user:{field}")))
    }
}

/// Converts rows of one normalized table. Holds the column index so the
/// per-row lookups stay cheap.
pub struct RowConverter<'a> {
    table: &'a RawTable,
    index: HashMap<&'a str, usize>,
}

impl<'a> RowConverter<'a> {
    pub fn new(table: &'a RawTable) -> Self {
        let mut index = HashMap::with_capacity(table.headers.len());
        for (i, header) in table.headers.iter().enumerate() {
            // First occurrence wins when aliases collapse onto one name.
            index.entry(header.as_str()).or_insert(i);
        }
        Self { table, index }
    }

    /// Converts the row at `row_index`, or reports why it was skipped.
    pub fn convert_row(&self, row_index: usize) -> Result<CanonicalCostRecord, SkipReason> {
        let cells = &self.table.rows[row_index];
        let view = RowView {
            index: &self.index,
            cells,
        };

        let usage_date = match view.get("date") {
            None => return Err(SkipReason::MissingDate),
            Some(raw) => parse_usage_date(raw)
                .ok_or_else(|| SkipReason::UnparseableDate(raw.to_string()))?,
        };

        let cost = view.get("cost").map(clean_cost_value).unwrap_or(Decimal::ZERO);

        let department = view.tag("department").map(str::to_string);
        let explicit_project = view.tag("project").map(str::to_string);
        let cost_center = view.tag("cost_center").map(str::to_string);
        let environment_tag = view.tag("environment").map(str::to_string);

        let resolved_environment = environment_tag
            .clone()
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        // Derive the project from a hyphenated environment before any alias
        // rewrite, e.g. "prd-smartmobility" -> "smartmobility".
        let project = explicit_project.or_else(|| {
            resolved_environment
                .split_once('-')
                .map(|(_, rest)| rest.to_string())
        });

        // Alias rewrite happens last; the raw tag value survives as
        // original_environment and is never touched again.
        let environment = if ENVIRONMENT_ALIASES.contains(&resolved_environment.as_str()) {
            MERGED_PROJECT_ENVIRONMENT.to_string()
        } else {
            resolved_environment
        };

        let description = view.get("description").map(str::to_string);
        let region = view.get("region").map(str::to_string).or_else(|| {
            description
                .as_deref()
                .and_then(region_from_description)
                .map(str::to_string)
        });

        Ok(CanonicalCostRecord {
            usage_date,
            account_id: view.get("account_id").unwrap_or("unknown").to_string(),
            account_name: view.get("account_name").map(str::to_string),
            service_name: view.get("service_name").unwrap_or("Unknown").to_string(),
            description,
            resource_id: view.get("resource_id").map(str::to_string),
            region,
            cost,
            currency: BASE_CURRENCY.to_string(),
            department,
            project,
            environment,
            original_environment: environment_tag,
            cost_center,
            usage_type: view.get("usage_type").map(str::to_string),
            usage_amount: view.get("usage_amount").and_then(parse_usage_amount),
            usage_unit: view.get("usage_unit").map(str::to_string),
            raw_row: Some(self.raw_snapshot(cells)),
        })
    }

    fn raw_snapshot(&self, cells: &[String]) -> Value {
        let mut map = Map::new();
        for (i, header) in self.table.headers.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            map.insert(header.clone(), Value::String(cell.to_string()));
        }
        Value::Object(map)
    }
}

/// Converts every row of a table, collecting typed skips instead of
/// aborting. One malformed row never voids the rest of the file.
pub fn convert_table(table: &RawTable) -> (Vec<CanonicalCostRecord>, ConversionReport) {
    let converter = RowConverter::new(table);
    let mut records = Vec::with_capacity(table.rows.len());
    let mut report = ConversionReport {
        total_rows: table.rows.len(),
        ..Default::default()
    };

    for row_index in 0..table.rows.len() {
        match converter.convert_row(row_index) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!(
                    "skipping row {}: {:?}; cells: {:?}",
                    row_index,
                    reason,
                    table.rows[row_index]
                );
                report.skipped.push(RowSkip { row_index, reason });
            }
        }
    }

    report.converted = records.len();
    (records, report)
}
