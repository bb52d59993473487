//! Column-name normalization.
//!
//! Exporter versions disagree on header spellings; this maps every observed
//! alias onto a canonical field name. Unknown columns pass through unchanged
//! (tag columns such as `tag:project` are looked up verbatim later).

use super::csv_parser::RawTable;
use super::errors::IngestError;

/// Observed exporter headers mapped to canonical field names.
pub const COLUMN_ALIASES: [(&str, &str); 35] = [
    // Dates
    ("Date", "date"),
    ("Usage Date", "date"),
    ("UsageDate", "date"),
    // Accounts
    ("Account", "account_id"),
    ("Account ID", "account_id"),
    ("AccountId", "account_id"),
    ("Account Name", "account_name"),
    ("AccountName", "account_name"),
    // Services
    ("Service", "service_name"),
    ("Service Name", "service_name"),
    ("Product Name", "service_name"),
    ("ProductName", "service_name"),
    // Descriptions
    ("Description", "description"),
    ("Service Description", "description"),
    // Resources
    ("Resource", "resource_id"),
    ("Resource ID", "resource_id"),
    ("ResourceId", "resource_id"),
    // Regions
    ("Region", "region"),
    ("AWS Region", "region"),
    // Costs
    ("Cost", "cost"),
    ("Total Cost", "cost"),
    ("Unblended Cost", "cost"),
    ("UnblendedCost", "cost"),
    ("Blended Cost", "cost"),
    // Usage
    ("Usage Type", "usage_type"),
    ("UsageType", "usage_type"),
    ("Usage Amount", "usage_amount"),
    ("UsageAmount", "usage_amount"),
    ("Usage Quantity", "usage_amount"),
    ("Unit", "usage_unit"),
    // Organizational tags
    ("Environment", "environment"),
    ("Department", "department"),
    ("Project", "project"),
    ("Cost Center", "cost_center"),
    ("CostCenter", "cost_center"),
];

/// Canonical columns a file must provide for row conversion to run at all.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "service_name", "cost"];

/// Maps a header to its canonical name, or returns it unchanged when no
/// alias is known.
pub fn canonical_column_name(header: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == header)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(header)
}

/// Renames known header aliases to canonical names. Idempotent: canonical
/// names are never themselves aliases, so a second pass is a no-op.
pub fn normalize_columns(mut table: RawTable) -> RawTable {
    for header in &mut table.headers {
        if let Some((_, canonical)) = COLUMN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == header.as_str())
        {
            *header = (*canonical).to_string();
        }
    }
    table
}

/// Confirms the hard-required canonical columns are present after
/// normalization. Callers must not attempt row conversion on a table that
/// fails this check.
pub fn validate_required_columns(table: &RawTable) -> Result<(), IngestError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| table.column_index(column).is_none())
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::Schema(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_renames_known_aliases() {
        let normalized = normalize_columns(table(&["Usage Date", "Product Name", "Unblended Cost"]));
        assert_eq!(normalized.headers, vec!["date", "service_name", "cost"]);
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let normalized = normalize_columns(table(&["Date", "tag:project", "Mystery"]));
        assert_eq!(normalized.headers, vec!["date", "tag:project", "Mystery"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_columns(table(&["Usage Date", "Service", "Cost", "Environment"]));
        let twice = normalize_columns(once.clone());
        assert_eq!(once.headers, twice.headers);
    }

    #[test]
    fn test_required_columns_ok_after_normalization() {
        let normalized = normalize_columns(table(&["Date", "Service", "Cost"]));
        assert!(validate_required_columns(&normalized).is_ok());
    }

    #[test]
    fn test_missing_required_columns_are_named() {
        let err = validate_required_columns(&table(&["date", "Description"])).unwrap_err();
        match err {
            IngestError::Schema(missing) => {
                assert_eq!(missing, vec!["service_name", "cost"]);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    // Property: normalization is idempotent for any header mix, because
    // canonical names are never themselves aliases.
    proptest! {
        #[test]
        fn prop_normalization_idempotent(
            headers in proptest::collection::vec(
                prop_oneof![
                    Just("Usage Date".to_string()),
                    Just("Service".to_string()),
                    Just("Unblended Cost".to_string()),
                    Just("Environment".to_string()),
                    Just("tag:project".to_string()),
                    "[A-Za-z :]{0,12}",
                ],
                0..8,
            )
        ) {
            let raw = RawTable { headers, rows: Vec::new() };
            let once = normalize_columns(raw);
            let twice = normalize_columns(once.clone());
            prop_assert_eq!(once.headers, twice.headers);
        }
    }
}
