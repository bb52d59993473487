//! Record filtering for the query layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::CanonicalCostRecord;

/// Filter criteria applied to a record set. All criteria are optional and
/// combine with AND; an empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Match any of the given service names (case-insensitive).
    pub services: Option<Vec<String>>,
    pub environment: Option<String>,
    pub project: Option<String>,
    /// Case-insensitive department match.
    pub department: Option<String>,
    /// Inclusive start of the usage-date range.
    pub date_start: Option<NaiveDate>,
    /// Inclusive end of the usage-date range.
    pub date_end: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn matches(&self, record: &CanonicalCostRecord) -> bool {
        if let Some(services) = &self.services {
            let name = record.service_name.to_lowercase();
            if !services.iter().any(|s| s.to_lowercase() == name) {
                return false;
            }
        }

        if let Some(environment) = &self.environment {
            if &record.environment != environment {
                return false;
            }
        }

        if let Some(project) = &self.project {
            match &record.project {
                Some(p) if p == project => {}
                _ => return false,
            }
        }

        if let Some(department) = &self.department {
            match &record.department {
                Some(d) if d.to_lowercase() == department.to_lowercase() => {}
                _ => return false,
            }
        }

        if let Some(start) = self.date_start {
            if record.usage_date < start {
                return false;
            }
        }

        if let Some(end) = self.date_end {
            if record.usage_date > end {
                return false;
            }
        }

        true
    }
}

/// Returns the records matching `filter`, preserving input order.
pub fn filter_records<'a>(
    records: &'a [CanonicalCostRecord],
    filter: &RecordFilter,
) -> Vec<&'a CanonicalCostRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
