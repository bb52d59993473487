/// Environment assigned to records whose upload row carries no environment tag.
pub const DEFAULT_ENVIRONMENT: &str = "cielmobility";

/// Raw environment tag values that collapse into [`MERGED_PROJECT_ENVIRONMENT`].
pub const ENVIRONMENT_ALIASES: [&str; 2] = ["dev-smartmobility", "prd-smartmobility"];

/// Canonical environment for the secondary tenant's project. Primary-batch
/// records tagged with this environment are dropped during a two-source merge
/// because the secondary batch is authoritative for that project.
pub const MERGED_PROJECT_ENVIRONMENT: &str = "smartmobility";

/// Billing currency of the exporter files.
pub const BASE_CURRENCY: &str = "USD";

/// Settlement currency for the converted view.
pub const TARGET_CURRENCY: &str = "KRW";

/// Group key substituted for blank environments in raw rollups.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Decimal precision for monetary display values.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
