//! Reporting rollups and summary statistics over the combined record set.

mod model;
mod service;

#[cfg(test)]
mod service_tests;

pub use model::{DateRange, SummaryStats, SummaryStatsWithKrw};
pub use service::{
    costs_by_environment, costs_by_environment_krw, costs_by_project, costs_by_service,
    costs_by_service_krw, daily_costs, daily_costs_by_environment, summary_stats,
    summary_stats_with_krw,
};
