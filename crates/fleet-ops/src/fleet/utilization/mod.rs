//! Fleet utilization ("expansion readiness") scoring.
//!
//! A request resolves a reporting window, tallies per-truck revenue days from the tenant's
//! loads, derives fleet-wide metrics, scores consistency and the three-month trend, and
//! clamps the combined pillar points into the category's 0-25 range.

pub mod metrics;
pub mod report;
pub mod repository;
pub mod revenue_days;
pub mod router;
pub mod scoring;
pub mod service;
pub mod window;

#[cfg(test)]
mod tests;

pub use metrics::{low_util_threshold_days, FleetMetrics};
pub use report::{FleetUtilization, FleetUtilizationReport, MISSING_DATES_BEHAVIOR};
pub use repository::{FleetRepository, RepositoryError};
pub use revenue_days::{RevenueDays, TallyStats};
pub use router::{fleet_router, UtilizationQuery, COMPANY_HEADER};
pub use scoring::{
    ConsistencyBand, Momentum, PillarPoints, PillarScorer, PlaceholderPillars,
    MAX_FLEET_UTIL_SCORE,
};
pub use service::{FleetUtilizationError, FleetUtilizationService};
pub use window::{parse_instant, RangeKeyword, RangeSelection, Window};
