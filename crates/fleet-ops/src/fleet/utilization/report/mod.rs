mod summary;
pub mod views;

pub use summary::{FleetUtilization, MISSING_DATES_BEHAVIOR};
pub use views::FleetUtilizationReport;
