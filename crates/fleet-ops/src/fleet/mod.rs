pub mod domain;
pub mod import;
pub mod utilization;

pub use domain::{CompanyId, Load, LoadId, Truck, TruckId};
