use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::utilization::window::Window;

/// Tenant identifier resolved by the caller before any fleet data is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for trucks, unique within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(pub String);

/// Identifier wrapper for loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadId(pub String);

/// Power unit owned or leased by a tenant. Status is carried through for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    pub id: TruckId,
    pub company_id: CompanyId,
    pub unit_number: String,
    pub status: String,
}

/// Freight movement assigned (or not yet assigned) to a truck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Load {
    pub id: LoadId,
    pub company_id: CompanyId,
    pub truck_id: Option<TruckId>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub deleted: bool,
}

impl Load {
    /// Whether the load may contribute revenue days at all.
    pub fn is_countable(&self) -> bool {
        !self.deleted && self.truck_id.is_some()
    }

    /// Overlap predicate the fleet store uses to select loads for a window: pickup or
    /// delivery inside the window, or a pickup-to-delivery span covering the whole window.
    pub fn overlaps(&self, window: &Window) -> bool {
        let inside = |instant: Option<DateTime<Utc>>| {
            instant
                .map(|value| window.contains(value))
                .unwrap_or(false)
        };

        if inside(self.pickup_date) || inside(self.delivery_date) {
            return true;
        }

        matches!(
            (self.pickup_date, self.delivery_date),
            (Some(pickup), Some(delivery)) if pickup <= window.start && delivery >= window.end
        )
    }
}
