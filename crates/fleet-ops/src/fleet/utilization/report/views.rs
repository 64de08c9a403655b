use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::scoring::{ConsistencyBand, Momentum, ScoreBreakdown};
use crate::fleet::domain::TruckId;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetUtilizationReport {
    pub range: String,
    pub window: WindowView,
    pub fleet: FleetView,
    pub pillars: PillarsView,
    pub score: ScoreView,
    pub notes: NotesView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days_in_period: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetView {
    pub truck_count: usize,
    pub low_util_threshold_days: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarsView {
    pub overall_utilization: OverallUtilizationView,
    pub revenue_days_per_truck: RevenueDaysPerTruckView,
    pub low_utilization: LowUtilizationView,
    pub consistency: ConsistencyView,
    pub trend: TrendView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallUtilizationView {
    pub total_revenue_days: u32,
    pub available_days: i64,
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDaysPerTruckView {
    pub avg_revenue_days_per_truck: f64,
    pub by_truck: Vec<TruckUtilizationView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckUtilizationView {
    pub truck_id: TruckId,
    pub unit_number: String,
    pub status: String,
    pub revenue_days: u32,
    pub is_low_util: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowUtilizationView {
    pub low_util_count: usize,
    pub low_util_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyView {
    pub std_dev: f64,
    pub cv: Option<f64>,
    pub penalty: i32,
    pub band: ConsistencyBand,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendView {
    pub months: Vec<MonthView>,
    pub slope_days_per_month: f64,
    pub points: i32,
    pub momentum: Momentum,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month_start: DateTime<Utc>,
    pub avg_revenue_days_per_truck: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    pub fleet_util_score: i32,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesView {
    pub missing_dates_behavior: &'static str,
}
