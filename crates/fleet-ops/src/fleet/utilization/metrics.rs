use super::revenue_days::RevenueDays;
use super::window::Window;

/// Revenue-day floor below which a truck counts as under-utilized. Smaller fleets get a
/// higher bar since they have less dispatch slack to absorb an idle unit.
pub fn low_util_threshold_days(truck_count: usize) -> u32 {
    match truck_count {
        0..=9 => 18,
        10..=50 => 16,
        _ => 15,
    }
}

/// Fleet-wide aggregates derived from one revenue-day tally.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetMetrics {
    pub truck_count: usize,
    pub days_in_period: i64,
    pub total_revenue_days: u32,
    pub available_days: i64,
    pub utilization_rate: f64,
    pub avg_revenue_days_per_truck: f64,
    pub low_util_threshold_days: u32,
    pub low_util_count: usize,
    pub low_util_pct: f64,
}

impl FleetMetrics {
    pub fn from_tally(tally: &RevenueDays, window: &Window) -> Self {
        Self::from_counts(&tally.counts(), window.days_in_period())
    }

    pub fn from_counts(counts: &[u32], days_in_period: i64) -> Self {
        let truck_count = counts.len();
        let total_revenue_days: u32 = counts.iter().sum();
        let available_days = truck_count as i64 * days_in_period;

        let utilization_rate = if available_days > 0 {
            f64::from(total_revenue_days) / available_days as f64
        } else {
            0.0
        };

        let low_util_threshold_days = low_util_threshold_days(truck_count);
        let low_util_count = counts
            .iter()
            .filter(|&&days| days < low_util_threshold_days)
            .count();

        let (avg_revenue_days_per_truck, low_util_pct) = if truck_count > 0 {
            (
                f64::from(total_revenue_days) / truck_count as f64,
                low_util_count as f64 / truck_count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            truck_count,
            days_in_period,
            total_revenue_days,
            available_days,
            utilization_rate,
            avg_revenue_days_per_truck,
            low_util_threshold_days,
            low_util_count,
            low_util_pct,
        }
    }

    pub fn is_low_util(&self, revenue_days: u32) -> bool {
        revenue_days < self.low_util_threshold_days
    }
}

/// Arithmetic mean, zero for an empty fleet.
pub fn mean(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().map(|&days| f64::from(days)).sum::<f64>() / counts.len() as f64
}
