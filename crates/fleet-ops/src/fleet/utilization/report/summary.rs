use super::super::metrics::FleetMetrics;
use super::super::revenue_days::RevenueDays;
use super::super::scoring::{CompositeScore, ConsistencyScore, TrendScore};
use super::super::window::Window;
use super::views::{
    ConsistencyView, FleetUtilizationReport, FleetView, LowUtilizationView, MonthView, NotesView,
    OverallUtilizationView, PillarsView, RevenueDaysPerTruckView, ScoreView, TrendView,
    TruckUtilizationView, WindowView,
};
use crate::fleet::domain::Truck;

pub const MISSING_DATES_BEHAVIOR: &str = "Loads with neither a pickup nor a delivery date are \
excluded from revenue-day counts rather than counted as a single day. A load with only one of \
the two dates counts that one day.";

/// Everything computed for one fleet utilization request, before shaping for output.
#[derive(Debug, Clone)]
pub struct FleetUtilization {
    pub range: &'static str,
    pub window: Window,
    pub trucks: Vec<Truck>,
    pub revenue_days: RevenueDays,
    pub metrics: FleetMetrics,
    pub consistency: ConsistencyScore,
    pub trend: TrendScore,
    pub score: CompositeScore,
}

impl FleetUtilization {
    pub fn truck_rows(&self) -> Vec<TruckUtilizationView> {
        self.trucks
            .iter()
            .map(|truck| {
                let revenue_days = self.revenue_days.count(&truck.id);
                TruckUtilizationView {
                    truck_id: truck.id.clone(),
                    unit_number: truck.unit_number.clone(),
                    status: truck.status.clone(),
                    revenue_days,
                    is_low_util: self.metrics.is_low_util(revenue_days),
                }
            })
            .collect()
    }

    pub fn summary(&self) -> FleetUtilizationReport {
        let metrics = &self.metrics;

        let months = self
            .trend
            .months
            .iter()
            .map(|month| MonthView {
                month_start: month.month_start,
                avg_revenue_days_per_truck: month.avg_revenue_days_per_truck,
            })
            .collect();

        FleetUtilizationReport {
            range: self.range.to_string(),
            window: WindowView {
                start: self.window.start,
                end: self.window.end,
                days_in_period: metrics.days_in_period,
            },
            fleet: FleetView {
                truck_count: metrics.truck_count,
                low_util_threshold_days: metrics.low_util_threshold_days,
            },
            pillars: PillarsView {
                overall_utilization: OverallUtilizationView {
                    total_revenue_days: metrics.total_revenue_days,
                    available_days: metrics.available_days,
                    utilization_rate: metrics.utilization_rate,
                },
                revenue_days_per_truck: RevenueDaysPerTruckView {
                    avg_revenue_days_per_truck: metrics.avg_revenue_days_per_truck,
                    by_truck: self.truck_rows(),
                },
                low_utilization: LowUtilizationView {
                    low_util_count: metrics.low_util_count,
                    low_util_pct: metrics.low_util_pct,
                },
                consistency: ConsistencyView {
                    std_dev: self.consistency.std_dev,
                    cv: self.consistency.cv,
                    penalty: self.consistency.penalty,
                    band: self.consistency.band,
                },
                trend: TrendView {
                    months,
                    slope_days_per_month: self.trend.slope,
                    points: self.trend.points,
                    momentum: self.trend.momentum,
                },
            },
            score: ScoreView {
                fleet_util_score: self.score.fleet_util_score,
                breakdown: self.score.breakdown,
            },
            notes: NotesView {
                missing_dates_behavior: MISSING_DATES_BEHAVIOR,
            },
        }
    }
}
