use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::metrics::{mean, FleetMetrics};
use super::report::FleetUtilization;
use super::repository::{FleetRepository, RepositoryError};
use super::revenue_days::RevenueDays;
use super::scoring::{
    composite_score, score_consistency, score_trend, MonthAverage, PillarScorer,
    PlaceholderPillars,
};
use super::window::{RangeSelection, Window};
use crate::fleet::domain::{CompanyId, TruckId};

/// Service composing the fleet store, the revenue-day aggregator, and the scoring rubric.
pub struct FleetUtilizationService<R> {
    repository: Arc<R>,
    pillars: Arc<dyn PillarScorer>,
}

impl<R> FleetUtilizationService<R>
where
    R: FleetRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_pillar_scorer(repository, Arc::new(PlaceholderPillars))
    }

    pub fn with_pillar_scorer(repository: Arc<R>, pillars: Arc<dyn PillarScorer>) -> Self {
        Self {
            repository,
            pillars,
        }
    }

    /// Compute the fleet utilization category for a tenant.
    ///
    /// `now` anchors both the requested window and the three trailing calendar months
    /// used for the trend.
    pub fn utilization(
        &self,
        company: &CompanyId,
        range: RangeSelection,
        now: DateTime<Utc>,
    ) -> Result<FleetUtilization, FleetUtilizationError> {
        let window = range.window(now);
        let trucks = self.repository.trucks(company)?;
        let truck_ids: Vec<TruckId> = trucks.iter().map(|truck| truck.id.clone()).collect();

        let revenue_days = self.tally(company, &window, &truck_ids)?;
        let counts = revenue_days.counts();
        let metrics = FleetMetrics::from_counts(&counts, window.days_in_period());
        let consistency = score_consistency(&counts);

        let current_month = Window::month_containing(now.date_naive());
        let last_month = current_month.previous_month();
        let two_months_ago = last_month.previous_month();
        let trend = score_trend([
            self.month_average(company, &two_months_ago, &truck_ids)?,
            self.month_average(company, &last_month, &truck_ids)?,
            self.month_average(company, &current_month, &truck_ids)?,
        ]);

        let pillars = self.pillars.score(&metrics);
        let score = composite_score(pillars, consistency.penalty, trend.points);

        info!(
            company = %company,
            range = range.label(),
            trucks = metrics.truck_count,
            utilization_rate = metrics.utilization_rate,
            fleet_util_score = score.fleet_util_score,
            "fleet utilization computed"
        );

        Ok(FleetUtilization {
            range: range.label(),
            window,
            trucks,
            revenue_days,
            metrics,
            consistency,
            trend,
            score,
        })
    }

    fn tally(
        &self,
        company: &CompanyId,
        window: &Window,
        truck_ids: &[TruckId],
    ) -> Result<RevenueDays, FleetUtilizationError> {
        let loads = self.repository.loads_overlapping(company, window)?;
        let tally = RevenueDays::tally(window, truck_ids, &loads);
        let stats = tally.stats();

        debug!(
            company = %company,
            start = %window.start,
            end = %window.end,
            loads = loads.len(),
            counted = stats.counted_loads,
            undated = stats.undated_loads,
            untracked = stats.untracked_loads,
            "revenue days tallied"
        );

        Ok(tally)
    }

    fn month_average(
        &self,
        company: &CompanyId,
        month: &Window,
        truck_ids: &[TruckId],
    ) -> Result<MonthAverage, FleetUtilizationError> {
        let tally = self.tally(company, month, truck_ids)?;
        Ok(MonthAverage {
            month_start: month.start,
            avg_revenue_days_per_truck: mean(&tally.counts()),
        })
    }
}

/// Error raised by the fleet utilization service.
#[derive(Debug, thiserror::Error)]
pub enum FleetUtilizationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
