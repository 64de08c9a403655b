mod consistency;
mod pillars;
mod trend;

pub use consistency::{
    penalty_for_cv, population_std_dev, score_consistency, ConsistencyBand, ConsistencyScore,
};
pub use pillars::{PillarPoints, PillarScorer, PlaceholderPillars, PLACEHOLDER_PILLAR_POINTS};
pub use trend::{points_for_slope, score_trend, trend_slope, MonthAverage, Momentum, TrendScore};

use serde::Serialize;

/// Ceiling of the fleet-utilization category within the overall readiness score.
pub const MAX_FLEET_UTIL_SCORE: i32 = 25;

/// Per-pillar contributions; pillars 4 and 5 are the consistency penalty and trend points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub pillar1: i32,
    pub pillar2: i32,
    pub pillar3: i32,
    pub pillar4: i32,
    pub pillar5: i32,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> i32 {
        self.pillar1 + self.pillar2 + self.pillar3 + self.pillar4 + self.pillar5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeScore {
    pub raw_score: i32,
    pub fleet_util_score: i32,
    pub breakdown: ScoreBreakdown,
}

pub fn composite_score(
    pillars: PillarPoints,
    consistency_penalty: i32,
    trend_points: i32,
) -> CompositeScore {
    let breakdown = ScoreBreakdown {
        pillar1: pillars.overall_utilization,
        pillar2: pillars.revenue_days_per_truck,
        pillar3: pillars.low_utilization,
        pillar4: consistency_penalty,
        pillar5: trend_points,
    };
    let raw_score = breakdown.raw_total();

    CompositeScore {
        raw_score,
        fleet_util_score: raw_score.clamp(0, MAX_FLEET_UTIL_SCORE),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillars(points: i32) -> PillarPoints {
        PillarPoints {
            overall_utilization: points,
            revenue_days_per_truck: points,
            low_utilization: points,
        }
    }

    #[test]
    fn placeholder_pillars_with_strong_trend_clamp_to_ceiling() {
        let score = composite_score(pillars(8), 0, 3);
        assert_eq!(score.raw_score, 27);
        assert_eq!(score.fleet_util_score, 25);
    }

    #[test]
    fn penalties_reduce_the_base() {
        let score = composite_score(pillars(8), -4, -1);
        assert_eq!(score.raw_score, 19);
        assert_eq!(score.fleet_util_score, 19);
        assert_eq!(score.breakdown.pillar4, -4);
        assert_eq!(score.breakdown.pillar5, -1);
    }

    #[test]
    fn negative_totals_clamp_to_zero() {
        let score = composite_score(pillars(0), -5, -3);
        assert_eq!(score.raw_score, -8);
        assert_eq!(score.fleet_util_score, 0);
    }

    #[test]
    fn clamped_score_always_within_bounds() {
        for base in [-20, 0, 8, 20, 40] {
            for penalty in [0, -2, -4, -5] {
                for trend in [-3, -1, 0, 1, 3] {
                    let score = composite_score(pillars(base), penalty, trend);
                    assert!((0..=MAX_FLEET_UTIL_SCORE).contains(&score.fleet_util_score));
                }
            }
        }
    }
}
