use super::super::metrics::FleetMetrics;

/// Points awarded to the three utilization pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillarPoints {
    pub overall_utilization: i32,
    pub revenue_days_per_truck: i32,
    pub low_utilization: i32,
}

impl PillarPoints {
    pub fn total(&self) -> i32 {
        self.overall_utilization + self.revenue_days_per_truck + self.low_utilization
    }
}

/// Maps fleet metrics to pillar points.
///
/// Implementations should award 0..=8 points per pillar so that a perfect fleet reaches
/// the 24 point base before consistency and trend adjustments.
pub trait PillarScorer: Send + Sync {
    fn score(&self, metrics: &FleetMetrics) -> PillarPoints;
}

pub const PLACEHOLDER_PILLAR_POINTS: i32 = 8;

/// Awards every pillar the same fixed points until utilization tiers are defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderPillars;

impl PillarScorer for PlaceholderPillars {
    fn score(&self, _metrics: &FleetMetrics) -> PillarPoints {
        PillarPoints {
            overall_utilization: PLACEHOLDER_PILLAR_POINTS,
            revenue_days_per_truck: PLACEHOLDER_PILLAR_POINTS,
            low_utilization: PLACEHOLDER_PILLAR_POINTS,
        }
    }
}
