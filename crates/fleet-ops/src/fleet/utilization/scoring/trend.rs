use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction and strength of the three-month utilization trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Momentum {
    Flat,
    ImprovingStrong,
    ImprovingMild,
    DecliningStrong,
    DecliningMild,
}

impl Momentum {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::ImprovingStrong => "Improving (strong)",
            Self::ImprovingMild => "Improving (mild)",
            Self::DecliningStrong => "Declining (strong)",
            Self::DecliningMild => "Declining (mild)",
        }
    }
}

/// Average revenue days per truck for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthAverage {
    pub month_start: DateTime<Utc>,
    pub avg_revenue_days_per_truck: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendScore {
    /// Oldest first: two months ago, last month, current month.
    pub months: [MonthAverage; 3],
    pub slope: f64,
    pub points: i32,
    pub momentum: Momentum,
}

/// Two-point estimate of the monthly change in days per truck.
pub fn trend_slope(oldest: f64, current: f64) -> f64 {
    (current - oldest) / 2.0
}

/// The ladder is evaluated top to bottom; a slope of exactly -0.5 lands on the last rung.
pub fn points_for_slope(slope: f64) -> (i32, Momentum) {
    if slope.abs() < 0.5 {
        (0, Momentum::Flat)
    } else if slope >= 1.0 {
        (3, Momentum::ImprovingStrong)
    } else if slope >= 0.5 {
        (1, Momentum::ImprovingMild)
    } else if slope <= -1.0 {
        (-3, Momentum::DecliningStrong)
    } else {
        (-1, Momentum::DecliningMild)
    }
}

pub fn score_trend(months: [MonthAverage; 3]) -> TrendScore {
    let slope = trend_slope(
        months[0].avg_revenue_days_per_truck,
        months[2].avg_revenue_days_per_truck,
    );
    let (points, momentum) = points_for_slope(slope);

    TrendScore {
        months,
        slope,
        points,
        momentum,
    }
}
