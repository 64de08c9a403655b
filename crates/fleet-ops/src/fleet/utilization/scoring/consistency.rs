use serde::{Deserialize, Serialize};

use super::super::metrics::mean;

/// How evenly revenue days are spread across the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyBand {
    Unknown,
    Strong,
    Caution,
    Poor,
    VeryPoor,
}

impl ConsistencyBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Strong => "Strong",
            Self::Caution => "Caution",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyScore {
    pub std_dev: f64,
    /// `None` when the fleet averages zero revenue days; never read as zero dispersion.
    pub cv: Option<f64>,
    pub penalty: i32,
    pub band: ConsistencyBand,
}

/// Population (not sample) standard deviation.
pub fn population_std_dev(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }

    let avg = mean(counts);
    let variance = counts
        .iter()
        .map(|&days| {
            let delta = f64::from(days) - avg;
            delta * delta
        })
        .sum::<f64>()
        / counts.len() as f64;

    variance.sqrt()
}

/// Penalty-only mapping; a missing CV neither rewards nor punishes.
pub fn penalty_for_cv(cv: Option<f64>) -> (i32, ConsistencyBand) {
    match cv {
        None => (0, ConsistencyBand::Unknown),
        Some(cv) if cv <= 0.20 => (0, ConsistencyBand::Strong),
        Some(cv) if cv <= 0.35 => (-2, ConsistencyBand::Caution),
        Some(cv) if cv <= 0.50 => (-4, ConsistencyBand::Poor),
        Some(_) => (-5, ConsistencyBand::VeryPoor),
    }
}

pub fn score_consistency(counts: &[u32]) -> ConsistencyScore {
    let std_dev = population_std_dev(counts);
    let avg = mean(counts);
    let cv = if avg > 0.0 { Some(std_dev / avg) } else { None };
    let (penalty, band) = penalty_for_cv(cv);

    ConsistencyScore {
        std_dev,
        cv,
        penalty,
        band,
    }
}
