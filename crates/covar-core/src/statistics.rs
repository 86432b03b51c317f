use serde::{Deserialize, Serialize};
use std::fmt;

use crate::observation::Dataset;

// ---------------------------------------------------------------------------
// StatisticsResult
// ---------------------------------------------------------------------------

/// Snapshot of the descriptive statistics for one dataset.
///
/// An empty dataset yields all-zero fields. A single observation yields a
/// sample covariance of 0 rather than a division by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub sample_covariance: f64,
    pub population_covariance: f64,
    pub data: Dataset,
}

impl StatisticsResult {
    fn empty(data: Dataset) -> Self {
        Self {
            n: 0,
            mean_x: 0.0,
            mean_y: 0.0,
            sample_covariance: 0.0,
            population_covariance: 0.0,
            data,
        }
    }

    /// Direction of the linear relationship, read from the sample covariance.
    pub fn covariance_sign(&self) -> CovarianceSign {
        CovarianceSign::of(self.sample_covariance)
    }
}

/// Compute n, both means and both covariance estimators. Never fails.
pub fn calculate_statistics(data: Dataset) -> StatisticsResult {
    let n = data.len();
    if n == 0 {
        return StatisticsResult::empty(data);
    }

    let count = n as f64;
    let mean_x = data.xs().sum::<f64>() / count;
    let mean_y = data.ys().sum::<f64>() / count;

    let sum_product_diff: f64 = data
        .iter()
        .map(|o| (o.x - mean_x) * (o.y - mean_y))
        .sum();

    let population_covariance = sum_product_diff / count;
    let sample_covariance = if n > 1 {
        sum_product_diff / (count - 1.0)
    } else {
        0.0
    };

    StatisticsResult {
        n,
        mean_x,
        mean_y,
        sample_covariance,
        population_covariance,
        data,
    }
}

// ---------------------------------------------------------------------------
// CovarianceSign
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceSign {
    Positive,
    Negative,
    Zero,
    /// The covariance overflowed to NaN; no direction can be read from it.
    Undefined,
}

impl CovarianceSign {
    pub fn of(value: f64) -> Self {
        if value.is_nan() {
            Self::Undefined
        } else if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Positive => "variables move in the same direction",
            Self::Negative => "variables move in opposite directions",
            Self::Zero => "no linear relationship",
            Self::Undefined => "covariance is not a finite number",
        }
    }
}

impl fmt::Display for CovarianceSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Zero => write!(f, "zero"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}
