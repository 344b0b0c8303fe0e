//! Closed-form summary statistics over demand series.

use serde::{Deserialize, Serialize};

use pantry_core::ValueObject;

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

/// Interval around the mean of a demand series.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Point estimates derived from one category's demand observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandStats {
    pub observations: usize,
    pub mean: f64,
    /// Sample variance (n-1); zero for a single observation.
    pub variance: f64,
    pub std_dev: f64,
    pub confidence_interval: ConfidenceInterval,
}

impl ValueObject for DemandStats {}

impl DemandStats {
    pub fn from_series(xs: &[f64]) -> Self {
        let mean = mean(xs);
        let variance = variance_sample(xs, mean);
        let std_dev = variance.sqrt();
        Self {
            observations: xs.len(),
            mean,
            variance,
            std_dev,
            confidence_interval: confidence_interval(mean, std_dev, xs.len()),
        }
    }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Sample variance (n-1), deterministic.
pub fn variance_sample(xs: &[f64], mean: f64) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    xs.iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / ((xs.len() - 1) as f64)
}

/// 95% interval of the mean under a normal approximation.
pub fn confidence_interval(mean: f64, std_dev: f64, sample_size: usize) -> ConfidenceInterval {
    if sample_size == 0 {
        return ConfidenceInterval { lower: mean, upper: mean };
    }
    let margin = Z_95 * (std_dev / (sample_size as f64).sqrt());
    ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summarizes_meat_series() {
        let stats = DemandStats::from_series(&[15.0, 18.0, 20.0, 17.0, 16.0]);
        assert_eq!(stats.observations, 5);
        assert!(approx(stats.mean, 17.2));
        // deviations: -2.2, 0.8, 2.8, -0.2, -1.2 -> squares sum 14.8
        assert!(approx(stats.variance, 14.8 / 4.0));
        assert!(approx(stats.std_dev, (3.7f64).sqrt()));

        let margin = 1.96 * (3.7f64).sqrt() / (5f64).sqrt();
        assert!(approx(stats.confidence_interval.lower, 17.2 - margin));
        assert!(approx(stats.confidence_interval.upper, 17.2 + margin));
    }

    #[test]
    fn single_observation_has_no_spread() {
        let stats = DemandStats::from_series(&[10.0]);
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.confidence_interval, ConfidenceInterval { lower: 10.0, upper: 10.0 });
    }

    #[test]
    fn empty_series_is_zero() {
        let stats = DemandStats::from_series(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.observations, 0);
    }
}
