//! Engine configuration.
//!
//! Every tunable constant of the pipeline lives here, with the reference
//! defaults. The struct is `serde`-friendly so it can be loaded from a config
//! file; missing fields fall back to [`EngineConfig::default`].

use serde::{Deserialize, Serialize};

use pantry_inventory::CategoryTable;

use crate::error::EngineError;
use crate::history::{MAX_DAILY_DEMAND, is_valid_observation};
use crate::pickup::PickupOutcomeCounts;
use crate::urgency::UrgencyPolicy;

/// Optional viable band for category allocations, as multiples of the
/// category's mean demand: `[ceil(lower * mean), ceil(upper * mean)]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClampBand {
    pub lower_factor: f64,
    pub upper_factor: f64,
}

impl ClampBand {
    pub fn lower_bound(&self, mean: f64) -> u64 {
        (self.lower_factor * mean).ceil().max(0.0) as u64
    }

    pub fn upper_bound(&self, mean: f64) -> u64 {
        (self.upper_factor * mean).ceil().max(0.0) as u64
    }
}

impl Default for ClampBand {
    fn default() -> Self {
        Self {
            lower_factor: 0.2,
            upper_factor: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum achievable pickup efficiency, in (0, 1].
    pub utilization_rate: f64,
    /// Pickup counts used for categories without observed outcomes.
    pub pickup_prior: PickupOutcomeCounts,
    pub max_shelf_life_days: CategoryTable<u32>,
    /// Clamped into [0.3, 1] when scoring.
    pub category_reliability: CategoryTable<f64>,
    pub urgency_policy: UrgencyPolicy,
    /// Demand series assumed for categories without history.
    pub default_demand_series: Vec<f64>,
    /// Disabled unless set.
    pub clamp_band: Option<ClampBand>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            utilization_rate: 0.8,
            pickup_prior: PickupOutcomeCounts::default(),
            max_shelf_life_days: CategoryTable {
                dairy: 14,
                meat: 5,
                produce: 7,
                bakery: 3,
                other: 7,
            },
            category_reliability: CategoryTable {
                dairy: 0.85,
                meat: 0.75,
                produce: 0.70,
                bakery: 0.65,
                other: 0.5,
            },
            urgency_policy: UrgencyPolicy::default(),
            default_demand_series: vec![10.0],
            clamp_band: None,
        }
    }
}

impl EngineConfig {
    pub fn with_utilization_rate(mut self, utilization_rate: f64) -> Self {
        self.utilization_rate = utilization_rate;
        self
    }

    pub fn with_pickup_prior(mut self, prior: PickupOutcomeCounts) -> Self {
        self.pickup_prior = prior;
        self
    }

    pub fn with_max_shelf_life_days(mut self, table: CategoryTable<u32>) -> Self {
        self.max_shelf_life_days = table;
        self
    }

    pub fn with_category_reliability(mut self, table: CategoryTable<f64>) -> Self {
        self.category_reliability = table;
        self
    }

    pub fn with_urgency_policy(mut self, policy: UrgencyPolicy) -> Self {
        self.urgency_policy = policy;
        self
    }

    pub fn with_default_demand_series(mut self, series: Vec<f64>) -> Self {
        self.default_demand_series = series;
        self
    }

    pub fn with_clamp_band(mut self, band: ClampBand) -> Self {
        self.clamp_band = Some(band);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.utilization_rate.is_finite()
            && self.utilization_rate > 0.0
            && self.utilization_rate <= 1.0)
        {
            return Err(EngineError::invalid_config(
                "utilization_rate must be within (0, 1]",
            ));
        }

        if self.max_shelf_life_days.values().any(|days| *days == 0) {
            return Err(EngineError::invalid_config(
                "max_shelf_life_days must be positive for every category",
            ));
        }

        if self
            .category_reliability
            .values()
            .any(|r| !(r.is_finite() && (0.0..=1.0).contains(r)))
        {
            return Err(EngineError::invalid_config(
                "category_reliability values must be within [0, 1]",
            ));
        }

        if self.default_demand_series.is_empty() {
            return Err(EngineError::invalid_config(
                "default_demand_series cannot be empty",
            ));
        }
        if !self
            .default_demand_series
            .iter()
            .all(|&x| is_valid_observation(x))
        {
            return Err(EngineError::invalid_config(format!(
                "default_demand_series must contain finite values within 0..={MAX_DAILY_DEMAND}"
            )));
        }

        if let Some(band) = self.clamp_band {
            if !(band.lower_factor.is_finite()
                && band.upper_factor.is_finite()
                && band.lower_factor >= 0.0
                && band.lower_factor <= band.upper_factor)
            {
                return Err(EngineError::invalid_config(
                    "clamp_band requires 0 <= lower_factor <= upper_factor",
                ));
            }
        }

        self.urgency_policy
            .validate()
            .map_err(EngineError::InvalidConfig)
    }
}
