use serde::{Deserialize, Serialize};

use pantry_core::ValueObject;

/// Observed pickup outcomes for a category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupOutcomeCounts {
    pub successes: u32,
    pub failures: u32,
}

impl ValueObject for PickupOutcomeCounts {}

impl PickupOutcomeCounts {
    pub const fn new(successes: u32, failures: u32) -> Self {
        Self { successes, failures }
    }

    /// Laplace-smoothed Beta-posterior mean of the success probability.
    ///
    /// Always strictly inside (0, 1), including at zero observations.
    pub fn pickup_rate(&self) -> f64 {
        let alpha = self.successes as f64 + 1.0;
        let beta = self.failures as f64 + 1.0;
        alpha / (alpha + beta)
    }
}

/// Optimistic historical prior: 80 successful pickups out of 100.
impl Default for PickupOutcomeCounts {
    fn default() -> Self {
        Self::new(80, 20)
    }
}
