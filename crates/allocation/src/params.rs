//! Seeded generation of per-category probability parameters.
//!
//! Stands in for observational data when none exists yet. Draws come from an
//! explicit RNG, so the same seed always yields the same parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use pantry_inventory::Category;

use crate::history::DemandHistory;
use crate::pickup::PickupOutcomeCounts;

/// Synthetic demand/pickup profile for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityParameters {
    pub category: Category,
    pub average_daily_demand: u32,
    pub historical_pickups: u32,
    pub total_events: u32,
    pub category_demand_rate: f64,
    pub pickup_success_rate: f64,
}

impl ProbabilityParameters {
    pub fn pickup_outcomes(&self) -> PickupOutcomeCounts {
        PickupOutcomeCounts::new(
            self.historical_pickups,
            self.total_events.saturating_sub(self.historical_pickups),
        )
    }
}

const TOTAL_EVENTS: u32 = 100;

/// `(demand rate range, pickup success rate range)` per category.
fn rate_bands(category: &Category) -> ((f64, f64), (f64, f64)) {
    match category {
        Category::Meat => ((0.7, 0.9), (0.8, 0.95)),
        Category::Dairy => ((0.6, 0.8), (0.7, 0.9)),
        Category::Produce => ((0.5, 0.8), (0.6, 0.8)),
        Category::Bakery => ((0.4, 0.8), (0.5, 0.8)),
        Category::Other(_) => ((0.5, 0.8), (0.6, 0.8)),
    }
}

#[derive(Debug, Clone)]
pub struct ParameterGenerator<R = StdRng> {
    rng: R,
}

impl ParameterGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParameterGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, category: &Category) -> ProbabilityParameters {
        let ((demand_lo, demand_hi), (pickup_lo, pickup_hi)) = rate_bands(category);
        ProbabilityParameters {
            category: category.clone(),
            average_daily_demand: self.rng.gen_range(10..30),
            historical_pickups: self.rng.gen_range(50..TOTAL_EVENTS),
            total_events: TOTAL_EVENTS,
            category_demand_rate: self.rng.gen_range(demand_lo..demand_hi),
            pickup_success_rate: self.rng.gen_range(pickup_lo..pickup_hi),
        }
    }

    /// Generate pickup counts for every listed category the history has no
    /// observations for. Returns the parameters that were generated.
    pub fn fill_missing_pickups<'c>(
        &mut self,
        history: &mut DemandHistory,
        categories: impl IntoIterator<Item = &'c Category>,
    ) -> Vec<ProbabilityParameters> {
        let mut generated = Vec::new();
        for category in categories {
            if history.pickups(category).is_some() {
                continue;
            }
            let params = self.generate(category);
            tracing::debug!(
                category = %category,
                historical_pickups = params.historical_pickups,
                total_events = params.total_events,
                "generated pickup parameters"
            );
            history.set_pickups(category.clone(), params.pickup_outcomes());
            generated.push(params);
        }
        generated
    }
}
