use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pantry_inventory::Category;

use crate::error::EngineError;
use crate::pickup::PickupOutcomeCounts;

/// Largest accepted daily demand observation. Keeps the summed category
/// budget well inside integer range.
pub const MAX_DAILY_DEMAND: f64 = 1.0e9;

/// Finite, non-negative and at most [`MAX_DAILY_DEMAND`].
pub(crate) fn is_valid_observation(x: f64) -> bool {
    x.is_finite() && (0.0..=MAX_DAILY_DEMAND).contains(&x)
}

/// Historical observations supplied by the caller: daily demand per category
/// and, optionally, observed pickup outcomes per category.
///
/// Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandHistory {
    #[serde(default)]
    demand: BTreeMap<Category, Vec<f64>>,
    #[serde(default)]
    pickups: BTreeMap<Category, PickupOutcomeCounts>,
}

impl DemandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference daily demand for the four named categories.
    pub fn reference() -> Self {
        Self::new()
            .with_series(Category::Meat, vec![15.0, 18.0, 20.0, 17.0, 16.0])
            .with_series(Category::Dairy, vec![25.0, 22.0, 20.0, 23.0, 24.0])
            .with_series(Category::Produce, vec![30.0, 28.0, 25.0, 27.0, 29.0])
            .with_series(Category::Bakery, vec![40.0, 35.0, 38.0, 42.0, 37.0])
    }

    pub fn with_series(mut self, category: Category, series: Vec<f64>) -> Self {
        self.demand.insert(category, series);
        self
    }

    pub fn with_pickups(mut self, category: Category, counts: PickupOutcomeCounts) -> Self {
        self.pickups.insert(category, counts);
        self
    }

    pub fn set_pickups(&mut self, category: Category, counts: PickupOutcomeCounts) {
        self.pickups.insert(category, counts);
    }

    /// Demand series for a category; `None` when absent or empty.
    pub fn series(&self, category: &Category) -> Option<&[f64]> {
        self.demand
            .get(category)
            .map(Vec::as_slice)
            .filter(|s| !s.is_empty())
    }

    pub fn pickups(&self, category: &Category) -> Option<PickupOutcomeCounts> {
        self.pickups.get(category).copied()
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (category, series) in &self.demand {
            if !series.iter().all(|&x| is_valid_observation(x)) {
                return Err(EngineError::invalid_input(format!(
                    "demand history for {category} must contain finite values within 0..={MAX_DAILY_DEMAND}"
                )));
            }
        }
        Ok(())
    }
}
