use serde::{Deserialize, Serialize};

use pantry_inventory::{Category, CategoryTable, InventoryItem};

use crate::shelf_life::ShelfLifeEstimator;

const RELIABILITY_WEIGHT: f64 = 0.3;
const SHELF_LIFE_WEIGHT: f64 = 0.3;
const QUANTITY_WEIGHT: f64 = 0.2;
const URGENCY_WEIGHT: f64 = 0.2;

/// Batch size that scores a perfect quantity factor.
const REFERENCE_QUANTITY: f64 = 50.0;

const RELIABILITY_FLOOR: f64 = 0.3;
const SHELF_LIFE_FLOOR: f64 = 0.3;
const QUANTITY_FLOOR: f64 = 0.4;
const URGENCY_FLOOR: f64 = 0.4;

/// Lowest score any item can receive given the factor floors.
pub const MIN_CONFIDENCE: f64 = RELIABILITY_WEIGHT * RELIABILITY_FLOOR
    + SHELF_LIFE_WEIGHT * SHELF_LIFE_FLOOR
    + QUANTITY_WEIGHT * QUANTITY_FLOOR
    + URGENCY_WEIGHT * URGENCY_FLOOR;

/// The four factors behind an item's confidence score, each in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub category_reliability: f64,
    pub shelf_life_confidence: f64,
    pub quantity_factor: f64,
    pub urgency_factor: f64,
    pub score: f64,
}

#[derive(Debug, Copy, Clone)]
pub struct ConfidenceScorer<'a> {
    reliability: &'a CategoryTable<f64>,
    shelf_life: ShelfLifeEstimator<'a>,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(reliability: &'a CategoryTable<f64>, shelf_life: ShelfLifeEstimator<'a>) -> Self {
        Self {
            reliability,
            shelf_life,
        }
    }

    pub fn category_reliability(&self, category: &Category) -> f64 {
        self.reliability.get(category).clamp(RELIABILITY_FLOOR, 1.0)
    }

    pub fn score(&self, item: &InventoryItem, days_until_expiry: i64) -> ConfidenceBreakdown {
        let ratio = self.shelf_life.raw_ratio(days_until_expiry, item.category());

        let category_reliability = self.category_reliability(item.category());
        let shelf_life_confidence = ratio.clamp(SHELF_LIFE_FLOOR, 1.0);
        let quantity_factor = quantity_factor(item.quantity());
        let urgency_factor = (1.0 - ratio).clamp(URGENCY_FLOOR, 1.0);

        let score = RELIABILITY_WEIGHT * category_reliability
            + SHELF_LIFE_WEIGHT * shelf_life_confidence
            + QUANTITY_WEIGHT * quantity_factor
            + URGENCY_WEIGHT * urgency_factor;

        ConfidenceBreakdown {
            category_reliability,
            shelf_life_confidence,
            quantity_factor,
            urgency_factor,
            score: score.clamp(MIN_CONFIDENCE, 1.0),
        }
    }
}

/// Items near the reference batch size are treated as better estimated.
pub fn quantity_factor(quantity: u32) -> f64 {
    (1.0 - (REFERENCE_QUANTITY - quantity as f64).abs() / 100.0).clamp(QUANTITY_FLOOR, 1.0)
}

/// Arithmetic mean of per-item scores; `None` for an empty batch.
pub fn aggregate_confidence(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use chrono::{Duration, TimeZone, Utc};
    use pantry_core::ItemId;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn item(quantity: u32, category: Category) -> InventoryItem {
        InventoryItem::new(
            ItemId::new("x").unwrap(),
            "Lot",
            quantity,
            category,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::days(1),
        )
        .unwrap()
    }

    #[test]
    fn floor_constant_is_point_three_four() {
        assert!(approx(MIN_CONFIDENCE, 0.34));
    }

    #[test]
    fn bakery_two_days_out() {
        let config = EngineConfig::default();
        let scorer = ConfidenceScorer::new(
            &config.category_reliability,
            ShelfLifeEstimator::new(&config.max_shelf_life_days),
        );

        let b = scorer.score(&item(40, Category::Bakery), 2);
        assert!(approx(b.category_reliability, 0.65));
        assert!(approx(b.shelf_life_confidence, 2.0 / 3.0));
        assert!(approx(b.quantity_factor, 0.9));
        assert!(approx(b.urgency_factor, 0.4));
        let expected = 0.3 * 0.65 + 0.3 * (2.0 / 3.0) + 0.2 * 0.9 + 0.2 * 0.4;
        assert!(approx(b.score, expected));
    }

    #[test]
    fn expired_items_keep_floor_confidence() {
        let config = EngineConfig::default();
        let scorer = ConfidenceScorer::new(
            &config.category_reliability,
            ShelfLifeEstimator::new(&config.max_shelf_life_days),
        );

        let b = scorer.score(&item(50, Category::Meat), -3);
        assert_eq!(b.shelf_life_confidence, 0.3);
        assert_eq!(b.urgency_factor, 1.0);
        assert_eq!(b.quantity_factor, 1.0);
    }

    #[test]
    fn low_configured_reliability_is_floored() {
        let mut config = EngineConfig::default();
        config.category_reliability.other = 0.0;
        let scorer = ConfidenceScorer::new(
            &config.category_reliability,
            ShelfLifeEstimator::new(&config.max_shelf_life_days),
        );
        assert_eq!(scorer.category_reliability(&Category::from("Frozen")), 0.3);
    }

    #[test]
    fn quantity_factor_peaks_at_fifty() {
        assert_eq!(quantity_factor(50), 1.0);
        assert!(approx(quantity_factor(45), 0.95));
        assert!(approx(quantity_factor(18), 0.68));
        assert!(approx(quantity_factor(1), 0.51));
        assert_eq!(quantity_factor(500), 0.4);
    }

    #[test]
    fn aggregate_is_mean() {
        assert_eq!(aggregate_confidence(&[]), None);
        assert_eq!(aggregate_confidence(&[0.5, 0.7, 0.9]).map(|m| (m * 10.0).round()), Some(7.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: every score is within [0.34, 1.0], whatever the table says.
        #[test]
        fn score_within_bounds(
            quantity in 1u32..100_000,
            days in -1_000i64..1_000,
            category in prop::sample::select(vec!["Dairy", "Meat", "Produce", "Bakery", "Frozen"]),
            reliability in 0.0f64..=1.0,
        ) {
            let mut config = EngineConfig::default();
            config.category_reliability.other = reliability;
            config.category_reliability.bakery = reliability;
            let scorer = ConfidenceScorer::new(
                &config.category_reliability,
                ShelfLifeEstimator::new(&config.max_shelf_life_days),
            );

            let b = scorer.score(&item(quantity, Category::from(category)), days);
            prop_assert!(b.score >= 0.34 - 1e-12 && b.score <= 1.0);
        }
    }
}
