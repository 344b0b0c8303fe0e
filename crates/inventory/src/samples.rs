//! Reference inventories used by the CLI and tests.
//!
//! Expiry dates are expressed relative to the caller's `now` so the samples
//! stay deterministic.

use chrono::{DateTime, Duration, Utc};

use pantry_core::{DomainResult, ItemId};

use crate::category::Category;
use crate::item::InventoryItem;

/// Which reference inventory to build.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleSet {
    /// Same category, moderate quantities, long shelf life.
    HighConfidence,
    /// Mixed categories, shorter shelf life.
    MediumConfidence,
    /// Diverse categories, large quantity spread, very short shelf life.
    LowConfidence,
}

impl SampleSet {
    pub fn items(self, now: DateTime<Utc>) -> DomainResult<Vec<InventoryItem>> {
        let rows: Vec<(&str, &str, u32, i64, Category)> = match self {
            SampleSet::HighConfidence => vec![
                ("1", "Whole Milk", 25, 7, Category::Dairy),
                ("2", "Cheddar Cheese", 22, 21, Category::Dairy),
            ],
            SampleSet::MediumConfidence => vec![
                ("3", "Fresh Bread", 30, 3, Category::Bakery),
                ("4", "Fresh Spinach", 35, 5, Category::Produce),
            ],
            SampleSet::LowConfidence => vec![
                ("5", "Fresh Tomatoes", 45, 7, Category::Produce),
                ("6", "Ground Beef", 18, 3, Category::Meat),
                ("7", "Croissants", 40, 2, Category::Bakery),
            ],
        };

        rows.into_iter()
            .map(|(id, name, quantity, days, category)| {
                InventoryItem::new(
                    ItemId::new(id)?,
                    name,
                    quantity,
                    category,
                    now + Duration::days(days),
                )
            })
            .collect()
    }
}

impl core::str::FromStr for SampleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "high-confidence" => Ok(SampleSet::HighConfidence),
            "medium" | "medium-confidence" => Ok(SampleSet::MediumConfidence),
            "low" | "low-confidence" => Ok(SampleSet::LowConfidence),
            other => Err(format!("unknown sample set: {other} (expected high|medium|low)")),
        }
    }
}
