//! Planner input: items plus optional demand history.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use pantry_allocation::DemandHistory;
use pantry_inventory::{InventoryItem, SampleSet};

#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    pub items: Vec<InventoryItem>,
    /// Falls back to the reference history when absent.
    #[serde(default)]
    pub history: Option<DemandHistory>,
}

impl PlanInput {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid input file {}", path.display()))
    }

    pub fn sample(set: SampleSet, now: DateTime<Utc>) -> anyhow::Result<Self> {
        Ok(Self {
            items: set.items(now)?,
            history: None,
        })
    }

    pub fn into_parts(self) -> (Vec<InventoryItem>, DemandHistory) {
        let history = self.history.unwrap_or_else(DemandHistory::reference);
        (self.items, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pantry_inventory::Category;

    #[test]
    fn parses_items_with_explicit_history() {
        let input = PlanInput::from_json(
            r#"{
                "items": [
                    {
                        "id": "a",
                        "name": "Milk",
                        "quantity": 12,
                        "category": "Dairy",
                        "expires_at": "2024-03-05T00:00:00Z"
                    }
                ],
                "history": { "demand": { "Dairy": [8, 9] } }
            }"#,
        )
        .unwrap();

        let (items, history) = input.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(history.series(&Category::Dairy), Some(&[8.0, 9.0][..]));
        assert_eq!(history.series(&Category::Meat), None);
    }

    #[test]
    fn missing_history_uses_reference() {
        let input = PlanInput::from_json(r#"{ "items": [] }"#).unwrap();
        let (items, history) = input.into_parts();
        assert!(items.is_empty());
        assert_eq!(history, DemandHistory::reference());
    }

    #[test]
    fn invalid_items_are_rejected() {
        let json = r#"{
            "items": [
                { "id": " ", "name": "Milk", "quantity": 1, "category": "Dairy", "expires_at": "2024-03-05T00:00:00Z" }
            ]
        }"#;
        assert!(PlanInput::from_json(json).is_err());
    }

    #[test]
    fn samples_are_anchored_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let input = PlanInput::sample(SampleSet::MediumConfidence, now).unwrap();
        assert_eq!(input.items.len(), 2);
        assert!(input.history.is_none());
    }
}
