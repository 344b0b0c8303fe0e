use chrono::{DateTime, Utc};
use tracing::debug;

use pantry_core::{Entity, ItemId};
use pantry_inventory::InventoryItem;

use crate::engine::{DistributionEngine, EngineOutput};
use crate::error::EngineError;
use crate::history::DemandHistory;

/// Whether the planner currently holds a result.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanState {
    /// No items; no derived outputs.
    Empty,
    Computed(EngineOutput),
}

/// Keeps an item list and its distribution plan in sync.
///
/// Every mutation recomputes the whole plan from scratch; nothing is cached
/// between passes. A failed recomputation leaves the previous list and plan
/// untouched.
#[derive(Debug, Clone)]
pub struct DistributionPlanner {
    engine: DistributionEngine,
    history: DemandHistory,
    items: Vec<InventoryItem>,
    state: PlanState,
}

impl DistributionPlanner {
    pub fn new(engine: DistributionEngine, history: DemandHistory) -> Self {
        Self {
            engine,
            history,
            items: Vec::new(),
            state: PlanState::Empty,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    pub fn output(&self) -> Option<&EngineOutput> {
        match &self.state {
            PlanState::Empty => None,
            PlanState::Computed(output) => Some(output),
        }
    }

    pub fn add_item(&mut self, item: InventoryItem, now: DateTime<Utc>) -> Result<&PlanState, EngineError> {
        if self.items.iter().any(|i| i.id() == item.id()) {
            return Err(EngineError::invalid_input(format!(
                "duplicate item id: {}",
                item.id()
            )));
        }
        let mut items = self.items.clone();
        items.push(item);
        self.commit(items, now)
    }

    /// Remove an item by id; returns the removed item, if it was present.
    pub fn remove_item(
        &mut self,
        id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<InventoryItem>, EngineError> {
        let Some(position) = self.items.iter().position(|i| i.id() == id) else {
            return Ok(None);
        };
        let mut items = self.items.clone();
        let removed = items.remove(position);
        self.commit(items, now)?;
        Ok(Some(removed))
    }

    pub fn replace_items(
        &mut self,
        items: Vec<InventoryItem>,
        now: DateTime<Utc>,
    ) -> Result<&PlanState, EngineError> {
        self.commit(items, now)
    }

    pub fn set_history(&mut self, history: DemandHistory, now: DateTime<Utc>) -> Result<&PlanState, EngineError> {
        let state = self.compute(&self.items, &history, now)?;
        self.history = history;
        self.state = state;
        Ok(&self.state)
    }

    /// Recompute against a new reference instant without changing inputs.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<&PlanState, EngineError> {
        self.state = self.compute(&self.items, &self.history, now)?;
        Ok(&self.state)
    }

    fn commit(&mut self, items: Vec<InventoryItem>, now: DateTime<Utc>) -> Result<&PlanState, EngineError> {
        let state = self.compute(&items, &self.history, now)?;
        self.items = items;
        self.state = state;
        Ok(&self.state)
    }

    fn compute(
        &self,
        items: &[InventoryItem],
        history: &DemandHistory,
        now: DateTime<Utc>,
    ) -> Result<PlanState, EngineError> {
        if items.is_empty() {
            debug!("item list emptied; clearing plan");
            return Ok(PlanState::Empty);
        }
        let output = self.engine.optimize(items, history, now)?;
        Ok(PlanState::Computed(output))
    }
}
