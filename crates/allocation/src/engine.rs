//! The optimization pass: items + history → per-item allocation and an
//! aggregate result.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pantry_core::{Entity, ItemId};
use pantry_inventory::{Category, InventoryItem};

use crate::aggregator::{CategoryDemandProfile, group_by_category};
use crate::allocator::{self, CategoryWeight};
use crate::config::EngineConfig;
use crate::confidence::{self, ConfidenceBreakdown, ConfidenceScorer};
use crate::error::EngineError;
use crate::history::DemandHistory;
use crate::shelf_life::ShelfLifeEstimator;
use crate::stats::DemandStats;
use crate::urgency::UrgencyLevel;
use crate::waste::{self, WasteReduction};

/// Aggregate outcome of one optimization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub recommended_distribution: u64,
    pub expected_waste: f64,
    pub confidence_score: f64,
    pub urgency_level: UrgencyLevel,
}

/// Per-item detail behind an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPlan {
    pub item_id: ItemId,
    pub category: Category,
    pub quantity: u32,
    pub days_until_expiry: i64,
    pub shelf_life_ratio: f64,
    pub pickup_rate: f64,
    /// Even share of the category allocation before scaling.
    pub base_amount: u64,
    pub allocation: u32,
    pub expected_waste: f64,
    pub waste_reduction: WasteReduction,
    pub confidence: ConfidenceBreakdown,
}

/// How much of the budget one category received, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPlan {
    pub category: Category,
    pub item_count: usize,
    pub demand: DemandStats,
    pub demand_defaulted: bool,
    pub allocation: u64,
}

/// A documented default the engine applied instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    /// Category constants came from the `other` column.
    UnknownCategory { category: Category },
    /// The default demand series was used.
    MissingDemandHistory { category: Category },
    /// All category means were zero; the budget was split evenly.
    EqualShareAllocation,
    /// Item is at or past expiry; its allocation saturated to the floor.
    ExpiredItem {
        item_id: ItemId,
        days_until_expiry: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Same order and length as the input items.
    pub per_item_allocation: Vec<u32>,
    /// `None` when there were no items.
    pub aggregate: Option<OptimizationResult>,
    /// Total category budget that was split.
    pub budget: u64,
    pub items: Vec<ItemPlan>,
    pub categories: Vec<CategoryPlan>,
    pub fallbacks: Vec<Fallback>,
}

impl EngineOutput {
    pub fn empty() -> Self {
        Self {
            per_item_allocation: Vec::new(),
            aggregate: None,
            budget: 0,
            items: Vec::new(),
            categories: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.per_item_allocation.is_empty()
    }
}

/// Stateless optimizer carrying a validated configuration.
#[derive(Debug, Clone)]
pub struct DistributionEngine {
    config: EngineConfig,
}

impl DistributionEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline. `now` is the reference instant for every
    /// days-until-expiry computation.
    pub fn optimize(
        &self,
        items: &[InventoryItem],
        history: &DemandHistory,
        now: DateTime<Utc>,
    ) -> Result<EngineOutput, EngineError> {
        if items.is_empty() {
            debug!("no items; nothing to optimize");
            return Ok(EngineOutput::empty());
        }

        validate_items(items)?;
        history.validate()?;

        let config = &self.config;
        let shelf_life = ShelfLifeEstimator::new(&config.max_shelf_life_days);
        let scorer = ConfidenceScorer::new(&config.category_reliability, shelf_life);
        let mut fallbacks: Vec<Fallback> = Vec::new();

        // Category level.
        let groups = group_by_category(items);
        let profiles: Vec<CategoryDemandProfile> = groups
            .iter()
            .map(|g| CategoryDemandProfile::resolve(g.category, history, &config.default_demand_series))
            .collect();

        for profile in &profiles {
            if !profile.category.is_known() {
                warn!(category = %profile.category, "unknown category; using default constants");
                fallbacks.push(Fallback::UnknownCategory {
                    category: profile.category.clone(),
                });
            }
            if profile.defaulted {
                warn!(category = %profile.category, "no demand history; using default series");
                fallbacks.push(Fallback::MissingDemandHistory {
                    category: profile.category.clone(),
                });
            }
        }

        let budget = demand_budget(&profiles);
        let weights: Vec<CategoryWeight> = profiles
            .iter()
            .map(|p| CategoryWeight {
                category: p.category.clone(),
                mean: p.stats.mean,
            })
            .collect();
        let allocation = allocator::allocate(&weights, budget, config.clamp_band);
        if allocation.equal_share {
            warn!(budget, "all category means are zero; splitting budget evenly");
            fallbacks.push(Fallback::EqualShareAllocation);
        }

        let categories: Vec<CategoryPlan> = groups
            .iter()
            .zip(profiles)
            .zip(&allocation.shares)
            .map(|((group, profile), share)| {
                debug!(
                    category = %profile.category,
                    items = group.len(),
                    mean_demand = profile.stats.mean,
                    allocation = *share,
                    "category planned"
                );
                CategoryPlan {
                    category: profile.category,
                    item_count: group.len(),
                    demand: profile.stats,
                    demand_defaulted: profile.defaulted,
                    allocation: *share,
                }
            })
            .collect();

        // Item level, written back in input order.
        let mut plans: Vec<Option<ItemPlan>> = vec![None; items.len()];
        for (group, plan) in groups.iter().zip(&categories) {
            let base_amount = allocator::base_amount(plan.allocation, group.len());
            let pickup_rate = history
                .pickups(group.category)
                .unwrap_or(config.pickup_prior)
                .pickup_rate();

            for &(index, item) in &group.members {
                let days = item.days_until_expiry(now);
                if days <= 0 {
                    warn!(item_id = %item.id(), days_until_expiry = days, "item at or past expiry");
                    fallbacks.push(Fallback::ExpiredItem {
                        item_id: item.id().clone(),
                        days_until_expiry: days,
                    });
                }
                plans[index] = Some(self.plan_item(item, days, base_amount, pickup_rate, &scorer));
            }
        }
        let plans: Vec<ItemPlan> = plans.into_iter().flatten().collect();

        let per_item_allocation: Vec<u32> = plans.iter().map(|p| p.allocation).collect();
        let aggregate = self.aggregate(&plans);

        if let Some(result) = &aggregate {
            info!(
                items = items.len(),
                categories = categories.len(),
                budget,
                recommended = result.recommended_distribution,
                expected_waste = result.expected_waste,
                confidence = result.confidence_score,
                urgency = %result.urgency_level,
                policy = config.urgency_policy.name(),
                "distribution optimized"
            );
        }

        Ok(EngineOutput {
            per_item_allocation,
            aggregate,
            budget,
            items: plans,
            categories,
            fallbacks,
        })
    }

    fn plan_item(
        &self,
        item: &InventoryItem,
        days_until_expiry: i64,
        base_amount: u64,
        pickup_rate: f64,
        scorer: &ConfidenceScorer<'_>,
    ) -> ItemPlan {
        let shelf_life = ShelfLifeEstimator::new(&self.config.max_shelf_life_days);
        let shelf_life_ratio = shelf_life.ratio(days_until_expiry, item.category());
        let quantity = item.quantity();

        let allocation = allocator::item_allocation(base_amount, pickup_rate, shelf_life_ratio, quantity);
        let expected_waste = waste::expected_waste(
            quantity,
            self.config.utilization_rate,
            waste::distribution_ratio(allocation, quantity),
        );

        ItemPlan {
            item_id: item.id().clone(),
            category: item.category().clone(),
            quantity,
            days_until_expiry,
            shelf_life_ratio,
            pickup_rate,
            base_amount,
            allocation,
            expected_waste,
            waste_reduction: WasteReduction::new(quantity, allocation),
            confidence: scorer.score(item, days_until_expiry),
        }
    }

    fn aggregate(&self, plans: &[ItemPlan]) -> Option<OptimizationResult> {
        let scores: Vec<f64> = plans.iter().map(|p| p.confidence.score).collect();
        let confidence_score = confidence::aggregate_confidence(&scores)?;
        let closest_expiry = plans.iter().map(|p| p.days_until_expiry).min()?;

        let recommended_distribution = plans.iter().map(|p| u64::from(p.allocation)).sum();
        let expected_waste = plans.iter().map(|p| p.expected_waste).sum::<f64>();

        Some(OptimizationResult {
            recommended_distribution,
            expected_waste,
            confidence_score,
            urgency_level: self
                .config
                .urgency_policy
                .classify(expected_waste, closest_expiry),
        })
    }
}

/// One-shot convenience wrapper around [`DistributionEngine`].
pub fn optimize(
    items: &[InventoryItem],
    history: &DemandHistory,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<EngineOutput, EngineError> {
    DistributionEngine::new(config.clone())?.optimize(items, history, now)
}

/// Sum of each category's leading observation.
fn demand_budget(profiles: &[CategoryDemandProfile]) -> u64 {
    let total: f64 = profiles.iter().map(|p| p.leading_observation()).sum();
    total.round().max(0.0) as u64
}

fn validate_items(items: &[InventoryItem]) -> Result<(), EngineError> {
    let mut seen: BTreeSet<&ItemId> = BTreeSet::new();
    for item in items {
        if item.quantity() == 0 {
            return Err(EngineError::invalid_input(format!(
                "item {}: quantity must be positive",
                item.id()
            )));
        }
        if !seen.insert(item.id()) {
            return Err(EngineError::invalid_input(format!(
                "duplicate item id: {}",
                item.id()
            )));
        }
    }
    Ok(())
}
