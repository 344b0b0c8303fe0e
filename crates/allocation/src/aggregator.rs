use pantry_inventory::{Category, InventoryItem};

use crate::history::DemandHistory;
use crate::stats::DemandStats;

/// Items of one category, in their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    /// `(index into the input slice, item)`.
    pub members: Vec<(usize, &'a InventoryItem)>,
}

impl CategoryGroup<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition items by category.
///
/// Groups appear in order of each category's first occurrence; every item
/// lands in exactly one group.
pub fn group_by_category(items: &[InventoryItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match groups.iter_mut().find(|g| g.category == item.category()) {
            Some(group) => group.members.push((index, item)),
            None => groups.push(CategoryGroup {
                category: item.category(),
                members: vec![(index, item)],
            }),
        }
    }
    groups
}

/// Demand observations resolved for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDemandProfile {
    pub category: Category,
    pub series: Vec<f64>,
    pub stats: DemandStats,
    /// True when the history had no data and the default series was used.
    pub defaulted: bool,
}

impl CategoryDemandProfile {
    pub fn resolve(category: &Category, history: &DemandHistory, default_series: &[f64]) -> Self {
        let (series, defaulted) = match history.series(category) {
            Some(series) => (series.to_vec(), false),
            None => (default_series.to_vec(), true),
        };
        Self {
            category: category.clone(),
            stats: DemandStats::from_series(&series),
            series,
            defaulted,
        }
    }

    /// First observation of the series; contributes to the demand budget.
    pub fn leading_observation(&self) -> f64 {
        self.series.first().copied().unwrap_or(0.0)
    }
}
