//! Integer allocation of a demand budget across categories, and the per-item
//! split within a category.

use std::cmp::Ordering;

use pantry_inventory::Category;

use crate::config::ClampBand;

/// Historical weight of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWeight {
    pub category: Category,
    pub mean: f64,
}

/// Outcome of splitting a budget across categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllocation {
    /// One entry per input weight, same order.
    pub shares: Vec<u64>,
    /// Every mean was zero, so the budget was split evenly.
    pub equal_share: bool,
}

/// Split `budget` proportionally to each category's mean demand.
///
/// Shares are rounded independently, optionally clamped into `band`, capped at
/// `budget`, then reconciled so they sum to exactly `budget` (for at least one
/// category).
pub fn allocate(weights: &[CategoryWeight], budget: u64, band: Option<ClampBand>) -> CategoryAllocation {
    if weights.is_empty() {
        return CategoryAllocation {
            shares: Vec::new(),
            equal_share: false,
        };
    }

    let total_mean: f64 = weights.iter().map(|w| w.mean).sum();
    let equal_share = total_mean <= 0.0;
    let n = weights.len() as f64;

    let mut shares: Vec<u64> = weights
        .iter()
        .map(|w| {
            let p = if equal_share { 1.0 / n } else { w.mean / total_mean };
            (budget as f64 * p).round() as u64
        })
        .collect();

    if let Some(band) = band {
        for (share, w) in shares.iter_mut().zip(weights) {
            *share = (*share).clamp(band.lower_bound(w.mean), band.upper_bound(w.mean));
        }
    }

    // A single share never exceeds the budget.
    for share in &mut shares {
        *share = (*share).min(budget);
    }

    reconcile(&mut shares, budget, &reconciliation_order(weights));

    CategoryAllocation { shares, equal_share }
}

/// Indices by descending mean, ties broken by category name.
pub fn reconciliation_order(weights: &[CategoryWeight]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let (wa, wb) = (&weights[a], &weights[b]);
        match wb.mean.total_cmp(&wa.mean) {
            Ordering::Equal => wa.category.name().cmp(wb.category.name()),
            other => other,
        }
    });
    order
}

/// Move `shares` onto `budget` by cycling through `order`.
///
/// Equivalent to handing out (or taking back) one unit per category per pass,
/// starting each pass at the head of `order`, with decrements skipping empty
/// shares. Whole passes are applied in bulk, so the loop runs at most
/// `order.len() + 1` times regardless of the gap.
fn reconcile(shares: &mut [u64], budget: u64, order: &[usize]) {
    if order.is_empty() {
        return;
    }
    let total: u128 = shares.iter().map(|&s| u128::from(s)).sum();
    let budget_wide = u128::from(budget);

    if total < budget_wide {
        let missing = budget_wide - total;
        let passes = missing / order.len() as u128;
        let remainder = (missing % order.len() as u128) as usize;
        for (position, &i) in order.iter().enumerate() {
            let extra = passes + u128::from(position < remainder);
            // Bounded by `missing <= budget`, so it fits back into u64.
            shares[i] += extra as u64;
        }
        return;
    }

    let mut excess = total - budget_wide;
    while excess > 0 {
        let eligible: Vec<usize> = order.iter().copied().filter(|&i| shares[i] > 0).collect();
        // `excess > 0` with a non-negative budget means some share is positive.
        let Some(smallest) = eligible.iter().map(|&i| shares[i]).min() else {
            return;
        };
        let count = eligible.len() as u128;

        if excess < count {
            for &i in eligible.iter().take(excess as usize) {
                shares[i] -= 1;
            }
            return;
        }

        let passes = (excess / count).min(u128::from(smallest));
        for &i in &eligible {
            shares[i] -= passes as u64;
        }
        excess -= passes * count;
    }
}

/// Even split of a category's allocation across its items (floored).
pub fn base_amount(category_allocation: u64, item_count: usize) -> u64 {
    if item_count == 0 {
        return 0;
    }
    category_allocation / item_count as u64
}

/// Scale the base amount by pickup and shelf-life probability, then clamp
/// into `[1, quantity]`.
pub fn item_allocation(base_amount: u64, pickup_rate: f64, shelf_life_ratio: f64, quantity: u32) -> u32 {
    let scaled = (base_amount as f64 * pickup_rate * shelf_life_ratio).floor();
    let upper = quantity.max(1);
    if !(scaled >= 1.0) {
        return 1;
    }
    if scaled >= upper as f64 {
        return upper;
    }
    scaled as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn weight(name: &str, mean: f64) -> CategoryWeight {
        CategoryWeight {
            category: Category::from(name),
            mean,
        }
    }

    #[test]
    fn proportional_split_of_reference_scenario() {
        let weights = vec![
            weight("Produce", 27.8),
            weight("Meat", 17.2),
            weight("Bakery", 38.4),
        ];

        let allocation = allocate(&weights, 85, None);
        assert_eq!(allocation.shares, vec![28, 18, 39]);
        assert!(!allocation.equal_share);
    }

    #[test]
    fn rounding_drift_is_absorbed_by_largest_mean_first() {
        // 10 * 1/3 rounds to 3 three times -> one unit short.
        let weights = vec![weight("Dairy", 5.0), weight("Meat", 5.0), weight("Bakery", 5.0)];
        let allocation = allocate(&weights, 10, None);
        // equal means: name order Bakery < Dairy < Meat
        assert_eq!(allocation.shares, vec![3, 3, 4]);

        // 2 * 1/4 rounds up to 1 four times -> two units over.
        let weights = vec![
            weight("Dairy", 1.0),
            weight("Meat", 1.0),
            weight("Produce", 1.0),
            weight("Bakery", 1.0),
        ];
        let allocation = allocate(&weights, 2, None);
        assert_eq!(allocation.shares, vec![0, 1, 1, 0]);
    }

    #[test]
    fn zero_means_split_evenly() {
        let weights = vec![weight("Dairy", 0.0), weight("Meat", 0.0), weight("Produce", 0.0)];
        let allocation = allocate(&weights, 7, None);
        assert!(allocation.equal_share);
        assert_eq!(allocation.shares.iter().sum::<u64>(), 7);
        assert_eq!(allocation.shares, vec![3, 2, 2]);
    }

    #[test]
    fn zero_budget_allocates_nothing() {
        let weights = vec![weight("Dairy", 4.0), weight("Meat", 9.0)];
        assert_eq!(allocate(&weights, 0, None).shares, vec![0, 0]);
    }

    #[test]
    fn reconciliation_overrides_clamp_band() {
        // Band caps Dairy at ceil(1.5 * 2) = 3, but the budget still has to be met.
        let weights = vec![weight("Dairy", 2.0)];
        let allocation = allocate(&weights, 50, Some(ClampBand::default()));
        assert_eq!(allocation.shares, vec![50]);

        // Band floors Meat at ceil(0.2 * 40) = 8 even though the proportional share is 0.
        let weights = vec![weight("Meat", 40.0), weight("Bakery", 0.0001)];
        let allocation = allocate(&weights, 10, Some(ClampBand::default()));
        assert_eq!(allocation.shares.iter().sum::<u64>(), 10);
    }

    #[test]
    fn order_is_descending_mean_then_name() {
        let weights = vec![
            weight("Meat", 17.2),
            weight("Dairy", 22.8),
            weight("Bakery", 17.2),
            weight("Produce", 27.8),
        ];
        assert_eq!(reconciliation_order(&weights), vec![3, 1, 2, 0]);
    }

    #[test]
    fn item_allocation_is_floored_and_clamped() {
        assert_eq!(item_allocation(28, 81.0 / 102.0, 1.0, 45), 22);
        assert_eq!(item_allocation(18, 81.0 / 102.0, 0.6, 18), 8);
        assert_eq!(item_allocation(100, 0.9, 1.0, 12), 12);
        assert_eq!(item_allocation(0, 0.9, 1.0, 12), 1);
        assert_eq!(item_allocation(50, 0.9, 0.0, 12), 1);
    }

    #[test]
    fn base_amount_floors() {
        assert_eq!(base_amount(39, 2), 19);
        assert_eq!(base_amount(5, 0), 0);
    }

    #[test]
    fn huge_budget_with_clamp_band_reconciles_in_bulk() {
        // Band caps Dairy at 2 units; the rest of the budget is handed back in one pass.
        let weights = vec![weight("Dairy", 1.0)];
        let allocation = allocate(&weights, 300_000_000, Some(ClampBand::default()));
        assert_eq!(allocation.shares, vec![300_000_000]);

        // Band floors Meat far above a tiny budget; the surplus is taken back in bulk.
        let weights = vec![weight("Meat", 1.0e12), weight("Bakery", 1.0e12)];
        let allocation = allocate(&weights, 3, Some(ClampBand::default()));
        assert_eq!(allocation.shares.iter().sum::<u64>(), 3);
        // Equal means: Bakery sorts first, so it gives up the odd unit.
        assert_eq!(allocation.shares, vec![2, 1]);
    }

    #[test]
    fn budget_at_u64_max_does_not_overflow() {
        // Each half rounds to 2^63, so the provisional total is one past u64::MAX.
        let weights = vec![weight("Dairy", 1.0e19), weight("Meat", 1.0e19)];
        let allocation = allocate(&weights, u64::MAX, None);
        assert_eq!(
            allocation.shares.iter().map(|&s| u128::from(s)).sum::<u128>(),
            u128::from(u64::MAX)
        );
    }

    /// One unit per step, restarting each pass at the head of `order`.
    fn reconcile_unit_steps(shares: &mut [u64], budget: u64, order: &[usize]) {
        let mut total: u64 = shares.iter().sum();
        while total < budget {
            for &i in order {
                if total == budget {
                    break;
                }
                shares[i] += 1;
                total += 1;
            }
        }
        while total > budget {
            for &i in order {
                if total == budget {
                    break;
                }
                if shares[i] > 0 {
                    shares[i] -= 1;
                    total -= 1;
                }
            }
        }
    }

    fn weights_strategy() -> impl Strategy<Value = Vec<CategoryWeight>> {
        let names = ["Dairy", "Meat", "Produce", "Bakery", "Frozen", "Canned", "Dry"];
        prop::collection::vec(0.0f64..500.0, 1..=names.len()).prop_map(move |means| {
            means
                .into_iter()
                .enumerate()
                .map(|(i, mean)| weight(names[i], mean))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: shares always sum to the budget.
        #[test]
        fn shares_sum_to_budget(
            weights in weights_strategy(),
            budget in 0u64..10_000,
            clamp in any::<bool>(),
        ) {
            let band = clamp.then(ClampBand::default);
            let allocation = allocate(&weights, budget, band);
            prop_assert_eq!(allocation.shares.len(), weights.len());
            prop_assert_eq!(allocation.shares.iter().sum::<u64>(), budget);
        }

        /// Property: bulk reconciliation matches stepping one unit at a time.
        #[test]
        fn bulk_reconciliation_matches_unit_steps(
            weights in weights_strategy(),
            provisional in prop::collection::vec(0u64..400, 7),
            budget in 0u64..1_000,
        ) {
            let mut bulk: Vec<u64> = provisional[..weights.len()].to_vec();
            let mut stepped = bulk.clone();
            let order = reconciliation_order(&weights);

            reconcile(&mut bulk, budget, &order);
            reconcile_unit_steps(&mut stepped, budget, &order);

            prop_assert_eq!(bulk.iter().sum::<u64>(), budget);
            prop_assert_eq!(bulk, stepped);
        }

        /// Property: the split is deterministic.
        #[test]
        fn allocation_is_deterministic(weights in weights_strategy(), budget in 0u64..10_000) {
            prop_assert_eq!(allocate(&weights, budget, None), allocate(&weights, budget, None));
        }

        /// Property: item allocations stay within `[1, quantity]`.
        #[test]
        fn item_allocation_within_bounds(
            base in 0u64..100_000,
            pickup in 0.0001f64..1.0,
            shelf in 0.0f64..=1.0,
            quantity in 1u32..10_000,
        ) {
            let a = item_allocation(base, pickup, shelf, quantity);
            prop_assert!(a >= 1 && a <= quantity);
        }
    }
}
