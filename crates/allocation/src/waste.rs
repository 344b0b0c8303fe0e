use serde::{Deserialize, Serialize};

/// Expected leftover units for one item.
///
/// `distribution_ratio` is clamped into [0, 1]; the result is never negative
/// for a utilization rate in (0, 1].
pub fn expected_waste(quantity: u32, utilization_rate: f64, distribution_ratio: f64) -> f64 {
    let ratio = distribution_ratio.clamp(0.0, 1.0);
    (quantity as f64 * (1.0 - utilization_rate * ratio)).max(0.0)
}

/// `allocation / quantity`, in [0, 1].
pub fn distribution_ratio(allocation: u32, quantity: u32) -> f64 {
    if quantity == 0 {
        return 0.0;
    }
    (allocation as f64 / quantity as f64).min(1.0)
}

/// Waste before and after the recommended distribution, in whole units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteReduction {
    /// Everything on hand goes to waste without a distribution.
    pub original_waste: u32,
    pub optimized_waste: u32,
    pub reduction: u32,
}

impl WasteReduction {
    pub fn new(quantity: u32, allocation: u32) -> Self {
        let optimized_waste = quantity.saturating_sub(allocation);
        Self {
            original_waste: quantity,
            optimized_waste,
            reduction: quantity - optimized_waste,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints() {
        assert_eq!(expected_waste(40, 0.8, 0.0), 40.0);
        assert!((expected_waste(40, 0.8, 1.0) - 8.0).abs() < 1e-12);
        assert!((expected_waste(18, 0.8, distribution_ratio(8, 18)) - 11.6).abs() < 1e-9);
    }

    #[test]
    fn reduction_profile() {
        assert_eq!(
            WasteReduction::new(45, 22),
            WasteReduction {
                original_waste: 45,
                optimized_waste: 23,
                reduction: 22
            }
        );
        assert_eq!(WasteReduction::new(3, 5).optimized_waste, 0);
    }

    proptest! {
        /// Property: more distribution never means more waste.
        #[test]
        fn waste_non_increasing_in_ratio(
            quantity in 1u32..100_000,
            utilization in 0.01f64..=1.0,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let w_lo = expected_waste(quantity, utilization, lo);
            let w_hi = expected_waste(quantity, utilization, hi);
            prop_assert!(w_hi <= w_lo);
            prop_assert!(w_hi >= 0.0);
        }
    }
}
