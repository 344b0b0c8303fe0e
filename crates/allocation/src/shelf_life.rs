use pantry_inventory::{Category, CategoryTable};

/// Maps remaining days to a viability ratio using per-category shelf lives.
#[derive(Debug, Copy, Clone)]
pub struct ShelfLifeEstimator<'a> {
    max_shelf_life_days: &'a CategoryTable<u32>,
}

impl<'a> ShelfLifeEstimator<'a> {
    pub fn new(max_shelf_life_days: &'a CategoryTable<u32>) -> Self {
        Self { max_shelf_life_days }
    }

    pub fn max_shelf_life(&self, category: &Category) -> u32 {
        *self.max_shelf_life_days.get(category)
    }

    /// `days_until_expiry / max_shelf_life`, unclamped. Negative once expired.
    pub fn raw_ratio(&self, days_until_expiry: i64, category: &Category) -> f64 {
        raw_ratio(days_until_expiry, self.max_shelf_life(category))
    }

    /// Remaining fraction of the category's shelf life, in [0, 1].
    pub fn ratio(&self, days_until_expiry: i64, category: &Category) -> f64 {
        self.raw_ratio(days_until_expiry, category).clamp(0.0, 1.0)
    }
}

fn raw_ratio(days_until_expiry: i64, max_shelf_life: u32) -> f64 {
    if max_shelf_life == 0 {
        return if days_until_expiry > 0 { 1.0 } else { 0.0 };
    }
    days_until_expiry as f64 / max_shelf_life as f64
}
