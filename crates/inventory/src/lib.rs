//! Inventory domain module.
//!
//! Perishable lots, their categories and expiry arithmetic, implemented purely
//! as deterministic domain logic (no IO, no clock reads).

pub mod category;
pub mod item;
pub mod samples;

pub use category::{Category, CategoryTable};
pub use item::InventoryItem;
pub use samples::SampleSet;
