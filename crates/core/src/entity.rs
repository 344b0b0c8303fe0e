//! Entity trait: things compared by identity rather than by value.

/// Inventory items are entities: two lots with the same name and quantity are
/// still distinct if their ids differ.
pub trait Entity {
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
