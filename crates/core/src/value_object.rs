//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Engine inputs and outputs (demand profiles, pickup counts, allocation
/// results) are value objects: they are rebuilt on every optimization pass and
/// compared by their fields, never by identity.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PickupOutcomeCounts { successes: u32, failures: u32 }
///
/// impl ValueObject for PickupOutcomeCounts {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
