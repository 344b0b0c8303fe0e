//! `pantry-core`: identifiers, domain errors and marker traits.
//!
//! This crate contains **pure domain** primitives (no IO, no clock reads).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use value_object::ValueObject;
