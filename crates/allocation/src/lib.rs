//! `pantry-allocation`
//!
//! **Responsibility:** the distribution allocation & confidence engine.
//!
//! Turns a list of perishable inventory items plus historical demand into a
//! per-item recommended distribution, an expected-waste figure, a confidence
//! score and an urgency level.
//!
//! - Every entry point is a pure function of its inputs; the clock is passed
//!   in explicitly (`now`), never read.
//! - It never mutates its inputs and keeps no state between passes
//!   ([`DistributionPlanner`] only holds the latest inputs and result).
//! - Documented fallbacks (unknown category, missing history, expired items)
//!   are reported in [`EngineOutput::fallbacks`] instead of failing the batch.

pub mod aggregator;
pub mod allocator;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod params;
pub mod pickup;
pub mod planner;
pub mod shelf_life;
pub mod stats;
pub mod urgency;
pub mod waste;

pub use config::{ClampBand, EngineConfig};
pub use engine::{
    CategoryPlan, DistributionEngine, EngineOutput, Fallback, ItemPlan, OptimizationResult, optimize,
};
pub use error::EngineError;
pub use history::DemandHistory;
pub use params::{ParameterGenerator, ProbabilityParameters};
pub use pickup::PickupOutcomeCounts;
pub use planner::{DistributionPlanner, PlanState};
pub use urgency::{UrgencyLevel, UrgencyPolicy};
