//! Shared type definitions for the blueprint economics calculator.
//!
//! This crate is the single source of truth for the records that flow through
//! the calculator: raw blueprint rows, normalized blueprints, and the final
//! per-minute, per-slot metrics.
//!
//! # Modules
//!
//! - [`enums`] -- Fixed rosters (resources, buildings, workers)
//! - [`structs`] -- Blueprint records and the metrics table schema

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Building, Resource, ResourceTier, Worker};
pub use structs::{
    BlueprintMetrics, ComponentRequirement, MetricColumn, MetricValue, NormalizedBlueprint,
    PerResource, RawBlueprint, UpgradeSlot, UpgradeText,
};
