//! Blueprint economics for the titancalc calculator.
//!
//! This crate turns the player's account state and the game-data export into
//! per-blueprint metrics. Everything is loaded once up front and read-only
//! afterwards; blueprints are processed independently, in input order.
//!
//! # Modules
//!
//! - [`config`] -- Player configuration loading and validation.
//! - [`tables`] -- Static regeneration and rounding tables.
//! - [`coefficients`] -- Worker craft-time multipliers and resource
//!   regeneration rates resolved from the config.
//! - [`import`] -- Reader for the JSON spreadsheet export.
//! - [`upgrade`] -- Upgrade-text classification and the ordered upgrade fold.
//! - [`rounding`] -- Tiered value rounding.
//! - [`transform`] -- [`RawBlueprint`] → [`NormalizedBlueprint`].
//! - [`metrics`] -- [`NormalizedBlueprint`] → [`BlueprintMetrics`].
//! - [`pipeline`] -- Batch evaluation via [`Calculator`].
//!
//! [`RawBlueprint`]: titancalc_types::RawBlueprint
//! [`NormalizedBlueprint`]: titancalc_types::NormalizedBlueprint
//! [`BlueprintMetrics`]: titancalc_types::BlueprintMetrics
//! [`Calculator`]: pipeline::Calculator

pub mod coefficients;
pub mod config;
pub mod import;
pub mod metrics;
pub mod pipeline;
pub mod rounding;
pub mod tables;
pub mod transform;
pub mod upgrade;

pub use coefficients::{PlayerCoefficients, SpeedBonusTable, resolve};
pub use config::{ConfigError, GuildBoosts, PlayerConfig};
pub use import::{DataSet, ImportError};
pub use pipeline::{BlueprintReport, Calculator};
pub use transform::WorkerTranslation;
pub use upgrade::{UpgradeEffect, UpgradeParseSkip};
