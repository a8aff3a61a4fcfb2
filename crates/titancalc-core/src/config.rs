//! Player configuration loading and typed config structures.
//!
//! The player's account state lives in a YAML file (JSON documents are valid
//! YAML and load the same way). This module defines strongly-typed structs
//! that mirror the file, a loader that reads and validates it, and
//! [`ConfigError`], the fatal error raised when the configuration cannot be
//! used.
//!
//! ```yaml
//! workers:
//!   Wallace: 12
//!   Julia: 8
//!   # ... all ten workers
//! buildings:
//!   IronMine: 10
//!   Smelter: 6
//!   # ... all ten buildings
//! guild_boosts:
//!   craft_speed: 0.95
//!   resource_generation: 1.1
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use titancalc_types::{Building, Worker};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::tables::MAX_BUILDING_LEVEL;

/// Errors that make the player configuration unusable.
///
/// All variants are fatal: the run stops before any blueprint is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The document parsed but failed schema validation.
    #[error("invalid player config: {source}")]
    Validation {
        /// Every failed field check.
        #[from]
        source: ValidationErrors,
    },

    /// A worker's level has no entry in the speed bonus table.
    #[error("worker {worker} has level {level}, which has no crafting speed bonus entry")]
    UnknownWorkerLevel {
        /// The worker.
        worker: Worker,
        /// The configured level.
        level: u32,
    },

    /// A building's level is outside the regeneration tables.
    #[error("building {building} has level {level}, expected 1..=20")]
    BuildingLevelOutOfRange {
        /// The building.
        building: Building,
        /// The configured level.
        level: u32,
    },

    /// A building has no configured level.
    #[error("building {0} is missing from the player config")]
    MissingBuilding(Building),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// The player's account state.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct PlayerConfig {
    /// Level of every worker on the roster.
    #[validate(custom(function = "validate_worker_levels"))]
    pub workers: BTreeMap<Worker, u32>,

    /// Level of every resource building.
    #[validate(custom(function = "validate_building_levels"))]
    pub buildings: BTreeMap<Building, u32>,

    /// Guild-wide boosts.
    #[serde(default)]
    #[validate(nested)]
    pub guild_boosts: GuildBoosts,
}

impl PlayerConfig {
    /// Load and validate a player config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is malformed, or
    /// [`ConfigError::Validation`] if it fails schema checks.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a player config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is malformed or
    /// [`ConfigError::Validation`] if it fails schema checks.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

/// Guild boosts. Each value is a multiplicative factor (`1.0` = no boost).
///
/// Only `craft_speed` and `resource_generation` affect the metrics.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct GuildBoosts {
    /// Multiplier applied to every worker's craft-time coefficient.
    #[serde(default = "default_boost")]
    #[validate(range(exclusive_min = 0.0))]
    pub craft_speed: f64,

    /// Multiplier applied to every building's regeneration rate.
    #[serde(default = "default_boost")]
    #[validate(range(exclusive_min = 0.0))]
    pub resource_generation: f64,

    /// Hero rest speed boost. Loaded for completeness; unused by the metrics.
    #[serde(default = "default_boost")]
    #[validate(range(exclusive_min = 0.0))]
    pub quest_rest_speed: f64,

    /// Experience boost. Loaded for completeness; unused by the metrics.
    #[serde(default = "default_boost", alias = "xp")]
    #[validate(range(exclusive_min = 0.0))]
    pub xp_earned: f64,
}

impl Default for GuildBoosts {
    fn default() -> Self {
        Self {
            craft_speed: default_boost(),
            resource_generation: default_boost(),
            quest_rest_speed: default_boost(),
            xp_earned: default_boost(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_worker_levels(workers: &BTreeMap<Worker, u32>) -> Result<(), ValidationError> {
    if let Some(missing) = Worker::ALL.iter().find(|w| !workers.contains_key(*w)) {
        return Err(ValidationError::new("worker_roster")
            .with_message(Cow::Owned(format!("missing level for worker {missing}"))));
    }
    if let Some((worker, _)) = workers.iter().find(|(_, level)| **level == 0) {
        return Err(ValidationError::new("worker_level")
            .with_message(Cow::Owned(format!("worker {worker} has level 0"))));
    }
    Ok(())
}

fn validate_building_levels(buildings: &BTreeMap<Building, u32>) -> Result<(), ValidationError> {
    if let Some(missing) = Building::ALL.iter().find(|b| !buildings.contains_key(*b)) {
        return Err(ValidationError::new("building_roster")
            .with_message(Cow::Owned(format!("missing level for building {missing}"))));
    }
    if let Some((building, level)) = buildings
        .iter()
        .find(|(_, level)| !(1..=MAX_BUILDING_LEVEL).contains(*level))
    {
        return Err(ValidationError::new("building_level").with_message(Cow::Owned(format!(
            "building {building} has level {level}, expected 1..={MAX_BUILDING_LEVEL}"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_boost() -> f64 {
    1.0
}
