//! Player-specific coefficients derived from the player config.
//!
//! Two things are resolved once per run and stay fixed afterwards:
//!
//! - a craft-time multiplier per worker, from the worker's level via the
//!   [`SpeedBonusTable`] and the guild craft-speed boost
//! - a regeneration rate per resource, from the producing building's level via
//!   the tier tables in [`crate::tables`] and the guild resource boost

use std::collections::BTreeMap;

use titancalc_types::{Building, PerResource, Resource, Worker};
use tracing::info;

use crate::config::{ConfigError, PlayerConfig};
use crate::tables;

// ---------------------------------------------------------------------------
// SpeedBonusTable
// ---------------------------------------------------------------------------

/// Worker level → crafting speed bonus (fraction, `0.25` = 25% faster).
///
/// Level 1 always maps to a bonus of zero regardless of the table contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedBonusTable {
    bonuses: BTreeMap<u32, f64>,
}

impl SpeedBonusTable {
    /// Build a table from `(level, bonus)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            bonuses: entries.into_iter().collect(),
        }
    }

    /// The bonus for `level`, or `None` if the table has no entry for it.
    pub fn bonus(&self, level: u32) -> Option<f64> {
        if level == 1 {
            return Some(0.0);
        }
        self.bonuses.get(&level).copied()
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    /// Whether the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PlayerCoefficients
// ---------------------------------------------------------------------------

/// Coefficients resolved from the player config. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCoefficients {
    /// Multiplier applied to a blueprint's crafting time per required worker.
    pub craft_time: BTreeMap<Worker, f64>,
    /// Regeneration rate per resource, boost included.
    pub regen: PerResource<f64>,
}

impl PlayerCoefficients {
    /// The craft-time multiplier for `worker`, if the worker was configured.
    pub fn craft_time_multiplier(&self, worker: Worker) -> Option<f64> {
        self.craft_time.get(&worker).copied()
    }

    /// The regeneration rate of `resource`.
    pub const fn regen_rate(&self, resource: Resource) -> f64 {
        *self.regen.get(resource)
    }
}

/// Compute a worker's craft-time multiplier.
///
/// `round((1 - bonus) * boost, 2)`. Rounding to two decimals keeps float
/// noise from compounding when several workers multiply the same time.
pub fn craft_time_multiplier(bonus: f64, craft_speed_boost: f64) -> f64 {
    round_hundredths((1.0 - bonus) * craft_speed_boost)
}

/// Round to two decimal places from the exact value of `x`.
///
/// Scaling by 100 first would round `0.46499999999999997` up to `0.47`;
/// formatting rounds the stored value itself and gives `0.46`.
fn round_hundredths(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}

/// Resolve every worker multiplier and building regeneration rate.
///
/// Emits one `info` event per worker and per building.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownWorkerLevel`] if a worker's level (other
/// than 1) has no speed bonus entry, [`ConfigError::MissingBuilding`] if a
/// building has no level, or [`ConfigError::BuildingLevelOutOfRange`] if a
/// building's level is outside the regeneration tables.
pub fn resolve(
    config: &PlayerConfig,
    speed_bonuses: &SpeedBonusTable,
) -> Result<PlayerCoefficients, ConfigError> {
    let boosts = &config.guild_boosts;

    let mut craft_time = BTreeMap::new();
    for (&worker, &level) in &config.workers {
        let bonus = speed_bonuses
            .bonus(level)
            .ok_or(ConfigError::UnknownWorkerLevel { worker, level })?;
        let multiplier = craft_time_multiplier(bonus, boosts.craft_speed);
        info!(%worker, level, craft_time_multiplier = multiplier, "worker resolved");
        craft_time.insert(worker, multiplier);
    }

    let mut regen = PerResource::default();
    for &building in Building::ALL {
        let level = config
            .buildings
            .get(&building)
            .copied()
            .ok_or(ConfigError::MissingBuilding(building))?;
        let base = tables::base_regen(building.tier(), level)
            .ok_or(ConfigError::BuildingLevelOutOfRange { building, level })?;
        let rate = base * boosts.resource_generation;
        let resource = building.resource();
        info!(%building, level, %resource, regen_rate = rate, "building resolved");
        *regen.get_mut(resource) = rate;
    }

    Ok(PlayerCoefficients { craft_time, regen })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GuildBoosts;

    fn config(worker_level: u32, building_level: u32, boosts: GuildBoosts) -> PlayerConfig {
        PlayerConfig {
            workers: Worker::ALL.iter().map(|&w| (w, worker_level)).collect(),
            buildings: Building::ALL.iter().map(|&b| (b, building_level)).collect(),
            guild_boosts: boosts,
        }
    }

    fn boosts(craft_speed: f64, resource_generation: f64) -> GuildBoosts {
        GuildBoosts {
            craft_speed,
            resource_generation,
            ..GuildBoosts::default()
        }
    }

    fn table() -> SpeedBonusTable {
        SpeedBonusTable::new([(2, 0.02), (5, 0.1), (10, 0.2), (20, 0.333)])
    }

    #[test]
    fn level_one_has_no_bonus() {
        assert_eq!(table().bonus(1).map(f64::to_bits), Some(0.0_f64.to_bits()));
        assert_eq!(SpeedBonusTable::default().bonus(1).map(f64::to_bits), Some(0.0_f64.to_bits()));
        assert!(table().bonus(3).is_none());
    }

    #[test]
    fn multiplier_is_rounded_to_two_decimals() {
        assert!((craft_time_multiplier(0.333, 1.0) - 0.67).abs() < 1e-12);
        assert!((craft_time_multiplier(0.2, 0.9) - 0.72).abs() < 1e-12);
        assert!((craft_time_multiplier(0.0, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn multiplier_rounds_the_stored_product() {
        // (1 - 0.38) * 0.75 is stored as 0.46499999999999997.
        assert_eq!(craft_time_multiplier(0.38, 0.75).to_bits(), 0.46_f64.to_bits());
        assert_eq!(craft_time_multiplier(0.333, 1.0).to_bits(), 0.67_f64.to_bits());
    }

    #[test]
    fn workers_resolve_through_the_table() {
        let coefficients = resolve(&config(10, 1, boosts(0.9, 1.0)), &table()).unwrap();
        for &worker in Worker::ALL {
            let m = coefficients.craft_time_multiplier(worker).unwrap();
            assert!((m - 0.72).abs() < 1e-12);
        }
    }

    #[test]
    fn level_one_workers_use_only_the_boost() {
        let cfg = config(1, 1, boosts(0.95, 1.0));
        let coefficients = resolve(&cfg, &SpeedBonusTable::default()).unwrap();
        let m = coefficients.craft_time_multiplier(Worker::Julia).unwrap();
        assert!((m - 0.95).abs() < 1e-12);
    }

    #[test]
    fn unknown_worker_level_is_fatal() {
        let result = resolve(&config(7, 1, GuildBoosts::default()), &table());
        assert!(matches!(
            result,
            Err(ConfigError::UnknownWorkerLevel { level: 7, .. })
        ));
    }

    #[test]
    fn regen_uses_each_buildings_tier_table_exactly() {
        let boost = 1.15;
        for level in 1..=tables::MAX_BUILDING_LEVEL {
            let coefficients = resolve(&config(1, level, boosts(1.0, boost)), &table()).unwrap();
            for &building in Building::ALL {
                let expected = tables::base_regen(building.tier(), level).unwrap() * boost;
                assert_eq!(
                    coefficients.regen_rate(building.resource()).to_bits(),
                    expected.to_bits(),
                    "{building} at level {level}"
                );
            }
        }
    }

    #[test]
    fn tier_two_and_three_buildings_do_not_use_tier_one() {
        let coefficients = resolve(&config(1, 10, boosts(1.0, 1.0)), &table()).unwrap();
        assert!((coefficients.regen_rate(Resource::Iron) - 10.75).abs() < 1e-12);
        assert!((coefficients.regen_rate(Resource::Steel) - 2.6).abs() < 1e-12);
        assert!((coefficients.regen_rate(Resource::Jewels) - 0.55).abs() < 1e-12);
    }

    #[test]
    fn building_level_out_of_range_is_fatal() {
        let result = resolve(&config(1, 21, GuildBoosts::default()), &table());
        assert!(matches!(
            result,
            Err(ConfigError::BuildingLevelOutOfRange { level: 21, .. })
        ));
    }

    #[test]
    fn missing_building_is_fatal() {
        let mut cfg = config(1, 5, GuildBoosts::default());
        cfg.buildings.remove(&Building::Sawmill);
        assert!(matches!(
            resolve(&cfg, &table()),
            Err(ConfigError::MissingBuilding(Building::Sawmill))
        ));
    }
}
