//! Blueprint transformation: raw export row → [`NormalizedBlueprint`].
//!
//! Steps, in order:
//!
//! 1. copy base stats (omitted fields stay omitted)
//! 2. resolve required worker roles to workers, dropping unknown roles
//! 3. fold every non-empty upgrade slot left to right
//! 4. multiply crafting time by each required worker's multiplier
//! 5. round the value with the tiered rounding table

use std::collections::BTreeMap;

use titancalc_types::{NormalizedBlueprint, RawBlueprint, Worker};
use tracing::{debug, warn};

use crate::coefficients::PlayerCoefficients;
use crate::rounding::round_value;
use crate::upgrade::{UpgradeFold, classify};

// ---------------------------------------------------------------------------
// WorkerTranslation
// ---------------------------------------------------------------------------

/// Worker role (e.g. `"Blacksmith"`) → the worker who fills it.
///
/// Role lookups ignore ASCII case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerTranslation {
    roles: BTreeMap<String, Worker>,
}

impl WorkerTranslation {
    /// Build a translation from `(role, worker)` pairs.
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, Worker)>) -> Self {
        Self {
            roles: entries
                .into_iter()
                .map(|(role, worker)| (normalize_role(role.as_ref()), worker))
                .collect(),
        }
    }

    /// The worker filling `role`, if any.
    pub fn resolve(&self, role: &str) -> Option<Worker> {
        self.roles.get(&normalize_role(role)).copied()
    }

    /// Number of known roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether no roles are known.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

fn normalize_role(role: &str) -> String {
    role.trim().to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Transformation
// ---------------------------------------------------------------------------

/// Apply upgrades and player coefficients to one raw blueprint.
///
/// Never fails: unknown roles, unrecognized upgrades and upgrades against
/// untracked resources are logged and skipped.
pub fn transform_blueprint(
    raw: &RawBlueprint,
    coefficients: &PlayerCoefficients,
    translation: &WorkerTranslation,
) -> NormalizedBlueprint {
    let workers: Vec<Worker> = raw
        .worker_roles
        .iter()
        .filter_map(|role| {
            let worker = translation.resolve(role);
            if worker.is_none() {
                debug!(blueprint = raw.name, role, "required worker role not found, dropped");
            }
            worker
        })
        .collect();

    let upgraded = raw
        .upgrades
        .iter()
        .filter(|upgrade| !upgrade.text.trim().is_empty())
        .fold(
            UpgradeFold::new(raw.value, raw.crafting_time, raw.resources.clone()),
            |state, upgrade| state.apply(&classify(&upgrade.text)),
        );

    let crafting_time = workers.iter().fold(upgraded.crafting_time, |time, &worker| {
        match coefficients.craft_time_multiplier(worker) {
            Some(multiplier) => time * multiplier,
            None => {
                warn!(blueprint = raw.name, %worker, "worker has no craft time multiplier");
                time
            }
        }
    });

    let value = round_value(upgraded.value);

    debug!(
        blueprint = raw.name,
        value,
        crafting_time,
        value_coeff = upgraded.value_coeff,
        time_coeff = upgraded.time_coeff,
        "blueprint transformed"
    );

    NormalizedBlueprint {
        name: raw.name.clone(),
        tier: raw.tier,
        value,
        crafting_time,
        workers,
        resources: upgraded.resources,
        components: raw.components.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titancalc_types::{PerResource, Resource, UpgradeSlot, UpgradeText};

    fn coefficients(multiplier: f64) -> PlayerCoefficients {
        PlayerCoefficients {
            craft_time: Worker::ALL.iter().map(|&w| (w, multiplier)).collect(),
            regen: PerResource::default(),
        }
    }

    fn translation() -> WorkerTranslation {
        WorkerTranslation::new([
            ("Blacksmith", Worker::Wallace),
            ("Tailor", Worker::Julia),
        ])
    }

    fn raw(upgrades: &[&str]) -> RawBlueprint {
        RawBlueprint {
            name: "Squire Sword".to_owned(),
            tier: Some(1),
            value: 100.0,
            crafting_time: 120.0,
            resources: BTreeMap::from([(Resource::Iron, 8)]),
            worker_roles: vec!["Blacksmith".to_owned()],
            components: Vec::new(),
            upgrades: UpgradeSlot::ALL
                .iter()
                .zip(upgrades)
                .map(|(&slot, text)| UpgradeText {
                    slot,
                    text: (*text).to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn role_lookup_ignores_case() {
        let t = translation();
        assert_eq!(t.resolve("blacksmith"), Some(Worker::Wallace));
        assert_eq!(t.resolve(" Tailor "), Some(Worker::Julia));
        assert_eq!(t.resolve("Wizard"), None);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn worked_example() {
        let bp = transform_blueprint(&raw(&["x1.2 Value Increase"]), &coefficients(0.9), &translation());
        assert_eq!(bp.value, 120);
        assert!((bp.crafting_time - 108.0).abs() < 1e-9);
        assert_eq!(bp.workers, vec![Worker::Wallace]);
    }

    #[test]
    fn unknown_roles_are_dropped() {
        let mut input = raw(&[]);
        input.worker_roles = vec!["Wizard".to_owned(), "Tailor".to_owned()];
        let bp = transform_blueprint(&input, &coefficients(0.5), &translation());
        assert_eq!(bp.workers, vec![Worker::Julia]);
        assert!((bp.crafting_time - 60.0).abs() < 1e-9);
    }

    #[test]
    fn every_worker_multiplies_time() {
        let mut input = raw(&[]);
        input.worker_roles = vec!["Blacksmith".to_owned(), "Tailor".to_owned()];
        let bp = transform_blueprint(&input, &coefficients(0.5), &translation());
        assert!((bp.crafting_time - 30.0).abs() < 1e-9);
    }

    #[test]
    fn resource_discount_past_zero_goes_negative() {
        let bp = transform_blueprint(&raw(&["-10 Iron Spent"]), &coefficients(1.0), &translation());
        assert_eq!(bp.resource_cost(Resource::Iron), Some(-2));
        assert_eq!(bp.resource_cost(Resource::Wood), None);
    }

    #[test]
    fn empty_and_unrecognized_slots_are_no_ops() {
        let plain = transform_blueprint(&raw(&[]), &coefficients(1.0), &translation());
        let noisy = transform_blueprint(
            &raw(&["", "Unlocks Superior quality", "   ", "xabc Value Increase"]),
            &coefficients(1.0),
            &translation(),
        );
        assert_eq!(plain, noisy);
    }

    #[test]
    fn value_and_time_slots_commute() {
        let a = transform_blueprint(
            &raw(&["x1.1 Value Increase", "-10% Craft Time Reduction"]),
            &coefficients(1.0),
            &translation(),
        );
        let b = transform_blueprint(
            &raw(&["-10% Craft Time Reduction", "x1.1 Value Increase"]),
            &coefficients(1.0),
            &translation(),
        );
        assert_eq!(a.value, b.value);
        assert_eq!(a.crafting_time.to_bits(), b.crafting_time.to_bits());
    }

    #[test]
    fn transformation_is_repeatable() {
        let input = raw(&["x1.25 Value Increase", "-3 Iron Spent", "-15% Craft Time Reduction"]);
        let c = coefficients(0.85);
        let first = transform_blueprint(&input, &c, &translation());
        let second = transform_blueprint(&input, &c, &translation());
        assert_eq!(first, second);
        assert_eq!(first.crafting_time.to_bits(), second.crafting_time.to_bits());
    }
}
