//! Batch pipeline: raw blueprints in, per-blueprint reports out.
//!
//! Each blueprint is transformed and measured on its own; nothing is carried
//! from one record to the next, and output order matches input order.

use titancalc_types::{BlueprintMetrics, NormalizedBlueprint, RawBlueprint};
use tracing::info;

use crate::coefficients::PlayerCoefficients;
use crate::metrics::compute_metrics;
use crate::transform::{WorkerTranslation, transform_blueprint};

/// The outcome for one blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintReport {
    /// The blueprint after upgrades and worker speed.
    pub blueprint: NormalizedBlueprint,
    /// Metrics derived from [`Self::blueprint`].
    pub metrics: BlueprintMetrics,
}

/// Read-only context shared by every blueprint in a run.
#[derive(Debug, Clone)]
pub struct Calculator {
    coefficients: PlayerCoefficients,
    translation: WorkerTranslation,
}

impl Calculator {
    /// Create a calculator from resolved coefficients and the role map.
    pub const fn new(coefficients: PlayerCoefficients, translation: WorkerTranslation) -> Self {
        Self {
            coefficients,
            translation,
        }
    }

    /// The coefficients this calculator applies.
    pub const fn coefficients(&self) -> &PlayerCoefficients {
        &self.coefficients
    }

    /// Transform and measure one blueprint.
    pub fn evaluate(&self, raw: &RawBlueprint) -> BlueprintReport {
        let blueprint = transform_blueprint(raw, &self.coefficients, &self.translation);
        let metrics = compute_metrics(&blueprint);
        BlueprintReport { blueprint, metrics }
    }

    /// Evaluate every blueprint in order.
    pub fn run(&self, raws: &[RawBlueprint]) -> Vec<BlueprintReport> {
        let reports: Vec<BlueprintReport> = raws.iter().map(|raw| self.evaluate(raw)).collect();
        info!(blueprints = reports.len(), "batch evaluated");
        reports
    }
}

/// Evaluate `raws` with a one-off [`Calculator`].
pub fn run(
    raws: &[RawBlueprint],
    coefficients: &PlayerCoefficients,
    translation: &WorkerTranslation,
) -> Vec<BlueprintReport> {
    Calculator::new(coefficients.clone(), translation.clone()).run(raws)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use titancalc_types::{PerResource, Resource, UpgradeSlot, UpgradeText, Worker};

    fn calculator() -> Calculator {
        Calculator::new(
            PlayerCoefficients {
                craft_time: BTreeMap::from([(Worker::Wallace, 0.9)]),
                regen: PerResource::default(),
            },
            WorkerTranslation::new([("Blacksmith", Worker::Wallace)]),
        )
    }

    fn raw(name: &str, value: f64, upgrade: &str) -> RawBlueprint {
        RawBlueprint {
            name: name.to_owned(),
            tier: Some(1),
            value,
            crafting_time: 120.0,
            resources: BTreeMap::from([(Resource::Iron, 8)]),
            worker_roles: vec!["Blacksmith".to_owned()],
            components: Vec::new(),
            upgrades: vec![UpgradeText {
                slot: UpgradeSlot::Mastery(1),
                text: upgrade.to_owned(),
            }],
        }
    }

    #[test]
    fn end_to_end_worked_example() {
        let report = calculator().evaluate(&raw("Squire Sword", 100.0, "x1.2 Value Increase"));
        assert_eq!(report.blueprint.value, 120);
        assert!((report.blueprint.crafting_time - 108.0).abs() < 1e-9);
        assert!((report.metrics.value_per_minute_per_slot - 66.667).abs() < 1e-3);
    }

    #[test]
    fn run_preserves_order_and_isolates_records() {
        let raws = vec![
            raw("Broken Upgrade", 50.0, "xbogus Value Increase"),
            raw("Discounted", 100.0, "-10 Iron Spent"),
            raw("Plain", 200.0, ""),
        ];
        let reports = calculator().run(&raws);
        let names: Vec<&str> = reports.iter().map(|r| r.metrics.name.as_str()).collect();
        assert_eq!(names, vec!["Broken Upgrade", "Discounted", "Plain"]);

        assert_eq!(reports[0].blueprint.value, 50);
        assert_eq!(reports[1].blueprint.resource_cost(Resource::Iron), Some(-2));
        assert!(reports[1].metrics.per_minute_per_slot.iron.abs() < f64::EPSILON);
        assert_eq!(reports[2].blueprint.value, 200);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let raws = vec![raw("Squire Sword", 100.0, "x1.2 Value Increase")];
        let c = calculator();
        assert_eq!(c.run(&raws), c.run(&raws));
        assert_eq!(
            run(&raws, c.coefficients(), &WorkerTranslation::new([("Blacksmith", Worker::Wallace)])),
            c.run(&raws)
        );
    }
}
