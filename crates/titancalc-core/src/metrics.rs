//! Derived per-minute, per-slot metrics.
//!
//! Resource costs use a sentinel of `-1` for "no usable cost": a resource the
//! blueprint never required, one discounted to exactly zero, and one
//! discounted below zero all become `-1`. Every rate and ratio is then
//! clamped at zero, so the sentinel never surfaces as a negative metric.

use titancalc_types::{BlueprintMetrics, NormalizedBlueprint, PerResource};
use tracing::debug;

/// Stand-in cost for a resource with no positive cost.
pub const NO_RESOURCE: i64 = -1;

/// Seconds per minute.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Map a resource cost to the value used for division.
///
/// Absent and zero costs become [`NO_RESOURCE`]; anything below it is
/// clamped up to it.
pub fn effective_resource(cost: Option<i64>) -> i64 {
    match cost {
        None | Some(0) => NO_RESOURCE,
        Some(cost) => cost.max(NO_RESOURCE),
    }
}

/// `x` if positive, else `+0.0`. Negative zero and NaN also become `+0.0`.
fn non_negative(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

/// Compute the metrics of one normalized blueprint.
///
/// A crafting time of zero is not guarded; the rates it produces are
/// whatever IEEE division gives.
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(blueprint: &NormalizedBlueprint) -> BlueprintMetrics {
    let minutes = blueprint.crafting_time / SECONDS_PER_MINUTE;
    let value = blueprint.value as f64;

    let costs = PerResource::from_fn(|r| effective_resource(blueprint.resource_cost(r)) as f64);
    let per_minute_per_slot = PerResource::from_fn(|r| non_negative(costs.get(r) / minutes));
    let value_per_resource = PerResource::from_fn(|r| non_negative(value / costs.get(r)));

    let value_per_minute_per_slot = value / minutes;
    debug!(
        blueprint = blueprint.name,
        minutes, value_per_minute_per_slot, "metrics computed"
    );

    BlueprintMetrics {
        name: blueprint.name.clone(),
        value_per_minute_per_slot,
        per_minute_per_slot,
        value_per_resource,
    }
}
