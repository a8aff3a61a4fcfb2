//! Static game-balance tables.
//!
//! - Resource regeneration per building level, one table per [`ResourceTier`]
//! - Value rounding thresholds used to produce in-game display values
//!
//! The building→resource map lives on [`titancalc_types::Building::resource`].

use titancalc_types::ResourceTier;

/// Highest building level present in the regeneration tables.
pub const MAX_BUILDING_LEVEL: u32 = 20;

/// Tier 1 regeneration per minute, indexed by building level 1..=20.
const T1_REGEN: [f64; 20] = [
    6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5, 10.0, 10.75, 11.5, 12.25, 13.0, 13.75, 14.5, 15.25,
    16.0, 17.0, 19.0, 22.0,
];

/// Tier 2 regeneration per minute, indexed by building level 1..=20.
const T2_REGEN: [f64; 20] = [
    0.7, 0.9, 1.1, 1.2, 1.5, 1.7, 1.9, 2.1, 2.3, 2.6, 2.9, 3.2, 3.5, 3.8, 4.1, 4.4, 4.7, 5.2, 6.0,
    7.0,
];

/// Tier 3 regeneration per minute, indexed by building level 1..=20.
const T3_REGEN: [f64; 20] = [
    0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8, 0.85, 0.9,
    1.0, 1.1, 1.25,
];

/// `(threshold, granularity)` pairs in ascending threshold order.
///
/// A value at or above a threshold is rounded to the nearest multiple of that
/// threshold's granularity; the largest matching threshold wins.
pub const ROUNDING_THRESHOLDS: [(f64, f64); 6] = [
    (10.0, 5.0),
    (50.0, 10.0),
    (1_000.0, 50.0),
    (10_000.0, 500.0),
    (100_000.0, 5_000.0),
    (1_000_000.0, 50_000.0),
];

/// The base regeneration rate for a building of `tier` at `level`.
///
/// Returns `None` when `level` is outside `1..=MAX_BUILDING_LEVEL`.
pub fn base_regen(tier: ResourceTier, level: u32) -> Option<f64> {
    let table = match tier {
        ResourceTier::T1 => &T1_REGEN,
        ResourceTier::T2 => &T2_REGEN,
        ResourceTier::T3 => &T3_REGEN,
    };
    let index = usize::try_from(level.checked_sub(1)?).ok()?;
    table.get(index).copied()
}
