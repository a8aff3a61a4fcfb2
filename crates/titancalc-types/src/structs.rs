//! Blueprint records at each stage of the pipeline.
//!
//! - [`RawBlueprint`] -- one imported spreadsheet row, upgrades still as text
//! - [`NormalizedBlueprint`] -- upgrades and worker speed applied, value rounded
//! - [`BlueprintMetrics`] -- per-minute, per-slot rates derived from a normalized blueprint
//!
//! Resource costs are kept in a [`BTreeMap`] so that a resource the blueprint
//! never required (absent key) stays distinct from one that upgrades reduced
//! to zero (present, `0`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Resource, Worker};

// ---------------------------------------------------------------------------
// PerResource
// ---------------------------------------------------------------------------

/// One value for each of the ten tracked resources.
///
/// Unlike a map, every resource is always present, so lookups cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerResource<T> {
    /// Iron entry.
    pub iron: T,
    /// Wood entry.
    pub wood: T,
    /// Leather entry.
    pub leather: T,
    /// Herbs entry.
    pub herbs: T,
    /// Steel entry.
    pub steel: T,
    /// Ironwood entry.
    pub ironwood: T,
    /// Fabric entry.
    pub fabric: T,
    /// Oils entry.
    pub oils: T,
    /// Ether entry.
    pub ether: T,
    /// Jewels entry.
    pub jewels: T,
}

impl<T> PerResource<T> {
    /// Build a table by evaluating `f` once per resource, in tier order.
    pub fn from_fn(mut f: impl FnMut(Resource) -> T) -> Self {
        Self {
            iron: f(Resource::Iron),
            wood: f(Resource::Wood),
            leather: f(Resource::Leather),
            herbs: f(Resource::Herbs),
            steel: f(Resource::Steel),
            ironwood: f(Resource::Ironwood),
            fabric: f(Resource::Fabric),
            oils: f(Resource::Oils),
            ether: f(Resource::Ether),
            jewels: f(Resource::Jewels),
        }
    }

    /// Borrow the entry for `resource`.
    pub const fn get(&self, resource: Resource) -> &T {
        match resource {
            Resource::Iron => &self.iron,
            Resource::Wood => &self.wood,
            Resource::Leather => &self.leather,
            Resource::Herbs => &self.herbs,
            Resource::Steel => &self.steel,
            Resource::Ironwood => &self.ironwood,
            Resource::Fabric => &self.fabric,
            Resource::Oils => &self.oils,
            Resource::Ether => &self.ether,
            Resource::Jewels => &self.jewels,
        }
    }

    /// Mutably borrow the entry for `resource`.
    pub const fn get_mut(&mut self, resource: Resource) -> &mut T {
        match resource {
            Resource::Iron => &mut self.iron,
            Resource::Wood => &mut self.wood,
            Resource::Leather => &mut self.leather,
            Resource::Herbs => &mut self.herbs,
            Resource::Steel => &mut self.steel,
            Resource::Ironwood => &mut self.ironwood,
            Resource::Fabric => &mut self.fabric,
            Resource::Oils => &mut self.oils,
            Resource::Ether => &mut self.ether,
            Resource::Jewels => &mut self.jewels,
        }
    }

    /// Iterate `(resource, entry)` pairs in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, &T)> {
        Resource::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// A component item a blueprint consumes in addition to raw resources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentRequirement {
    /// Component name. Empty when the blueprint has no component in this slot.
    pub name: String,
    /// Units consumed per craft.
    pub amount: u32,
}

// ---------------------------------------------------------------------------
// Upgrade slots
// ---------------------------------------------------------------------------

/// One of the eight upgrade columns of a blueprint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeSlot {
    /// Crafting mastery upgrade, numbered 1 through 5.
    Mastery(u8),
    /// Ascension upgrade, numbered 1 through 3.
    Ascension(u8),
}

impl UpgradeSlot {
    /// All eight slots in the order they are applied.
    pub const ALL: [Self; 8] = [
        Self::Mastery(1),
        Self::Mastery(2),
        Self::Mastery(3),
        Self::Mastery(4),
        Self::Mastery(5),
        Self::Ascension(1),
        Self::Ascension(2),
        Self::Ascension(3),
    ];

    /// The export column holding this slot's text.
    pub fn column(self) -> String {
        match self {
            Self::Mastery(n) => format!("Crafting Upgrade {n}"),
            Self::Ascension(n) => format!("Ascension Upgrade {n}"),
        }
    }
}

impl core::fmt::Display for UpgradeSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.column())
    }
}

/// The free-text description held in one upgrade slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeText {
    /// Which column the text came from.
    pub slot: UpgradeSlot,
    /// The description, e.g. `"x1.25 Value Increase"`. May be empty.
    pub text: String,
}

// ---------------------------------------------------------------------------
// RawBlueprint
// ---------------------------------------------------------------------------

/// One blueprint row as imported from the spreadsheet export.
///
/// Fields the export marks as "no value" are `None` (or absent from
/// `resources`), never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlueprint {
    /// Item name.
    pub name: String,
    /// Item tier, if the export provides one.
    pub tier: Option<u32>,
    /// Base sale value before upgrades.
    pub value: f64,
    /// Base crafting time in seconds before upgrades and worker speed.
    pub crafting_time: f64,
    /// Base resource costs. Resources the blueprint does not use are absent.
    pub resources: BTreeMap<Resource, i64>,
    /// Required worker roles (e.g. `"Blacksmith"`), in column order.
    pub worker_roles: Vec<String>,
    /// The two component requirements.
    pub components: Vec<ComponentRequirement>,
    /// Upgrade descriptions in application order.
    pub upgrades: Vec<UpgradeText>,
}

// ---------------------------------------------------------------------------
// NormalizedBlueprint
// ---------------------------------------------------------------------------

/// A blueprint with every crafting and ascension upgrade applied and the
/// player's worker speed folded into its crafting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBlueprint {
    /// Item name.
    pub name: String,
    /// Item tier, if known.
    pub tier: Option<u32>,
    /// Final value after upgrades and tiered rounding.
    pub value: i64,
    /// Final crafting time in seconds.
    pub crafting_time: f64,
    /// Workers required to craft, resolved from roles.
    pub workers: Vec<Worker>,
    /// Resource costs after upgrade discounts. May be zero or negative.
    pub resources: BTreeMap<Resource, i64>,
    /// The two component requirements.
    pub components: Vec<ComponentRequirement>,
}

impl NormalizedBlueprint {
    /// The cost of `resource`, or `None` if the blueprint never required it.
    pub fn resource_cost(&self, resource: Resource) -> Option<i64> {
        self.resources.get(&resource).copied()
    }
}

// ---------------------------------------------------------------------------
// BlueprintMetrics
// ---------------------------------------------------------------------------

/// Economic metrics for one blueprint, normalized per minute and per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintMetrics {
    /// Item name.
    pub name: String,
    /// Value produced per minute by one production slot.
    pub value_per_minute_per_slot: f64,
    /// Units of each resource consumed per minute by one slot. Never negative.
    pub per_minute_per_slot: PerResource<f64>,
    /// Value obtained per unit of each resource. Zero when the resource is
    /// unused or discounted away.
    pub value_per_resource: PerResource<f64>,
}

/// A column of the metrics table.
///
/// Every field of [`BlueprintMetrics`] has exactly one column, and
/// [`MetricColumn::ALL`] enumerates them in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricColumn {
    /// The blueprint name.
    Name,
    /// [`BlueprintMetrics::value_per_minute_per_slot`].
    ValuePerMinutePerSlot,
    /// One entry of [`BlueprintMetrics::per_minute_per_slot`].
    ResourcePerMinutePerSlot(Resource),
    /// One entry of [`BlueprintMetrics::value_per_resource`].
    ValuePerResource(Resource),
}

/// A single cell of the metrics table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue<'a> {
    /// Text cell (the blueprint name).
    Text(&'a str),
    /// Numeric cell.
    Number(f64),
}

impl MetricColumn {
    /// Every column in display order: name, value rate, ten resource rates,
    /// ten value-per-resource ratios.
    pub const ALL: [Self; 22] = [
        Self::Name,
        Self::ValuePerMinutePerSlot,
        Self::ResourcePerMinutePerSlot(Resource::Iron),
        Self::ResourcePerMinutePerSlot(Resource::Wood),
        Self::ResourcePerMinutePerSlot(Resource::Leather),
        Self::ResourcePerMinutePerSlot(Resource::Herbs),
        Self::ResourcePerMinutePerSlot(Resource::Steel),
        Self::ResourcePerMinutePerSlot(Resource::Ironwood),
        Self::ResourcePerMinutePerSlot(Resource::Fabric),
        Self::ResourcePerMinutePerSlot(Resource::Oils),
        Self::ResourcePerMinutePerSlot(Resource::Ether),
        Self::ResourcePerMinutePerSlot(Resource::Jewels),
        Self::ValuePerResource(Resource::Iron),
        Self::ValuePerResource(Resource::Wood),
        Self::ValuePerResource(Resource::Leather),
        Self::ValuePerResource(Resource::Herbs),
        Self::ValuePerResource(Resource::Steel),
        Self::ValuePerResource(Resource::Ironwood),
        Self::ValuePerResource(Resource::Fabric),
        Self::ValuePerResource(Resource::Oils),
        Self::ValuePerResource(Resource::Ether),
        Self::ValuePerResource(Resource::Jewels),
    ];

    /// The metric's field key, e.g. `iron_per_minute_per_slot`.
    pub fn key(self) -> String {
        match self {
            Self::Name => "name".to_owned(),
            Self::ValuePerMinutePerSlot => "value_per_minute_per_slot".to_owned(),
            Self::ResourcePerMinutePerSlot(r) => format!("{}_per_minute_per_slot", r.key()),
            Self::ValuePerResource(r) => format!("value_per_{}", r.key()),
        }
    }

    /// Display width of the column in the text report.
    pub const fn width(self) -> usize {
        match self {
            Self::Name => 30,
            Self::ValuePerMinutePerSlot
            | Self::ResourcePerMinutePerSlot(_)
            | Self::ValuePerResource(_) => 40,
        }
    }
}

impl BlueprintMetrics {
    /// Read the cell for `column`.
    pub fn column_value(&self, column: MetricColumn) -> MetricValue<'_> {
        match column {
            MetricColumn::Name => MetricValue::Text(&self.name),
            MetricColumn::ValuePerMinutePerSlot => {
                MetricValue::Number(self.value_per_minute_per_slot)
            }
            MetricColumn::ResourcePerMinutePerSlot(r) => {
                MetricValue::Number(*self.per_minute_per_slot.get(r))
            }
            MetricColumn::ValuePerResource(r) => {
                MetricValue::Number(*self.value_per_resource.get(r))
            }
        }
    }
}
