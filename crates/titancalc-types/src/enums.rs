//! Enumeration types for the blueprint calculator.
//!
//! Resources, the buildings that regenerate them, and the named workers who
//! craft blueprints. Every roster here is fixed by the game: ten resources
//! across three tiers, ten resource buildings, and ten workers.

use serde::{Deserialize, Serialize};

/// Generates a fixed-roster enum with an `ALL` table and name helpers.
///
/// The display name of each variant is its identifier, which is also the key
/// used by the player configuration file and the spreadsheet export.
macro_rules! define_roster {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every member of the roster, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The canonical name of this member.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            /// Look up a member by name, ignoring ASCII case and surrounding
            /// whitespace.
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name().eq_ignore_ascii_case(name))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Rarity class of a resource. Each tier has its own level→regeneration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTier {
    /// Raw materials (iron, wood, leather, herbs).
    T1,
    /// Refined materials (steel, ironwood, fabric, oils).
    T2,
    /// Rare materials (ether, jewels).
    T3,
}

/// A tracked crafting resource.
///
/// Serialized in lowercase (`"iron"`, `"ironwood"`) to match the column keys
/// of the blueprint export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    // --- Tier 1 ---
    /// Mined at the Iron Mine.
    Iron,
    /// Cut at the Lumberyard.
    Wood,
    /// Cured at the Tannery.
    Leather,
    /// Grown in the Garden.
    Herbs,

    // --- Tier 2 ---
    /// Smelted at the Smelter.
    Steel,
    /// Milled at the Sawmill.
    Ironwood,
    /// Woven at the Weaver Mill.
    Fabric,
    /// Pressed at the Oil Press.
    Oils,

    // --- Tier 3 ---
    /// Drawn from the Ether Well.
    Ether,
    /// Kept in the Jewel Storehouse.
    Jewels,
}

impl Resource {
    /// All ten resources in tier order.
    pub const ALL: [Self; 10] = [
        Self::Iron,
        Self::Wood,
        Self::Leather,
        Self::Herbs,
        Self::Steel,
        Self::Ironwood,
        Self::Fabric,
        Self::Oils,
        Self::Ether,
        Self::Jewels,
    ];

    /// The lowercase key used in exports and metric column names.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Iron => "iron",
            Self::Wood => "wood",
            Self::Leather => "leather",
            Self::Herbs => "herbs",
            Self::Steel => "steel",
            Self::Ironwood => "ironwood",
            Self::Fabric => "fabric",
            Self::Oils => "oils",
            Self::Ether => "ether",
            Self::Jewels => "jewels",
        }
    }

    /// The rarity tier this resource belongs to.
    pub const fn tier(self) -> ResourceTier {
        match self {
            Self::Iron | Self::Wood | Self::Leather | Self::Herbs => ResourceTier::T1,
            Self::Steel | Self::Ironwood | Self::Fabric | Self::Oils => ResourceTier::T2,
            Self::Ether | Self::Jewels => ResourceTier::T3,
        }
    }

    /// Look up a resource by key, ignoring ASCII case (`"Iron"`, `"IRON"`).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.key().eq_ignore_ascii_case(key))
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

define_roster! {
    /// A resource-producing building. Each one regenerates exactly one
    /// [`Resource`].
    Building {
        /// Produces iron.
        IronMine,
        /// Produces wood.
        Lumberyard,
        /// Produces leather.
        Tannery,
        /// Produces herbs.
        Garden,
        /// Produces steel.
        Smelter,
        /// Produces ironwood.
        Sawmill,
        /// Produces fabric.
        WeaverMill,
        /// Produces oils.
        OilPress,
        /// Produces ether.
        EtherWell,
        /// Produces jewels.
        JewelStorehouse,
    }
}

impl Building {
    /// The resource this building regenerates.
    pub const fn resource(self) -> Resource {
        match self {
            Self::IronMine => Resource::Iron,
            Self::Lumberyard => Resource::Wood,
            Self::Tannery => Resource::Leather,
            Self::Garden => Resource::Herbs,
            Self::Smelter => Resource::Steel,
            Self::Sawmill => Resource::Ironwood,
            Self::WeaverMill => Resource::Fabric,
            Self::OilPress => Resource::Oils,
            Self::EtherWell => Resource::Ether,
            Self::JewelStorehouse => Resource::Jewels,
        }
    }

    /// The tier table this building is looked up in.
    pub const fn tier(self) -> ResourceTier {
        self.resource().tier()
    }
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

define_roster! {
    /// A named crafting worker. Blueprints reference workers by role; the
    /// role→worker mapping comes from the `Workers` export.
    Worker {
        /// Worker roster entry.
        Wallace,
        /// Worker roster entry.
        Julia,
        /// Worker roster entry.
        Allan,
        /// Worker roster entry.
        Maribel,
        /// Worker roster entry.
        Grimar,
        /// Worker roster entry.
        Katarina,
        /// Worker roster entry.
        Freyja,
        /// Worker roster entry.
        Theodore,
        /// Worker roster entry.
        Evelyn,
        /// Worker roster entry.
        Roxanne,
    }
}
