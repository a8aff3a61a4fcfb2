//! Upgrade-slot text classification and application.
//!
//! Each crafting or ascension upgrade is exported as a short description.
//! Three kinds are recognized, checked in this order:
//!
//! | Kind | Example | Effect |
//! |---|---|---|
//! | value increase | `x1.25 Value Increase` | value *= 1.25 |
//! | craft time reduction | `-20% Craft Time Reduction` | time *= 0.8 |
//! | resource cost delta | `-5 Iron Spent` | iron cost -= 5 |
//!
//! Anything else is [`UpgradeEffect::Unrecognized`] and has no effect.
//! Upgrades are folded left to right with [`UpgradeFold`]; the order of
//! slots is preserved because every multiplication happens immediately.

use std::collections::BTreeMap;

use titancalc_types::Resource;
use tracing::{debug, warn};

/// Marks a value-increase upgrade.
const VALUE_INCREASE: &str = "Value Increase";
/// Marks a craft-time-reduction upgrade.
const CRAFT_TIME_REDUCTION: &str = "Craft Time Reduction";
/// Third token of a resource-cost upgrade.
const RESOURCE_SPENT: &str = "Spent";

/// Leading sign characters accepted before a percentage or resource amount.
const SIGNS: [char; 2] = ['-', '\u{2212}'];
/// Leading multiplier markers accepted before a value factor.
const MULTIPLIER_MARKS: [char; 4] = ['x', 'X', '\u{d7}', '*'];

// ---------------------------------------------------------------------------
// UpgradeEffect
// ---------------------------------------------------------------------------

/// The effect of one upgrade slot.
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeEffect {
    /// Multiply the blueprint value by this factor.
    ValueIncrease(f64),
    /// Reduce crafting time by this many percent.
    TimeReduction(f64),
    /// Subtract `amount` from the cost of the named resource.
    ResourceDelta {
        /// Resource name as written in the upgrade text.
        resource: String,
        /// Units removed from the cost.
        amount: i64,
    },
    /// The text matched no known pattern, or a number in it did not parse.
    Unrecognized,
}

impl UpgradeEffect {
    /// The factor this effect applies to the blueprint value.
    pub const fn value_coefficient(&self) -> f64 {
        match self {
            Self::ValueIncrease(factor) => *factor,
            _ => 1.0,
        }
    }

    /// The factor this effect applies to the crafting time.
    pub const fn time_coefficient(&self) -> f64 {
        match self {
            Self::TimeReduction(pct) => 1.0 - *pct / 100.0,
            _ => 1.0,
        }
    }
}

/// Why an upgrade slot produced no effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeParseSkip {
    /// The text matches none of the known effect patterns.
    #[error("no known upgrade pattern in {text:?}")]
    NoPattern {
        /// The upgrade text.
        text: String,
    },

    /// The text matches a pattern but its number does not parse.
    #[error("invalid number {token:?} in upgrade {text:?}")]
    InvalidNumber {
        /// The upgrade text.
        text: String,
        /// The token that failed to parse.
        token: String,
    },
}

/// Parse an upgrade description into its effect.
///
/// # Errors
///
/// Returns [`UpgradeParseSkip::NoPattern`] if the text is none of the three
/// known kinds, or [`UpgradeParseSkip::InvalidNumber`] if it is one of them
/// but its leading number is malformed.
pub fn parse_effect(text: &str) -> Result<UpgradeEffect, UpgradeParseSkip> {
    let text = text.trim();
    let leading = text.split_whitespace().next().unwrap_or_default();

    if text.contains(VALUE_INCREASE) {
        let factor = parse_number(text, leading.trim_start_matches(MULTIPLIER_MARKS), leading)?;
        return Ok(UpgradeEffect::ValueIncrease(factor));
    }

    if text.contains(CRAFT_TIME_REDUCTION) {
        let digits = leading.trim_start_matches(SIGNS).trim_end_matches('%');
        let pct = parse_number(text, digits, leading)?;
        return Ok(UpgradeEffect::TimeReduction(pct));
    }

    parse_resource_delta(text)
}

/// Classify an upgrade description, logging and absorbing parse failures.
pub fn classify(text: &str) -> UpgradeEffect {
    match parse_effect(text) {
        Ok(effect) => effect,
        Err(skip) => {
            warn!(error = %skip, "upgrade skipped");
            UpgradeEffect::Unrecognized
        }
    }
}

/// Match `-{amount} {resource} Spent`, anchored at the start of the text.
fn parse_resource_delta(text: &str) -> Result<UpgradeEffect, UpgradeParseSkip> {
    let no_pattern = || UpgradeParseSkip::NoPattern {
        text: text.to_owned(),
    };

    let unsigned = text.strip_prefix(SIGNS).ok_or_else(no_pattern)?;

    let mut tokens = unsigned.split(' ');
    let (Some(amount), Some(resource), Some(spent)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(no_pattern());
    };

    let is_word = !resource.is_empty()
        && resource
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
    if !is_word || !spent.starts_with(RESOURCE_SPENT) {
        return Err(no_pattern());
    }

    let amount = if amount.chars().all(|c| c.is_ascii_digit()) {
        amount.parse::<i64>().ok()
    } else {
        None
    }
    .ok_or_else(|| UpgradeParseSkip::InvalidNumber {
        text: text.to_owned(),
        token: amount.to_owned(),
    })?;

    Ok(UpgradeEffect::ResourceDelta {
        resource: resource.to_owned(),
        amount,
    })
}

/// Parse a finite decimal, reporting `token` on failure.
fn parse_number(text: &str, digits: &str, token: &str) -> Result<f64, UpgradeParseSkip> {
    digits
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| UpgradeParseSkip::InvalidNumber {
            text: text.to_owned(),
            token: token.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// UpgradeFold
// ---------------------------------------------------------------------------

/// Running state while a blueprint's upgrade slots are applied in order.
///
/// `value` and `crafting_time` are multiplied after every slot, so the
/// result is bit-identical to applying the slots one at a time. The
/// cumulative coefficients are kept for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeFold {
    /// Running blueprint value.
    pub value: f64,
    /// Running crafting time in seconds.
    pub crafting_time: f64,
    /// Running resource costs. Only resources already present are changed.
    pub resources: BTreeMap<Resource, i64>,
    /// Product of every value coefficient applied so far.
    pub value_coeff: f64,
    /// Product of every time coefficient applied so far.
    pub time_coeff: f64,
}

impl UpgradeFold {
    /// Start a fold from a blueprint's base stats.
    pub const fn new(value: f64, crafting_time: f64, resources: BTreeMap<Resource, i64>) -> Self {
        Self {
            value,
            crafting_time,
            resources,
            value_coeff: 1.0,
            time_coeff: 1.0,
        }
    }

    /// Apply one slot's effect and return the updated state.
    #[must_use]
    pub fn apply(mut self, effect: &UpgradeEffect) -> Self {
        if let UpgradeEffect::ResourceDelta { resource, amount } = effect {
            self.apply_resource_delta(resource, *amount);
        }

        let value_coeff = effect.value_coefficient();
        let time_coeff = effect.time_coefficient();
        self.value *= value_coeff;
        self.crafting_time *= time_coeff;
        self.value_coeff *= value_coeff;
        self.time_coeff *= time_coeff;
        self
    }

    fn apply_resource_delta(&mut self, name: &str, amount: i64) {
        let cost = Resource::from_key(name).and_then(|r| self.resources.get_mut(&r));
        match cost {
            Some(cost) => *cost = cost.saturating_sub(amount),
            None => debug!(resource = name, amount, "upgrade targets an untracked resource"),
        }
    }
}
