//! Plain-text report rendering.
//!
//! The report has two sections separated by a divider line:
//!
//! 1. one diagnostic line per worker and per building, showing the resolved
//!    coefficient
//! 2. the metrics table: a header row, then one row per blueprint
//!
//! Table cells are centred in fixed-width columns ([`MetricColumn::width`])
//! and terminated by `|`. Numbers are rounded to three decimals for display.

use titancalc_core::{PlayerCoefficients, PlayerConfig};
use titancalc_types::{BlueprintMetrics, Building, MetricColumn, MetricValue};

/// Width of the divider between report sections.
const DIVIDER_WIDTH: usize = 20;

/// Decimal places shown for numeric cells.
const DISPLAY_DECIMALS: i32 = 3;

/// The header label for a column: its key with `_per_` shown as `/`.
pub fn header_label(column: MetricColumn) -> String {
    column.key().replace("_per_", "/")
}

/// Round `n` to [`DISPLAY_DECIMALS`] places.
fn display_number(n: f64) -> f64 {
    let scale = 10_f64.powi(DISPLAY_DECIMALS);
    (n * scale).round() / scale
}

fn cell_text(value: MetricValue<'_>) -> String {
    match value {
        MetricValue::Text(text) => text.to_owned(),
        MetricValue::Number(n) => display_number(n).to_string(),
    }
}

fn render_cells(cells: impl Iterator<Item = (MetricColumn, String)>) -> String {
    cells
        .map(|(column, text)| format!("{text:^width$}|", width = column.width()))
        .collect()
}

/// The table header row.
pub fn render_header() -> String {
    render_cells(MetricColumn::ALL.into_iter().map(|c| (c, header_label(c))))
}

/// One table row.
pub fn render_row(metrics: &BlueprintMetrics) -> String {
    render_cells(
        MetricColumn::ALL
            .into_iter()
            .map(|c| (c, cell_text(metrics.column_value(c)))),
    )
}

/// Header plus one row per blueprint, in input order.
pub fn render_table(metrics: &[BlueprintMetrics]) -> Vec<String> {
    std::iter::once(render_header())
        .chain(metrics.iter().map(render_row))
        .collect()
}

/// One line per worker and per building with its resolved coefficient.
pub fn render_diagnostics(config: &PlayerConfig, coefficients: &PlayerCoefficients) -> Vec<String> {
    let workers = config.workers.iter().map(|(worker, level)| {
        let multiplier = coefficients
            .craft_time_multiplier(*worker)
            .map_or_else(|| "n/a".to_owned(), |m| m.to_string());
        format!("Worker: {worker}, Level: {level}, Craft Time Multiplier: {multiplier}")
    });
    let buildings = Building::ALL.iter().map(|building| {
        let level = config
            .buildings
            .get(building)
            .map_or_else(|| "n/a".to_owned(), u32::to_string);
        let resource = building.resource();
        let rate = display_number(coefficients.regen_rate(resource));
        format!("Building: {building}, Level: {level}, Resource: {resource}, Regeneration: {rate}")
    });
    workers.chain(buildings).collect()
}

/// The complete report text, newline-terminated.
pub fn render_report(
    config: &PlayerConfig,
    coefficients: &PlayerCoefficients,
    metrics: &[BlueprintMetrics],
) -> String {
    let mut lines = render_diagnostics(config, coefficients);
    lines.push("-".repeat(DIVIDER_WIDTH));
    lines.extend(render_table(metrics));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use titancalc_core::GuildBoosts;
    use titancalc_types::{PerResource, Resource, Worker};

    fn metrics() -> BlueprintMetrics {
        BlueprintMetrics {
            name: "Squire Sword".to_owned(),
            value_per_minute_per_slot: 120.0 / 1.8,
            per_minute_per_slot: PerResource {
                iron: 4.0,
                ..PerResource::default()
            },
            value_per_resource: PerResource {
                iron: 15.0,
                ..PerResource::default()
            },
        }
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn total_width() -> usize {
        MetricColumn::ALL.iter().map(|c| c.width() + 1).sum()
    }

    #[test]
    fn header_labels_use_slashes() {
        assert_eq!(header_label(MetricColumn::Name), "name");
        assert_eq!(
            header_label(MetricColumn::ValuePerMinutePerSlot),
            "value/minute/slot"
        );
        assert_eq!(
            header_label(MetricColumn::ResourcePerMinutePerSlot(Resource::Iron)),
            "iron/minute/slot"
        );
        assert_eq!(
            header_label(MetricColumn::ValuePerResource(Resource::Jewels)),
            "value/jewels"
        );
    }

    #[test]
    fn header_and_rows_share_column_layout() {
        let header = render_header();
        let row = render_row(&metrics());
        assert_eq!(header.chars().count(), total_width());
        assert_eq!(row.chars().count(), total_width());
        assert_eq!(header.matches('|').count(), MetricColumn::ALL.len());
        assert_eq!(row.matches('|').count(), MetricColumn::ALL.len());
    }

    #[test]
    fn cells_are_centred() {
        let header = render_header();
        assert!(header.starts_with(&format!("{:^30}|", "name")));
        let row = render_row(&metrics());
        assert!(row.starts_with(&format!("{:^30}|{:^40}|", "Squire Sword", "66.667")));
    }

    #[test]
    fn numbers_round_to_three_decimals() {
        assert_eq!(cell_text(MetricValue::Number(66.666_666)), "66.667");
        assert_eq!(cell_text(MetricValue::Number(120.0)), "120");
        assert_eq!(cell_text(MetricValue::Number(0.0)), "0");
        assert_eq!(cell_text(MetricValue::Text("Leather Cap")), "Leather Cap");
    }

    #[test]
    #[allow(clippy::arithmetic_side_effects)]
    fn report_sections_are_divided() {
        let config = PlayerConfig {
            workers: BTreeMap::from([(Worker::Wallace, 10)]),
            buildings: Building::ALL.iter().map(|&b| (b, 1)).collect(),
            guild_boosts: GuildBoosts::default(),
        };
        let coefficients = PlayerCoefficients {
            craft_time: BTreeMap::from([(Worker::Wallace, 0.9)]),
            regen: PerResource::from_fn(|_| 6.0),
        };
        let report = render_report(&config, &coefficients, &[metrics(), metrics()]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 1 + Building::ALL.len() + 1 + 1 + 2);
        assert_eq!(lines[0], "Worker: Wallace, Level: 10, Craft Time Multiplier: 0.9");
        assert_eq!(
            lines[1],
            "Building: IronMine, Level: 1, Resource: iron, Regeneration: 6"
        );
        assert_eq!(lines[11], "-".repeat(20));
        assert_eq!(lines[12], render_header());
        assert!(report.ends_with('\n'));
    }
}
