//! Spreadsheet export import.
//!
//! The game-data spreadsheet is converted to JSON outside this crate. Three of
//! the resulting files are read from the data directory:
//!
//! - [`BLUEPRINTS_FILE`] -- one object per blueprint row
//! - [`WORKERS_FILE`] -- worker role → worker name
//! - [`WORKER_LEVELS_FILE`] -- worker level → crafting speed bonus
//!
//! Column names are matched ignoring ASCII case and surrounding whitespace.
//! Cells holding [`NO_VALUE`] are treated as empty. Numeric cells may be JSON
//! numbers or numeric strings.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use titancalc_types::{ComponentRequirement, RawBlueprint, Resource, UpgradeSlot, UpgradeText, Worker};
use tracing::{debug, info, warn};

use crate::coefficients::SpeedBonusTable;
use crate::transform::WorkerTranslation;

/// Blueprint export file name.
pub const BLUEPRINTS_FILE: &str = "Blueprints.json";
/// Worker role export file name.
pub const WORKERS_FILE: &str = "Workers.json";
/// Worker level export file name.
pub const WORKER_LEVELS_FILE: &str = "Worker Levels.json";

/// Placeholder the export writes into empty cells.
pub const NO_VALUE: &str = "---";

const REQUIRED_WORKER: &str = "required worker";
const CRAFTING_TIME: &str = "crafting time (seconds)";
const COMPONENT_SLOTS: u8 = 2;
/// Largest magnitude accepted for an integer cell.
const MAX_WHOLE: f64 = 1e15;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while importing the spreadsheet export.
///
/// File-level variants abort the run. Record-level variants
/// (`NotAnObject`, `MissingField`, `InvalidField`) reject a single blueprint
/// row, which is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Failed to read an export file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An export file is not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// An export file's top-level value is not an array.
    #[error("{} must contain a JSON array of records", path.display())]
    NotAnArray {
        /// The offending file.
        path: PathBuf,
    },

    /// A record is not a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// A required column is missing or empty.
    #[error("missing field {field:?}")]
    MissingField {
        /// The column name.
        field: String,
    },

    /// A column holds a value of the wrong shape.
    #[error("field {field:?} has invalid value {value}")]
    InvalidField {
        /// The column name.
        field: String,
        /// The offending value, as JSON.
        value: String,
    },

    /// The worker export names a worker outside the roster.
    #[error("unknown worker {name:?} in worker export")]
    UnknownWorker {
        /// The unrecognized name.
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Record access
// ---------------------------------------------------------------------------

/// Borrowed view of one exported row.
struct Record<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    fn new(value: &'a Value) -> Result<Self, ImportError> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or(ImportError::NotAnObject)
    }

    /// Every non-empty cell whose column matches `column`, in key order.
    fn all<'s>(&'s self, column: &'s str) -> impl Iterator<Item = &'a Value> + 's {
        self.fields
            .iter()
            .filter(move |(key, _)| key.trim().eq_ignore_ascii_case(column))
            .filter_map(|(_, value)| present(value))
    }

    /// The first non-empty cell for `column`.
    fn get(&self, column: &str) -> Option<&'a Value> {
        self.all(column).next()
    }

    fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(cell_text)
    }

    fn require_text(&self, column: &str) -> Result<String, ImportError> {
        self.text(column).ok_or_else(|| missing(column))
    }

    fn number(&self, column: &str) -> Result<Option<f64>, ImportError> {
        self.get(column).map(|cell| number(column, cell)).transpose()
    }

    fn require_number(&self, column: &str) -> Result<f64, ImportError> {
        self.number(column)?.ok_or_else(|| missing(column))
    }

    fn whole(&self, column: &str) -> Result<Option<i64>, ImportError> {
        self.get(column).map(|cell| whole(column, cell)).transpose()
    }
}

/// `None` for null, blank and [`NO_VALUE`] cells.
fn present(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() || s.trim() == NO_VALUE => None,
        other => Some(other),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        other => other.to_string(),
    }
}

fn number(column: &str, value: &Value) -> Result<f64, ImportError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(column, value))
}

#[allow(clippy::cast_possible_truncation)]
fn whole(column: &str, value: &Value) -> Result<i64, ImportError> {
    let n = number(column, value)?;
    if n.fract().abs() > 0.0 || n.abs() > MAX_WHOLE {
        return Err(invalid(column, value));
    }
    Ok(n as i64)
}

fn missing(column: &str) -> ImportError {
    ImportError::MissingField {
        field: column.to_owned(),
    }
}

fn invalid(column: &str, value: &Value) -> ImportError {
    ImportError::InvalidField {
        field: column.to_owned(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Blueprints
// ---------------------------------------------------------------------------

/// Parse one row of the blueprint export.
///
/// Optional base columns (`tier` and the ten resources) that fail to parse
/// are dropped with a debug event, matching empty cells.
///
/// # Errors
///
/// Returns [`ImportError::NotAnObject`] if the row is not an object,
/// [`ImportError::MissingField`] if `name`, `value` or the crafting time is
/// absent, or [`ImportError::InvalidField`] if `value` or the crafting time is
/// not a number.
pub fn parse_blueprint_record(value: &Value) -> Result<RawBlueprint, ImportError> {
    let record = Record::new(value)?;

    let name = record.require_text("name")?;
    let base_value = record.require_number("value")?;
    let crafting_time = record.require_number(CRAFTING_TIME)?;

    let tier = optional(&name, record.whole("tier")).and_then(|t| u32::try_from(t).ok());

    let resources = Resource::ALL
        .into_iter()
        .filter_map(|r| optional(&name, record.whole(r.key())).map(|cost| (r, cost)))
        .collect();

    let worker_roles = record.all(REQUIRED_WORKER).map(cell_text).collect();

    let components = (1..=COMPONENT_SLOTS)
        .map(|n| {
            let name_column = format!("component{n}");
            let amount_column = format!("amount needed{n}");
            let amount = record
                .get(&amount_column)
                .and_then(|cell| whole(&amount_column, cell).ok())
                .and_then(|a| u32::try_from(a).ok())
                .unwrap_or_default();
            ComponentRequirement {
                name: record.text(&name_column).unwrap_or_default(),
                amount,
            }
        })
        .collect();

    let upgrades = UpgradeSlot::ALL
        .into_iter()
        .filter_map(|slot| {
            let column = slot.column();
            record.text(&column).map(|text| UpgradeText { slot, text })
        })
        .collect();

    Ok(RawBlueprint {
        name,
        tier,
        value: base_value,
        crafting_time,
        resources,
        worker_roles,
        components,
        upgrades,
    })
}

/// Keep a parsed optional cell, logging and dropping one that failed.
fn optional<T>(blueprint: &str, parsed: Result<Option<T>, ImportError>) -> Option<T> {
    parsed.unwrap_or_else(|error| {
        debug!(blueprint, %error, "optional blueprint field ignored");
        None
    })
}

/// Load every blueprint row, skipping rows that fail to parse.
///
/// # Errors
///
/// Returns a file-level [`ImportError`] if the file cannot be read, is not
/// JSON, or is not an array.
pub fn load_blueprints(path: &Path) -> Result<Vec<RawBlueprint>, ImportError> {
    let rows = read_array(path)?;
    let total = rows.len();
    let blueprints: Vec<RawBlueprint> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match parse_blueprint_record(row) {
            Ok(blueprint) => Some(blueprint),
            Err(error) => {
                warn!(index, %error, "blueprint record skipped");
                None
            }
        })
        .collect();
    info!(
        path = %path.display(),
        loaded = blueprints.len(),
        skipped = total.saturating_sub(blueprints.len()),
        "blueprints imported"
    );
    Ok(blueprints)
}

// ---------------------------------------------------------------------------
// Workers and levels
// ---------------------------------------------------------------------------

/// Load the role → worker translation.
///
/// # Errors
///
/// Returns a file-level [`ImportError`], [`ImportError::MissingField`] for a
/// row without `Worker` or `Name`, or [`ImportError::UnknownWorker`] if a
/// name is not on the roster.
pub fn load_worker_translation(path: &Path) -> Result<WorkerTranslation, ImportError> {
    let rows = read_array(path)?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        let record = Record::new(row)?;
        let role = record.require_text("Worker")?;
        let name = record.require_text("Name")?;
        let worker = Worker::from_name(&name).ok_or(ImportError::UnknownWorker { name })?;
        entries.push((role, worker));
    }
    let translation = WorkerTranslation::new(entries);
    info!(path = %path.display(), roles = translation.len(), "worker roles imported");
    Ok(translation)
}

/// Load the level → crafting speed bonus table. Rows that fail to parse are
/// skipped.
///
/// # Errors
///
/// Returns a file-level [`ImportError`].
pub fn load_speed_bonus_table(path: &Path) -> Result<SpeedBonusTable, ImportError> {
    let rows = read_array(path)?;
    let entries: Vec<(u32, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match parse_level_row(row) {
            Ok(entry) => Some(entry),
            Err(error) => {
                debug!(index, %error, "worker level row skipped");
                None
            }
        })
        .collect();
    let table = SpeedBonusTable::new(entries);
    info!(path = %path.display(), levels = table.len(), "worker levels imported");
    Ok(table)
}

fn parse_level_row(row: &Value) -> Result<(u32, f64), ImportError> {
    const LEVEL: &str = "Worker Level";
    const BONUS: &str = "Crafting Speed Bonus";

    let record = Record::new(row)?;
    let level = record.whole(LEVEL)?.ok_or_else(|| missing(LEVEL))?;
    let level = u32::try_from(level)
        .ok()
        .ok_or_else(|| ImportError::InvalidField {
            field: LEVEL.to_owned(),
            value: level.to_string(),
        })?;
    let bonus = record.require_number(BONUS)?;
    Ok((level, bonus))
}

fn read_array(path: &Path) -> Result<Vec<Value>, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&contents).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match document {
        Value::Array(rows) => Ok(rows),
        _ => Err(ImportError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

// ---------------------------------------------------------------------------
// DataSet
// ---------------------------------------------------------------------------

/// Everything imported from the data directory.
#[derive(Debug, Clone)]
pub struct DataSet {
    /// Blueprint rows that parsed, in file order.
    pub blueprints: Vec<RawBlueprint>,
    /// Worker role → worker.
    pub translation: WorkerTranslation,
    /// Worker level → crafting speed bonus.
    pub speed_bonuses: SpeedBonusTable,
}

impl DataSet {
    /// Load the three export files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns the first file-level [`ImportError`] encountered.
    pub fn load(dir: &Path) -> Result<Self, ImportError> {
        Ok(Self {
            translation: load_worker_translation(&dir.join(WORKERS_FILE))?,
            speed_bonuses: load_speed_bonus_table(&dir.join(WORKER_LEVELS_FILE))?,
            blueprints: load_blueprints(&dir.join(BLUEPRINTS_FILE))?,
        })
    }
}
