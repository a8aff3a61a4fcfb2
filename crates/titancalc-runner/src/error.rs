//! Error types for the titancalc binary.
//!
//! [`CalcError`] wraps every failure that stops a run: an unusable player
//! config, an unreadable export, or a report that cannot be written.

use std::path::PathBuf;

/// Top-level error for the titancalc binary.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// The player configuration could not be loaded or resolved.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: titancalc_core::ConfigError,
    },

    /// The spreadsheet export could not be imported.
    #[error("import error: {source}")]
    Import {
        /// The underlying import error.
        #[from]
        source: titancalc_core::ImportError,
    },

    /// The report file could not be written.
    #[error("failed to write report to {}: {source}", path.display())]
    Output {
        /// The report path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
