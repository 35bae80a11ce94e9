//! Adapters around `pnp-core`: workbook-style CSV input, the row-per-event
//! result table with its CSV writer, and an optional per-job figure
//! renderer.

#![warn(missing_docs)]

pub mod format;

#[cfg(feature = "plot")]
pub mod plot;

use std::path::PathBuf;
use thiserror::Error;

/// Describes adapter failures around a scheduling run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Filesystem access failed.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// Path of the file or directory.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A table could not be parsed.
    #[error("failed to parse '{path}': {source}")]
    Csv {
        /// Path of the table file.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },

    /// The machine table misses a required property.
    #[error("machine table misses property '{0}'")]
    MissingProperty(String),

    /// Figure rendering failed.
    #[cfg(feature = "plot")]
    #[error("failed to render figure: {0}")]
    Render(String),

    /// The core rejected the input or the run failed.
    #[error(transparent)]
    Core(#[from] pnp_core::Error),
}
