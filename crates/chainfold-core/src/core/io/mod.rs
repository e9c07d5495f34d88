//! # Output Formats
//!
//! Writers for the final conformation and the energy trajectory of a run, consumed by
//! external plotting and visualization tools.
//!
//! - [`table`] - CSV tables of residue positions and per-step energies
//! - [`xyz`] - XYZ molecule files readable by standard molecular viewers

use std::io;
use thiserror::Error;

pub mod table;
pub mod xyz;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Energy trace length {energies} does not match best-energy trace length {best}")]
    LengthMismatch { energies: usize, best: usize },
}
