use super::WriteError;
use nalgebra::Point3;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PositionRow {
    index: usize,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
struct EnergyRow {
    step: usize,
    energy: f64,
    best_energy: f64,
}

/// Writes one `index,x,y,z` row per residue.
pub fn write_positions(positions: &[Point3<f64>], writer: impl Write) -> Result<(), WriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, p) in positions.iter().enumerate() {
        csv_writer.serialize(PositionRow {
            index,
            x: p.x,
            y: p.y,
            z: p.z,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one `step,energy,best_energy` row per completed step. Steps are numbered
/// from 1; an empty trajectory produces an empty file.
pub fn write_energies(
    energies: &[f64],
    best_energies: &[f64],
    writer: impl Write,
) -> Result<(), WriteError> {
    if energies.len() != best_energies.len() {
        return Err(WriteError::LengthMismatch {
            energies: energies.len(),
            best: best_energies.len(),
        });
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, (&energy, &best_energy)) in energies.iter().zip(best_energies).enumerate() {
        csv_writer.serialize(EnergyRow {
            step: i + 1,
            energy,
            best_energy,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
