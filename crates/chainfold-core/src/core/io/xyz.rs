use super::WriteError;
use nalgebra::Point3;
use std::io::Write;

const RESIDUE_ELEMENT: &str = "C";

/// Writes the chain as an XYZ molecule: a count line, a single comment line, then one
/// `C x y z` line per residue.
///
/// Newlines in `comment` are replaced by spaces to keep the header on one line.
pub fn write_xyz(
    positions: &[Point3<f64>],
    comment: &str,
    writer: &mut impl Write,
) -> Result<(), WriteError> {
    writeln!(writer, "{}", positions.len())?;
    writeln!(writer, "{}", comment.replace(['\n', '\r'], " "))?;
    for p in positions {
        writeln!(
            writer,
            "{:<4}{:>14.6}{:>14.6}{:>14.6}",
            RESIDUE_ELEMENT, p.x, p.y, p.z
        )?;
    }
    writer.flush()?;
    Ok(())
}
