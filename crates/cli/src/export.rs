//! CSV export of the region measurement table

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use grainseg_algorithms::measure::COLUMNS;
use grainseg_algorithms::pipeline::Segmentation;

/// Write the per-grain measurement table as CSV.
///
/// The first line is a `# inverted=<bool>` comment so downstream tools can
/// tell whether the measurements describe the bright or the dark phase.
/// An empty table still gets the comment and the header row.
pub fn write_region_csv(seg: &Segmentation, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# inverted={}", seg.inverted)?;
    writeln!(out, "{},mean_intensity", COLUMNS.join(","))?;

    for rec in &seg.regions {
        write!(
            out,
            "{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            rec.label,
            rec.area,
            rec.perimeter,
            rec.eccentricity,
            rec.solidity,
            rec.equivalent_diameter,
            rec.orientation,
            rec.major_axis_length,
            rec.minor_axis_length,
        )?;
        match rec.mean_intensity {
            Some(value) => writeln!(out, ",{:.6}", value)?,
            None => writeln!(out, ",")?,
        }
    }

    out.flush().context("Failed to flush CSV output")?;
    Ok(())
}
