// Plain text result files: one value per line, fixed decimals

use crate::core::constants::OUTPUT_PRECISION;
use crate::core::error::{AsdError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_result(path: &Path, values: &[f32]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writeln!(writer, "{:.*}", OUTPUT_PRECISION, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back a file written by [`write_result`]. Blank lines are skipped.
pub fn read_result(path: &Path) -> Result<Vec<f32>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f32>()
                .map_err(|e| AsdError::ParseError(format!("line {}: {}", i + 1, e)))
        })
        .collect()
}
