// Reader for a single ASD capture file

use crate::core::constants::*;
use crate::core::error::{AsdError, Result};
use std::cell::OnceCell;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// One instrument capture: a fixed header followed by one f32 per band.
///
/// Nothing is read on construction. Header and data are each read on first
/// access and cached for the lifetime of the value.
#[derive(Debug)]
pub struct MeasurementFile {
    path: PathBuf,
    header: OnceCell<Vec<u8>>,
    data: OnceCell<Vec<f32>>,
}

impl MeasurementFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header: OnceCell::new(),
            data: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw header block, always `HEADER_BYTES` long.
    pub fn header(&self) -> Result<&[u8]> {
        if let Some(header) = self.header.get() {
            return Ok(header.as_slice());
        }
        let header = self.read_header()?;
        Ok(self.header.get_or_init(|| header).as_slice())
    }

    /// Instrument text from the start of the header, cut at the first null.
    /// Bytes are Latin-1, so every byte maps to exactly one char.
    pub fn instrument(&self) -> Result<String> {
        let header = self.header()?;
        let end = header.iter().position(|&b| b == 0).unwrap_or(header.len());
        Ok(header[..end].iter().map(|&b| b as char).collect())
    }

    /// Band values in file order, always `BAND_COUNT` long.
    pub fn data(&self) -> Result<&[f32]> {
        if let Some(data) = self.data.get() {
            return Ok(data.as_slice());
        }
        let data = self.read_data()?;
        Ok(self.data.get_or_init(|| data).as_slice())
    }

    fn read_header(&self) -> Result<Vec<u8>> {
        let file = File::open(&self.path)?;

        let mut header = Vec::with_capacity(HEADER_BYTES);
        file.take(HEADER_BYTES as u64).read_to_end(&mut header)?;

        if header.len() != HEADER_BYTES {
            return Err(AsdError::HeaderTooShort {
                path: self.path.clone(),
                expected: HEADER_BYTES,
                got: header.len(),
            });
        }

        Ok(header)
    }

    fn read_data(&self) -> Result<Vec<f32>> {
        let raw = fs::read(&self.path)?;
        let body = raw.get(HEADER_BYTES..).unwrap_or(&[]);

        // A short or padded file is some other file, not a capture
        if body.len() != DATA_BYTES {
            return Err(AsdError::CorruptedData {
                path: self.path.clone(),
                expected: DATA_BYTES,
                got: body.len(),
            });
        }

        let data: Vec<f32> = body
            .chunks_exact(BAND_VALUE_SIZE)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        debug_assert_eq!(data.len(), BAND_COUNT);
        Ok(data)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::constants::*;
    use std::path::Path;

    /// Capture bytes with `instrument` at the start of the header.
    pub fn capture_bytes(instrument: &str, values: &[f32]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_BYTES];
        bytes[..instrument.len()].copy_from_slice(instrument.as_bytes());
        for v in values {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        bytes
    }

    /// Full capture with every band set to `fill`, band 0 set to `first`.
    pub fn write_capture(path: &Path, first: f32, fill: f32) {
        let mut values = vec![fill; BAND_COUNT];
        values[0] = first;
        std::fs::write(path, capture_bytes("ASDAtwater", &values)).unwrap();
    }
}
