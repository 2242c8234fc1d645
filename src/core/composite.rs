// Ratio of two averaged capture sets

use crate::core::averager::SetAverager;
use crate::core::constants::{BAND_COUNT, OUTPUT_EXTENSION};
use crate::core::detector::adjust_detector_split;
use crate::core::error::{AsdError, Result};
use crate::core::format::PartialRead;
use crate::core::output::write_result;
use crate::models::config::CompositeConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Two sets of captures, averaged and divided.
///
/// For albedo this is up-looking over down-looking, for reflectance the
/// surface over the white reference. `result` is `None` until
/// [`calculate`](Self::calculate) succeeds; calling it again re-reads the
/// files and replaces the previous values.
#[derive(Debug)]
pub struct MeasurementComposite {
    averager: SetAverager,
    file_prefix: String,
    config: CompositeConfig,
    set_1: Vec<f32>,
    set_2: Vec<f32>,
    result: Option<Vec<f32>>,
    warnings: Vec<PartialRead>,
}

impl MeasurementComposite {
    pub fn new<P: AsRef<Path>>(input_dir: P, file_prefix: &str, config: CompositeConfig) -> Self {
        Self {
            averager: SetAverager::new(input_dir, file_prefix, config.debug),
            file_prefix: file_prefix.to_string(),
            config,
            set_1: vec![0.0; BAND_COUNT],
            set_2: vec![0.0; BAND_COUNT],
            result: None,
            warnings: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), but the input directory has to exist.
    pub fn open<P: AsRef<Path>>(
        input_dir: P,
        file_prefix: &str,
        config: CompositeConfig,
    ) -> Result<Self> {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            return Err(AsdError::DirectoryNotFound(input_dir.to_path_buf()));
        }
        Ok(Self::new(input_dir, file_prefix, config))
    }

    pub fn input_dir(&self) -> &Path {
        self.averager.input_dir()
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// Averaged first set per band, zeros before `calculate`.
    pub fn set_1(&self) -> &[f32] {
        &self.set_1
    }

    /// Averaged second set per band, zeros before `calculate`.
    pub fn set_2(&self) -> &[f32] {
        &self.set_2
    }

    pub fn result(&self) -> Option<&[f32]> {
        self.result.as_deref()
    }

    pub fn is_calculated(&self) -> bool {
        self.result.is_some()
    }

    /// Partial reads from the last `calculate`, first set before second.
    pub fn warnings(&self) -> &[PartialRead] {
        &self.warnings
    }

    /// `set_1 / set_2` per band with the detector split corrected.
    ///
    /// Zero bands in `set_2` give inf/NaN rather than an error. Any error
    /// leaves the previous state untouched.
    pub fn calculate(&mut self) -> Result<&[f32]> {
        self.progress("Processing set-1:\n  Averaging files:");
        let set_1 = self.averager.average_set(&self.config.set_1())?;
        self.progress("Processing set-2:\n  Averaging files:");
        let set_2 = self.averager.average_set(&self.config.set_2())?;

        self.progress("Calculating: set-1 / set-2");
        let ratio: Vec<f32> = set_1
            .values
            .iter()
            .zip(&set_2.values)
            .map(|(a, b)| a / b)
            .collect();
        let result = adjust_detector_split(ratio, self.config.split_band, self.config.correction)?;

        self.warnings = set_1.partial.into_iter().chain(set_2.partial).collect();
        self.set_1 = set_1.values;
        self.set_2 = set_2.values;

        Ok(self.result.insert(result).as_slice())
    }

    /// Mean over all bands of the result.
    pub fn mean(&self) -> Option<f32> {
        let result = self.result.as_ref()?;
        let total: f64 = result.iter().map(|v| f64::from(*v)).sum();
        Some((total / result.len() as f64) as f32)
    }

    /// Where [`save`](Self::save) writes for the given suffix.
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.input_dir()
            .join(format!("{}_{}.{}", self.file_prefix, suffix, OUTPUT_EXTENSION))
    }

    /// Write the result to `{input_dir}/{file_prefix}_{suffix}.txt`.
    ///
    /// Returns `Ok(None)` without writing anything when there is no result
    /// yet; callers have to check for it.
    pub fn save(&self, suffix: &str) -> Result<Option<PathBuf>> {
        let Some(result) = self.result.as_deref() else {
            warn!("No results to save, run calculate first");
            return Ok(None);
        };

        let path = self.output_path(suffix);
        write_result(&path, result)?;
        info!("Results saved to {}", path.display());

        Ok(Some(path))
    }

    fn progress(&self, message: &str) {
        if self.config.debug {
            info!("{}", message);
        }
    }
}
