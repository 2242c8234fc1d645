// Averaging a numbered sequence of captures

use crate::core::constants::*;
use crate::core::error::{AsdError, Result};
use crate::core::format::{PartialRead, SetAverage, SetDescriptor};
use crate::core::measurement::MeasurementFile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Finds captures named `{file_prefix}*.{NNN}` below `input_dir` and
/// averages them band by band.
#[derive(Debug, Clone)]
pub struct SetAverager {
    input_dir: PathBuf,
    file_prefix: String,
    debug: bool,
}

impl SetAverager {
    pub fn new<P: AsRef<Path>>(input_dir: P, file_prefix: &str, debug: bool) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            file_prefix: file_prefix.to_string(),
            debug,
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Element-wise mean over every file found for the set's numbers.
    ///
    /// The mean is taken over the files actually found. Finding fewer than
    /// requested only warns; finding none is `NoInputFiles`.
    pub fn average_set(&self, set: &SetDescriptor) -> Result<SetAverage> {
        let (directory, name_prefix) = self.search_root(set.alt_prefix.as_deref());
        let candidates = list_file_names(&directory)?;

        let mut sum = vec![0f64; BAND_COUNT];
        let mut files = Vec::new();

        for file_number in set.file_numbers() {
            for path in matching_files(&directory, &candidates, &name_prefix, file_number) {
                self.progress(format_args!("  - {}", path.display()));

                let measurement = MeasurementFile::new(&path);
                for (total, value) in sum.iter_mut().zip(measurement.data()?) {
                    *total += f64::from(*value);
                }
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(AsdError::NoInputFiles {
                directory,
                start_index: set.start_index,
                file_count: set.file_count,
            });
        }

        let found = files.len() as u32;
        let partial = (found != set.file_count).then(|| {
            warn!(
                "Only read {} input file(s), but {} file(s) were set to be read",
                found, set.file_count
            );
            PartialRead {
                start_index: set.start_index,
                requested: set.file_count,
                found,
            }
        });

        let count = f64::from(found);
        let values = sum.into_iter().map(|total| (total / count) as f32).collect();

        debug!("Averaged {} file(s) starting at {}", found, set.start_index);

        Ok(SetAverage {
            values,
            files,
            requested: set.file_count,
            partial,
        })
    }

    /// Every capture matching a single file number, sorted by name.
    pub fn files_for(&self, file_number: u32, alt_prefix: Option<&str>) -> Result<Vec<PathBuf>> {
        let (directory, name_prefix) = self.search_root(alt_prefix);
        let candidates = list_file_names(&directory)?;
        Ok(matching_files(&directory, &candidates, &name_prefix, file_number))
    }

    /// Directory to list and the file name prefix to match inside it.
    /// A prefix containing `/` reaches into a sub-directory.
    fn search_root(&self, alt_prefix: Option<&str>) -> (PathBuf, String) {
        let mut directory = self.input_dir.clone();
        if let Some(alt) = alt_prefix {
            directory.push(alt);
        }

        match self.file_prefix.rsplit_once('/') {
            Some((sub_dir, name)) => (directory.join(sub_dir), name.to_string()),
            None => (directory, self.file_prefix.clone()),
        }
    }

    fn progress(&self, message: std::fmt::Arguments<'_>) {
        if self.debug {
            info!("{}", message);
        }
    }
}

/// `{prefix}*.{NNN}`: the wildcard may be empty but must not overlap the
/// prefix or the extension.
pub fn matches_file_number(file_name: &str, prefix: &str, file_number: u32) -> bool {
    let suffix = format!(".{:0width$}", file_number, width = FILE_NUMBER_WIDTH);
    file_name.len() >= prefix.len() + suffix.len()
        && file_name.starts_with(prefix)
        && file_name.ends_with(&suffix)
}

fn matching_files(
    directory: &Path,
    candidates: &[String],
    prefix: &str,
    file_number: u32,
) -> Vec<PathBuf> {
    candidates
        .iter()
        .filter(|name| matches_file_number(name, prefix, file_number))
        .map(|name| directory.join(name))
        .collect()
}

/// Sorted names of the regular files in `directory`. A missing directory
/// simply has no files.
fn list_file_names(directory: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        // Follows symlinks, a linked capture is still a capture
        if !entry.path().is_file() {
            continue;
        }
        // Non UTF-8 names can't match a UTF-8 prefix anyway
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
