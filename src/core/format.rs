// Data structures for averaged sets and the split correction

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which numbered file sequence makes up one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDescriptor {
    pub start_index: u32,
    pub file_count: u32,
    /// Sub-path below the input directory, e.g. `white-reference/`
    pub alt_prefix: Option<String>,
}

impl SetDescriptor {
    pub fn new(start_index: u32, file_count: u32) -> Self {
        Self {
            start_index,
            file_count,
            alt_prefix: None,
        }
    }

    pub fn with_alt_prefix(mut self, alt_prefix: Option<String>) -> Self {
        self.alt_prefix = alt_prefix.filter(|p| !p.is_empty());
        self
    }

    /// File numbers covered by this set, end exclusive.
    pub fn file_numbers(&self) -> std::ops::Range<u32> {
        self.start_index..self.start_index.saturating_add(self.file_count)
    }
}

/// Fewer files were found than requested. Not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialRead {
    pub start_index: u32,
    pub requested: u32,
    pub found: u32,
}

/// Mean band values of one set along with what was actually read.
#[derive(Debug, Clone)]
pub struct SetAverage {
    pub values: Vec<f32>,
    pub files: Vec<PathBuf>,
    pub requested: u32,
    pub partial: Option<PartialRead>,
}

impl SetAverage {
    pub fn found(&self) -> u32 {
        self.files.len() as u32
    }

    pub fn is_partial(&self) -> bool {
        self.partial.is_some()
    }
}

/// How the bands below the detector split are rescaled by the step ratio
/// `v[split + 1] / v[split]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitCorrection {
    /// `v[..split] /= ratio`; reproduces the reference albedo fixture.
    #[default]
    Divide,
    /// `v[..split] *= ratio`
    Multiply,
}

impl std::str::FromStr for SplitCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "divide" => Ok(SplitCorrection::Divide),
            "multiply" => Ok(SplitCorrection::Multiply),
            other => Err(format!("unknown split correction: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_numbers() {
        let set = SetDescriptor::new(10, 3);
        assert_eq!(set.file_numbers().collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(SetDescriptor::new(99, 0).file_numbers().count(), 0);
    }

    #[test]
    fn test_empty_alt_prefix_is_none() {
        let set = SetDescriptor::new(0, 1).with_alt_prefix(Some(String::new()));
        assert_eq!(set.alt_prefix, None);

        let set = SetDescriptor::new(0, 1).with_alt_prefix(Some("wr/".into()));
        assert_eq!(set.alt_prefix.as_deref(), Some("wr/"));
    }

    #[test]
    fn test_split_correction_parse() {
        assert_eq!("Divide".parse::<SplitCorrection>(), Ok(SplitCorrection::Divide));
        assert_eq!("multiply".parse::<SplitCorrection>(), Ok(SplitCorrection::Multiply));
        assert!("shift".parse::<SplitCorrection>().is_err());
        assert_eq!(SplitCorrection::default(), SplitCorrection::Divide);
    }
}
