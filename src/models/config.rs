use serde::{Deserialize, Serialize};

use crate::core::constants::{DETECTOR_SPLIT_BAND, FIRST_SET_INDEX, SECOND_SET_INDEX, SET_COUNT};
use crate::core::format::{SetDescriptor, SplitCorrection};

/// Everything a composite needs besides the directory and file prefix.
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub set_1_index: u32,
    pub set_1_count: u32,
    pub set_2_index: u32,
    pub set_2_count: u32,
    pub set_2_alt_prefix: Option<String>,
    pub debug: bool,
    pub correction: SplitCorrection,
    pub split_band: usize,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            set_1_index: FIRST_SET_INDEX,
            set_1_count: SET_COUNT,
            set_2_index: SECOND_SET_INDEX,
            set_2_count: SET_COUNT,
            set_2_alt_prefix: None,
            debug: false,
            correction: SplitCorrection::default(),
            split_band: DETECTOR_SPLIT_BAND,
        }
    }
}

impl CompositeConfig {
    pub fn set_1(&self) -> SetDescriptor {
        SetDescriptor::new(self.set_1_index, self.set_1_count)
    }

    pub fn set_2(&self) -> SetDescriptor {
        SetDescriptor::new(self.set_2_index, self.set_2_count)
            .with_alt_prefix(self.set_2_alt_prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompositeConfig::default();
        assert_eq!(config.set_1(), SetDescriptor::new(0, 10));
        assert_eq!(config.set_2(), SetDescriptor::new(10, 10));
        assert!(!config.debug);
        assert_eq!(config.correction, SplitCorrection::Divide);
        assert_eq!(config.split_band, 650);
    }

    #[test]
    fn test_partial_json() {
        let config: CompositeConfig = serde_json::from_str(
            r#"{ "set_1_count": 1, "set_2_alt_prefix": "white-reference/", "correction": "multiply" }"#,
        )
        .unwrap();

        assert_eq!(config.set_1_count, 1);
        assert_eq!(config.set_2_index, 10);
        assert_eq!(config.correction, SplitCorrection::Multiply);
        assert_eq!(config.set_2().alt_prefix.as_deref(), Some("white-reference/"));
    }
}
