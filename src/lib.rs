// ASD field spectrometer processing
// Averaged capture sets, their ratio and the detector split correction

pub mod core;
pub mod models;
pub mod utils;

// Re-export main types
pub use crate::core::averager::SetAverager;
pub use crate::core::composite::MeasurementComposite;
pub use crate::core::detector::adjust_detector_split;
pub use crate::core::error::{AsdError, Result};
pub use crate::core::format::{PartialRead, SetAverage, SetDescriptor, SplitCorrection};
pub use crate::core::measurement::MeasurementFile;
pub use crate::models::config::CompositeConfig;
