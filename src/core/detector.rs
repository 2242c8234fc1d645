// Detector split correction
//
// The VNIR and SWIR1 detectors meet between bands 650 and 651 (1000/1001 nm)
// and the two segments show a step there. The signal is assumed continuous
// across the boundary, so the lower segment is rescaled by the step ratio.

use crate::core::error::{AsdError, Result};
use crate::core::format::SplitCorrection;

/// `values[split + 1] / values[split]`
pub fn split_ratio(values: &[f32], split: usize) -> Result<f32> {
    let out_of_range = || AsdError::BandOutOfRange {
        band: split.saturating_add(1),
        len: values.len(),
    };
    let next = split.checked_add(1).ok_or_else(out_of_range)?;
    match (values.get(split), values.get(next)) {
        (Some(low), Some(high)) => Ok(high / low),
        _ => Err(out_of_range()),
    }
}

impl SplitCorrection {
    /// Rescale `values[..split]` by the ratio at the split. Bands from
    /// `split` up are left as they are. A zero band at the split gives an
    /// infinite or NaN ratio, which is passed through.
    pub fn apply(self, values: &mut [f32], split: usize) -> Result<f32> {
        let ratio = split_ratio(values, split)?;
        let low = &mut values[..split];
        match self {
            SplitCorrection::Divide => low.iter_mut().for_each(|v| *v /= ratio),
            SplitCorrection::Multiply => low.iter_mut().for_each(|v| *v *= ratio),
        }
        Ok(ratio)
    }
}

/// Owned variant of [`SplitCorrection::apply`].
pub fn adjust_detector_split(
    mut values: Vec<f32>,
    split: usize,
    correction: SplitCorrection,
) -> Result<Vec<f32>> {
    correction.apply(&mut values, split)?;
    Ok(values)
}
