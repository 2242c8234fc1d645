// Instrument geometry for ASD FieldSpec captures

// Header: fixed block, instrument text at the front, null terminated
pub const HEADER_BYTES: usize = 484;

// One f32 digital number per band, native byte order
pub const BAND_COUNT: usize = 2151;
pub const BAND_VALUE_SIZE: usize = 4;
pub const DATA_BYTES: usize = BAND_COUNT * BAND_VALUE_SIZE; // 8604 bytes

// Band 0 is MIN_WAVELENGTH, the last band is MAX_WAVELENGTH (nm)
pub const MIN_WAVELENGTH: u32 = 350;
pub const MAX_WAVELENGTH: u32 = 2500;

const _: () = assert!(
    (MAX_WAVELENGTH - MIN_WAVELENGTH + 1) as usize == BAND_COUNT,
    "wavelength range must cover exactly one band per nanometer"
);

// Last band of the VNIR detector; the SWIR1 detector starts one band later
pub const DETECTOR_SPLIT_BAND: usize = 650;

// Set defaults: ten captures per set, second set right after the first
pub const FIRST_SET_INDEX: u32 = 0;
pub const SECOND_SET_INDEX: u32 = 10;
pub const SET_COUNT: u32 = 10;

// File numbers are the zero padded extension: 210317_a.000
pub const FILE_NUMBER_WIDTH: usize = 3;

// Saved results: one value per line
pub const OUTPUT_PRECISION: usize = 4;
pub const OUTPUT_EXTENSION: &str = "txt";

/// Wavelength in nm of the given band index.
pub fn band_wavelength(band: usize) -> u32 {
    MIN_WAVELENGTH + band as u32
}

/// Band index for a wavelength in nm, `None` outside the instrument range.
pub fn wavelength_band(wavelength: u32) -> Option<usize> {
    if (MIN_WAVELENGTH..=MAX_WAVELENGTH).contains(&wavelength) {
        Some((wavelength - MIN_WAVELENGTH) as usize)
    } else {
        None
    }
}

/// X axis for plotting a band vector.
pub fn wavelengths() -> Vec<u32> {
    (MIN_WAVELENGTH..=MAX_WAVELENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        assert_eq!(HEADER_BYTES, 484);
        assert_eq!(BAND_COUNT, 2151);
        assert_eq!(MIN_WAVELENGTH, 350);
        assert_eq!(MAX_WAVELENGTH, 2500);
    }

    #[test]
    fn test_wavelength_mapping() {
        assert_eq!(band_wavelength(0), 350);
        assert_eq!(band_wavelength(BAND_COUNT - 1), 2500);
        assert_eq!(wavelength_band(1000), Some(650));
        assert_eq!(wavelength_band(349), None);
        assert_eq!(wavelength_band(2501), None);

        let axis = wavelengths();
        assert_eq!(axis.len(), BAND_COUNT);
        assert_eq!(axis[DETECTOR_SPLIT_BAND], 1000);
    }
}
