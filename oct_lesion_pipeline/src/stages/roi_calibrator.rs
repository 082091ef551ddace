use oct_lesion_structures::data::descriptors::{CalibrationFactor, RoiBand};
use oct_lesion_structures::data::{BinaryMask, LesionMeasurement};

/// Stage 5: ROI masking and physical calibration.
///
/// Intersects the region-filtered mask with the central vertical band of the
/// scan, then converts the surviving foreground count into mm². An
/// all-background input yields a zero measurement, not an error.
#[derive(Debug, Clone)]
pub struct RoiCalibrator {
    band: RoiBand,
    calibration: CalibrationFactor,
}

impl RoiCalibrator {
    pub fn new(band: RoiBand, calibration: CalibrationFactor) -> RoiCalibrator {
        RoiCalibrator { band, calibration }
    }

    pub fn get_band(&self) -> RoiBand {
        self.band
    }

    pub fn get_calibration(&self) -> CalibrationFactor {
        self.calibration
    }

    pub fn measure(&self, mut mask: BinaryMask) -> LesionMeasurement {
        let height = mask.get_resolution().height;
        mask.retain_rows(self.band.row_range(height));
        LesionMeasurement::new(mask, self.calibration)
    }
}

impl std::fmt::Display for RoiCalibrator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RoiCalibrator(band: {}, calibration: {})",
            self.band, self.calibration
        )
    }
}
