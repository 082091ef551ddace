use super::binary_mask::BinaryMask;
use super::descriptors::CalibrationFactor;

/// The shared result core of both measurement modes: a foreground pixel
/// count and its calibrated physical area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMeasurement {
    pub pixel_count: usize,
    pub area_mm2: f64,
}

impl AreaMeasurement {
    /// area = pixel_count x calibration², exactly.
    pub fn from_pixel_count(pixel_count: usize, calibration: CalibrationFactor) -> AreaMeasurement {
        AreaMeasurement {
            pixel_count,
            area_mm2: calibration.pixel_count_to_mm2(pixel_count),
        }
    }
}

impl std::fmt::Display for AreaMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} px, {:.4} mm²", self.pixel_count, self.area_mm2)
    }
}

/// Final output of the automatic pipeline: the ROI-restricted lesion mask
/// plus the damaged pixel count and its area in mm². Owned by the caller;
/// the pipeline retains nothing after returning it.
#[derive(Debug, Clone, PartialEq)]
pub struct LesionMeasurement {
    pub mask: BinaryMask,
    pub damaged_pixel_count: usize,
    pub area_mm2: f64,
}

impl LesionMeasurement {
    pub fn new(mask: BinaryMask, calibration: CalibrationFactor) -> LesionMeasurement {
        let damaged_pixel_count = mask.foreground_count();
        LesionMeasurement {
            damaged_pixel_count,
            area_mm2: calibration.pixel_count_to_mm2(damaged_pixel_count),
            mask,
        }
    }

    pub fn get_area_measurement(&self) -> AreaMeasurement {
        AreaMeasurement {
            pixel_count: self.damaged_pixel_count,
            area_mm2: self.area_mm2,
        }
    }
}

impl std::fmt::Display for LesionMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "LesionMeasurement({} damaged px, {:.4} mm²)",
            self.damaged_pixel_count, self.area_mm2
        )
    }
}
