use crate::error::OctLesionError;
use serde::{Deserialize, Serialize};

// NOTE -> (0,0) is in the top left corner, rows grow downward!

//region Scan Resolution

/// The pixel dimensions of a scan or mask, in cartesian (width, height) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResolution {
    pub width: usize,
    pub height: usize,
}

impl ScanResolution {
    pub fn new(width: usize, height: usize) -> Result<ScanResolution, OctLesionError> {
        if width == 0 || height == 0 {
            return Err(OctLesionError::ImageInput(
                "Scan resolution must be nonzero in both dimensions!".into(),
            ));
        }
        Ok(ScanResolution { width, height })
    }

    /// Total number of pixels (width x height).
    pub fn get_pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ScanResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}x{})", self.width, self.height)
    }
}

//endregion

//region Calibration

/// Reference calibration of the source scan protocol: a 6.0 mm physical scan
/// width imaged over 512 pixels. Supplied here for convenience only; every
/// run receives its calibration explicitly.
pub const REFERENCE_MM_PER_PIXEL: f64 = 0.01172;

/// Millimeters spanned by one pixel edge. Squared to convert a foreground
/// pixel count into a physical area in mm².
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CalibrationFactor {
    mm_per_pixel: f64,
}

impl CalibrationFactor {
    pub fn new(mm_per_pixel: f64) -> Result<CalibrationFactor, OctLesionError> {
        if !mm_per_pixel.is_finite() || mm_per_pixel <= 0.0 {
            return Err(OctLesionError::BadParameters(
                "Calibration factor must be a positive finite value!".into(),
            ));
        }
        Ok(CalibrationFactor { mm_per_pixel })
    }

    pub fn get_mm_per_pixel(&self) -> f64 {
        self.mm_per_pixel
    }

    /// Converts a foreground pixel count into mm² (count x factor²).
    pub fn pixel_count_to_mm2(&self, pixel_count: usize) -> f64 {
        pixel_count as f64 * self.mm_per_pixel * self.mm_per_pixel
    }
}

impl std::fmt::Display for CalibrationFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} mm/px", self.mm_per_pixel)
    }
}

//endregion

//region Area Band

/// Plausible lesion size band in pixel counts. Regions qualify only when
/// their enclosed area lies strictly inside (min_area, max_area).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBand {
    min_area: usize,
    max_area: usize,
}

impl AreaBand {
    pub fn new(min_area: usize, max_area: usize) -> Result<AreaBand, OctLesionError> {
        if min_area >= max_area {
            return Err(OctLesionError::BadParameters(format!(
                "Area band minimum {} must be below maximum {}!",
                min_area, max_area
            )));
        }
        Ok(AreaBand { min_area, max_area })
    }

    pub fn get_min_area(&self) -> usize {
        self.min_area
    }

    pub fn get_max_area(&self) -> usize {
        self.max_area
    }

    /// Strict band membership. Areas exactly at either bound are excluded.
    pub fn contains(&self, pixel_area: usize) -> bool {
        pixel_area > self.min_area && pixel_area < self.max_area
    }
}

impl std::fmt::Display for AreaBand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {}) px", self.min_area, self.max_area)
    }
}

//endregion

//region ROI Band

/// Vertical region-of-interest band, expressed as fractions of the scan
/// height. Rows outside [top_fraction * H, bottom_fraction * H) are treated
/// as artifact-prone margins and excluded from measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiBand {
    top_fraction: f64,
    bottom_fraction: f64,
}

impl RoiBand {
    pub fn new(top_fraction: f64, bottom_fraction: f64) -> Result<RoiBand, OctLesionError> {
        if !top_fraction.is_finite() || !bottom_fraction.is_finite() {
            return Err(OctLesionError::BadParameters(
                "ROI fractions must be finite!".into(),
            ));
        }
        if top_fraction < 0.0 || bottom_fraction > 1.0 || top_fraction >= bottom_fraction {
            return Err(OctLesionError::BadParameters(format!(
                "ROI fractions must satisfy 0 <= top < bottom <= 1, got top {} bottom {}!",
                top_fraction, bottom_fraction
            )));
        }
        Ok(RoiBand {
            top_fraction,
            bottom_fraction,
        })
    }

    pub fn get_top_fraction(&self) -> f64 {
        self.top_fraction
    }

    pub fn get_bottom_fraction(&self) -> f64 {
        self.bottom_fraction
    }

    /// Half-open row interval the band covers for a scan of the given height.
    pub fn row_range(&self, height: usize) -> std::ops::Range<usize> {
        let start = (self.top_fraction * height as f64).floor() as usize;
        let end = (self.bottom_fraction * height as f64).floor() as usize;
        start..end.min(height)
    }
}

impl std::fmt::Display for RoiBand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "rows [{:.2}H, {:.2}H)",
            self.top_fraction, self.bottom_fraction
        )
    }
}

//endregion

//region Trace Point

/// A sampled pointer coordinate in float image space, as delivered by the
/// tracing front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
}

impl TracePoint {
    pub fn new(x: f32, y: f32) -> TracePoint {
        TracePoint { x, y }
    }
}

impl std::fmt::Display for TracePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

//endregion
