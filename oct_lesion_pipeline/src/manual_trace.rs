use oct_lesion_structures::data::descriptors::{CalibrationFactor, ScanResolution, TracePoint};
use oct_lesion_structures::data::{AreaMeasurement, BinaryMask};
use oct_lesion_structures::OctLesionError;
use tracing::debug;

/// Minimum points needed to form a polygon with nonzero interior.
const MINIMUM_TRACE_POINTS: usize = 3;

/// Computes the area enclosed by a freehand trace.
///
/// The ordered points describe a closed curve (the last point connects back
/// to the first implicitly). The polygon is rasterized into a filled mask at
/// the scan's resolution and the foreground count is calibrated to mm²,
/// exactly as the automatic pipeline does. Fewer than 3 points is a
/// user-input condition, reported as `InsufficientTracePoints`.
pub fn compute_manual_area(
    points: &[TracePoint],
    resolution: ScanResolution,
    calibration: CalibrationFactor,
) -> Result<(BinaryMask, AreaMeasurement), OctLesionError> {
    if points.len() < MINIMUM_TRACE_POINTS {
        return Err(OctLesionError::InsufficientTracePoints {
            collected: points.len(),
        });
    }
    let mask = fill_polygon(points, resolution);
    let measurement = AreaMeasurement::from_pixel_count(mask.foreground_count(), calibration);
    debug!(
        "[MANUAL-TRACE] Filled polygon of {} points: {}",
        points.len(),
        measurement
    );
    Ok((mask, measurement))
}

/// Interaction state of the tracing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    Idle,
    Tracing,
}

/// The interactive tracing state machine.
///
/// Idle -> Tracing on the first contact point; each further sample appends
/// while Tracing; release returns to Idle and computes the area. A failed
/// release (too few points) keeps the collected points buffered so the
/// caller can inspect or clear them. Starting a new trace always resets the
/// buffer; traces never accumulate.
#[derive(Debug, Clone)]
pub struct LesionTracer {
    state: TraceState,
    points: Vec<TracePoint>,
}

impl LesionTracer {
    pub fn new() -> LesionTracer {
        LesionTracer {
            state: TraceState::Idle,
            points: Vec::new(),
        }
    }

    pub fn get_state(&self) -> TraceState {
        self.state
    }

    pub fn get_points(&self) -> &[TracePoint] {
        &self.points
    }

    /// First contact: discards any previous trace and starts a new one.
    pub fn begin_trace(&mut self, point: TracePoint) {
        self.points.clear();
        self.points.push(point);
        self.state = TraceState::Tracing;
    }

    /// Appends a sample while tracing. Samples arriving in Idle (e.g. stray
    /// pointer motion) are ignored.
    pub fn add_point(&mut self, point: TracePoint) {
        if self.state == TraceState::Tracing {
            self.points.push(point);
        }
    }

    /// Release: returns to Idle and computes the enclosed area. On an
    /// insufficient trace the points stay buffered until `clear`.
    pub fn finish_trace(
        &mut self,
        resolution: ScanResolution,
        calibration: CalibrationFactor,
    ) -> Result<(BinaryMask, AreaMeasurement), OctLesionError> {
        self.state = TraceState::Idle;
        compute_manual_area(&self.points, resolution, calibration)
    }

    /// Forces Idle with an empty point sequence, from any state.
    pub fn clear(&mut self) {
        self.points.clear();
        self.state = TraceState::Idle;
    }
}

impl Default for LesionTracer {
    fn default() -> LesionTracer {
        LesionTracer::new()
    }
}

//region polygon rasterization

/// Even-odd scanline fill sampled at pixel centers. A pixel is foreground
/// when its center (x + 0.5, y + 0.5) lies inside the implicitly closed
/// polygon. Trace coordinates may fall outside the scan; the fill is clipped
/// to the mask bounds.
fn fill_polygon(points: &[TracePoint], resolution: ScanResolution) -> BinaryMask {
    let mut mask = BinaryMask::new(resolution);
    let mut crossings: Vec<f64> = Vec::new();

    for y in 0..resolution.height {
        let scanline_y = y as f64 + 0.5;
        crossings.clear();
        for edge_start in 0..points.len() {
            let start = points[edge_start];
            let end = points[(edge_start + 1) % points.len()];
            let (y0, y1) = (start.y as f64, end.y as f64);
            // half-open edge interval so shared vertices count once
            if (y0 <= scanline_y && y1 > scanline_y) || (y1 <= scanline_y && y0 > scanline_y) {
                let t = (scanline_y - y0) / (y1 - y0);
                crossings.push(start.x as f64 + t * (end.x as f64 - start.x as f64));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let first_column = (span[0] - 0.5).ceil().max(0.0) as usize;
            let last_exclusive = ((span[1] - 0.5).ceil().max(0.0) as usize).min(resolution.width);
            for x in first_column..last_exclusive {
                mask.set_foreground(y, x);
            }
        }
    }
    mask
}

//endregion
