use crate::params::PipelineParams;
use crate::stages::{
    AdaptiveBinarizer, BilateralSmoother, MorphologicalOpener, RegionFilter, RoiCalibrator,
};
use oct_lesion_structures::data::descriptors::{AreaBand, CalibrationFactor, RoiBand};
use oct_lesion_structures::data::{LesionMeasurement, ScanImage};
use oct_lesion_structures::OctLesionError;
use tracing::{debug, info};

/// Runs the five-stage automatic lesion detection pipeline over one scan.
///
/// Every stage parameter is validated before the first stage executes; a bad
/// bundle fails fast with no partial mask produced. Stages run strictly in
/// order, each a pure function of the previous artifact, so repeated runs on
/// the same scan and parameters are bit-identical.
pub fn run_auto_pipeline(
    image: &ScanImage,
    params: &PipelineParams,
    calibration: CalibrationFactor,
) -> Result<LesionMeasurement, OctLesionError> {
    let smoother = BilateralSmoother::new(
        params.smoother_window_diameter,
        params.smoother_range_sigma,
        params.smoother_spatial_sigma,
    )?;
    let binarizer = AdaptiveBinarizer::new(params.binarizer_neighborhood, params.binarizer_offset)?;
    let opener = MorphologicalOpener::new(
        params.opening_shape,
        params.opening_kernel_size,
        params.opening_iterations,
    )?;
    let region_filter = RegionFilter::new(AreaBand::new(
        params.min_region_area,
        params.max_region_area,
    )?);
    let roi_calibrator = RoiCalibrator::new(
        RoiBand::new(params.roi_top_fraction, params.roi_bottom_fraction)?,
        calibration,
    );

    let resolution = image.get_resolution();
    debug!("[LESION-PIPELINE] Starting run over {} scan", resolution);

    let smoothed = smoother.smooth(image);
    debug!("[LESION-PIPELINE] Stage 1 complete: {}", smoother);

    let thresholded = binarizer.binarize(&smoothed);
    debug!(
        "[LESION-PIPELINE] Stage 2 complete: {} foreground px",
        thresholded.foreground_count()
    );

    let opened = opener.open(&thresholded);
    debug!(
        "[LESION-PIPELINE] Stage 3 complete: {} foreground px",
        opened.foreground_count()
    );

    let region_filtered = region_filter.filter(&opened);
    debug!(
        "[LESION-PIPELINE] Stage 4 complete: {} foreground px",
        region_filtered.foreground_count()
    );

    let measurement = roi_calibrator.measure(region_filtered);
    info!(
        "[LESION-PIPELINE] Run complete: {} damaged px, {:.4} mm²",
        measurement.damaged_pixel_count, measurement.area_mm2
    );
    Ok(measurement)
}
