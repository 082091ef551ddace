use crate::stages::{
    AdaptiveBinarizer, BilateralSmoother, MorphologicalOpener, RegionFilter, StructuringShape,
};
use oct_lesion_structures::data::descriptors::{AreaBand, RoiBand};
use oct_lesion_structures::OctLesionError;
use serde::{Deserialize, Serialize};

/// Bundled parameters for every stage of the automatic pipeline.
///
/// `default()` reproduces the reference detection behavior bit-for-bit.
/// The bundle is JSON round-trippable so a front end can persist tuned
/// parameter sets between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    pub smoother_window_diameter: usize,
    pub smoother_range_sigma: f64,
    pub smoother_spatial_sigma: f64,
    pub binarizer_neighborhood: usize,
    pub binarizer_offset: i32,
    pub opening_shape: StructuringShape,
    pub opening_kernel_size: usize,
    pub opening_iterations: usize,
    pub min_region_area: usize,
    pub max_region_area: usize,
    pub roi_top_fraction: f64,
    pub roi_bottom_fraction: f64,
}

impl Default for PipelineParams {
    fn default() -> PipelineParams {
        PipelineParams {
            smoother_window_diameter: 9,
            smoother_range_sigma: 75.0,
            smoother_spatial_sigma: 75.0,
            binarizer_neighborhood: 35,
            binarizer_offset: 5,
            opening_shape: StructuringShape::Ellipse,
            opening_kernel_size: 3,
            opening_iterations: 2,
            min_region_area: 100,
            max_region_area: 3000,
            roi_top_fraction: 0.20,
            roi_bottom_fraction: 0.85,
        }
    }
}

impl PipelineParams {
    /// Checks every stage parameter without running anything. The pipeline
    /// performs the same checks itself; this exists so a front end can
    /// validate user edits eagerly.
    pub fn validate(&self) -> Result<(), OctLesionError> {
        BilateralSmoother::new(
            self.smoother_window_diameter,
            self.smoother_range_sigma,
            self.smoother_spatial_sigma,
        )?;
        AdaptiveBinarizer::new(self.binarizer_neighborhood, self.binarizer_offset)?;
        MorphologicalOpener::new(
            self.opening_shape,
            self.opening_kernel_size,
            self.opening_iterations,
        )?;
        RegionFilter::new(AreaBand::new(self.min_region_area, self.max_region_area)?);
        RoiBand::new(self.roi_top_fraction, self.roi_bottom_fraction)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, OctLesionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OctLesionError::InternalError(format!("Parameter serialization failed: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<PipelineParams, OctLesionError> {
        let params: PipelineParams = serde_json::from_str(json)
            .map_err(|e| OctLesionError::BadParameters(format!("Invalid parameter JSON: {}", e)))?;
        params.validate()?;
        Ok(params)
    }
}
