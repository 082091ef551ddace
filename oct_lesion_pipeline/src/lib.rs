//! Deterministic lesion detection for grayscale retinal OCT scans.
//!
//! The automatic pipeline runs five stages in a fixed order over one scan:
//! edge-preserving smoothing, adaptive inverted thresholding, morphological
//! opening, area-band region filtering, then ROI masking and calibration.
//! A secondary manual mode computes the area of a freehand polygon trace.
//! Both modes report areas the same way: foreground pixel count times the
//! squared mm-per-pixel calibration factor.

mod manual_trace;
mod overlay;
mod params;
mod pipeline;

pub mod stages;

pub use manual_trace::{compute_manual_area, LesionTracer, TraceState};
pub use overlay::{render_overlay, save_overlay};
pub use params::PipelineParams;
pub use pipeline::run_auto_pipeline;
