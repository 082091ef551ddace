//! Tests for the manual tracing mode
//!
//! Covers the polygon fill contract (implicit closure, calibrated area) and
//! the Idle/Tracing state machine of the interactive tracer.

use oct_lesion_pipeline::{compute_manual_area, LesionTracer, TraceState};
use oct_lesion_structures::data::descriptors::{
    CalibrationFactor, ScanResolution, TracePoint, REFERENCE_MM_PER_PIXEL,
};
use oct_lesion_structures::OctLesionError;

//region Helpers

fn reference_calibration() -> CalibrationFactor {
    CalibrationFactor::new(REFERENCE_MM_PER_PIXEL).unwrap()
}

fn image_shape() -> ScanResolution {
    ScanResolution::new(100, 100).unwrap()
}

//endregion

#[cfg(test)]
mod test_polygon_area {
    use super::*;

    #[test]
    fn test_two_points_is_insufficient() {
        let points = [TracePoint::new(10.0, 10.0), TracePoint::new(40.0, 40.0)];
        let result = compute_manual_area(&points, image_shape(), reference_calibration());
        assert!(matches!(
            result,
            Err(OctLesionError::InsufficientTracePoints { collected: 2 })
        ));
    }

    #[test]
    fn test_three_noncollinear_points_have_area() {
        let points = [
            TracePoint::new(10.0, 10.0),
            TracePoint::new(40.0, 10.0),
            TracePoint::new(25.0, 40.0),
        ];
        let (mask, measurement) =
            compute_manual_area(&points, image_shape(), reference_calibration()).unwrap();
        assert!(measurement.pixel_count > 0);
        assert!(measurement.area_mm2 > 0.0);
        assert_eq!(mask.foreground_count(), measurement.pixel_count);
    }

    #[test]
    fn test_square_trace_fills_expected_area() {
        // the trace closes implicitly from the last corner back to the first
        let points = [
            TracePoint::new(0.0, 0.0),
            TracePoint::new(50.0, 0.0),
            TracePoint::new(50.0, 50.0),
            TracePoint::new(0.0, 50.0),
        ];
        let calibration = reference_calibration();
        let (_mask, measurement) =
            compute_manual_area(&points, image_shape(), calibration).unwrap();
        assert_eq!(measurement.pixel_count, 2500);
        assert_eq!(measurement.area_mm2, calibration.pixel_count_to_mm2(2500));
    }

    #[test]
    fn test_trace_outside_image_is_clipped() {
        let points = [
            TracePoint::new(-20.0, -20.0),
            TracePoint::new(30.0, -20.0),
            TracePoint::new(30.0, 30.0),
            TracePoint::new(-20.0, 30.0),
        ];
        let (mask, measurement) =
            compute_manual_area(&points, image_shape(), reference_calibration()).unwrap();
        // only the in-bounds 30x30 quadrant can be filled
        assert_eq!(measurement.pixel_count, 900);
        assert!(!mask.is_foreground(31, 31));
    }
}

#[cfg(test)]
mod test_tracer_state_machine {
    use super::*;

    #[test]
    fn test_starts_idle_and_empty() {
        let tracer = LesionTracer::new();
        assert_eq!(tracer.get_state(), TraceState::Idle);
        assert!(tracer.get_points().is_empty());
    }

    #[test]
    fn test_contact_motion_release_cycle() {
        let mut tracer = LesionTracer::new();
        tracer.begin_trace(TracePoint::new(10.0, 10.0));
        assert_eq!(tracer.get_state(), TraceState::Tracing);
        tracer.add_point(TracePoint::new(40.0, 10.0));
        tracer.add_point(TracePoint::new(25.0, 40.0));
        assert_eq!(tracer.get_points().len(), 3);

        let result = tracer.finish_trace(image_shape(), reference_calibration());
        assert!(result.is_ok());
        assert_eq!(tracer.get_state(), TraceState::Idle);
    }

    #[test]
    fn test_motion_while_idle_is_ignored() {
        let mut tracer = LesionTracer::new();
        tracer.add_point(TracePoint::new(5.0, 5.0));
        assert!(tracer.get_points().is_empty());
    }

    #[test]
    fn test_short_trace_keeps_points_until_cleared() {
        let mut tracer = LesionTracer::new();
        tracer.begin_trace(TracePoint::new(10.0, 10.0));
        tracer.add_point(TracePoint::new(20.0, 20.0));

        let result = tracer.finish_trace(image_shape(), reference_calibration());
        assert!(matches!(
            result,
            Err(OctLesionError::InsufficientTracePoints { collected: 2 })
        ));
        assert_eq!(tracer.get_state(), TraceState::Idle);
        assert_eq!(tracer.get_points().len(), 2);

        tracer.clear();
        assert!(tracer.get_points().is_empty());
        assert_eq!(tracer.get_state(), TraceState::Idle);
    }

    #[test]
    fn test_new_trace_resets_previous_points() {
        let mut tracer = LesionTracer::new();
        tracer.begin_trace(TracePoint::new(10.0, 10.0));
        tracer.add_point(TracePoint::new(20.0, 20.0));
        tracer.add_point(TracePoint::new(30.0, 10.0));
        tracer.finish_trace(image_shape(), reference_calibration()).unwrap();

        tracer.begin_trace(TracePoint::new(50.0, 50.0));
        assert_eq!(tracer.get_points().len(), 1);
        assert_eq!(tracer.get_state(), TraceState::Tracing);
    }
}
