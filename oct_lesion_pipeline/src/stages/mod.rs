//! The five processing stages of the automatic pipeline. Each stage is a
//! parameter-validated processor: construction rejects bad parameters, and
//! processing is a pure function of the stage input.

mod adaptive_binarizer;
mod bilateral_smoother;
mod morphological_opener;
mod region_filter;
mod roi_calibrator;

pub use adaptive_binarizer::AdaptiveBinarizer;
pub use bilateral_smoother::BilateralSmoother;
pub use morphological_opener::{MorphologicalOpener, StructuringShape};
pub use region_filter::RegionFilter;
pub use roi_calibrator::RoiCalibrator;

/// Mirror-without-repeat (reflect-101) border indexing shared by the
/// windowed stages: ... 3 2 1 | 0 1 2 3 | 2 1 0 ...
pub(crate) fn reflect_index(index: isize, length: usize) -> usize {
    debug_assert!(length > 0);
    if length == 1 {
        return 0;
    }
    let period = 2 * (length as isize - 1);
    let mut folded = index.rem_euclid(period);
    if folded >= length as isize {
        folded = period - folded;
    }
    folded as usize
}
