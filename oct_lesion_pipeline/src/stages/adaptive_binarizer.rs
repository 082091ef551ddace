use super::reflect_index;
use ndarray::Array2;
use oct_lesion_structures::data::{BinaryMask, ScanImage};
use oct_lesion_structures::OctLesionError;

/// Stage 2: adaptive mean thresholding, inverted polarity.
///
/// Each pixel is compared against the rounded mean of its NxN neighborhood
/// and marked foreground when its intensity sits at or below (mean - offset).
/// Lesions appear darker than the locally averaged background, so the
/// inverted comparison selects them while tolerating illumination gradients
/// across the scan.
#[derive(Debug, Clone)]
pub struct AdaptiveBinarizer {
    neighborhood_size: usize,
    offset: i32,
}

impl AdaptiveBinarizer {
    pub fn new(neighborhood_size: usize, offset: i32) -> Result<AdaptiveBinarizer, OctLesionError> {
        if neighborhood_size < 3 || neighborhood_size % 2 == 0 {
            return Err(OctLesionError::BadParameters(format!(
                "Binarizer neighborhood size must be odd and >= 3, got {}!",
                neighborhood_size
            )));
        }
        Ok(AdaptiveBinarizer {
            neighborhood_size,
            offset,
        })
    }

    pub fn get_neighborhood_size(&self) -> usize {
        self.neighborhood_size
    }

    pub fn get_offset(&self) -> i32 {
        self.offset
    }

    /// Thresholds the scan into a foreground/background map of identical
    /// dimensions.
    pub fn binarize(&self, image: &ScanImage) -> BinaryMask {
        let source = image.get_internal_data();
        let (height, width) = source.dim();
        let radius = (self.neighborhood_size / 2) as isize;

        // separable box sum: horizontal pass, then vertical pass + compare
        let mut row_sums = Array2::<u32>::zeros((height, width));
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0u32;
                for dx in -radius..=radius {
                    sum += source[(y, reflect_index(x as isize + dx, width))] as u32;
                }
                row_sums[(y, x)] = sum;
            }
        }

        let sample_count = (self.neighborhood_size * self.neighborhood_size) as u32;
        let mut mask = BinaryMask::new(image.get_resolution());
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0u32;
                for dy in -radius..=radius {
                    sum += row_sums[(reflect_index(y as isize + dy, height), x)];
                }
                let local_mean = ((sum + sample_count / 2) / sample_count) as i32;
                if source[(y, x)] as i32 <= local_mean - self.offset {
                    mask.set_foreground(y, x);
                }
            }
        }
        mask
    }
}

impl std::fmt::Display for AdaptiveBinarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "AdaptiveBinarizer(neighborhood: {}, offset: {})",
            self.neighborhood_size, self.offset
        )
    }
}
