use super::reflect_index;
use ndarray::Array2;
use oct_lesion_structures::data::ScanImage;
use oct_lesion_structures::OctLesionError;

/// Stage 1: edge-preserving bilateral smoother.
///
/// Replaces each pixel with a weighted neighborhood average where weights
/// decay both with spatial distance and with intensity difference, so
/// uncorrelated speckle averages out while sharp lesion boundaries survive.
#[derive(Debug, Clone)]
pub struct BilateralSmoother {
    window_diameter: usize,
    range_sigma: f64,
    spatial_sigma: f64,
    /// Precomputed spatial weights, row major over the full window
    spatial_kernel: Vec<f64>,
    /// Range weight per absolute intensity difference (0..=255)
    range_weights: [f64; 256],
}

impl BilateralSmoother {
    pub fn new(
        window_diameter: usize,
        range_sigma: f64,
        spatial_sigma: f64,
    ) -> Result<BilateralSmoother, OctLesionError> {
        if window_diameter < 3 || window_diameter % 2 == 0 {
            return Err(OctLesionError::BadParameters(format!(
                "Smoother window diameter must be odd and >= 3, got {}!",
                window_diameter
            )));
        }
        if !range_sigma.is_finite() || range_sigma <= 0.0 {
            return Err(OctLesionError::BadParameters(
                "Smoother range sigma must be positive!".into(),
            ));
        }
        if !spatial_sigma.is_finite() || spatial_sigma <= 0.0 {
            return Err(OctLesionError::BadParameters(
                "Smoother spatial sigma must be positive!".into(),
            ));
        }

        Ok(BilateralSmoother {
            window_diameter,
            range_sigma,
            spatial_sigma,
            spatial_kernel: build_spatial_kernel(window_diameter, spatial_sigma),
            range_weights: build_range_weights(range_sigma),
        })
    }

    pub fn get_window_diameter(&self) -> usize {
        self.window_diameter
    }

    /// Produces a smoothed copy of the scan at identical resolution.
    pub fn smooth(&self, image: &ScanImage) -> ScanImage {
        let source = image.get_internal_data();
        let (height, width) = source.dim();
        let mut destination = Array2::<u8>::zeros((height, width));
        let radius = (self.window_diameter / 2) as isize;

        for y in 0..height {
            for x in 0..width {
                let center = source[(y, x)];
                let mut weighted_sum = 0.0f64;
                let mut weight_total = 0.0f64;
                let mut kernel_index = 0usize;
                for dy in -radius..=radius {
                    let sample_y = reflect_index(y as isize + dy, height);
                    for dx in -radius..=radius {
                        let sample_x = reflect_index(x as isize + dx, width);
                        let sample = source[(sample_y, sample_x)];
                        let difference = (sample as i32 - center as i32).unsigned_abs() as usize;
                        let weight =
                            self.spatial_kernel[kernel_index] * self.range_weights[difference];
                        weighted_sum += weight * sample as f64;
                        weight_total += weight;
                        kernel_index += 1;
                    }
                }
                // weight_total >= the center's own weight, never zero
                destination[(y, x)] = (weighted_sum / weight_total).round() as u8;
            }
        }

        // dimensions are preserved, so wrapping cannot fail
        ScanImage::from_array(destination).unwrap()
    }
}

impl std::fmt::Display for BilateralSmoother {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BilateralSmoother(window: {}, range sigma: {}, spatial sigma: {})",
            self.window_diameter, self.range_sigma, self.spatial_sigma
        )
    }
}

//region kernel precomputation

fn build_spatial_kernel(window_diameter: usize, spatial_sigma: f64) -> Vec<f64> {
    let radius = (window_diameter / 2) as isize;
    let gauss_denominator = 2.0 * spatial_sigma * spatial_sigma;
    let mut kernel = Vec::with_capacity(window_diameter * window_diameter);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let squared_distance = (dy * dy + dx * dx) as f64;
            kernel.push((-squared_distance / gauss_denominator).exp());
        }
    }
    kernel
}

fn build_range_weights(range_sigma: f64) -> [f64; 256] {
    let gauss_denominator = 2.0 * range_sigma * range_sigma;
    let mut weights = [0.0f64; 256];
    for (difference, weight) in weights.iter_mut().enumerate() {
        let squared = (difference * difference) as f64;
        *weight = (-squared / gauss_denominator).exp();
    }
    weights
}

//endregion
