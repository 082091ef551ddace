use oct_lesion_structures::data::{BinaryMask, MASK_FOREGROUND};
use oct_lesion_structures::OctLesionError;
use serde::{Deserialize, Serialize};

/// Structuring element shape for the morphological cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuringShape {
    /// Inscribed ellipse; at 3x3 this is the cross (center + 4-neighbors)
    Ellipse,
    /// Full rectangle of the given size
    Rectangle,
}

/// Stage 3: morphological opening (erosion then dilation).
///
/// Removes foreground specks narrower than the structuring element while
/// leaving the overall shape of larger regions intact. With iteration count
/// k the opening runs k erosions followed by k dilations, so re-applying the
/// opener to its own output changes nothing.
#[derive(Debug, Clone)]
pub struct MorphologicalOpener {
    shape: StructuringShape,
    kernel_size: usize,
    iterations: usize,
    /// (dy, dx) offsets of the structuring element cells
    offsets: Vec<(isize, isize)>,
}

impl MorphologicalOpener {
    pub fn new(
        shape: StructuringShape,
        kernel_size: usize,
        iterations: usize,
    ) -> Result<MorphologicalOpener, OctLesionError> {
        if kernel_size < 3 || kernel_size % 2 == 0 {
            return Err(OctLesionError::BadParameters(format!(
                "Opening kernel size must be odd and >= 3, got {}!",
                kernel_size
            )));
        }
        if iterations == 0 {
            return Err(OctLesionError::BadParameters(
                "Opening iteration count must be at least 1!".into(),
            ));
        }
        Ok(MorphologicalOpener {
            shape,
            kernel_size,
            iterations,
            offsets: build_structuring_offsets(shape, kernel_size),
        })
    }

    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    /// Applies the opening and returns a new mask of identical dimensions.
    pub fn open(&self, mask: &BinaryMask) -> BinaryMask {
        let mut current = mask.clone();
        for _ in 0..self.iterations {
            current = erode(&current, &self.offsets);
        }
        for _ in 0..self.iterations {
            current = dilate(&current, &self.offsets);
        }
        current
    }
}

impl std::fmt::Display for MorphologicalOpener {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "MorphologicalOpener({:?} {}x{}, {} iteration(s))",
            self.shape, self.kernel_size, self.kernel_size, self.iterations
        )
    }
}

//region structuring element and primitives

fn build_structuring_offsets(shape: StructuringShape, kernel_size: usize) -> Vec<(isize, isize)> {
    let radius = (kernel_size / 2) as isize;
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        let half_width = match shape {
            StructuringShape::Rectangle => radius,
            StructuringShape::Ellipse => {
                if radius == 0 {
                    0
                } else {
                    // inscribed ellipse row extent
                    let normalized = dy as f64 / radius as f64;
                    (radius as f64 * (1.0 - normalized * normalized).max(0.0).sqrt()).round()
                        as isize
                }
            }
        };
        for dx in -half_width..=half_width {
            offsets.push((dy, dx));
        }
    }
    offsets
}

/// Erosion over the structuring element. Out-of-bounds neighbors do not
/// constrain the result, so regions touching the border are not eroded from
/// the border side.
fn erode(mask: &BinaryMask, offsets: &[(isize, isize)]) -> BinaryMask {
    let resolution = mask.get_resolution();
    let source = mask.get_internal_data();
    let mut destination = BinaryMask::new(resolution);
    let output = destination.get_internal_data_mut();
    for y in 0..resolution.height {
        for x in 0..resolution.width {
            let mut survives = true;
            for &(dy, dx) in offsets {
                let ny = y as isize + dy;
                let nx = x as isize + dx;
                if ny < 0
                    || nx < 0
                    || ny >= resolution.height as isize
                    || nx >= resolution.width as isize
                {
                    continue;
                }
                if source[(ny as usize, nx as usize)] == 0 {
                    survives = false;
                    break;
                }
            }
            if survives && source[(y, x)] != 0 {
                output[(y, x)] = MASK_FOREGROUND;
            }
        }
    }
    destination
}

/// Dilation over the structuring element. Out-of-bounds neighbors contribute
/// nothing.
fn dilate(mask: &BinaryMask, offsets: &[(isize, isize)]) -> BinaryMask {
    let resolution = mask.get_resolution();
    let source = mask.get_internal_data();
    let mut destination = BinaryMask::new(resolution);
    let output = destination.get_internal_data_mut();
    for y in 0..resolution.height {
        for x in 0..resolution.width {
            for &(dy, dx) in offsets {
                let ny = y as isize + dy;
                let nx = x as isize + dx;
                if ny < 0
                    || nx < 0
                    || ny >= resolution.height as isize
                    || nx >= resolution.width as isize
                {
                    continue;
                }
                if source[(ny as usize, nx as usize)] != 0 {
                    output[(y, x)] = MASK_FOREGROUND;
                    break;
                }
            }
        }
    }
    destination
}

//endregion
