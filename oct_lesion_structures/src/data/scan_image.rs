use super::descriptors::ScanResolution;
use crate::error::OctLesionError;
use image::DynamicImage;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A single-channel OCT scan held as a 2D grid of u8 intensities.
///
/// Pixel data is stored row major as (height, width). The image is fixed at
/// load time; pipeline stages read it and produce new artifacts rather than
/// mutating it in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanImage {
    pixels: Array2<u8>,
}

impl ScanImage {
    //region Common Constructors

    /// Creates a new zero-filled ScanImage at the given resolution.
    pub fn new(resolution: ScanResolution) -> ScanImage {
        ScanImage {
            pixels: Array2::<u8>::zeros((resolution.height, resolution.width)),
        }
    }

    /// Wraps an existing (height, width) intensity array.
    pub fn from_array(pixels: Array2<u8>) -> Result<ScanImage, OctLesionError> {
        let shape = pixels.shape();
        ScanResolution::new(shape[1], shape[0])?;
        Ok(ScanImage { pixels })
    }

    /// Converts any decoded image to grayscale and wraps it.
    pub fn new_from_dynamic_image(img: DynamicImage) -> Result<ScanImage, OctLesionError> {
        let buffer = img.to_luma8();
        let (width, height) = buffer.dimensions();
        let array = Array2::from_shape_vec((height as usize, width as usize), buffer.into_raw())
            .map_err(|e| OctLesionError::InternalError(format!("Luma buffer reshape failed: {}", e)))?;
        Self::from_array(array)
    }

    pub fn new_from_png_bytes(input: &[u8]) -> Result<ScanImage, OctLesionError> {
        Self::new_from_format_bytes(input, image::ImageFormat::Png)
    }

    pub fn new_from_bmp_bytes(input: &[u8]) -> Result<ScanImage, OctLesionError> {
        Self::new_from_format_bytes(input, image::ImageFormat::Bmp)
    }

    pub fn new_from_jpeg_bytes(input: &[u8]) -> Result<ScanImage, OctLesionError> {
        Self::new_from_format_bytes(input, image::ImageFormat::Jpeg)
    }

    pub fn new_from_tiff_bytes(input: &[u8]) -> Result<ScanImage, OctLesionError> {
        Self::new_from_format_bytes(input, image::ImageFormat::Tiff)
    }

    /// Reads a scan from disk, guessing the raster format from its contents.
    pub fn load_from_file(path: &std::path::Path) -> Result<ScanImage, OctLesionError> {
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| OctLesionError::ImageInput(format!("Failed to decode {}: {}", path.display(), e)))?;
        Self::new_from_dynamic_image(img)
    }

    fn new_from_format_bytes(
        input: &[u8],
        format: image::ImageFormat,
    ) -> Result<ScanImage, OctLesionError> {
        let img = image::load_from_memory_with_format(input, format)
            .map_err(|e| OctLesionError::ImageInput(format!("Failed to decode image bytes: {}", e)))?;
        Self::new_from_dynamic_image(img)
    }

    //endregion

    //region Properties

    /// Returns the resolution of the scan in cartesian space (width, height).
    pub fn get_resolution(&self) -> ScanResolution {
        let shape: &[usize] = self.pixels.shape();
        // nd array is row major, coords are yx
        ScanResolution {
            width: shape[1],
            height: shape[0],
        }
    }

    /// Returns a read-only view of the pixel data.
    pub fn get_pixels_view(&self) -> ArrayView2<u8> {
        self.pixels.view()
    }

    /// Returns a mutable view of the pixel data.
    pub fn get_pixels_view_mut(&mut self) -> ArrayViewMut2<u8> {
        self.pixels.view_mut()
    }

    /// Returns a reference to the internal pixel array, organized as
    /// (height, width) following row-major ordering.
    pub fn get_internal_data(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Returns a mutable reference to the internal pixel array.
    /// Be cautious when using this as you can easily set the data to an invalid state!
    pub fn get_internal_data_mut(&mut self) -> &mut Array2<u8> {
        &mut self.pixels
    }

    //endregion
}

impl std::fmt::Display for ScanImage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ScanImage({})", self.get_resolution())
    }
}
