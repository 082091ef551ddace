use image::{Rgb, RgbImage};
use oct_lesion_structures::data::{BinaryMask, ScanImage};
use oct_lesion_structures::OctLesionError;
use tracing::info;

/// Weight of the original intensity in the blended overlay.
const ORIGINAL_WEIGHT: f32 = 0.7;
/// Weight of the solid highlight color under mask foreground.
const HIGHLIGHT_WEIGHT: f32 = 0.3;
/// Solid highlight painted over lesion cells before blending.
const HIGHLIGHT_COLOR: [u8; 3] = [255, 0, 0];

/// Renders the saveable overlay artifact: the scan converted to RGB with
/// lesion cells blended against a solid highlight at a 70/30 ratio. Pixels
/// outside the mask are left at their original intensity.
pub fn render_overlay(image: &ScanImage, mask: &BinaryMask) -> Result<RgbImage, OctLesionError> {
    let resolution = image.get_resolution();
    if resolution != mask.get_resolution() {
        return Err(OctLesionError::BadParameters(format!(
            "Overlay mask resolution {} does not match scan resolution {}!",
            mask.get_resolution(),
            resolution
        )));
    }

    let pixels = image.get_internal_data();
    let mut overlay = RgbImage::new(resolution.width as u32, resolution.height as u32);
    for ((y, x), &intensity) in pixels.indexed_iter() {
        let color = if mask.is_foreground(y, x) {
            [
                blend_channel(intensity, HIGHLIGHT_COLOR[0]),
                blend_channel(intensity, HIGHLIGHT_COLOR[1]),
                blend_channel(intensity, HIGHLIGHT_COLOR[2]),
            ]
        } else {
            [intensity, intensity, intensity]
        };
        overlay.put_pixel(x as u32, y as u32, Rgb(color));
    }
    Ok(overlay)
}

/// Renders the overlay and writes it to disk as a standard raster image,
/// with the format inferred from the path extension (PNG recommended).
pub fn save_overlay(
    image: &ScanImage,
    mask: &BinaryMask,
    path: &std::path::Path,
) -> Result<(), OctLesionError> {
    let overlay = render_overlay(image, mask)?;
    overlay
        .save(path)
        .map_err(|e| OctLesionError::ImageEncode(format!("{}: {}", path.display(), e)))?;
    info!("[OVERLAY] Saved result image to {}", path.display());
    Ok(())
}

fn blend_channel(original: u8, highlight: u8) -> u8 {
    (original as f32 * ORIGINAL_WEIGHT + highlight as f32 * HIGHLIGHT_WEIGHT).round() as u8
}
