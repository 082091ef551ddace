mod binary_mask;
mod measurement;
mod scan_image;

pub mod descriptors;

pub use binary_mask::{BinaryMask, MASK_FOREGROUND};
pub use measurement::{AreaMeasurement, LesionMeasurement};
pub use scan_image::ScanImage;
