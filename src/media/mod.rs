// SPDX-License-Identifier: MPL-2.0
//! Pixel work: cropping, filtering, stroke and text rasterization, export.
//!
//! Everything here is a pure function of its inputs (plus the processor's
//! caches) and safe to run on a background thread.

pub mod crop;
pub mod export;
pub mod filter;
pub mod processing;
pub mod raster;
pub mod strokes;
pub mod text;

pub use export::{image_transform, ExportService};
pub use filter::{ColorMatrix, FilterKernels};
pub use processing::{ImageProcessor, Kernels, ProcessImage, RasterKernels};
pub use text::{TextRenderer, TextStyle};

use crate::error::Result;
use image_rs::DynamicImage;
use std::path::Path;

/// Decodes an image file, guessing the format from its content.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let reader = image_rs::ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?)
}

/// Encodes `image` to `path`; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageBuffer, Rgba};
    use tempfile::tempdir;

    #[test]
    fn png_survives_save_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("out.png");
        let image = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(3, 2, Rgba([9u8, 8, 7, 255])));

        save_image(&image, &path).expect("save");
        let loaded = load_image(&path).expect("load").to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [9, 8, 7, 255]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = load_image(dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
