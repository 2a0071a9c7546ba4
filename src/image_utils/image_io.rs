use crate::error::OverlayError;
use image::{self, RgbaImage};
use std::path::Path;

pub fn read_image_as_rgba8(filepath: &Path) -> Result<RgbaImage, OverlayError> {
    let img = image::open(filepath).map_err(|source| OverlayError::Image {
        path: filepath.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgba8())
}

/// Writes an image as PNG regardless of the extension on `filepath`.
pub fn save_png(img: &RgbaImage, filepath: &Path) -> Result<(), OverlayError> {
    if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OverlayError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    img.save_with_format(filepath, image::ImageFormat::Png)
        .map_err(|source| OverlayError::Image { path: filepath.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn round_trips_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/test_image.png");
        let mut img = RgbaImage::new(3, 3);
        img.put_pixel(0, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 255, 0, 255]));
        img.put_pixel(2, 1, Rgba([0, 0, 255, 255]));
        save_png(&img, &path).unwrap();

        let read = read_image_as_rgba8(&path).unwrap();
        assert_eq!(read.get_pixel(0, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(read.get_pixel(1, 1), &Rgba([0, 255, 0, 255]));
        assert_eq!(read.get_pixel(2, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(read.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(read_image_as_rgba8(&path), Err(OverlayError::Image { .. })));
    }
}
