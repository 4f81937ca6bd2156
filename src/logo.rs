use std::path::Path;

use image::DynamicImage;

use crate::options::{LogoSizing, QrOptions};

/// Store a center logo and reset its sizing to the just-added defaults.
pub fn set_logo(options: &mut QrOptions, image: DynamicImage) {
    options.logo = Some(image);
    options.logo_sizing = LogoSizing::ADDED;
}

/// Drop the logo and return the sizing to the idle defaults.
pub fn remove_logo(options: &mut QrOptions) {
    options.logo = None;
    options.logo_sizing = LogoSizing::default();
}

/// Change only the relative size. Does nothing without a logo. The
/// caller validates that the value is within (0, 1].
pub fn resize_logo(options: &mut QrOptions, relative_size: f32) {
    if options.logo.is_none() {
        return;
    }
    options.logo_sizing.relative_size = relative_size;
}

/// Read and decode a logo file. An unreadable or undecodable file is
/// logged and skipped, never an error.
pub fn load(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not read logo, continuing without one",
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::io::Write;

    fn logo() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(16, 16))
    }

    #[test]
    fn test_set_logo_resets_sizing() {
        let mut options = QrOptions::new();
        set_logo(&mut options, logo());

        assert!(options.logo.is_some());
        assert_eq!(options.logo_sizing, LogoSizing::ADDED);
    }

    #[test]
    fn test_remove_logo_clears_state() {
        let mut options = QrOptions::new();
        set_logo(&mut options, logo());
        remove_logo(&mut options);

        assert!(options.logo.is_none());
        assert_eq!(options.logo_sizing, LogoSizing::default());
    }

    #[test]
    fn test_resize_is_noop_without_logo() {
        let mut options = QrOptions::new();
        resize_logo(&mut options, 0.5);
        assert_eq!(options.logo_sizing, LogoSizing::default());
    }

    #[test]
    fn test_resize_with_logo_changes_relative_size_only() {
        let mut options = QrOptions::new();
        set_logo(&mut options, logo());
        resize_logo(&mut options, 0.5);

        assert_eq!(options.logo_sizing.relative_size, 0.5);
        assert_eq!(options.logo_sizing.margin_px, LogoSizing::ADDED.margin_px);
    }

    #[test]
    fn test_load_rejects_non_image_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not an image").unwrap();
        assert!(load(file.path()).is_none());
    }

    #[test]
    fn test_load_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        DynamicImage::ImageRgba8(RgbaImage::new(8, 8))
            .save(&path)
            .unwrap();

        assert!(load(&path).is_some());
    }
}
