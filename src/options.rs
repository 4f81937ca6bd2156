use std::path::Path;

use clap::ValueEnum;
use image::DynamicImage;
use qrcode::EcLevel;

use crate::payload;
use crate::style::StyleOptions;

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// The on-screen preview resolution.
    pub const PREVIEW: Size = Size {
        width: 300,
        height: 300,
    };

    /// The resolution exports are rendered at.
    pub const EXPORT: Size = Size {
        width: 1000,
        height: 1000,
    };
}

/// Placement of the center logo relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSizing {
    /// Clear border painted around the logo, in pixels.
    pub margin_px: u32,
    /// Logo edge as a fraction of the canvas, within (0, 1].
    pub relative_size: f32,
}

impl LogoSizing {
    // Sizing applied the moment a logo is added. Larger than the idle
    // default, still within what EcLevel::H keeps scannable.
    pub const ADDED: LogoSizing = LogoSizing {
        margin_px: 10,
        relative_size: 0.4,
    };
}

impl Default for LogoSizing {
    fn default() -> Self {
        LogoSizing {
            margin_px: 5,
            relative_size: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// Infer the format from a file extension, e.g. "qr.png" -> Png.
    pub fn from_path(path: &Path) -> Option<OutputFormat> {
        match path
            .extension()?
            .to_str()?
            .to_ascii_lowercase()
            .as_str()
        {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }
}

/// Everything the renderer needs to draw one QR code. One record per
/// design session, mutated in place.
#[derive(Debug, Clone)]
pub struct QrOptions {
    pub size: Size,
    /// The encoded content. Invariant: never empty, never overwritten
    /// with an empty candidate.
    pub payload: String,
    pub logo: Option<DynamicImage>,
    pub logo_sizing: LogoSizing,
    pub style: StyleOptions,
    // Fixed at H so a logo can cover part of the symbol and it still
    // scans. No setter exists; nothing may lower it.
    error_correction: EcLevel,
}

impl QrOptions {
    pub fn new() -> QrOptions {
        QrOptions {
            size: Size::PREVIEW,
            payload: payload::PLACEHOLDER_URL.to_string(),
            logo: None,
            logo_sizing: LogoSizing::default(),
            style: StyleOptions::default(),
            error_correction: EcLevel::H,
        }
    }

    pub fn error_correction(&self) -> EcLevel {
        self.error_correction
    }
}

impl Default for QrOptions {
    fn default() -> Self {
        QrOptions::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = QrOptions::new();
        assert_eq!(options.size, Size::PREVIEW);
        assert_eq!(options.payload, "https://example.com");
        assert!(options.logo.is_none());
        assert_eq!(options.logo_sizing.margin_px, 5);
        assert_eq!(options.logo_sizing.relative_size, 0.3);
        assert_eq!(options.error_correction(), EcLevel::H);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("qr.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/qr.JPG")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("qr.jpeg")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("qr.webp")),
            Some(OutputFormat::Webp)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("qr.svg")),
            Some(OutputFormat::Svg)
        );
        assert_eq!(OutputFormat::from_path(Path::new("qr.bmp")), None);
        assert_eq!(OutputFormat::from_path(Path::new("qr")), None);
    }
}
