use anyhow::Result;
use csscolorparser::Color;
use image::DynamicImage;

use crate::logo;
use crate::options::{OutputFormat, QrOptions, Size};
use crate::payload::{self, ContentKind, Fields};
use crate::render;
use crate::style::{CornerShape, DotShape, Preset};

/// One QR design in progress. Owns the options record; every mutation
/// goes through here so the record's invariants hold: the payload is
/// never emptied, corner-dot style tracks corner-square style, and the
/// error correction level never moves.
#[derive(Debug, Default)]
pub struct Session {
    options: QrOptions,
}

impl Session {
    pub fn new() -> Session {
        Session {
            options: QrOptions::new(),
        }
    }

    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Re-encode the payload from the given field values. An empty
    /// candidate (hosted-file kinds, which encode nothing) leaves the
    /// previous payload in place.
    pub fn update_payload(&mut self, kind: ContentKind, fields: &Fields) {
        let data = payload::encode(kind, fields);
        if !data.is_empty() {
            self.options.payload = data;
        }
    }

    /// Take a hosted-file link as the payload. Same last-good rule as
    /// `update_payload`.
    pub fn set_payload(&mut self, link: String) {
        if !link.is_empty() {
            self.options.payload = link;
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.options.style.apply_preset(preset);
    }

    pub fn set_dot_color(&mut self, color: Color) {
        self.options.style.set_dot_color(color);
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.options.style.set_background_color(color);
    }

    pub fn set_corner_color(&mut self, color: Color) {
        self.options.style.set_corner_color(color);
    }

    pub fn set_dot_shape(&mut self, shape: DotShape) {
        self.options.style.set_dot_shape(shape);
    }

    pub fn set_corner_shape(&mut self, shape: CornerShape) {
        self.options.style.set_corner_shape(shape);
    }

    pub fn set_logo(&mut self, image: DynamicImage) {
        logo::set_logo(&mut self.options, image);
    }

    pub fn remove_logo(&mut self) {
        logo::remove_logo(&mut self.options);
    }

    pub fn resize_logo(&mut self, relative_size: f32) {
        logo::resize_logo(&mut self.options, relative_size);
    }

    pub fn preview(&self) -> Result<String> {
        render::preview(&self.options)
    }

    /// Export at the fixed high resolution. The preview size is put back
    /// whether or not the render succeeds.
    pub fn export(&mut self, format: OutputFormat) -> Result<Vec<u8>> {
        let preview_size = self.options.size;
        self.options.size = Size::EXPORT;
        let result = render::export(&self.options, format);
        self.options.size = preview_size;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::WifiSecurity;
    use qrcode::EcLevel;

    #[test]
    fn test_update_payload() {
        let mut session = Session::new();
        let fields = Fields {
            wifi_ssid: "lab".to_string(),
            wifi_security: WifiSecurity::Nopass,
            ..Fields::default()
        };
        session.update_payload(ContentKind::Wifi, &fields);
        assert_eq!(session.options().payload, "WIFI:T:nopass;S:lab;;");
    }

    #[test]
    fn test_empty_candidate_keeps_last_good_payload() {
        let mut session = Session::new();
        session.set_payload("https://file.io/abc".to_string());

        // Hosted-file kinds encode nothing; the link must survive.
        session.update_payload(ContentKind::Pdf, &Fields::default());
        assert_eq!(session.options().payload, "https://file.io/abc");

        session.set_payload(String::new());
        assert_eq!(session.options().payload, "https://file.io/abc");
    }

    #[test]
    fn test_export_restores_size_on_success() {
        let mut session = Session::new();
        let bytes = session.export(OutputFormat::Png).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(session.options().size, Size::PREVIEW);
    }

    #[test]
    fn test_export_restores_size_on_failure() {
        let mut session = Session::new();
        // Too long for any QR symbol version.
        session.set_payload("x".repeat(4000));
        assert!(session.export(OutputFormat::Png).is_err());
        assert_eq!(session.options().size, Size::PREVIEW);
    }

    #[test]
    fn test_style_operations_leave_error_correction_alone() {
        let mut session = Session::new();
        session.apply_preset(Preset::Marriage);
        session.set_dot_color("#111111".parse().unwrap());
        session.set_corner_shape(CornerShape::Dot);
        session.set_background_color("tomato".parse().unwrap());
        assert_eq!(session.options().error_correction(), EcLevel::H);
    }

    #[test]
    fn test_resize_logo_through_session() {
        let mut session = Session::new();
        session.resize_logo(0.5);
        assert_eq!(session.options().logo_sizing.relative_size, 0.3);

        session.set_logo(DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4)));
        session.resize_logo(0.5);
        assert_eq!(session.options().logo_sizing.relative_size, 0.5);
    }
}
