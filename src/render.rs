use std::io::Cursor;

use anyhow::{Context, Result};
use base64::Engine;
use csscolorparser::Color;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::QrCode;

use crate::options::{OutputFormat, QrOptions};
use crate::style::{CornerDotShape, CornerShape, DotShape, StyleOptions};

/// Quiet zone width in modules on each side of the symbol.
const QUIET_ZONE: u32 = 4;

/// Render the QR code as text for the terminal.
pub fn preview(options: &QrOptions) -> Result<String> {
    let code = encode_symbol(options)?;
    Ok(code
        .render::<char>()
        .quiet_zone(false)
        .module_dimensions(2, 1)
        .build())
}

/// Render the QR code into the requested image format at the options'
/// current size.
pub fn export(options: &QrOptions, format: OutputFormat) -> Result<Vec<u8>> {
    let code = encode_symbol(options)?;
    let matrix = Matrix::from_code(&code);

    match format {
        OutputFormat::Svg => Ok(svg_document(options, &matrix)?.into_bytes()),
        OutputFormat::Png => encode_raster(rasterize(options, &matrix), ImageFormat::Png),
        OutputFormat::Webp => encode_raster(rasterize(options, &matrix), ImageFormat::WebP),
        OutputFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb = DynamicImage::ImageRgba8(rasterize(options, &matrix)).to_rgb8();
            let mut buffer = Cursor::new(Vec::new());
            DynamicImage::ImageRgb8(rgb)
                .write_to(&mut buffer, ImageFormat::Jpeg)
                .context("Could not encode JPEG image")?;
            Ok(buffer.into_inner())
        }
    }
}

fn encode_symbol(options: &QrOptions) -> Result<QrCode> {
    QrCode::with_error_correction_level(options.payload.as_bytes(), options.error_correction())
        .context("Could not encode payload into a QR symbol")
}

fn encode_raster(canvas: RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut buffer, format)
        .context("Could not encode image")?;
    Ok(buffer.into_inner())
}

/// The symbol's module grid, with finder-pattern geometry helpers.
struct Matrix {
    modules: u32,
    dark: Vec<bool>,
}

impl Matrix {
    fn from_code(code: &QrCode) -> Matrix {
        let modules = code.width() as u32;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|module| module == qrcode::Color::Dark)
            .collect();
        Matrix { modules, dark }
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.dark[(y * self.modules + x) as usize]
    }

    // The three 7x7 finder patterns sit in the corners of the symbol.
    fn in_finder(&self, x: u32, y: u32) -> bool {
        let m = self.modules;
        (x < 7 && y < 7) || (x >= m - 7 && y < 7) || (x < 7 && y >= m - 7)
    }

    fn finders(&self) -> [(u32, u32); 3] {
        let m = self.modules;
        [(0, 0), (m - 7, 0), (0, m - 7)]
    }
}

fn rasterize(options: &QrOptions, matrix: &Matrix) -> RgbaImage {
    let width = options.size.width;
    let height = options.size.height;
    let total = matrix.modules + 2 * QUIET_ZONE;
    let scale = (width.min(height) / total).max(1);
    let used = scale * total;

    // Top-left pixel of module (0, 0). A canvas smaller than the symbol
    // gets a clipped render rather than a failure.
    let origin_x = (width as i64 - used as i64) / 2 + (QUIET_ZONE * scale) as i64;
    let origin_y = (height as i64 - used as i64) / 2 + (QUIET_ZONE * scale) as i64;

    let style = &options.style;
    let background = rgba(&style.background_color);
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let dot = rgba(&style.dot_color);
    let half = scale as f32 / 2.0;
    for y in 0..matrix.modules {
        for x in 0..matrix.modules {
            if matrix.in_finder(x, y) || !matrix.is_dark(x, y) {
                continue;
            }
            let px = origin_x + (x * scale) as i64;
            let py = origin_y + (y * scale) as i64;
            match style.dot_shape {
                DotShape::Dots => fill_circle(
                    &mut canvas,
                    px as f32 + half,
                    py as f32 + half,
                    half,
                    dot,
                ),
                DotShape::Square => fill_rect(&mut canvas, px, py, scale, scale, dot),
                // The rounded family renders as a lightly rounded square.
                _ => fill_rounded_rect(
                    &mut canvas,
                    px,
                    py,
                    scale,
                    scale,
                    scale as f32 / 4.0,
                    dot,
                ),
            }
        }
    }

    for (fx, fy) in matrix.finders() {
        draw_finder(
            &mut canvas,
            style,
            origin_x + (fx * scale) as i64,
            origin_y + (fy * scale) as i64,
            scale,
            background,
        );
    }

    if let Some(logo) = &options.logo {
        overlay_logo(&mut canvas, logo, options);
    }

    canvas
}

/// Draw one finder pattern: a 7-module ring in the corner-square style
/// and a 3-module center in the corner-dot style.
fn draw_finder(
    canvas: &mut RgbaImage,
    style: &StyleOptions,
    x: i64,
    y: i64,
    scale: u32,
    background: Rgba<u8>,
) {
    let ring = rgba(&style.corner_square_color);
    let center = rgba(&style.corner_dot_color);
    let s = scale as f32;
    let cx = x as f32 + 3.5 * s;
    let cy = y as f32 + 3.5 * s;

    match style.corner_square_shape {
        CornerShape::Square => {
            fill_rect(canvas, x, y, 7 * scale, 7 * scale, ring);
            fill_rect(
                canvas,
                x + scale as i64,
                y + scale as i64,
                5 * scale,
                5 * scale,
                background,
            );
        }
        CornerShape::ExtraRounded => {
            fill_rounded_rect(canvas, x, y, 7 * scale, 7 * scale, 2.0 * s, ring);
            fill_rounded_rect(
                canvas,
                x + scale as i64,
                y + scale as i64,
                5 * scale,
                5 * scale,
                1.5 * s,
                background,
            );
        }
        CornerShape::Dot => {
            fill_circle(canvas, cx, cy, 3.5 * s, ring);
            fill_circle(canvas, cx, cy, 2.5 * s, background);
        }
    }

    match style.corner_dot_shape {
        CornerDotShape::Square => fill_rect(
            canvas,
            x + 2 * scale as i64,
            y + 2 * scale as i64,
            3 * scale,
            3 * scale,
            center,
        ),
        CornerDotShape::Dot => fill_circle(canvas, cx, cy, 1.5 * s, center),
    }
}

fn overlay_logo(canvas: &mut RgbaImage, logo: &DynamicImage, options: &QrOptions) {
    let width = canvas.width();
    let height = canvas.height();
    let sizing = options.logo_sizing;
    let target = (width.min(height) as f32 * sizing.relative_size) as u32;
    if target == 0 {
        return;
    }

    // resize keeps the aspect ratio, fitting within target x target.
    let scaled = logo.resize(target, target, FilterType::Triangle).to_rgba8();
    let (logo_width, logo_height) = scaled.dimensions();
    let x = (width as i64 - logo_width as i64) / 2;
    let y = (height as i64 - logo_height as i64) / 2;

    let margin = sizing.margin_px;
    let background = rgba(&options.style.background_color);
    fill_rect(
        canvas,
        x - margin as i64,
        y - margin as i64,
        logo_width + 2 * margin,
        logo_height + 2 * margin,
        background,
    );
    image::imageops::overlay(canvas, &scaled, x, y);
}

fn rgba(color: &Color) -> Rgba<u8> {
    Rgba(color.to_rgba8())
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
    for dy in 0..height as i64 {
        for dx in 0..width as i64 {
            put(canvas, x + dx, y + dy, color);
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let x0 = (cx - radius).floor() as i64;
    let x1 = (cx + radius).ceil() as i64;
    let y0 = (cy - radius).floor() as i64;
    let y1 = (cy + radius).ceil() as i64;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                put(canvas, x, y, color);
            }
        }
    }
}

fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    radius: f32,
    color: Rgba<u8>,
) {
    let radius = radius.min(width.min(height) as f32 / 2.0);
    for dy in 0..height as i64 {
        for dx in 0..width as i64 {
            let fx = dx as f32 + 0.5;
            let fy = dy as f32 + 0.5;

            // The distance test only applies inside the corner squares.
            let corner_x = if fx < radius {
                Some(radius)
            } else if fx > width as f32 - radius {
                Some(width as f32 - radius)
            } else {
                None
            };
            let corner_y = if fy < radius {
                Some(radius)
            } else if fy > height as f32 - radius {
                Some(height as f32 - radius)
            } else {
                None
            };
            if let (Some(corner_cx), Some(corner_cy)) = (corner_x, corner_y) {
                let ddx = fx - corner_cx;
                let ddy = fy - corner_cy;
                if ddx * ddx + ddy * ddy > radius * radius {
                    continue;
                }
            }

            put(canvas, x + dx, y + dy, color);
        }
    }
}

fn svg_document(options: &QrOptions, matrix: &Matrix) -> Result<String> {
    let style = &options.style;
    let total = matrix.modules + 2 * QUIET_ZONE;
    let dot = style.dot_color.to_css_hex();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        options.size.width, options.size.height, total, total,
    );
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        total,
        total,
        style.background_color.to_css_hex(),
    ));
    svg.push('\n');

    for y in 0..matrix.modules {
        for x in 0..matrix.modules {
            if matrix.in_finder(x, y) || !matrix.is_dark(x, y) {
                continue;
            }
            let mx = x + QUIET_ZONE;
            let my = y + QUIET_ZONE;
            match style.dot_shape {
                DotShape::Dots => svg.push_str(&format!(
                    r#"<circle cx="{}.5" cy="{}.5" r="0.5" fill="{}"/>"#,
                    mx, my, dot,
                )),
                DotShape::Square => svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="1" height="1" fill="{}"/>"#,
                    mx, my, dot,
                )),
                _ => svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="1" height="1" rx="0.25" fill="{}"/>"#,
                    mx, my, dot,
                )),
            }
            svg.push('\n');
        }
    }

    for (fx, fy) in matrix.finders() {
        finder_svg(&mut svg, style, fx + QUIET_ZONE, fy + QUIET_ZONE);
    }

    if let Some(logo) = &options.logo {
        logo_svg(&mut svg, logo, options, total)?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn finder_svg(svg: &mut String, style: &StyleOptions, x: u32, y: u32) {
    let ring = style.corner_square_color.to_css_hex();
    let background = style.background_color.to_css_hex();
    let center = style.corner_dot_color.to_css_hex();
    let cx = x as f32 + 3.5;
    let cy = y as f32 + 3.5;

    match style.corner_square_shape {
        CornerShape::Square => {
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="7" height="7" fill="{ring}"/>"#
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="5" height="5" fill="{background}"/>"#,
                x + 1,
                y + 1,
            ));
        }
        CornerShape::ExtraRounded => {
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="7" height="7" rx="2" fill="{ring}"/>"#
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="5" height="5" rx="1.5" fill="{background}"/>"#,
                x + 1,
                y + 1,
            ));
        }
        CornerShape::Dot => {
            svg.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="3.5" fill="{ring}"/>"#
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="2.5" fill="{background}"/>"#
            ));
        }
    }
    svg.push('\n');

    match style.corner_dot_shape {
        CornerDotShape::Square => svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="3" height="3" fill="{center}"/>"#,
            x + 2,
            y + 2,
        )),
        CornerDotShape::Dot => svg.push_str(&format!(
            r#"<circle cx="{cx}" cy="{cy}" r="1.5" fill="{center}"/>"#
        )),
    }
    svg.push('\n');
}

fn logo_svg(
    svg: &mut String,
    logo: &DynamicImage,
    options: &QrOptions,
    total: u32,
) -> Result<()> {
    let sizing = options.logo_sizing;
    let side = total as f32 * sizing.relative_size;
    let offset = (total as f32 - side) / 2.0;

    // margin_px is in canvas pixels; the viewBox is in module units.
    let module_px = options.size.width.min(options.size.height) as f32 / total as f32;
    let margin = if module_px > 0.0 {
        sizing.margin_px as f32 / module_px
    } else {
        0.0
    };

    let mut png = Cursor::new(Vec::new());
    logo.write_to(&mut png, ImageFormat::Png)
        .context("Could not embed logo into SVG")?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(png.into_inner());

    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        offset - margin,
        offset - margin,
        side + 2.0 * margin,
        side + 2.0 * margin,
        options.style.background_color.to_css_hex(),
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<image x="{offset}" y="{offset}" width="{side}" height="{side}" href="data:image/png;base64,{encoded}"/>"#,
    ));
    svg.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Preset;

    #[test]
    fn test_png_export_has_magic_bytes() {
        let options = QrOptions::new();
        let bytes = export(&options, OutputFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_jpeg_and_webp_exports_are_non_empty() {
        let options = QrOptions::new();
        assert!(!export(&options, OutputFormat::Jpeg).unwrap().is_empty());
        assert!(!export(&options, OutputFormat::Webp).unwrap().is_empty());
    }

    #[test]
    fn test_svg_export_carries_the_styled_colors() {
        let mut options = QrOptions::new();
        options.style.apply_preset(Preset::Birthday);
        let svg = String::from_utf8(export(&options, OutputFormat::Svg).unwrap()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("#ec4899"));
        assert!(svg.contains("#f59e0b"));
        assert!(svg.contains("#fffbeb"));
        // Birthday draws round data modules.
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_svg_embeds_the_logo() {
        let mut options = QrOptions::new();
        options.logo = Some(DynamicImage::ImageRgba8(RgbaImage::new(8, 8)));
        let svg = String::from_utf8(export(&options, OutputFormat::Svg).unwrap()).unwrap();
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_overlong_payload_is_an_error() {
        let mut options = QrOptions::new();
        options.payload = "x".repeat(4000);
        assert!(export(&options, OutputFormat::Png).is_err());
    }

    #[test]
    fn test_tiny_canvas_clips_instead_of_panicking() {
        let mut options = QrOptions::new();
        options.size = crate::options::Size {
            width: 10,
            height: 10,
        };
        assert!(!export(&options, OutputFormat::Png).unwrap().is_empty());
    }

    #[test]
    fn test_preview_renders_text() {
        let options = QrOptions::new();
        let text = preview(&options).unwrap();
        assert!(text.contains('\n'));
        assert!(!text.is_empty());
    }
}
