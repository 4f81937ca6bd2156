use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::logo;
use crate::options::OutputFormat;
use crate::session::Session;
use crate::style::{CornerShape, DotShape, Preset};
use crate::tool::Output;

/// Styling flags shared by every content subcommand. Applied in a fixed
/// order: preset first (a full overwrite), then individual overrides,
/// then the logo.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Apply a named style preset before any individual overrides
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Data module color, any CSS color syntax
    #[arg(long)]
    dot_color: Option<String>,

    /// Background color, any CSS color syntax
    #[arg(long)]
    background_color: Option<String>,

    /// Finder pattern color, any CSS color syntax
    #[arg(long)]
    corner_color: Option<String>,

    /// Data module shape
    #[arg(long, value_enum)]
    dot_shape: Option<DotShape>,

    /// Finder pattern ring shape
    #[arg(long, value_enum)]
    corner_shape: Option<CornerShape>,

    /// Image file to place in the center of the code
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo size as a fraction of the canvas, within (0, 1]
    #[arg(long)]
    logo_scale: Option<f32>,
}

impl DesignArgs {
    pub fn apply(&self, session: &mut Session) -> anyhow::Result<()> {
        if let Some(preset) = self.preset {
            session.apply_preset(preset);
        }
        if let Some(color) = &self.dot_color {
            session.set_dot_color(color.parse().context("Could not parse dot color")?);
        }
        if let Some(color) = &self.background_color {
            session.set_background_color(
                color.parse().context("Could not parse background color")?,
            );
        }
        if let Some(color) = &self.corner_color {
            session.set_corner_color(color.parse().context("Could not parse corner color")?);
        }
        if let Some(shape) = self.dot_shape {
            session.set_dot_shape(shape);
        }
        if let Some(shape) = self.corner_shape {
            session.set_corner_shape(shape);
        }
        if let Some(path) = &self.logo {
            // An unreadable logo file leaves the design logo-free.
            match logo::load(path) {
                Some(image) => session.set_logo(image),
                None => session.remove_logo(),
            }
        }
        if let Some(scale) = self.logo_scale {
            anyhow::ensure!(
                scale > 0.0 && scale <= 1.0,
                "Logo scale must be within (0, 1]"
            );
            session.resize_logo(scale);
        }
        Ok(())
    }
}

/// Output flags shared by every content subcommand.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Write the image to this file ("-" for stdout); omit to print a
    /// terminal preview instead
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format, inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl OutputArgs {
    pub fn finish(&self, session: &mut Session) -> anyhow::Result<Option<Output>> {
        let Some(path) = &self.output else {
            return Ok(Some(Output::Text(session.preview()?)));
        };

        if path == Path::new("-") {
            let format = self
                .format
                .context("A --format is required when writing to stdout")?;
            let bytes = session.export(format).context("Could not export image")?;
            return Ok(Some(Output::Bytes(bytes)));
        }

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_path(path)
                .context("Could not infer the image format from the output path")?,
        };
        let bytes = session.export(format).context("Could not export image")?;
        fs::write(path, bytes).context("Could not write image file")?;
        Ok(None)
    }
}
