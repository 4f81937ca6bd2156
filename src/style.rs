use clap::ValueEnum;
use csscolorparser::Color;

/// Shape of the data modules, mirroring the vocabulary of common QR
/// styling libraries. The renderer degrades shapes it cannot express
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotShape {
    Square,
    Dots,
    Rounded,
    Classy,
    ClassyRounded,
    ExtraRounded,
}

impl DotShape {
    pub fn name(self) -> &'static str {
        match self {
            DotShape::Square => "square",
            DotShape::Dots => "dots",
            DotShape::Rounded => "rounded",
            DotShape::Classy => "classy",
            DotShape::ClassyRounded => "classy-rounded",
            DotShape::ExtraRounded => "extra-rounded",
        }
    }
}

/// Shape of the outer ring of the three finder patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CornerShape {
    Square,
    Dot,
    ExtraRounded,
}

impl CornerShape {
    pub fn name(self) -> &'static str {
        match self {
            CornerShape::Square => "square",
            CornerShape::Dot => "dot",
            CornerShape::ExtraRounded => "extra-rounded",
        }
    }
}

/// Shape of the finder pattern center. Never chosen directly; always
/// derived from the corner-square shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerDotShape {
    Square,
    Dot,
}

impl CornerDotShape {
    /// A round corner ring keeps a round center; every other ring shape
    /// snaps the center to a square.
    pub fn from_corner(shape: CornerShape) -> CornerDotShape {
        match shape {
            CornerShape::Dot => CornerDotShape::Dot,
            _ => CornerDotShape::Square,
        }
    }
}

/// The cosmetic half of the options record. The corner-dot fields are
/// kept in lockstep with the corner-square fields by every operation
/// here; mutate through the setters, not the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub dot_color: Color,
    pub dot_shape: DotShape,
    pub background_color: Color,
    pub corner_square_shape: CornerShape,
    pub corner_square_color: Color,
    pub corner_dot_shape: CornerDotShape,
    pub corner_dot_color: Color,
}

impl StyleOptions {
    /// Realize a preset into a full style record. The preset table only
    /// carries one corner color and shape; the corner-dot fields are
    /// derived here.
    pub fn from_preset(preset: Preset) -> StyleOptions {
        let palette = preset.palette();
        StyleOptions {
            dot_color: palette.dot_color.clone(),
            dot_shape: palette.dot_shape,
            background_color: palette.background_color.clone(),
            corner_square_shape: palette.corner_shape,
            corner_square_color: palette.corner_color.clone(),
            corner_dot_shape: CornerDotShape::from_corner(palette.corner_shape),
            corner_dot_color: palette.corner_color.clone(),
        }
    }

    /// Replaces the whole record. Presets never merge with prior state.
    pub fn apply_preset(&mut self, preset: Preset) {
        *self = StyleOptions::from_preset(preset);
    }

    pub fn set_dot_color(&mut self, color: Color) {
        self.dot_color = color;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn set_corner_color(&mut self, color: Color) {
        self.corner_dot_color = color.clone();
        self.corner_square_color = color;
    }

    pub fn set_dot_shape(&mut self, shape: DotShape) {
        self.dot_shape = shape;
    }

    pub fn set_corner_shape(&mut self, shape: CornerShape) {
        self.corner_square_shape = shape;
        self.corner_dot_shape = CornerDotShape::from_corner(shape);
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions::from_preset(Preset::Default)
    }
}

/// A named, fixed bundle of style values. Applying one overwrites every
/// style field at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Default,
    Birthday,
    Marriage,
    Business,
}

/// One row of the preset table.
#[derive(Debug, Clone)]
pub struct Palette {
    pub dot_color: Color,
    pub corner_color: Color,
    pub background_color: Color,
    pub dot_shape: DotShape,
    pub corner_shape: CornerShape,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Default,
        Preset::Birthday,
        Preset::Marriage,
        Preset::Business,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Birthday => "birthday",
            Preset::Marriage => "marriage",
            Preset::Business => "business",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Preset::Default => Palette {
                dot_color: Color::from_rgba8(0, 0, 0, 255),
                corner_color: Color::from_rgba8(0, 0, 0, 255),
                background_color: Color::from_rgba8(255, 255, 255, 255),
                dot_shape: DotShape::Square,
                corner_shape: CornerShape::Square,
            },
            Preset::Birthday => Palette {
                dot_color: Color::from_rgba8(236, 72, 153, 255),
                corner_color: Color::from_rgba8(245, 158, 11, 255),
                background_color: Color::from_rgba8(255, 251, 235, 255),
                dot_shape: DotShape::Dots,
                corner_shape: CornerShape::ExtraRounded,
            },
            Preset::Marriage => Palette {
                dot_color: Color::from_rgba8(190, 24, 93, 255),
                corner_color: Color::from_rgba8(190, 24, 93, 255),
                background_color: Color::from_rgba8(255, 255, 255, 255),
                dot_shape: DotShape::Classy,
                corner_shape: CornerShape::Dot,
            },
            Preset::Business => Palette {
                dot_color: Color::from_rgba8(30, 58, 138, 255),
                corner_color: Color::from_rgba8(30, 58, 138, 255),
                background_color: Color::from_rgba8(243, 244, 246, 255),
                dot_shape: DotShape::Square,
                corner_shape: CornerShape::Square,
            },
        }
    }
}
