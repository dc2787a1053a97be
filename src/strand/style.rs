//! Fill and stroke appearance of a strand

use crate::io::configuration::DEFAULT_STROKE_WIDTH;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the default stroke
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Create a color with full alpha
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert hue, lightness and saturation (each in `[0, 1]`) to an opaque color
    pub fn from_hls(hue: f64, lightness: f64, saturation: f64) -> Self {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;

        if saturation <= 0.0 {
            let grey = channel(lightness);
            return Self::opaque(grey, grey, grey);
        }

        let m2 = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness.mul_add(-saturation, lightness + saturation)
        };
        let m1 = 2.0f64.mul_add(lightness, -m2);

        Self::opaque(
            channel(hue_component(m1, m2, hue + 1.0 / 3.0)),
            channel(hue_component(m1, m2, hue)),
            channel(hue_component(m1, m2, hue - 1.0 / 3.0)),
        )
    }
}

fn hue_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        ((m2 - m1) * hue).mul_add(6.0, m1)
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        ((m2 - m1) * (2.0 / 3.0 - hue)).mul_add(6.0, m1)
    } else {
        m1
    }
}

/// Colors and border thickness used when a strand is drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrandStyle {
    /// Interior fill
    pub color: Rgba,
    /// Border color
    pub stroke_color: Rgba,
    /// Border thickness on each side of the ribbon
    pub stroke_width: f64,
}

impl StrandStyle {
    /// Style with the given fill and the default black border
    pub const fn with_color(color: Rgba) -> Self {
        Self {
            color,
            stroke_color: Rgba::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl Default for StrandStyle {
    fn default() -> Self {
        Self::with_color(Rgba::opaque(200, 170, 230))
    }
}
