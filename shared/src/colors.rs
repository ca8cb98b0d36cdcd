use serde::{Deserialize, Serialize};

/// An opaque sRGB color. All period color schemes are `Rgb` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a CSS hex color (`#rrggbb`).
    pub fn css_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Format as a CSS rgba color with the given alpha.
    pub fn css_rgba(&self, a: f64) -> String {
        format!("rgba({},{},{},{a})", self.r, self.g, self.b)
    }

    /// Brighten by a factor (1.0 = no change, >1.0 = brighter).
    pub fn brighten(&self, factor: f64) -> Rgb {
        Rgb::new(
            ((self.r as f64 * factor).min(255.0)) as u8,
            ((self.g as f64 * factor).min(255.0)) as u8,
            ((self.b as f64 * factor).min(255.0)) as u8,
        )
    }
}
