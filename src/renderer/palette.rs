//! Colors for game elements

use serde::{Deserialize, Serialize};

/// Amount of lightness removed per unit of `darken`
const DARKEN_STEP: f32 = 0.18;

/// Linear RGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Blend toward `other` by `t` (0 = self, 1 = other)
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = crate::clamp(0.0, t, 1.0);
        Color {
            r: crate::lerp(self.r, other.r, t),
            g: crate::lerp(self.g, other.g, t),
            b: crate::lerp(self.b, other.b, t),
        }
    }

    /// Darken by `amount` steps; negative amounts brighten
    pub fn darken(self, amount: f32) -> Color {
        let factor = 1.0 - DARKEN_STEP * amount;
        Color {
            r: crate::clamp(0.0, self.r * factor, 1.0),
            g: crate::clamp(0.0, self.g * factor, 1.0),
            b: crate::clamp(0.0, self.b * factor, 1.0),
        }
    }

    pub fn brighten(self, amount: f32) -> Color {
        self.darken(-amount)
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

pub const CYAN: Color = Color::from_hex(0x00ffff);
pub const WHITE: Color = Color::from_hex(0xffffff);
pub const GREY: Color = Color::from_hex(0xaaaaaa);
pub const PINK: Color = Color::from_hex(0xed4c9a);
pub const PURPLE: Color = Color::from_hex(0x800080);
pub const GREEN: Color = Color::from_hex(0x00ff00);
pub const RED: Color = Color::from_hex(0xff0000);
