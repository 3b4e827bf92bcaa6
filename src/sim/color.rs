//! RGBA colors for entity tinting and frame description

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Copy with alpha scaled by `alpha` (0..=1)
    pub fn fade(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)) as u8;
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const MAROON: Color = Color::rgb(190, 33, 55);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const SKYBLUE: Color = Color::rgb(102, 191, 255);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const DARKORANGE: Color = Color::rgb(255, 140, 0);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const DARKGRAY: Color = Color::rgb(80, 80, 80);
    pub const LIGHTGRAY: Color = Color::rgb(200, 200, 200);
}
