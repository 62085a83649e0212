//! Colors for overlay elements.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Default hit-marker orange.
    pub const HIT_MARKER: Self = Self::rgba(225.0 / 255.0, 66.0 / 255.0, 33.0 / 255.0, 1.0);
    /// Default armor-damage blue.
    pub const ARMOR_DAMAGE: Self = Self::rgba(0.0, 126.0 / 255.0, 1.0, 1.0);
    /// Default health-damage red.
    pub const HEALTH_DAMAGE: Self = Self::rgba(1.0, 33.0 / 255.0, 33.0 / 255.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
