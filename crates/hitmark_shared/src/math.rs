//! Mathematical types shared between the host adapter and the overlay.
//!
//! World space is whatever the host uses. Screen space is in pixels with the
//! origin at the top-left of the display surface.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - world positions, projected screen points (x, y, depth)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Drops the depth component.
    #[must_use]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// 2D Vector - screen positions
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `dx`, `dy`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Size of the display surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Geometric center, using integer halves of the pixel size.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Returns true if `point` lies inside the surface grown by `margin` on every side.
    #[must_use]
    pub fn contains_with_margin(self, point: Vec2, margin: f32) -> bool {
        point.x > -margin
            && point.y > -margin
            && point.x < self.width as f32 + margin
            && point.y < self.height as f32 + margin
    }
}
