//! Screen projection and visibility helpers.
//!
//! Hosts project world points with the origin at the bottom-left of the
//! screen; the overlay draws with the origin at the top-left. Everything in
//! here converts between the two.

use hitmark_shared::{Vec3, Viewport};

/// Depth below which a projected point is treated as behind the camera.
pub const MIN_VISIBLE_DEPTH: f32 = 0.01;

/// Pixels a projected point may sit outside the surface and still count as on screen.
pub const SCREEN_EDGE_MARGIN: f32 = 5.0;

/// A camera the host renders the world through.
pub trait Camera {
    /// Projects a world point to pixels.
    ///
    /// Origin bottom-left, `z` is the distance in front of the camera
    /// (negative behind it).
    fn world_to_screen_point(&self, world: Vec3) -> Vec3;

    /// Camera position in world space.
    fn position(&self) -> Vec3;
}

/// Bitmask of physics layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Layers that block sight lines for overlay visibility checks.
    pub const VISIBILITY: Self = Self::from_layers(&[12, 16, 18, 22, 31]);

    /// Builds a mask from layer indices (0-31).
    #[must_use]
    pub const fn from_layers(layers: &[u8]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < layers.len() {
            bits |= 1 << layers[i];
            i += 1;
        }
        Self(bits)
    }

    /// Returns true if `layer` is part of the mask.
    #[must_use]
    pub const fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

/// Physics query used by [`is_target_visible`].
pub trait LineOfSight {
    /// Identity of whatever a linecast can hit.
    type Target: PartialEq;

    /// Casts a segment from `from` to `to` against `mask` and returns the first hit.
    fn linecast(&self, from: Vec3, to: Vec3, mask: LayerMask) -> Option<Self::Target>;
}

/// Converts host projections into overlay coordinates for one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenProjector {
    viewport: Viewport,
}

impl ScreenProjector {
    /// Creates a projector for a surface of the given size.
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    /// Surface size.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Projects `world` and flips it to a top-left origin.
    #[must_use]
    pub fn world_to_screen<C: Camera + ?Sized>(&self, camera: &C, world: Vec3) -> Vec3 {
        let mut point = camera.world_to_screen_point(world);
        point.y = self.viewport.height as f32 - point.y;
        point
    }

    /// Like [`world_to_screen`](Self::world_to_screen), with the horizontal and
    /// vertical host coordinates scaled before the flip.
    #[must_use]
    pub fn world_to_screen_scaled<C: Camera + ?Sized>(
        &self,
        camera: &C,
        world: Vec3,
        scale_x: f32,
        scale_y: f32,
    ) -> Vec3 {
        let mut point = camera.world_to_screen_point(world);
        point.x *= scale_x;
        point.y = self.viewport.height as f32 - point.y * scale_y;
        point
    }

    /// Returns true if a projected point is in front of the camera and on the
    /// surface (with a small margin).
    #[must_use]
    pub fn is_screen_point_visible(&self, point: Vec3) -> bool {
        point.z > MIN_VISIBLE_DEPTH && self.viewport.contains_with_margin(point.xy(), SCREEN_EDGE_MARGIN)
    }
}

/// Returns true if nothing blocks the sight line from the camera to `target`.
///
/// The first linecast hit must be the target itself; no hit at all counts as
/// not visible.
pub fn is_target_visible<C, L>(camera: &C, sight: &L, target: &L::Target, target_position: Vec3) -> bool
where
    C: Camera + ?Sized,
    L: LineOfSight + ?Sized,
{
    sight
        .linecast(camera.position(), target_position, LayerMask::VISIBILITY)
        .is_some_and(|hit| hit == *target)
}

/// Camera defined by a row-major view-projection matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixCamera {
    /// Row-major view-projection matrix; clip = M * [x, y, z, 1].
    pub view_proj: [[f32; 4]; 4],
    /// Camera position.
    pub position: Vec3,
    /// Surface the clip space maps onto.
    pub viewport: Viewport,
}

impl MatrixCamera {
    /// Camera with an explicit matrix.
    #[must_use]
    pub const fn new(view_proj: [[f32; 4]; 4], position: Vec3, viewport: Viewport) -> Self {
        Self { view_proj, position, viewport }
    }

    /// Perspective camera at `position` looking down +Z with +Y up.
    #[must_use]
    pub fn perspective(position: Vec3, fov_y_radians: f32, viewport: Viewport, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let aspect = viewport.width as f32 / viewport.height.max(1) as f32;
        let a = (far + near) / (far - near);
        let b = -2.0 * far * near / (far - near);
        let view_proj = [
            [f / aspect, 0.0, 0.0, -f / aspect * position.x],
            [0.0, f, 0.0, -f * position.y],
            [0.0, 0.0, a, -a * position.z + b],
            [0.0, 0.0, 1.0, -position.z],
        ];
        Self { view_proj, position, viewport }
    }
}

impl Camera for MatrixCamera {
    fn world_to_screen_point(&self, world: Vec3) -> Vec3 {
        let p = [world.x, world.y, world.z, 1.0];
        let row = |r: [f32; 4]| r[0] * p[0] + r[1] * p[1] + r[2] * p[2] + r[3] * p[3];
        let clip_x = row(self.view_proj[0]);
        let clip_y = row(self.view_proj[1]);
        let mut w = row(self.view_proj[3]);
        if w.abs() < f32::EPSILON {
            w = f32::EPSILON.copysign(w);
        }

        let ndc_x = clip_x / w;
        let ndc_y = clip_y / w;
        Vec3::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.width as f32,
            (ndc_y + 1.0) * 0.5 * self.viewport.height as f32,
            w,
        )
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
