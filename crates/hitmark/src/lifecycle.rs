//! Per-frame marker lifecycle: advance, fade, expire, draw, sweep.
//!
//! One pass per displayed frame, on the render thread:
//!
//! ```text
//! drain inbox ─> for each marker ─┬─ expired? ─> flag
//!                                 └─ draw ring / tick / labels
//!             ─> sweep flagged
//! ```

use hitmark_core::{MarkerSink, MarkerStore};
use hitmark_shared::{Vec2, Viewport};
use hitmark_ui::DrawSurface;

use crate::config::HitsConfig;
use crate::marker::{display_amount, fade_alpha, ring_radius, HitMarker, MarkerPhase};
use crate::projection::{Camera, ScreenProjector};

/// Ring stroke width in pixels.
pub const RING_STROKE_WIDTH: f32 = 2.98;
/// Segments used to approximate the ring.
pub const RING_SEGMENTS: u32 = 32;
/// Distance of the outer tick ends from the screen center, per axis.
pub const TICK_DISTANCE: f32 = 32.0;
/// Tick stroke thickness in pixels.
pub const TICK_THICKNESS: f32 = 4.0;
/// Vertical gap between the hit point and the labels.
pub const LABEL_OFFSET: f32 = 10.0;

/// Everything a pass needs from the host for one frame.
pub struct FrameInput<'a, C: ?Sized> {
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Active camera; `None` skips the pass.
    pub camera: Option<&'a C>,
    /// Surface size.
    pub viewport: Viewport,
}

impl<'a, C: ?Sized> FrameInput<'a, C> {
    /// Frame with an active camera.
    #[must_use]
    pub fn new(delta_time: f32, camera: &'a C, viewport: Viewport) -> Self {
        Self { delta_time, camera: Some(camera), viewport }
    }

    /// Frame without a camera (menus, loading screens).
    #[must_use]
    pub fn without_camera(delta_time: f32, viewport: Viewport) -> Self {
        Self { delta_time, camera: None, viewport }
    }
}

/// What one pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Markers visited.
    pub processed: usize,
    /// Markers that issued draw calls.
    pub rendered: usize,
    /// Markers flagged for deletion.
    pub expired: usize,
    /// Markers removed by the sweep.
    pub swept: usize,
    /// True if the pass did not run.
    pub skipped: bool,
}

impl PassStats {
    fn skipped() -> Self {
        Self { skipped: true, ..Self::default() }
    }
}

/// Owns the marker store and drives it once per frame.
pub struct MarkerLifecycleEngine {
    store: MarkerStore<HitMarker>,
}

impl MarkerLifecycleEngine {
    /// Creates an engine whose inbox buffers `inbox_capacity` markers between passes.
    #[must_use]
    pub fn new(inbox_capacity: usize) -> Self {
        Self { store: MarkerStore::new(inbox_capacity) }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MarkerStore<HitMarker> {
        &self.store
    }

    /// Producer handle for the capture path.
    #[must_use]
    pub fn sink(&self) -> MarkerSink<HitMarker> {
        self.store.sink()
    }

    /// Runs one lifecycle pass.
    ///
    /// Without a camera nothing happens: markers keep their age and stay put.
    /// Flagged markers are removed only after every marker was visited.
    pub fn run_pass<C, S>(&self, config: &HitsConfig, frame: &FrameInput<'_, C>, surface: &mut S) -> PassStats
    where
        C: Camera + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let Some(camera) = frame.camera else {
            tracing::debug!("no active camera, hit marker pass skipped");
            return PassStats::skipped();
        };

        let mut pass = self.store.snapshot_for_iteration();
        if pass.is_empty() {
            return PassStats::default();
        }

        let projector = ScreenProjector::new(frame.viewport);
        let mut stats = PassStats { processed: pass.len(), ..PassStats::default() };

        for marker in pass.iter_mut() {
            marker.advance(frame.delta_time);

            let phase = marker.phase(config.display_time, config.fade_out_time);
            if phase == MarkerPhase::Expired {
                marker.mark_for_deletion();
                stats.expired += 1;
                continue;
            }

            draw_marker(marker, phase, config, camera, &projector, surface);
            stats.rendered += 1;
        }

        stats.swept = pass.sweep_remove(HitMarker::is_pending_deletion);
        tracing::trace!(?stats, "hit marker pass");
        stats
    }
}

fn draw_marker<C, S>(
    marker: &HitMarker,
    phase: MarkerPhase,
    config: &HitsConfig,
    camera: &C,
    projector: &ScreenProjector,
    surface: &mut S,
) where
    C: Camera + ?Sized,
    S: DrawSurface + ?Sized,
{
    let elapsed = marker.elapsed_time();
    let payload = marker.payload();
    let alpha = match phase {
        MarkerPhase::Fading => fade_alpha(elapsed, config.display_time, config.fade_out_time),
        MarkerPhase::Active | MarkerPhase::Expired => 1.0,
    };
    let armor = display_amount(payload.armor_damage);
    let health = display_amount(payload.damage);
    let hit = projector
        .world_to_screen_scaled(camera, payload.hit_point, config.scale_x, config.scale_y)
        .xy();

    if config.show_hit_marker {
        surface.draw_circle(
            hit,
            ring_radius(elapsed),
            config.hit_marker_color.with_alpha(alpha),
            RING_STROKE_WIDTH,
            RING_SEGMENTS,
        );
    }

    if config.show_cross_tick_marker {
        // Past its own window the tick is fully transparent.
        let tick_alpha = fade_alpha(elapsed, config.tick_display_time, config.tick_fade_time).max(0.0);
        draw_cross_tick(surface, projector.viewport().center(), config.hit_marker_color.with_alpha(tick_alpha));
    }

    let mut offset = 0.0;
    if armor > 0.0 && config.show_armor_damage {
        offset = LABEL_OFFSET;
        surface.draw_string(
            hit.offset(0.0, -offset),
            &format!("{armor}"),
            config.armor_damage_color.with_alpha(alpha),
        );
    }

    if health > 0.0 && config.show_health_damage {
        surface.draw_string(
            hit.offset(0.0, offset),
            &format!("{health}"),
            config.health_damage_color.with_alpha(alpha),
        );
    }
}

/// Four strokes pointing at `center`, leaving it hollow.
fn draw_cross_tick<S: DrawSurface + ?Sized>(surface: &mut S, center: Vec2, color: hitmark_ui::Color) {
    let inner = TICK_DISTANCE / 2.0;
    for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        surface.draw_line(
            center.offset(sx * TICK_DISTANCE, sy * TICK_DISTANCE),
            center.offset(sx * inner, sy * inner),
            TICK_THICKNESS,
            color,
        );
    }
}
