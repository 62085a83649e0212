//! Hit markers and their timing curves.
//!
//! ```text
//!  alpha
//!  1.0 ┤━━━━━━━━━━━━━━━┓
//!      │    Active      ┃╲  Fading
//!      │                ┃  ╲
//!  0.0 ┤                ┃    ╲ ─ ─ Expired
//!      └────────────────┸─────┸────────> elapsed
//!                 display   display + fade
//! ```

use std::sync::Weak;

use hitmark_core::MarkerId;
use hitmark_shared::{BodyPart, DamageApplied, Vec3, Weapon};

/// Ring radius at the moment of the hit, in pixels.
pub const RING_BASE_RADIUS: f32 = 16.0;
/// Ring growth in pixels per second of marker age.
pub const RING_GROWTH_PER_SEC: f32 = 2.0;

/// Lifecycle phase of a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerPhase {
    /// Fully opaque.
    Active,
    /// Fading out linearly.
    Fading,
    /// Weapon gone or time budget spent; removed at the end of the pass.
    Expired,
}

/// Opacity for a marker of age `elapsed`.
///
/// 1.0 through the display window, then a linear ramp to 0.0 across the fade
/// window. A non-positive fade keeps the marker opaque until it expires.
#[inline]
#[must_use]
pub fn fade_alpha(elapsed: f32, display_time: f32, fade_time: f32) -> f32 {
    if elapsed > display_time && fade_time > 0.0 {
        (fade_time - (elapsed - display_time)) / fade_time
    } else {
        1.0
    }
}

/// Ring radius for a marker of age `elapsed`.
#[inline]
#[must_use]
pub fn ring_radius(elapsed: f32) -> f32 {
    RING_BASE_RADIUS + RING_GROWTH_PER_SEC * elapsed
}

/// Rounds a damage amount for display, ties to even like the host does.
#[inline]
#[must_use]
pub fn display_amount(amount: f32) -> f32 {
    amount.round_ties_even()
}

/// Damage details copied at capture time.
#[derive(Clone, Debug)]
pub struct DamagePayload {
    /// Weapon used; dangles once the host drops the weapon.
    pub weapon: Weak<Weapon>,
    /// Damage absorbed by armor.
    pub armor_damage: f32,
    /// Damage applied to health.
    pub damage: f32,
    /// World-space impact point.
    pub hit_point: Vec3,
    /// Struck body part.
    pub body_part: BodyPart,
}

impl DamagePayload {
    /// Copies the relevant parts of a damage event.
    #[must_use]
    pub fn snapshot(event: &DamageApplied<'_>) -> Self {
        Self {
            weapon: event.info.weapon.clone(),
            armor_damage: event.info.armor_damage,
            damage: event.info.damage,
            hit_point: event.info.hit_point,
            body_part: event.body_part,
        }
    }

    /// Returns true while the weapon reference is valid.
    #[must_use]
    pub fn has_weapon(&self) -> bool {
        self.weapon.strong_count() > 0
    }
}

/// One recorded hit awaiting display.
///
/// Markers have identity: two markers with equal payloads are still distinct,
/// so there is deliberately no `PartialEq`.
#[derive(Debug)]
pub struct HitMarker {
    id: MarkerId,
    elapsed_time: f32,
    payload: DamagePayload,
    pending_deletion: bool,
}

impl HitMarker {
    /// Creates a fresh marker at age zero.
    #[must_use]
    pub fn new(payload: DamagePayload) -> Self {
        Self {
            id: MarkerId::next(),
            elapsed_time: 0.0,
            payload,
            pending_deletion: false,
        }
    }

    /// Marker identity.
    #[must_use]
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Seconds this marker has been displayed.
    #[must_use]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Captured damage.
    #[must_use]
    pub fn payload(&self) -> &DamagePayload {
        &self.payload
    }

    /// True once a pass has flagged this marker for removal.
    #[must_use]
    pub fn is_pending_deletion(&self) -> bool {
        self.pending_deletion
    }

    /// Phase for the given windows.
    #[must_use]
    pub fn phase(&self, display_time: f32, fade_time: f32) -> MarkerPhase {
        if !self.payload.has_weapon() || self.elapsed_time >= display_time + fade_time {
            MarkerPhase::Expired
        } else if self.elapsed_time <= display_time || fade_time <= 0.0 {
            MarkerPhase::Active
        } else {
            MarkerPhase::Fading
        }
    }

    pub(crate) fn advance(&mut self, delta_time: f32) {
        self.elapsed_time += delta_time;
    }

    pub(crate) fn mark_for_deletion(&mut self) {
        self.pending_deletion = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use hitmark_shared::{DamageInfo, PlayerRef};

    fn payload(weapon: &Arc<Weapon>) -> DamagePayload {
        DamagePayload {
            weapon: Arc::downgrade(weapon),
            armor_damage: 0.0,
            damage: 10.0,
            hit_point: Vec3::ZERO,
            body_part: BodyPart::Chest,
        }
    }

    #[test]
    fn test_alpha_is_opaque_through_display_window() {
        for i in 0..=20 {
            let elapsed = i as f32 * 0.1;
            assert_eq!(fade_alpha(elapsed, 2.0, 1.0), 1.0, "elapsed {elapsed}");
        }
    }

    #[test]
    fn test_alpha_fades_linearly() {
        assert!((fade_alpha(2.5, 2.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((fade_alpha(2.25, 2.0, 1.0) - 0.75).abs() < 1e-6);

        let near_start = fade_alpha(2.0 + 1e-4, 2.0, 1.0);
        let near_end = fade_alpha(3.0 - 1e-4, 2.0, 1.0);
        assert!(near_start > 0.999 && near_start < 1.0);
        assert!(near_end > 0.0 && near_end < 0.001);

        let mut previous = 1.0;
        for i in 1..100 {
            let alpha = fade_alpha(2.0 + i as f32 * 0.01, 2.0, 1.0);
            assert!(alpha < previous);
            previous = alpha;
        }
    }

    #[test]
    fn test_alpha_without_fade_window() {
        assert_eq!(fade_alpha(5.0, 2.0, 0.0), 1.0);
        assert_eq!(fade_alpha(5.0, 2.0, -1.0), 1.0);
    }

    #[test]
    fn test_ring_radius_grows() {
        assert_eq!(ring_radius(0.0), 16.0);
        assert_eq!(ring_radius(1.5), 19.0);
        assert!(ring_radius(0.2) < ring_radius(0.3));
    }

    #[test]
    fn test_display_amount_rounding() {
        assert_eq!(display_amount(29.6), 30.0);
        assert_eq!(display_amount(0.4), 0.0);
        assert_eq!(display_amount(2.5), 2.0);
        assert_eq!(display_amount(3.5), 4.0);
        assert_eq!(format!("{}", display_amount(45.2)), "45");
    }

    #[test]
    fn test_markers_have_identity() {
        let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
        let a = HitMarker::new(payload(&weapon));
        let b = HitMarker::new(payload(&weapon));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_phases() {
        let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
        let mut marker = HitMarker::new(payload(&weapon));
        assert_eq!(marker.phase(2.0, 1.0), MarkerPhase::Active);

        marker.advance(2.5);
        assert_eq!(marker.phase(2.0, 1.0), MarkerPhase::Fading);
        assert_eq!(marker.phase(2.0, 0.0), MarkerPhase::Expired);
        assert_eq!(marker.phase(2.0, -1.0), MarkerPhase::Expired);
        assert_eq!(marker.phase(3.0, 0.0), MarkerPhase::Active);

        marker.advance(0.5);
        assert_eq!(marker.phase(2.0, 1.0), MarkerPhase::Expired);
    }

    #[test]
    fn test_dropped_weapon_expires() {
        let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
        let marker = HitMarker::new(payload(&weapon));
        drop(weapon);
        assert!(!marker.payload().has_weapon());
        assert_eq!(marker.phase(2.0, 1.0), MarkerPhase::Expired);
    }

    #[test]
    fn test_snapshot_copies_event() {
        let weapon = Arc::new(Weapon { id: 4, name: "SVD".into() });
        let info = DamageInfo::new(Some(PlayerRef::local(1)), Some(&weapon), 12.0, 48.0, Vec3::new(1.0, 2.0, 3.0));
        let event = DamageApplied {
            body_part: BodyPart::Head,
            damage: 48.0,
            info: &info,
            victim: Some(PlayerRef::remote(2)),
        };

        let payload = DamagePayload::snapshot(&event);
        assert_eq!(payload.armor_damage, 12.0);
        assert_eq!(payload.damage, 48.0);
        assert_eq!(payload.hit_point, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(payload.body_part, BodyPart::Head);
        assert_eq!(payload.weapon.upgrade().map(|w| w.id), Some(4));
    }
}
