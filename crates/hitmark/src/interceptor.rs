//! Damage-event capture.
//!
//! The host exposes one subscription point: an observer attached to the
//! damage routine of a health controller. The observer runs synchronously on
//! whatever thread applies the damage, so it only filters, copies and queues.
//!
//! ```text
//! host ApplyDamage ──> HitObserver::capture ──filter──> MarkerSink::add
//!                                              └─discard (not ours)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hitmark_core::MarkerSink;
use hitmark_shared::{DamageApplied, PlayerRef};
use parking_lot::Mutex;
use thiserror::Error;

use crate::error::HookError;
use crate::marker::{DamagePayload, HitMarker};

/// Side-effect-only callback attached to the host damage routine.
pub trait DamageObserver: Send + Sync {
    /// Called after the host applied damage to any entity.
    fn on_damage_applied(&self, event: &DamageApplied<'_>);
}

/// A health controller resolved at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthControllerRef {
    /// Player owning the controller.
    pub owner: PlayerRef,
    /// Runtime type the damage routine is looked up on.
    pub type_name: String,
}

/// What the host has to offer for capturing damage.
pub trait DamageHooks {
    /// The player controlled by the running user, if currently spawned.
    fn local_player(&self) -> Option<PlayerRef>;

    /// The active health controller of `player`, if any.
    fn active_health_controller(&self, player: &PlayerRef) -> Option<HealthControllerRef>;

    /// Attaches `observer` to the damage routine of `controller`'s runtime type.
    ///
    /// The observer must not change the routine's behavior or return value.
    ///
    /// # Errors
    ///
    /// [`HookError::RoutineNotFound`] if the routine cannot be located,
    /// [`HookError::Rejected`] for any other host refusal.
    fn attach_damage_observer(
        &self,
        controller: &HealthControllerRef,
        observer: Arc<dyn DamageObserver>,
    ) -> Result<(), HookError>;
}

/// Why an install attempt has to be retried later.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeferReason {
    /// No local player yet (menu, loading screen).
    #[error("local player not available")]
    NoLocalPlayer,
    /// The local player has no active health controller.
    #[error("local player has no active health controller")]
    NoHealthController,
    /// The host could not attach the observer.
    #[error(transparent)]
    Hook(#[from] HookError),
}

/// Result of [`EventInterceptor::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The observer was attached by this call.
    Installed,
    /// The observer was already attached; nothing done.
    AlreadyInstalled,
    /// Prerequisites are missing; try again on a later tick.
    Deferred(DeferReason),
}

/// What the observer did with one damage event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// A marker was queued.
    Recorded,
    /// The feature is switched off.
    Disabled,
    /// The victim could not be resolved.
    NoVictim,
    /// The local player took the damage.
    SelfDamage,
    /// The shooter could not be resolved.
    NoShooter,
    /// Someone other than the local player dealt the damage.
    ForeignShooter,
    /// The marker inbox was full or gone.
    Dropped,
}

/// Filters damage events and queues markers for hits dealt by the local player.
pub struct HitObserver {
    enabled: Arc<AtomicBool>,
    sink: MarkerSink<HitMarker>,
}

impl HitObserver {
    /// Creates an observer that honors `enabled` and queues into `sink`.
    #[must_use]
    pub fn new(enabled: Arc<AtomicBool>, sink: MarkerSink<HitMarker>) -> Self {
        Self { enabled, sink }
    }

    /// Applies the capture rules to one event.
    pub fn capture(&self, event: &DamageApplied<'_>) -> Capture {
        if !self.enabled.load(Ordering::Relaxed) {
            return Capture::Disabled;
        }

        match event.victim {
            None => return Capture::NoVictim,
            Some(victim) if victim.is_local => return Capture::SelfDamage,
            Some(_) => {}
        }

        match event.info.shooter {
            None => return Capture::NoShooter,
            Some(shooter) if !shooter.is_local => return Capture::ForeignShooter,
            Some(_) => {}
        }

        let marker = HitMarker::new(DamagePayload::snapshot(event));
        let id = marker.id();
        if self.sink.add(marker) {
            tracing::trace!(%id, body_part = ?event.body_part, damage = event.info.damage, "hit recorded");
            Capture::Recorded
        } else {
            Capture::Dropped
        }
    }
}

impl DamageObserver for HitObserver {
    fn on_damage_applied(&self, event: &DamageApplied<'_>) {
        let capture = self.capture(event);
        if capture != Capture::Recorded {
            tracing::trace!(?capture, "damage event not recorded");
        }
    }
}

/// Attaches a [`HitObserver`] to the host exactly once.
pub struct EventInterceptor {
    observer: Arc<HitObserver>,
    installed: Mutex<bool>,
}

impl EventInterceptor {
    /// Creates an interceptor whose observer honors `enabled` and queues into `sink`.
    #[must_use]
    pub fn new(enabled: Arc<AtomicBool>, sink: MarkerSink<HitMarker>) -> Self {
        Self {
            observer: Arc::new(HitObserver::new(enabled, sink)),
            installed: Mutex::new(false),
        }
    }

    /// The observer handed to the host.
    #[must_use]
    pub fn observer(&self) -> &Arc<HitObserver> {
        &self.observer
    }

    /// Returns true once the observer is attached.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        *self.installed.lock()
    }

    /// Attaches the observer if it is not attached yet.
    ///
    /// Idempotent and never fatal: missing prerequisites come back as
    /// [`InstallOutcome::Deferred`] so the caller retries on a later tick.
    pub fn install<H: DamageHooks + ?Sized>(&self, hooks: &H) -> InstallOutcome {
        let mut installed = self.installed.lock();
        if *installed {
            return InstallOutcome::AlreadyInstalled;
        }

        let Some(player) = hooks.local_player() else {
            return Self::defer(DeferReason::NoLocalPlayer);
        };
        let Some(controller) = hooks.active_health_controller(&player) else {
            return Self::defer(DeferReason::NoHealthController);
        };

        let observer: Arc<dyn DamageObserver> = self.observer.clone();
        match hooks.attach_damage_observer(&controller, observer) {
            Ok(()) => {
                *installed = true;
                tracing::info!(controller = %controller.type_name, "hit marker observer attached");
                InstallOutcome::Installed
            }
            Err(err) => Self::defer(err.into()),
        }
    }

    fn defer(reason: DeferReason) -> InstallOutcome {
        tracing::debug!(%reason, "hit marker observer install deferred");
        InstallOutcome::Deferred(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitmark_core::MarkerStore;
    use hitmark_shared::{BodyPart, DamageInfo, Vec3, Weapon};

    fn event<'a>(info: &'a DamageInfo, victim: Option<PlayerRef>) -> DamageApplied<'a> {
        DamageApplied { body_part: BodyPart::Chest, damage: info.damage, info, victim }
    }

    fn observer(store: &MarkerStore<HitMarker>) -> HitObserver {
        HitObserver::new(Arc::new(AtomicBool::new(true)), store.sink())
    }

    #[test]
    fn test_records_local_hit_on_other_player() {
        let store = MarkerStore::new(8);
        let weapon = Arc::new(Weapon { id: 1, name: "M4A1".into() });
        let info = DamageInfo::new(Some(PlayerRef::local(1)), Some(&weapon), 5.0, 30.0, Vec3::ZERO);

        assert_eq!(observer(&store).capture(&event(&info, Some(PlayerRef::remote(2)))), Capture::Recorded);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_filters() {
        let store = MarkerStore::new(8);
        let observer = observer(&store);
        let local_shot = DamageInfo::new(Some(PlayerRef::local(1)), None, 0.0, 30.0, Vec3::ZERO);
        let bot_shot = DamageInfo::new(Some(PlayerRef::remote(3)), None, 0.0, 30.0, Vec3::ZERO);
        let no_shooter = DamageInfo::new(None, None, 0.0, 30.0, Vec3::ZERO);

        assert_eq!(observer.capture(&event(&local_shot, None)), Capture::NoVictim);
        assert_eq!(observer.capture(&event(&local_shot, Some(PlayerRef::local(1)))), Capture::SelfDamage);
        assert_eq!(observer.capture(&event(&no_shooter, Some(PlayerRef::remote(2)))), Capture::NoShooter);
        assert_eq!(observer.capture(&event(&bot_shot, Some(PlayerRef::remote(2)))), Capture::ForeignShooter);
        assert!(store.is_empty());
    }

    #[test]
    fn test_disabled_observer_ignores_hits() {
        let store = MarkerStore::new(8);
        let enabled = Arc::new(AtomicBool::new(false));
        let observer = HitObserver::new(Arc::clone(&enabled), store.sink());
        let info = DamageInfo::new(Some(PlayerRef::local(1)), None, 0.0, 30.0, Vec3::ZERO);

        assert_eq!(observer.capture(&event(&info, Some(PlayerRef::remote(2)))), Capture::Disabled);
        enabled.store(true, Ordering::Relaxed);
        assert_eq!(observer.capture(&event(&info, Some(PlayerRef::remote(2)))), Capture::Recorded);
    }

    #[test]
    fn test_full_inbox_reports_drop() {
        let store = MarkerStore::new(1);
        let observer = observer(&store);
        let info = DamageInfo::new(Some(PlayerRef::local(1)), None, 0.0, 30.0, Vec3::ZERO);
        let hit = event(&info, Some(PlayerRef::remote(2)));

        assert_eq!(observer.capture(&hit), Capture::Recorded);
        assert_eq!(observer.capture(&hit), Capture::Dropped);
    }
}
