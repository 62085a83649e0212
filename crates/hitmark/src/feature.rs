//! The toggleable hit marker feature, as the host sees it.
//!
//! The host calls [`HitsFeature::update`] every tick and
//! [`HitsFeature::on_gui`] every displayed frame. Both pick up toggles
//! written straight into the shared config, and both do nothing while the
//! feature is disabled.
//!
//! A capture already past its enabled check when the feature is disabled can
//! still land after the markers were cleared. Enabling clears the store again
//! before capture resumes, so such a marker is never shown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hitmark_ui::DrawSurface;

use crate::config::SharedConfig;
use crate::interceptor::{DamageHooks, EventInterceptor, InstallOutcome};
use crate::lifecycle::{FrameInput, MarkerLifecycleEngine, PassStats};
use crate::projection::Camera;

/// Hit marker overlay: capture, lifecycle and toggle in one place.
pub struct HitsFeature {
    enabled: Arc<AtomicBool>,
    config: SharedConfig,
    engine: MarkerLifecycleEngine,
    interceptor: EventInterceptor,
}

impl HitsFeature {
    /// Name the feature is registered and configured under.
    pub const NAME: &'static str = "hits";

    /// Creates the feature from shared configuration.
    ///
    /// The inbox capacity is fixed here; later edits to it have no effect.
    #[must_use]
    pub fn new(config: SharedConfig) -> Self {
        let (enabled, capacity) = {
            let current = config.read();
            (current.enabled, current.inbox_capacity)
        };
        let enabled = Arc::new(AtomicBool::new(enabled));
        let engine = MarkerLifecycleEngine::new(capacity);
        let interceptor = EventInterceptor::new(Arc::clone(&enabled), engine.sink());
        Self { enabled, config, engine, interceptor }
    }

    /// Feature name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Returns true while the overlay records and draws hits.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switches the overlay on or off and persists the choice in the config.
    ///
    /// Every transition drops all markers so none reappear on re-enable.
    pub fn set_enabled(&self, enabled: bool) {
        self.config.write().enabled = enabled;
        self.apply_enabled(enabled);
    }

    /// Flips the toggle and returns the new state.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// The capture side, for hosts that deliver events by hand.
    #[must_use]
    pub fn interceptor(&self) -> &EventInterceptor {
        &self.interceptor
    }

    /// Markers currently alive, resident plus pending.
    #[must_use]
    pub fn active_markers(&self) -> usize {
        self.engine.store().len()
    }

    /// Per-tick entry: attaches the damage observer once prerequisites exist.
    ///
    /// Returns `None` while disabled.
    pub fn update<H: DamageHooks + ?Sized>(&self, hooks: &H) -> Option<InstallOutcome> {
        self.sync_enabled();
        self.is_enabled().then(|| self.interceptor.install(hooks))
    }

    /// Per-frame entry: runs one lifecycle pass against `surface`.
    ///
    /// Returns `None` while disabled.
    pub fn on_gui<C, S>(&self, frame: &FrameInput<'_, C>, surface: &mut S) -> Option<PassStats>
    where
        C: Camera + ?Sized,
        S: DrawSurface + ?Sized,
    {
        self.sync_enabled();
        if !self.is_enabled() {
            return None;
        }
        let config = self.config.read().clone();
        Some(self.engine.run_pass(&config, frame, surface))
    }

    /// Picks up toggles written straight into the shared config.
    fn sync_enabled(&self) {
        let wanted = self.config.read().enabled;
        if wanted != self.is_enabled() {
            self.apply_enabled(wanted);
        }
    }

    fn apply_enabled(&self, enabled: bool) {
        if self.is_enabled() == enabled {
            return;
        }
        if enabled {
            // Stragglers from captures that raced the last disable.
            let stale = self.engine.store().clear();
            if !self.enabled.swap(true, Ordering::AcqRel) {
                tracing::info!(feature = Self::NAME, stale, "enabled");
            }
        } else if self.enabled.swap(false, Ordering::AcqRel) {
            let dropped = self.engine.store().clear();
            tracing::info!(feature = Self::NAME, dropped, "disabled");
        }
    }
}
