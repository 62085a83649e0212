//! # HITMARK
//!
//! Screen-space hit markers for damage dealt by the local player.
//!
//! ## Design Principles
//!
//! 1. **Observe, never interfere** - the damage observer only filters and queues
//! 2. **Any thread may capture** - insertion goes through a non-blocking inbox
//! 3. **Mark, then sweep** - markers expire during a pass and are removed after it
//! 4. **External configuration** - every tunable lives in one TOML document
//!
//! ## Example
//!
//! ```rust,ignore
//! use hitmark::{FrameInput, HitsConfig, HitsFeature};
//!
//! let feature = HitsFeature::new(HitsConfig::load_or_default("hits.toml").shared());
//!
//! // Every tick: attach once the local player exists.
//! feature.update(&host);
//!
//! // Every frame: age, fade, draw and sweep.
//! feature.on_gui(&FrameInput::new(delta_time, &camera, viewport), &mut surface);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod feature;
pub mod interceptor;
pub mod lifecycle;
pub mod marker;
pub mod projection;
pub mod telemetry;

pub use config::{HitsConfig, SharedConfig};
pub use error::{ConfigError, ConfigResult, HookError};
pub use feature::HitsFeature;
pub use interceptor::{
    Capture, DamageHooks, DamageObserver, DeferReason, EventInterceptor, HealthControllerRef, HitObserver,
    InstallOutcome,
};
pub use lifecycle::{FrameInput, MarkerLifecycleEngine, PassStats};
pub use marker::{DamagePayload, HitMarker, MarkerPhase};
pub use projection::{is_target_visible, Camera, LayerMask, LineOfSight, MatrixCamera, ScreenProjector};
pub use telemetry::init_tracing;

pub use hitmark_shared as shared;
pub use hitmark_ui as ui;
