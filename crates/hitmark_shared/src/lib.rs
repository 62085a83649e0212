//! # HITMARK Shared
//!
//! Common types used by both the host adapter and the overlay.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a drawing backend. If you need colors or
//! draw commands, put them in `hitmark_ui`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod events;
pub mod math;

pub use events::{BodyPart, DamageApplied, DamageInfo, PlayerId, PlayerRef, Weapon};
pub use math::{Vec2, Vec3, Viewport};
