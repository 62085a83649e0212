//! Damage-event types emitted by the host.
//!
//! Every identity in the chain (victim, shooter, weapon) is optional: the host
//! may fail to resolve any of them, and the weapon may be invalidated after
//! the event was captured.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Hit location on a character body.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    /// Head
    Head = 0,
    /// Thorax
    Chest = 1,
    /// Stomach
    Stomach = 2,
    /// Left arm
    LeftArm = 3,
    /// Right arm
    RightArm = 4,
    /// Left leg
    LeftLeg = 5,
    /// Right leg
    RightLeg = 6,
    /// Damage applied to the whole body (falls, explosions)
    #[default]
    Common = 7,
}

/// Host-assigned player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

/// A resolved player entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Player identifier
    pub id: PlayerId,
    /// True for the player controlled by the running user
    pub is_local: bool,
}

impl PlayerRef {
    /// The player controlled by the running user.
    #[must_use]
    pub const fn local(id: u64) -> Self {
        Self { id: PlayerId(id), is_local: true }
    }

    /// Any other player or bot.
    #[must_use]
    pub const fn remote(id: u64) -> Self {
        Self { id: PlayerId(id), is_local: false }
    }
}

/// A weapon item owned by the host.
///
/// The host keeps the strong reference; damage events only carry a weak one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Item template identifier
    pub id: u32,
    /// Display name
    pub name: String,
}

/// Damage details as reported by the host.
#[derive(Clone, Debug, Default)]
pub struct DamageInfo {
    /// Player that caused the damage, if any
    pub shooter: Option<PlayerRef>,
    /// Weapon used. Empty or dangling when the host has no (or no longer any) weapon.
    pub weapon: Weak<Weapon>,
    /// Damage absorbed by armor
    pub armor_damage: f32,
    /// Damage applied to health
    pub damage: f32,
    /// World-space impact point
    pub hit_point: Vec3,
}

impl DamageInfo {
    /// Creates damage info referencing `weapon` without keeping it alive.
    #[must_use]
    pub fn new(
        shooter: Option<PlayerRef>,
        weapon: Option<&Arc<Weapon>>,
        armor_damage: f32,
        damage: f32,
        hit_point: Vec3,
    ) -> Self {
        Self {
            shooter,
            weapon: weapon.map(Arc::downgrade).unwrap_or_default(),
            armor_damage,
            damage,
            hit_point,
        }
    }
}

/// One invocation of the host's damage-application routine.
#[derive(Clone, Copy, Debug)]
pub struct DamageApplied<'a> {
    /// Struck body part
    pub body_part: BodyPart,
    /// Damage amount passed to the routine
    pub damage: f32,
    /// Damage details
    pub info: &'a DamageInfo,
    /// Owner of the health controller the routine ran on
    pub victim: Option<PlayerRef>,
}
