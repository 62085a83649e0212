//! # HITMARK Demo
//!
//! Headless run of the overlay against a simulated host.
//!
//! A background thread plays a firefight (hits from the local player, from a
//! bot and on the local player) while the main thread renders 60 frames per
//! second into a [`CommandBuffer`] and logs what each pass did.
//!
//! ```bash
//! HITMARK_LOG=hitmark=trace cargo run --bin hitmark_demo
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hitmark::shared::{BodyPart, DamageApplied, DamageInfo, PlayerRef, Vec3, Viewport, Weapon};
use hitmark::ui::CommandBuffer;
use hitmark::{
    init_tracing, DamageHooks, DamageObserver, FrameInput, HealthControllerRef, HitsConfig, HitsFeature, HookError,
    MatrixCamera,
};
use parking_lot::Mutex;

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 300;
/// Ticks before the local player spawns.
const SPAWN_TICK: u32 = 20;

const LOCAL: PlayerRef = PlayerRef::local(1);
const BOT: PlayerRef = PlayerRef::remote(2);
const SCAV: PlayerRef = PlayerRef::remote(3);

/// Host stand-in: one damage routine with attachable observers.
struct DemoHost {
    tick: Mutex<u32>,
    observers: Mutex<Vec<Arc<dyn DamageObserver>>>,
}

impl DemoHost {
    fn new() -> Self {
        Self { tick: Mutex::new(0), observers: Mutex::new(Vec::new()) }
    }

    fn advance(&self) {
        *self.tick.lock() += 1;
    }

    /// The host damage routine; observers run after it on the calling thread.
    fn apply_damage(&self, victim: PlayerRef, body_part: BodyPart, info: &DamageInfo) {
        let event = DamageApplied { body_part, damage: info.damage, info, victim: Some(victim) };
        for observer in self.observers.lock().iter() {
            observer.on_damage_applied(&event);
        }
    }
}

impl DamageHooks for DemoHost {
    fn local_player(&self) -> Option<PlayerRef> {
        (*self.tick.lock() >= SPAWN_TICK).then_some(LOCAL)
    }

    fn active_health_controller(&self, player: &PlayerRef) -> Option<HealthControllerRef> {
        Some(HealthControllerRef { owner: *player, type_name: "ActiveHealthController".into() })
    }

    fn attach_damage_observer(
        &self,
        controller: &HealthControllerRef,
        observer: Arc<dyn DamageObserver>,
    ) -> Result<(), HookError> {
        if controller.type_name.is_empty() {
            return Err(HookError::RoutineNotFound { type_name: controller.type_name.clone() });
        }
        self.observers.lock().push(observer);
        Ok(())
    }
}

/// Plays the firefight; the rifle is dropped halfway through.
fn firefight(host: &DemoHost) {
    let rifle = Arc::new(Weapon { id: 1, name: "M4A1".into() });
    let pistol = Arc::new(Weapon { id: 2, name: "PM".into() });
    let parts = [BodyPart::Chest, BodyPart::Head, BodyPart::Stomach, BodyPart::LeftLeg];

    for round in 0..12u8 {
        let spread = f32::from(round) * 0.4 - 2.0;
        let hit_point = Vec3::new(spread, 1.2, 15.0 + f32::from(round));
        let armor = if round % 3 == 0 { 12.4 } else { 0.0 };
        let shot = DamageInfo::new(Some(LOCAL), Some(&rifle), armor, 28.5, hit_point);
        host.apply_damage(SCAV, parts[usize::from(round) % parts.len()], &shot);

        // Ignored: damage between other players and damage taken.
        let crossfire = DamageInfo::new(Some(BOT), Some(&pistol), 0.0, 17.0, hit_point);
        host.apply_damage(SCAV, BodyPart::RightArm, &crossfire);
        let incoming = DamageInfo::new(Some(SCAV), Some(&pistol), 0.0, 9.0, Vec3::ZERO);
        host.apply_damage(LOCAL, BodyPart::Chest, &incoming);

        thread::sleep(Duration::from_millis(150));
    }

    drop(rifle);
    tracing::info!("rifle dropped, its markers expire on the next pass");
}

fn main() {
    init_tracing(true);

    let config = HitsConfig { enabled: true, ..HitsConfig::load_or_default("hits.toml") };
    let feature = HitsFeature::new(config.shared());
    let host = Arc::new(DemoHost::new());

    let viewport = Viewport::new(1920, 1080);
    let camera = MatrixCamera::perspective(Vec3::new(0.0, 1.7, 0.0), 1.2, viewport, 0.1, 1000.0);
    let mut buffer = CommandBuffer::new();
    let mut shooter = None;

    for frame in 0..FRAMES {
        host.advance();
        if let Some(outcome) = feature.update(host.as_ref()) {
            tracing::debug!(frame, ?outcome, "update");
        }

        // Start shooting once the observer is attached.
        if shooter.is_none() && feature.interceptor().is_installed() {
            let host = Arc::clone(&host);
            shooter = Some(thread::spawn(move || firefight(&host)));
        }

        buffer.begin_frame();
        if let Some(stats) = feature.on_gui(&FrameInput::new(FRAME_TIME, &camera, viewport), &mut buffer) {
            if frame % 30 == 0 {
                tracing::info!(
                    frame,
                    markers = feature.active_markers(),
                    draw_calls = buffer.len(),
                    rendered = stats.rendered,
                    swept = stats.swept,
                    "frame"
                );
            }
        }

        thread::sleep(Duration::from_secs_f32(FRAME_TIME));
    }

    if let Some(handle) = shooter {
        if handle.join().is_err() {
            tracing::error!("firefight thread panicked");
        }
    }
    tracing::info!(markers = feature.active_markers(), "demo finished");
}
