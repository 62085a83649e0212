//! End-to-end marker scenarios: capture a hit, run frames, inspect draw calls.

use std::sync::Arc;

use hitmark::shared::{BodyPart, DamageApplied, DamageInfo, PlayerRef, Vec2, Vec3, Viewport, Weapon};
use hitmark::ui::{CommandBuffer, RenderCommand};
use hitmark::{Camera, DamageObserver, FrameInput, HitsConfig, HitsFeature};

const VIEWPORT: Viewport = Viewport::new(800, 600);
/// Where the host projects every hit, bottom-left origin.
const HOST_POINT: Vec3 = Vec3::new(400.0, 200.0, 10.0);
/// The same point in overlay coordinates.
const HIT: Vec2 = Vec2::new(400.0, 400.0);

struct FixedCamera;

impl Camera for FixedCamera {
    fn world_to_screen_point(&self, _world: Vec3) -> Vec3 {
        HOST_POINT
    }

    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }
}

fn feature(configure: impl FnOnce(&mut HitsConfig)) -> HitsFeature {
    let mut config = HitsConfig { enabled: true, ..HitsConfig::default() };
    configure(&mut config);
    HitsFeature::new(config.shared())
}

fn shoot(feature: &HitsFeature, weapon: &Arc<Weapon>, armor: f32, damage: f32) {
    let info = DamageInfo::new(Some(PlayerRef::local(1)), Some(weapon), armor, damage, Vec3::new(0.0, 1.0, 10.0));
    let event = DamageApplied { body_part: BodyPart::Chest, damage, info: &info, victim: Some(PlayerRef::remote(7)) };
    feature.interceptor().observer().on_damage_applied(&event);
}

fn frame(feature: &HitsFeature, delta_time: f32) -> CommandBuffer {
    let mut buffer = CommandBuffer::new();
    feature
        .on_gui(&FrameInput::new(delta_time, &FixedCamera, VIEWPORT), &mut buffer)
        .expect("feature is enabled");
    buffer
}

fn labels_only(config: &mut HitsConfig) {
    config.show_hit_marker = false;
    config.show_cross_tick_marker = false;
}

fn texts(buffer: &CommandBuffer) -> Vec<(Vec2, String)> {
    buffer
        .texts()
        .map(|command| match command {
            RenderCommand::Text { position, text, .. } => (*position, text.clone()),
            other => panic!("expected text, got {other:?}"),
        })
        .collect()
}

#[test]
fn test_fade_is_half_way_at_two_and_a_half_seconds() {
    let feature = feature(|config| config.show_cross_tick_marker = false);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 40.0);

    let first = frame(&feature, 1.25);
    assert!(first.commands().iter().all(|command| command.color().a == 1.0));

    let second = frame(&feature, 1.25);
    assert!(!second.is_empty());
    for command in second.commands() {
        assert!((command.color().a - 0.5).abs() < 1e-6, "{command:?}");
    }
}

#[test]
fn test_armor_only_hit_draws_armor_label_above_hit_point() {
    let feature = feature(labels_only);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 30.0, 0.0);

    let buffer = frame(&feature, 0.016);
    assert_eq!(texts(&buffer), vec![(Vec2::new(400.0, 390.0), "30".to_string())]);
    assert_eq!(buffer.texts().next().map(RenderCommand::color), Some(HitsConfig::default().armor_damage_color));
}

#[test]
fn test_health_only_hit_draws_label_at_hit_point() {
    let feature = feature(labels_only);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 45.0);

    let buffer = frame(&feature, 0.016);
    assert_eq!(texts(&buffer), vec![(HIT, "45".to_string())]);
}

#[test]
fn test_armor_and_health_labels_stack() {
    let feature = feature(labels_only);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 12.2, 44.8);

    let buffer = frame(&feature, 0.016);
    assert_eq!(
        texts(&buffer),
        vec![(Vec2::new(400.0, 390.0), "12".to_string()), (Vec2::new(400.0, 410.0), "45".to_string())]
    );
}

#[test]
fn test_hidden_armor_label_keeps_health_label_at_hit_point() {
    let feature = feature(|config| {
        labels_only(config);
        config.show_armor_damage = false;
    });
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 30.0, 20.0);

    assert_eq!(texts(&frame(&feature, 0.016)), vec![(HIT, "20".to_string())]);
}

#[test]
fn test_dropped_weapon_marker_is_removed_on_next_pass() {
    let feature = feature(|_| {});
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 10.0, 30.0);

    assert!(!frame(&feature, 0.1).is_empty());
    drop(weapon);

    let mut buffer = CommandBuffer::new();
    let stats = feature.on_gui(&FrameInput::new(0.016, &FixedCamera, VIEWPORT), &mut buffer).expect("enabled");
    assert_eq!((stats.expired, stats.swept, stats.rendered), (1, 1, 0));
    assert!(buffer.is_empty());
    assert_eq!(feature.active_markers(), 0);

    assert!(frame(&feature, 0.016).is_empty());
}

#[test]
fn test_marker_expires_after_display_and_fade() {
    let feature = feature(|_| {});
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 30.0);

    let mut frames = 0;
    while feature.active_markers() > 0 {
        frame(&feature, 0.25);
        frames += 1;
        assert!(frames <= 12, "marker outlived its lifetime");
    }
    assert_eq!(frames, 12);
}

#[test]
fn test_ring_grows_and_follows_scale() {
    let feature = feature(|config| {
        config.show_cross_tick_marker = false;
        config.scale_x = 0.5;
        config.scale_y = 1.5;
    });
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 0.0);

    let radius_of = |buffer: &CommandBuffer| match buffer.circles().next() {
        Some(RenderCommand::Circle { center, radius, .. }) => {
            assert_eq!(*center, Vec2::new(200.0, 300.0));
            *radius
        }
        other => panic!("expected circle, got {other:?}"),
    };

    let first = radius_of(&frame(&feature, 0.5));
    let second = radius_of(&frame(&feature, 0.5));
    assert_eq!(first, 17.0);
    assert_eq!(second, 18.0);
}

#[test]
fn test_no_camera_freezes_markers() {
    let feature = feature(|config| config.show_cross_tick_marker = false);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 30.0);

    let mut buffer = CommandBuffer::new();
    for _ in 0..10 {
        let stats = feature
            .on_gui(&FrameInput::<FixedCamera>::without_camera(1.0, VIEWPORT), &mut buffer)
            .expect("enabled");
        assert!(stats.skipped);
    }
    assert!(buffer.is_empty());
    assert_eq!(feature.active_markers(), 1);

    match frame(&feature, 0.5).circles().next() {
        Some(RenderCommand::Circle { radius, .. }) => assert_eq!(*radius, 17.0),
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn test_identical_hits_are_separate_markers() {
    let feature = feature(labels_only);
    let weapon = Arc::new(Weapon { id: 1, name: "AK-74".into() });
    shoot(&feature, &weapon, 0.0, 30.0);
    shoot(&feature, &weapon, 0.0, 30.0);

    assert_eq!(feature.active_markers(), 2);
    assert_eq!(frame(&feature, 0.016).texts().count(), 2);
}
