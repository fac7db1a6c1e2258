use affine3d_core::animation::JumpState;
use affine3d_core::projection::Viewport;
use affine3d_core::{
    Camera, ControlConfig, DragMode, InputEvent, Key, LetterParams, Session, Transform, Vec3,
    ViewerConfig, WireMesh,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_session(seed: u64) -> Session<StdRng> {
    Session::new(
        WireMesh::letter_k_3d(&LetterParams::default()),
        Camera::default(),
        ControlConfig::default(),
        Viewport::new(1000.0, 700.0),
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn wheel_notches_are_reversible() {
    let mut session = seeded_session(3);
    for _ in 0..10 {
        session.handle(InputEvent::Wheel(120));
    }
    assert!(session.pose().user_scale.x > 2.7);
    for _ in 0..10 {
        session.handle(InputEvent::Wheel(-120));
    }
    assert!((session.pose().user_scale - Vec3::repeat(1.0)).norm() < 1e-9);
}

#[test]
fn seeded_jumps_are_reproducible() {
    let mut a = seeded_session(11);
    let mut b = seeded_session(11);
    a.handle(InputEvent::Key(Key::Jump));
    b.handle(InputEvent::Key(Key::Jump));
    assert_eq!(a.pose().anim_scale, b.pose().anim_scale);
}

#[test]
fn jump_settles_after_one_second_of_ticks() {
    let mut session = seeded_session(5);
    session.handle(InputEvent::Key(Key::Jump));
    let from = session.pose().anim_scale;
    assert_ne!(from, Vec3::repeat(1.0));

    for dt in [0.125, 0.125, 0.25] {
        session.tick(dt);
    }
    let half = from + (Vec3::repeat(1.0) - from) * 0.5;
    assert!((session.pose().anim_scale - half).norm() < 1e-12);

    for dt in [0.375, 0.125] {
        session.tick(dt);
    }
    assert_eq!(session.pose().anim_scale, Vec3::repeat(1.0));
    assert_eq!(session.jump().state(), JumpState::Idle);
}

#[test]
fn jump_scale_multiplies_user_scale() {
    let mut session = seeded_session(8);
    session.handle(InputEvent::Key(Key::ScaleUp));
    session.handle(InputEvent::Key(Key::Jump));
    let pose = session.pose();
    let expected = pose.anim_scale * 1.05;
    assert!((pose.total_scale() - expected).norm() < 1e-12);
    assert!(session.hud().scale == pose.total_scale());
}

#[test]
fn moving_toward_the_camera_culls_edges() {
    let mut session = seeded_session(2);
    assert_eq!(session.frame().segments().count(), 36);

    // origin at view depth ~0.2: the near face (z = -0.3) falls behind the
    // camera plane while the far face stays visible
    for _ in 0..58 {
        session.handle(InputEvent::Key(Key::Back));
    }
    let frame = session.frame();
    assert_eq!(frame.culled_points(), 12);
    assert_eq!(frame.segments().count(), 12);
    assert_eq!(frame.edges.len(), 36);

    session.handle(InputEvent::Key(Key::Reset));
    assert_eq!(session.frame().segments().count(), 36);
}

#[test]
fn rotating_half_turn_mirrors_x() {
    let mut session = seeded_session(4);
    let before = session.frame();
    session.handle(InputEvent::PointerDown(DragMode::Rotate));
    // 500 px of drag is a half turn about Y
    session.handle(InputEvent::PointerMove { dx: 500.0, dy: 0.0 });
    session.handle(InputEvent::PointerUp);
    let after = session.frame();

    let center = session.viewport().center();
    let mirrored = Transform::transform_point(&session.model_matrix(), &session.mesh().vertices()[0]);
    assert!((mirrored.x + session.mesh().vertices()[0].x).abs() < 1e-9);

    let a = before.points[0].unwrap();
    let b = after.points[0].unwrap();
    assert!((a.y - center.y).signum() == (b.y - center.y).signum());
}

#[test]
fn config_drives_session() {
    let config = ViewerConfig::from_json_str(
        r#"{ "seed": 1, "mesh": { "kind": "cube", "size": 1.0 }, "camera": { "distance": 10.0 } }"#,
    )
    .unwrap();
    let session = Session::from_config(&config, Viewport::new(800.0, 600.0));
    assert_eq!(session.mesh().edges().len(), 12);
    assert_eq!(session.camera().distance, 10.0);
    assert_eq!(session.frame().segments().count(), 12);
}
