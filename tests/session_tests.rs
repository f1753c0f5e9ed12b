//! Editor session tests
//!
//! Tests for:
//! - Key bindings and command dispatch
//! - Keyframe commands, playback and the editing lock while playing
//! - Animation file commands through the configured path
//! - Pick mode and pointer drags
//! - Display pass draw calls
//! - Settings loading

use glam::{Quat, Vec3};
use posekit::animation::TickOutcome;
use posekit::editor::{ButtonState, Command, EditorSession, MouseButton, SessionControl};
use posekit::errors::PoseError;
use posekit::math::RigidTransform;
use posekit::render::HeadlessBackend;
use posekit::settings::EditorSettings;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session() -> EditorSession<HeadlessBackend> {
    init_logging();
    EditorSession::headless(EditorSettings::default()).unwrap()
}

fn session_with_file(path: std::path::PathBuf) -> EditorSession<HeadlessBackend> {
    init_logging();
    let settings = EditorSettings {
        animation_file: path,
        ..Default::default()
    };
    EditorSession::headless(settings).unwrap()
}

fn robot_at(x: f32) -> RigidTransform {
    RigidTransform::new(Vec3::new(x, 1.0, 0.0), Quat::from_rotation_y(x * 0.2))
}

/// Poses robot 1 at each `x` and records a frame after the cursor.
fn record(session: &mut EditorSession<HeadlessBackend>, xs: &[f32]) {
    let robot = session.handles().robots[0];
    for &x in xs {
        session.set_pose(robot, robot_at(x)).unwrap();
        session.handle_key('n').unwrap();
    }
}

fn robot_x(session: &EditorSession<HeadlessBackend>) -> f32 {
    let robot = session.handles().robots[0];
    session.scene().pose(robot).unwrap().translation.x
}

/// Window coordinates (origin top-left) of robot 1's torso center.
fn torso_window_position(session: &EditorSession<HeadlessBackend>) -> (f32, f32) {
    let scene = session.scene();
    let inverse_eye = scene.world_pose(session.eye()).unwrap().inverse();
    let torso = scene.world_pose(session.handles().robots[0]).unwrap().translation;
    let gl = session
        .projection()
        .screen_space_coord(inverse_eye.transform_point(torso))
        .unwrap()
        .round();
    let height = session.projection().height() as f32;
    (gl.x, height - 1.0 - gl.y)
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn starts_looking_through_the_sky() {
    let s = session();
    assert_eq!(s.eye(), s.handles().sky);
    assert_eq!(s.picked(), None);
    assert_eq!(s.target(), s.handles().sky);
    assert!(!s.sky_sky());
    assert!(!s.pick_mode());
    assert!(s.animation().is_empty());
    assert_eq!(s.transform_nodes().len(), 24);
}

#[test]
fn key_bindings() {
    assert_eq!(Command::from_key('v'), Some(Command::CycleEye));
    assert_eq!(Command::from_key('.'), Some(Command::NextFrame));
    assert_eq!(Command::from_key('<'), Some(Command::PreviousFrame));
    assert_eq!(Command::from_key('_'), Some(Command::Slower));
    assert_eq!(Command::from_key('='), Some(Command::Faster));
    assert_eq!(Command::from_key('x'), None);

    let mut s = session();
    assert_eq!(s.handle_key('x').unwrap(), SessionControl::Continue);
    assert_eq!(s.handle_key('h').unwrap(), SessionControl::Continue);
    assert_eq!(s.handle_key('\u{1b}').unwrap(), SessionControl::Quit);
}

#[test]
fn cycle_eye_visits_sky_and_both_robots() {
    let mut s = session();
    let handles = *s.handles();
    s.handle_key('v').unwrap();
    assert_eq!(s.eye(), handles.robots[0]);
    s.handle_key('v').unwrap();
    assert_eq!(s.eye(), handles.robots[1]);
    s.handle_key('v').unwrap();
    assert_eq!(s.eye(), handles.sky);
}

#[test]
fn toggles_flip_modes() {
    let mut s = session();
    s.handle_key('m').unwrap();
    assert!(s.sky_sky());
    s.handle_key('p').unwrap();
    assert!(s.pick_mode());
    s.handle_key('p').unwrap();
    assert!(!s.pick_mode());
}

#[test]
fn ground_is_not_selectable() {
    let mut s = session();
    let handles = *s.handles();
    s.select(Some(handles.ground)).unwrap();
    assert_eq!(s.picked(), None);
    s.select(Some(handles.robots[1])).unwrap();
    assert_eq!(s.target(), handles.robots[1]);
}

// ============================================================================
// Keyframes
// ============================================================================

#[test]
fn frame_commands_edit_and_load() {
    let mut s = session();
    let robot = s.handles().robots[0];
    record(&mut s, &[0.0, 1.0, 2.0]);
    assert_eq!(s.animation().len(), 3);
    assert_eq!(s.animation().cursor(), Some(2));

    s.handle_key(',').unwrap();
    assert!((robot_x(&s) - 1.0).abs() < EPSILON);

    // Update overwrites the cursor frame with the scene.
    s.set_pose(robot, robot_at(7.0)).unwrap();
    s.handle_key('u').unwrap();
    s.set_pose(robot, robot_at(0.0)).unwrap();
    s.handle_key(' ').unwrap();
    assert!((robot_x(&s) - 7.0).abs() < EPSILON);

    // Delete falls back to the predecessor and loads it.
    s.handle_key('d').unwrap();
    assert_eq!(s.animation().len(), 2);
    assert_eq!(s.animation().cursor(), Some(0));
    assert!(robot_x(&s).abs() < EPSILON);
}

#[test]
fn update_on_empty_animation_creates_a_frame() {
    let mut s = session();
    s.handle_key('u').unwrap();
    assert_eq!(s.animation().len(), 1);
    assert_eq!(s.animation().cursor(), Some(0));
}

#[test]
fn playback_locks_editing_and_parks_cursor() {
    let mut s = session();
    record(&mut s, &[0.0, 1.0, 2.0, 3.0]);

    s.handle_key('y').unwrap();
    assert!(s.player().is_playing());
    assert!(matches!(s.handle_key('n'), Err(PoseError::PlaybackActive)));
    assert!(matches!(s.handle_key('d'), Err(PoseError::PlaybackActive)));
    // Non-editing commands still run.
    s.handle_key('v').unwrap();
    s.handle_key('+').unwrap();

    let mut finished = false;
    for _ in 0..10_000 {
        if s.tick().unwrap() == TickOutcome::Finished {
            finished = true;
            break;
        }
    }
    assert!(finished);
    assert!(!s.player().is_playing());
    assert_eq!(s.animation().cursor(), Some(2));
    assert!((robot_x(&s) - 2.0).abs() < EPSILON);
    assert_eq!(s.animation().len(), 4);
}

#[test]
fn play_key_twice_requests_stop() {
    let mut s = session();
    record(&mut s, &[0.0, 1.0, 2.0, 3.0, 4.0]);
    s.handle_key('y').unwrap();
    assert_eq!(s.tick().unwrap(), TickOutcome::Continue);
    s.handle_key('y').unwrap();
    assert_eq!(s.tick().unwrap(), TickOutcome::Finished);
    assert_eq!(s.animation().cursor(), Some(3));
}

#[test]
fn speed_keys_adjust_keyframe_spacing() {
    let mut s = session();
    s.handle_key('-').unwrap();
    assert_eq!(s.player().ms_between_keyframes(), 2100);
    s.handle_key('+').unwrap();
    s.handle_key('+').unwrap();
    assert_eq!(s.player().ms_between_keyframes(), 1900);
}

// ============================================================================
// Animation files
// ============================================================================

#[test]
fn write_then_read_animation_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.txt");
    let mut s = session_with_file(path.clone());
    record(&mut s, &[0.5, 1.5]);

    s.handle_key('w').unwrap();
    assert!(path.exists());

    s.handle_key('d').unwrap();
    s.handle_key('d').unwrap();
    assert!(s.animation().is_empty());

    s.handle_key('i').unwrap();
    assert_eq!(s.animation().len(), 2);
    assert_eq!(s.animation().cursor(), Some(0));
    assert!((robot_x(&s) - 0.5).abs() < EPSILON);
}

#[test]
fn failed_load_keeps_current_animation() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session_with_file(dir.path().join("missing.txt"));
    record(&mut s, &[1.0]);

    let err = s.handle_key('i').unwrap_err();
    assert!(matches!(err, PoseError::IoError(_)));
    assert_eq!(s.animation().len(), 1);
}

#[test]
fn corrupt_frame_count_keeps_current_animation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.txt");
    std::fs::write(&path, format!("{} 24\n0 0 0\n1 0 0 0\n", u64::MAX)).unwrap();
    let mut s = session_with_file(path);
    record(&mut s, &[1.0, 2.0]);

    let err = s.handle_key('i').unwrap_err();
    assert!(matches!(err, PoseError::AnimationFormat { .. }));
    assert_eq!(s.animation().len(), 2);
    assert_eq!(s.animation().cursor(), Some(1));
}

#[test]
fn loading_a_file_for_another_scene_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.txt");
    std::fs::write(&path, "1 1\n0 0 0\n1 0 0 0\n").unwrap();
    let mut s = session_with_file(path);

    let err = s.handle_key('i').unwrap_err();
    assert!(matches!(
        err,
        PoseError::FrameLengthMismatch {
            expected: 24,
            actual: 1
        }
    ));
    assert!(s.animation().is_empty());
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn pick_mode_click_selects_torso() {
    let mut s = session();
    let (x, y) = torso_window_position(&s);
    s.handle_key('p').unwrap();
    s.handle_mouse_button(MouseButton::Left, ButtonState::Pressed, x, y)
        .unwrap();
    assert_eq!(s.picked(), Some(s.handles().robots[0]));
    assert!(!s.pick_mode());
}

#[test]
fn picking_the_ground_clears_selection() {
    let mut s = session();
    s.select(Some(s.handles().robots[1])).unwrap();
    s.handle_key('p').unwrap();
    // GL row 500, above the robots where only the ground plane is drawn.
    s.handle_mouse_button(MouseButton::Left, ButtonState::Pressed, 256.0, 11.0)
        .unwrap();
    assert_eq!(s.picked(), None);
}

#[test]
fn right_drag_translates_picked_robot() {
    let mut s = session();
    let robot = s.handles().robots[0];
    s.select(Some(robot)).unwrap();
    let before = s.scene().pose(robot).unwrap().translation;

    s.handle_mouse_button(MouseButton::Right, ButtonState::Pressed, 100.0, 100.0)
        .unwrap();
    assert!(s.handle_mouse_move(110.0, 100.0).unwrap());
    let scale = s.arcball().scale;
    let after = s.scene().pose(robot).unwrap().translation;
    assert!(after.abs_diff_eq(before + Vec3::new(10.0 * scale, 0.0, 0.0), EPSILON));

    // The arcball keeps its screen size at depth 4.
    let expected = 4.0 * (30.0f32).to_radians().tan() * 2.0 / 512.0;
    assert!((scale - expected).abs() < 1e-6);

    s.handle_mouse_button(MouseButton::Right, ButtonState::Released, 110.0, 100.0)
        .unwrap();
    assert!(!s.handle_mouse_move(150.0, 100.0).unwrap());
}

#[test]
fn moving_without_buttons_changes_nothing() {
    let mut s = session();
    let sky = s.scene().pose(s.handles().sky).unwrap();
    assert!(!s.handle_mouse_move(10.0, 10.0).unwrap());
    assert_eq!(s.scene().pose(s.handles().sky).unwrap(), sky);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn render_draws_shapes_and_arcball() {
    let mut s = session();
    s.render().unwrap();
    // 20 robot parts, the ground plane, two light markers and the arcball.
    assert_eq!(s.backend().draw_count(), 24);

    s.handle_key('m').unwrap();
    s.render().unwrap();
    assert_eq!(s.backend().draw_count(), 23);
}

#[test]
fn resize_rescales_arcball_radius() {
    let mut s = session();
    s.resize(1024, 400);
    assert_eq!(s.projection().width(), 1024);
    assert!((s.arcball().screen_radius - 100.0).abs() < EPSILON);
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn partial_settings_json_keeps_defaults() {
    let settings = EditorSettings::from_json_str(r#"{ "fps": 30, "window_width": 800 }"#).unwrap();
    assert_eq!(settings.fps, 30);
    assert_eq!(settings.window_width, 800);
    assert_eq!(settings.window_height, 512);
    assert_eq!(settings.ms_between_keyframes, 2000);

    let s = EditorSession::headless(settings).unwrap();
    assert_eq!(s.player().tick_ms(), 33);
}

#[test]
fn settings_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    let settings = EditorSettings {
        near: 0.5,
        srgb_framebuffer: false,
        ..Default::default()
    };
    std::fs::write(&path, serde_json::to_string(&settings).unwrap()).unwrap();
    assert_eq!(EditorSettings::from_json_file(&path).unwrap(), settings);

    assert!(matches!(
        EditorSettings::from_json_str("{ fps: }"),
        Err(PoseError::SettingsError(_))
    ));
}
