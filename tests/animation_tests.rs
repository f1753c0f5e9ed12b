//! Animation Tests
//!
//! Tests for:
//! - Keyframe list editing and cursor rules
//! - Frame capture / apply against a scene
//! - Kochanek-Bartels style interpolation
//! - Playback boundaries, stop requests and cursor parking
//! - Animation file save / load

use std::io::Cursor;

use glam::{Quat, Vec3};

use posekit::animation::interpolate::{interpolate_frames, sample};
use posekit::animation::{
    Animation, Frame, PlaybackState, Player, TickOutcome, load_animation, load_animation_from_file,
    save_animation, save_animation_to_file,
};
use posekit::errors::PoseError;
use posekit::math::{RigidTransform, same_rotation};
use posekit::scene::{NodeKey, SceneGraph};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn marker(x: f32) -> Frame {
    Frame::new(vec![RigidTransform::new(
        Vec3::new(x, 0.0, 0.0),
        Quat::from_rotation_y(x * 0.1),
    )])
}

fn marker_x(frame: &Frame) -> f32 {
    frame.poses()[0].translation.x
}

/// A scene with two transform nodes under the root.
fn two_node_scene() -> (SceneGraph, Vec<NodeKey>) {
    let mut scene = SceneGraph::new();
    let a = scene
        .add_transform(scene.root(), "A", RigidTransform::IDENTITY)
        .unwrap();
    scene.add_transform(a, "B", RigidTransform::IDENTITY).unwrap();
    let nodes = scene.transform_nodes();
    (scene, nodes)
}

fn linear_animation(count: usize) -> Animation {
    Animation::from_frames((0..count).map(|i| marker(i as f32)).collect()).unwrap()
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn new_animation_is_at_end_sentinel() {
    let anim = Animation::new();
    assert!(anim.is_empty());
    assert_eq!(anim.cursor(), None);
    assert!(anim.current().is_none());
}

#[test]
fn insert_goes_after_cursor_and_selects_new_frame() {
    let mut anim = Animation::new();
    anim.insert_after_cursor(marker(0.0)).unwrap();
    anim.insert_after_cursor(marker(1.0)).unwrap();
    assert!(anim.step_backward());
    anim.insert_after_cursor(marker(0.5)).unwrap();

    let xs: Vec<f32> = anim.frames().iter().map(marker_x).collect();
    assert_eq!(xs, [0.0, 0.5, 1.0]);
    assert_eq!(anim.cursor(), Some(1));
}

#[test]
fn insert_then_step_back_and_forward_returns_to_inserted() {
    let mut anim = linear_animation(3);
    anim.insert_after_cursor(marker(9.0)).unwrap();
    assert_eq!(anim.cursor(), Some(1));
    assert!(anim.step_backward());
    assert!(anim.step_forward());
    assert_eq!(marker_x(anim.current().unwrap()), 9.0);
}

#[test]
fn replace_at_end_sentinel_inserts() {
    let mut anim = Animation::new();
    let index = anim.replace_at_cursor(marker(4.0)).unwrap();
    assert_eq!(index, 0);
    assert_eq!(anim.len(), 1);

    anim.replace_at_cursor(marker(5.0)).unwrap();
    assert_eq!(anim.len(), 1);
    assert_eq!(marker_x(anim.current().unwrap()), 5.0);
}

#[test]
fn delete_moves_cursor_to_predecessor() {
    let mut anim = linear_animation(3);
    assert!(anim.step_forward());
    assert!(anim.step_forward());
    let removed = anim.delete_at_cursor().unwrap();
    assert_eq!(marker_x(&removed), 2.0);
    assert_eq!(anim.cursor(), Some(1));
    assert_eq!(marker_x(anim.current().unwrap()), 1.0);
}

#[test]
fn delete_first_frame_moves_to_end_sentinel() {
    let mut anim = linear_animation(2);
    assert_eq!(anim.cursor(), Some(0));
    anim.delete_at_cursor().unwrap();
    assert_eq!(anim.cursor(), None);
    assert_eq!(anim.len(), 1);
}

#[test]
fn deleting_only_frame_leaves_end_sentinel() {
    let mut anim = linear_animation(1);
    anim.delete_at_cursor().unwrap();
    assert!(anim.is_empty());
    assert_eq!(anim.cursor(), None);
    assert!(anim.delete_at_cursor().is_none());
}

#[test]
fn steps_are_no_ops_at_boundaries() {
    let mut anim = linear_animation(2);
    assert!(!anim.step_backward());
    assert!(anim.step_forward());
    assert!(!anim.step_forward());
    assert_eq!(anim.cursor(), Some(1));

    let mut empty = Animation::new();
    assert!(!empty.step_forward());
    assert!(!empty.step_backward());
}

#[test]
fn step_back_from_end_sentinel_reaches_last_frame() {
    let mut anim = linear_animation(3);
    anim.set_cursor(None);
    assert!(!anim.step_forward());
    assert!(anim.step_backward());
    assert_eq!(anim.cursor(), Some(2));
}

// ============================================================================
// Frames against a scene
// ============================================================================

#[test]
fn delete_then_load_restores_predecessor_snapshot() {
    let (mut scene, nodes) = two_node_scene();
    let mut anim = Animation::new();

    let first = RigidTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    scene.set_pose(nodes[0], first).unwrap();
    anim.insert_after_cursor(Frame::capture(&scene, &nodes).unwrap())
        .unwrap();

    scene
        .set_pose(nodes[0], RigidTransform::from_rotation(Quat::from_rotation_x(1.0)))
        .unwrap();
    anim.insert_after_cursor(Frame::capture(&scene, &nodes).unwrap())
        .unwrap();

    anim.delete_at_cursor().unwrap();
    anim.current().unwrap().apply(&mut scene, &nodes).unwrap();
    assert_eq!(scene.pose(nodes[0]).unwrap(), first);
}

#[test]
fn applying_wrong_length_frame_fails_without_changes() {
    let (mut scene, nodes) = two_node_scene();
    let err = marker(3.0).apply(&mut scene, &nodes).unwrap_err();
    assert!(matches!(
        err,
        PoseError::FrameLengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
    assert_eq!(scene.pose(nodes[0]).unwrap(), RigidTransform::IDENTITY);
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn interpolation_passes_through_keyframes() {
    let anim = linear_animation(4);
    let window = anim.window(1).unwrap();

    let start = interpolate_frames(window, 0.0);
    let end = interpolate_frames(window, 1.0);
    assert!(start.poses()[0].abs_diff_eq(&anim.frames()[1].poses()[0], EPSILON));
    assert!(end.poses()[0].abs_diff_eq(&anim.frames()[2].poses()[0], EPSILON));
}

#[test]
fn evenly_spaced_translations_interpolate_linearly() {
    let anim = linear_animation(4);
    let mid = interpolate_frames(anim.window(1).unwrap(), 0.5);
    // Catmull-Rom tangents of equally spaced keys keep the motion uniform.
    assert!(approx(marker_x(&mid), 1.5));
    let rotation = mid.poses()[0].rotation;
    assert!(same_rotation(rotation, Quat::from_rotation_y(0.15), 1e-4));
}

#[test]
fn sample_ends_exactly_past_last_segment() {
    let anim = linear_animation(5);
    // Segments i = 1 and 2 are playable, i.e. t in [0, 2).
    assert!(sample(&anim, 0.0).is_some());
    assert!(sample(&anim, 1.99).is_some());
    assert!(sample(&anim, 2.0).is_none());
    assert!(sample(&linear_animation(3), 0.0).is_none());
}

// ============================================================================
// Playback
// ============================================================================

fn scene_for(anim: &Animation) -> (SceneGraph, Vec<NodeKey>) {
    let mut scene = SceneGraph::new();
    for i in 0..anim.frame_len().unwrap_or(0) {
        scene
            .add_transform(scene.root(), format!("N{i}"), RigidTransform::IDENTITY)
            .unwrap();
    }
    let nodes = scene.transform_nodes();
    (scene, nodes)
}

#[test]
fn playback_runs_until_segment_index_exceeds_count_minus_three() {
    let mut anim = linear_animation(5);
    let (mut scene, nodes) = scene_for(&anim);
    let mut player = Player::new(1000, 10);
    assert_eq!(player.tick_ms(), 100);

    assert!(player.play());
    let mut shown = 0;
    loop {
        match player.tick(&mut anim, &mut scene, &nodes).unwrap() {
            TickOutcome::Continue => shown += 1,
            TickOutcome::Finished => break,
            TickOutcome::Idle => unreachable!(),
        }
    }
    // t = 0.0, 0.1, ..., 1.9 are shown; t = 2.0 ends.
    assert_eq!(shown, 20);
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(anim.cursor(), Some(3));
    assert!(approx(marker_x(&Frame::capture(&scene, &nodes).unwrap()), 3.0));
}

#[test]
fn short_animation_finishes_immediately() {
    let mut anim = linear_animation(1);
    let (mut scene, nodes) = scene_for(&anim);
    let mut player = Player::default();
    player.play();
    assert_eq!(
        player.tick(&mut anim, &mut scene, &nodes).unwrap(),
        TickOutcome::Finished
    );
    assert_eq!(anim.cursor(), Some(0));

    let mut empty = Animation::new();
    player.play();
    assert_eq!(
        player.tick(&mut empty, &mut scene, &nodes).unwrap(),
        TickOutcome::Finished
    );
    assert_eq!(empty.cursor(), None);
}

#[test]
fn stop_request_is_honoured_at_next_tick() {
    let mut anim = linear_animation(6);
    let (mut scene, nodes) = scene_for(&anim);
    let mut player = Player::default();
    player.play();
    assert_eq!(
        player.tick(&mut anim, &mut scene, &nodes).unwrap(),
        TickOutcome::Continue
    );

    assert!(player.request_stop());
    assert!(!player.request_stop());
    assert_eq!(player.state(), PlaybackState::StopRequested);

    assert_eq!(
        player.tick(&mut anim, &mut scene, &nodes).unwrap(),
        TickOutcome::Finished
    );
    assert!(!player.is_playing());
    assert_eq!(anim.cursor(), Some(4));
    assert_eq!(
        player.tick(&mut anim, &mut scene, &nodes).unwrap(),
        TickOutcome::Idle
    );
}

#[test]
fn run_to_end_counts_ticks() {
    let mut anim = linear_animation(4);
    let (mut scene, nodes) = scene_for(&anim);
    let mut player = Player::new(160, 100);
    player.play();
    // One segment of 160 ms at 10 ms per tick: 16 shown + 1 finishing.
    assert_eq!(player.run_to_end(&mut anim, &mut scene, &nodes).unwrap(), 17);
}

#[test]
fn frame_rates_above_a_thousand_still_advance() {
    let mut anim = linear_animation(4);
    let (mut scene, nodes) = scene_for(&anim);
    let mut player = Player::new(100, 5000);
    assert_eq!(player.tick_ms(), 1);
    player.play();
    // One segment of 100 ms at 1 ms per tick: 100 shown + 1 finishing.
    assert_eq!(player.run_to_end(&mut anim, &mut scene, &nodes).unwrap(), 101);
}

// ============================================================================
// File I/O
// ============================================================================

#[test]
fn save_then_load_reproduces_every_pose() {
    let frames = (0..3)
        .map(|i| {
            let f = i as f32;
            Frame::new(vec![
                RigidTransform::new(
                    Vec3::new(0.1 * f, -1.0 / 3.0, 2.5e-7),
                    Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 0.3 + f),
                ),
                RigidTransform::from_translation(Vec3::new(f, f * f, -f)),
            ])
        })
        .collect();
    let anim = Animation::from_frames(frames).unwrap();

    let mut buffer = Vec::new();
    save_animation(&anim, 2, &mut buffer).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.starts_with("3 2\n"));
    assert_eq!(text.lines().count(), 1 + 3 * 2 * 2);

    let loaded = load_animation(Cursor::new(buffer), 2).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.cursor(), Some(0));
    for (a, b) in anim.frames().iter().zip(loaded.frames()) {
        for (p, q) in a.poses().iter().zip(b.poses()) {
            assert_eq!(p.translation, q.translation);
            assert!(same_rotation(p.rotation, q.rotation, EPSILON));
        }
    }
}

#[test]
fn file_round_trip_with_tempfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animation.txt");
    let anim = linear_animation(4);

    save_animation_to_file(&anim, 1, &path).unwrap();
    let loaded = load_animation_from_file(&path, 1).unwrap();
    assert_eq!(loaded.len(), 4);
    assert_eq!(marker_x(&loaded.frames()[3]), 3.0);
}

#[test]
fn loading_for_a_different_scene_is_rejected() {
    let text = "1 3\n0 0 0\n1 0 0 0\n0 0 0\n1 0 0 0\n0 0 0\n1 0 0 0\n";
    let err = load_animation(text.as_bytes(), 24).unwrap_err();
    assert!(matches!(
        err,
        PoseError::FrameLengthMismatch {
            expected: 24,
            actual: 3
        }
    ));
}

#[test]
fn huge_frame_count_is_a_format_error() {
    let text = format!("{} 1\n0 0 0\n1 0 0 0\n", u64::MAX);
    let err = load_animation(text.as_bytes(), 1).unwrap_err();
    assert!(matches!(err, PoseError::AnimationFormat { .. }));
}

#[test]
fn empty_animation_header_ignores_node_count() {
    let anim = load_animation("0 0\n".as_bytes(), 24).unwrap();
    assert!(anim.is_empty());
    assert_eq!(anim.cursor(), None);
}

#[test]
fn malformed_number_reports_line() {
    let text = "1 1\n0 zero 0\n1 0 0 0\n";
    let err = load_animation(text.as_bytes(), 1).unwrap_err();
    assert!(matches!(err, PoseError::AnimationFormat { line: 2, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_animation_from_file(dir.path().join("nope.txt"), 1).unwrap_err();
    assert!(matches!(err, PoseError::IoError(_)));
}
