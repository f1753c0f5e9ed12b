//! Scripted editing session on the CPU backend.
//!
//! Poses robot 1 through a few keyframes, plays them back, writes the
//! animation file and reads it again.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless_session [settings.json]
//! ```

use glam::{Quat, Vec3};
use posekit::animation::TickOutcome;
use posekit::editor::{ButtonState, EditorSession, MouseButton};
use posekit::math::{QuatExt, RigidTransform};
use posekit::settings::EditorSettings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut settings = match std::env::args().nth(1) {
        Some(path) => EditorSettings::from_json_file(path)?,
        None => EditorSettings::default(),
    };
    let out_dir = tempfile::tempdir()?;
    settings.animation_file = out_dir.path().join("animation.txt");

    let mut session = EditorSession::headless(settings)?;
    session.handle_key('h')?;

    // 1. Pick robot 1 by clicking its torso
    let (x, y) = {
        let scene = session.scene();
        let inverse_eye = scene.world_pose(session.eye())?.inverse();
        let torso = scene.world_pose(session.handles().robots[0])?.translation;
        let gl = session
            .projection()
            .screen_space_coord(inverse_eye.transform_point(torso))
            .ok_or_else(|| anyhow::anyhow!("robot is behind the camera"))?
            .round();
        (gl.x, session.projection().height() as f32 - 1.0 - gl.y)
    };
    session.handle_key('p')?;
    session.handle_mouse_button(MouseButton::Left, ButtonState::Pressed, x, y)?;
    session.handle_mouse_button(MouseButton::Left, ButtonState::Released, x, y)?;
    let robot = session
        .picked()
        .ok_or_else(|| anyhow::anyhow!("nothing picked at ({x}, {y})"))?;

    // 2. Record keyframes: a turn in place, then a short walk
    for step in 0..5 {
        let angle = step as f32 * 30.0;
        let pose = RigidTransform::new(
            Vec3::new(-2.0 + step as f32 * 0.25, 1.0, 0.0),
            Quat::from_y_degrees(angle),
        );
        session.set_pose(robot, pose)?;
        session.handle_key('n')?;
    }

    // 3. Nudge the last keyframe with a right-button drag
    session.handle_mouse_button(MouseButton::Right, ButtonState::Pressed, 200.0, 200.0)?;
    session.handle_mouse_move(220.0, 190.0)?;
    session.handle_mouse_button(MouseButton::Right, ButtonState::Released, 220.0, 190.0)?;
    session.handle_key('u')?;

    // 4. Play back, speeding up first
    session.handle_key('+')?;
    session.handle_key('y')?;
    let mut ticks = 0;
    while session.tick()? != TickOutcome::Finished {
        ticks += 1;
        if ticks % 30 == 0 {
            session.render()?;
            let pose = session.scene().pose(robot)?;
            println!("tick {ticks:4}: robot at {:.3}", pose.translation);
        }
    }
    println!(
        "Played {} keyframes in {ticks} ticks, cursor parked at {:?}",
        session.animation().len(),
        session.animation().cursor()
    );

    // 5. Save, clear and reload
    session.handle_key('w')?;
    while !session.animation().is_empty() {
        if session.animation().cursor().is_none() {
            session.handle_key('<')?;
        }
        session.handle_key('d')?;
    }
    session.handle_key('i')?;
    println!(
        "Reloaded {} keyframes from {}",
        session.animation().len(),
        session.settings().animation_file.display()
    );

    Ok(())
}
