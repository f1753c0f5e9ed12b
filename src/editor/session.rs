use glam::{Mat4, Vec2, Vec3};

use crate::animation::{self, Animation, Frame, Player, TickOutcome};
use crate::camera::Projection;
use crate::editor::command::{Command, HELP_TEXT};
use crate::editor::input::{ButtonState, MouseButton, PointerState};
use crate::errors::{PoseError, Result};
use crate::manipulation::{Arcball, DragMode, ManipulationContext, drag_increment};
use crate::math::RigidTransform;
use crate::pick;
use crate::render::{
    DrawCall, Drawer, FrameUniforms, HeadlessBackend, PassKind, RenderBackend, normal_matrix,
};
use crate::scene::robot::{SceneHandles, build_default_scene};
use crate::scene::{NodeKey, SceneGraph};
use crate::settings::EditorSettings;

/// Whether the host should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// All mutable state of one editor window.
///
/// The host forwards window events ([`handle_key`](Self::handle_key),
/// [`handle_mouse_button`](Self::handle_mouse_button),
/// [`handle_mouse_move`](Self::handle_mouse_move),
/// [`resize`](Self::resize)), calls [`tick`](Self::tick) every
/// [`Player::tick_interval`] while an animation plays, and
/// [`render`](Self::render) whenever it redraws.
pub struct EditorSession<B: RenderBackend = HeadlessBackend> {
    settings: EditorSettings,
    scene: SceneGraph,
    handles: SceneHandles,
    /// Canonical transform-node order; the scene structure never changes.
    nodes: Vec<NodeKey>,
    projection: Projection,
    backend: B,

    eye: NodeKey,
    picked: Option<NodeKey>,
    sky_sky: bool,
    pick_mode: bool,
    pointer: PointerState,
    arcball: Arcball,

    animation: Animation,
    player: Player,
}

impl EditorSession<HeadlessBackend> {
    /// Session on the CPU backend.
    pub fn headless(settings: EditorSettings) -> Result<Self> {
        let backend = HeadlessBackend::new(
            settings.window_width,
            settings.window_height,
            settings.srgb_framebuffer,
        );
        Self::new(settings, backend)
    }
}

impl<B: RenderBackend> EditorSession<B> {
    pub fn new(settings: EditorSettings, mut backend: B) -> Result<Self> {
        let (scene, handles) = build_default_scene()?;
        let nodes = scene.transform_nodes();
        let projection = settings.projection();
        backend.resize(projection.width(), projection.height());
        let arcball = Arcball::new(projection.arcball_screen_radius(settings.arcball_radius_factor));
        let player = Player::new(settings.ms_between_keyframes, settings.fps);

        log::info!(
            "Editor session ready: {} transform nodes, {}x{} viewport",
            nodes.len(),
            projection.width(),
            projection.height()
        );

        Ok(Self {
            settings,
            scene,
            handles,
            nodes,
            projection,
            backend,
            eye: handles.sky,
            picked: None,
            sky_sky: false,
            pick_mode: false,
            pointer: PointerState::new(),
            arcball,
            animation: Animation::new(),
            player,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    /// Transform nodes in frame order.
    #[must_use]
    pub fn transform_nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    #[must_use]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn eye(&self) -> NodeKey {
        self.eye
    }

    #[must_use]
    pub fn picked(&self) -> Option<NodeKey> {
        self.picked
    }

    /// Node edited by drags: the picked node, or the sky when nothing is
    /// picked.
    #[must_use]
    pub fn target(&self) -> NodeKey {
        self.picked.unwrap_or(self.handles.sky)
    }

    #[must_use]
    pub fn sky_sky(&self) -> bool {
        self.sky_sky
    }

    #[must_use]
    pub fn pick_mode(&self) -> bool {
        self.pick_mode
    }

    #[must_use]
    pub fn arcball(&self) -> &Arcball {
        &self.arcball
    }

    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn manipulation_context(&self) -> ManipulationContext {
        ManipulationContext {
            sky: self.handles.sky,
            eye: self.eye,
            target: self.target(),
            sky_sky: self.sky_sky,
        }
    }

    /// Selects `node` as the drag target without a pick pass. The ground
    /// and the world root are not selectable.
    pub fn select(&mut self, node: Option<NodeKey>) -> Result<()> {
        let node = match node {
            Some(key) if key == self.handles.ground || key == self.handles.world => None,
            Some(key) => {
                self.scene.transform_node(key)?;
                Some(key)
            }
            None => None,
        };
        self.picked = node;
        Ok(())
    }

    /// Directly sets a node's local pose, e.g. for scripted edits.
    pub fn set_pose(&mut self, node: NodeKey, pose: RigidTransform) -> Result<()> {
        self.scene.set_pose(node, pose)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.backend.resize(self.projection.width(), self.projection.height());
        self.arcball.screen_radius = self
            .projection
            .arcball_screen_radius(self.settings.arcball_radius_factor);
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Maps a key press to a command and runs it. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: char) -> Result<SessionControl> {
        match Command::from_key(key) {
            Some(command) => self.execute(command),
            None => Ok(SessionControl::Continue),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<SessionControl> {
        if command.is_editing() && self.player.is_playing() {
            log::warn!("Cannot operate while an animation is playing");
            return Err(PoseError::PlaybackActive);
        }

        match command {
            Command::Help => log::info!("Help:\n{HELP_TEXT}"),
            Command::CycleEye => self.cycle_eye(),
            Command::ToggleSkySky => {
                self.sky_sky = !self.sky_sky;
                log::info!(
                    "Editing sky eye w.r.t. {} frame",
                    if self.sky_sky { "sky-sky" } else { "world-sky" }
                );
            }
            Command::TogglePickMode => {
                self.pick_mode = !self.pick_mode;
                log::info!("Picking mode is {}", if self.pick_mode { "on" } else { "off" });
            }
            Command::LoadFrame => {
                self.load_current_frame()?;
            }
            Command::UpdateFrame => {
                let frame = self.capture_frame()?;
                if self.animation.current().is_some() {
                    self.animation.replace_at_cursor(frame)?;
                    log::info!("Updated frame {:?}", self.animation.cursor());
                } else {
                    self.animation.insert_after_cursor(frame)?;
                    log::info!("Created a frame");
                }
            }
            Command::NextFrame => {
                if self.animation.step_forward() {
                    self.load_current_frame()?;
                }
            }
            Command::PreviousFrame => {
                if self.animation.step_backward() {
                    self.load_current_frame()?;
                }
            }
            Command::DeleteFrame => {
                if self.animation.delete_at_cursor().is_some() {
                    log::info!("Deleted frame, {} left", self.animation.len());
                    self.load_current_frame()?;
                }
            }
            Command::NewFrame => {
                let frame = self.capture_frame()?;
                let index = self.animation.insert_after_cursor(frame)?;
                log::info!("Created a frame at {index}");
            }
            Command::LoadAnimation => self.load_animation()?,
            Command::SaveAnimation => {
                animation::save_animation_to_file(
                    &self.animation,
                    self.nodes.len(),
                    &self.settings.animation_file,
                )?;
            }
            Command::PlayStop => {
                if self.player.is_playing() {
                    self.player.request_stop();
                } else {
                    self.player.play();
                }
            }
            Command::Slower => {
                self.player.slower();
            }
            Command::Faster => {
                self.player.faster();
            }
            Command::Quit => return Ok(SessionControl::Quit),
        }
        Ok(SessionControl::Continue)
    }

    fn cycle_eye(&mut self) {
        let eyes = [self.handles.sky, self.handles.robots[0], self.handles.robots[1]];
        let current = eyes.iter().position(|&e| e == self.eye).unwrap_or(0);
        self.eye = eyes[(current + 1) % eyes.len()];
        log::info!("Active eye is {}", self.node_name(self.eye));
    }

    fn node_name(&self, key: NodeKey) -> &str {
        self.scene.get(key).map_or("<missing>", |node| node.name())
    }

    fn capture_frame(&self) -> Result<Frame> {
        Frame::capture(&self.scene, &self.nodes)
    }

    /// Copies the cursor frame into the scene; no-op at the end sentinel.
    fn load_current_frame(&mut self) -> Result<bool> {
        match self.animation.current() {
            Some(frame) => {
                frame.apply(&mut self.scene, &self.nodes)?;
                log::info!("Loaded frame {:?}", self.animation.cursor());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replaces the animation with the configured file. On any error the
    /// current animation is kept.
    fn load_animation(&mut self) -> Result<()> {
        let path = &self.settings.animation_file;
        match animation::load_animation_from_file(path, self.nodes.len()) {
            Ok(loaded) => {
                self.animation = loaded;
                self.load_current_frame()?;
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to load animation from {}: {err}", path.display());
                Err(err)
            }
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Advances playback by one step. See [`Player::tick`].
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.player.tick(&mut self.animation, &mut self.scene, &self.nodes)
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    /// Button press or release at window position `(x, y)` (origin top-left).
    ///
    /// In pick mode a left button event runs a pick pass at that position
    /// and leaves pick mode.
    pub fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    ) -> Result<()> {
        let position = PointerState::to_gl(x, y, self.projection.height());
        self.pointer.handle_button(button, state, position);

        if self.pick_mode && button == MouseButton::Left {
            self.pick_mode = false;
            let result = self.pick_at(position);
            log::info!("Picking mode is off");
            result?;
        }
        Ok(())
    }

    /// Pointer motion to window position `(x, y)` (origin top-left).
    ///
    /// Returns whether a pose changed.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) -> Result<bool> {
        let position = PointerState::to_gl(x, y, self.projection.height());
        let previous = self.pointer.position;
        let delta = self.pointer.handle_move(position);

        let Some(mode) = DragMode::from_buttons(self.pointer.buttons) else {
            return Ok(false);
        };

        let context = self.manipulation_context();
        let arcball_pose = self.refresh_arcball()?;
        let translation_scale = if arcball_pose.is_some() {
            self.arcball.scale
        } else {
            self.settings.fallback_translation_scale
        };

        let rotation = match (mode, arcball_pose) {
            (DragMode::Rotate, Some(pose)) => {
                let inverse_eye = self.scene.world_pose(self.eye)?.inverse();
                self.projection
                    .screen_space_coord((inverse_eye * pose).translation)
                    .map(|center| self.arcball.rotation(center, previous, position))
            }
            _ => None,
        };

        let increment = drag_increment(mode, delta, translation_scale, rotation);
        context.apply(&mut self.scene, increment)
    }

    /// Recomputes the arcball placement and, unless a depth drag is in
    /// progress, its world scale. Returns the placement.
    fn refresh_arcball(&mut self) -> Result<Option<RigidTransform>> {
        let pose = self.manipulation_context().arcball_pose(&self.scene)?;
        if let Some(pose) = pose
            && !self.pointer.buttons.is_depth_drag()
        {
            let inverse_eye = self.scene.world_pose(self.eye)?.inverse();
            let depth = (inverse_eye * pose).translation.z;
            self.arcball.update_scale(&self.projection, depth);
        }
        Ok(pose)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn frame_uniforms(&self, inverse_eye: RigidTransform) -> Result<FrameUniforms> {
        let light = |key: NodeKey| -> Result<Vec3> {
            Ok(inverse_eye.transform_point(self.scene.world_pose(key)?.translation))
        };
        Ok(FrameUniforms {
            projection: self.projection.projection_matrix(),
            eye_lights: [light(self.handles.lights[0])?, light(self.handles.lights[1])?],
        })
    }

    /// Draws the scene and, when shown, the arcball.
    pub fn render(&mut self) -> Result<()> {
        let inverse_eye = self.scene.world_pose(self.eye)?.inverse();
        let uniforms = self.frame_uniforms(inverse_eye)?;
        let arcball_pose = self.refresh_arcball()?;

        self.backend.begin_frame(&uniforms, PassKind::Display);
        {
            let mut drawer = Drawer::new(&self.scene, &mut self.backend, inverse_eye);
            self.scene.accept(self.scene.root(), &mut drawer);
        }

        if let Some(pose) = arcball_pose
            && let Some(geometry) = self.scene.geometry(self.handles.sphere)
            && let Some(material) = self.scene.material(self.handles.arcball_material)
        {
            let model_view = (inverse_eye * pose).to_mat4()
                * Mat4::from_scale(Vec3::splat(self.arcball.world_radius()));
            self.backend.draw(&DrawCall {
                node: None,
                model_view,
                normal_matrix: normal_matrix(&model_view),
                geometry,
                material,
                id_color: None,
            });
        }
        Ok(())
    }

    /// Runs a pick pass at GL window position `position` and selects the
    /// result. Hitting the ground or the background clears the selection.
    pub fn pick_at(&mut self, position: Vec2) -> Result<Option<NodeKey>> {
        let inverse_eye = self.scene.world_pose(self.eye)?.inverse();
        let uniforms = self.frame_uniforms(inverse_eye)?;
        // Positions are whole pixels in practice; negative ones clamp to 0.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x, y) = (position.x.max(0.0) as u32, position.y.max(0.0) as u32);

        let hit = pick::pick(
            &self.scene,
            &mut self.backend,
            &uniforms,
            inverse_eye,
            Some(self.handles.pick_material),
            x,
            y,
        )?;
        let selected = hit.filter(|&key| key != self.handles.ground);
        self.picked = selected;

        match selected {
            Some(key) => log::info!("Part picked: {}", self.node_name(key)),
            None => log::info!("No part picked"),
        }
        Ok(selected)
    }
}
