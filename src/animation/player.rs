use std::time::Duration;

use crate::animation::interpolate;
use crate::animation::track::Animation;
use crate::errors::Result;
use crate::scene::{NodeKey, SceneGraph};

pub const DEFAULT_MS_BETWEEN_KEYFRAMES: u32 = 2000;
pub const DEFAULT_FPS: u32 = 60;
/// Highest frame rate with a non-zero millisecond tick.
pub const MAX_FPS: u32 = 1000;
/// Step of the speed controls, and the lower bound of the keyframe spacing.
pub const SPEED_STEP_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    /// Playing, but the next tick ends playback.
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is playing; the tick did nothing.
    Idle,
    /// A pose was shown; schedule another tick after
    /// [`Player::tick_interval`].
    Continue,
    /// Playback ended this tick, the cursor frame is loaded.
    Finished,
}

/// Tick driven playback scheduler.
///
/// The host calls [`Player::tick`] every [`Player::tick_interval`] while
/// [`Player::is_playing`]. Each tick shows the pose at the current virtual
/// time, then either advances the clock by one interval or finishes. A stop
/// request is honoured at the next tick boundary.
#[derive(Debug, Clone)]
pub struct Player {
    state: PlaybackState,
    elapsed_ms: u32,
    ms_between_keyframes: u32,
    fps: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_MS_BETWEEN_KEYFRAMES, DEFAULT_FPS)
    }
}

impl Player {
    #[must_use]
    pub fn new(ms_between_keyframes: u32, fps: u32) -> Self {
        Self {
            state: PlaybackState::Idle,
            elapsed_ms: 0,
            ms_between_keyframes: ms_between_keyframes.max(SPEED_STEP_MS),
            fps: fps.clamp(1, MAX_FPS),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Playing or stopping; either way the scene poses belong to playback.
    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state != PlaybackState::Idle
    }

    #[inline]
    #[must_use]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    #[inline]
    #[must_use]
    pub fn ms_between_keyframes(&self) -> u32 {
        self.ms_between_keyframes
    }

    #[inline]
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Virtual time advanced per tick.
    #[inline]
    #[must_use]
    pub fn tick_ms(&self) -> u32 {
        1000 / self.fps
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms()))
    }

    /// Animation time in keyframe intervals.
    #[must_use]
    pub fn animation_time(&self) -> f32 {
        self.elapsed_ms as f32 / self.ms_between_keyframes as f32
    }

    /// Starts playback from time zero. Returns `false` if already playing.
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        log::info!("Playing animation...");
        self.state = PlaybackState::Playing;
        self.elapsed_ms = 0;
        true
    }

    /// Asks playback to end at the next tick. Returns `false` if nothing is
    /// playing or a stop is already pending.
    pub fn request_stop(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => {
                log::info!("Stopping animation...");
                self.state = PlaybackState::StopRequested;
                true
            }
            PlaybackState::StopRequested => {
                log::info!("Animation stop already requested, please wait");
                false
            }
            PlaybackState::Idle => false,
        }
    }

    /// Spreads keyframes further apart.
    pub fn slower(&mut self) -> u32 {
        self.ms_between_keyframes += SPEED_STEP_MS;
        log::info!("{} ms between keyframes", self.ms_between_keyframes);
        self.ms_between_keyframes
    }

    /// Moves keyframes closer together, down to [`SPEED_STEP_MS`].
    pub fn faster(&mut self) -> u32 {
        self.ms_between_keyframes = self
            .ms_between_keyframes
            .saturating_sub(SPEED_STEP_MS)
            .max(SPEED_STEP_MS);
        log::info!("{} ms between keyframes", self.ms_between_keyframes);
        self.ms_between_keyframes
    }

    /// Runs one playback step against `scene`.
    ///
    /// `nodes` is the scene's canonical transform-node list. On completion
    /// (track ended or stop requested) the player returns to idle, the
    /// cursor is parked by [`Animation::rest_cursor`] and its frame loaded.
    pub fn tick(
        &mut self,
        animation: &mut Animation,
        scene: &mut SceneGraph,
        nodes: &[NodeKey],
    ) -> Result<TickOutcome> {
        if !self.is_playing() {
            return Ok(TickOutcome::Idle);
        }

        let t = self.animation_time();
        let ended = match interpolate::sample(animation, t) {
            Some(frame) => {
                if let Err(err) = frame.apply(scene, nodes) {
                    self.state = PlaybackState::Idle;
                    return Err(err);
                }
                log::debug!("Showing animation at t = {t:.3}");
                false
            }
            None => true,
        };

        if !ended && self.state == PlaybackState::Playing {
            self.elapsed_ms += self.tick_ms();
            return Ok(TickOutcome::Continue);
        }

        self.state = PlaybackState::Idle;
        animation.rest_cursor();
        if let Some(frame) = animation.current() {
            frame.apply(scene, nodes)?;
        }
        log::info!("Finished playing animation");
        Ok(TickOutcome::Finished)
    }

    /// Ticks until playback finishes. Returns the number of ticks run.
    pub fn run_to_end(
        &mut self,
        animation: &mut Animation,
        scene: &mut SceneGraph,
        nodes: &[NodeKey],
    ) -> Result<usize> {
        let mut ticks = 0;
        while self.is_playing() {
            self.tick(animation, scene, nodes)?;
            ticks += 1;
        }
        Ok(ticks)
    }
}
