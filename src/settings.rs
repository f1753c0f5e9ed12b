//! Editor Settings
//!
//! Everything the editor session reads at startup: viewport size, frustum,
//! playback timing, the animation file location and arcball sizing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use posekit::settings::EditorSettings;
//!
//! // Defaults: 512x512 window, 60° minimum fov, 2 s between keyframes
//! let settings = EditorSettings::default();
//!
//! // Partial JSON, missing fields keep their defaults
//! let settings = EditorSettings::from_json_str(r#"{ "fps": 30 }"#)?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::player::{DEFAULT_FPS, DEFAULT_MS_BETWEEN_KEYFRAMES};
use crate::camera::Projection;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub window_width: u32,
    pub window_height: u32,

    /// Smallest vertical field of view, in degrees. Portrait windows widen
    /// it so the horizontal angle stays at this value.
    pub min_fov_y: f32,
    /// Distance to the near plane (positive).
    pub near: f32,
    /// Distance to the far plane (positive).
    pub far: f32,

    pub ms_between_keyframes: u32,
    pub fps: u32,
    /// File used by the load / save animation commands.
    pub animation_file: PathBuf,

    /// The framebuffer encodes to sRGB on write (pick colors are
    /// pre-linearized to compensate).
    pub srgb_framebuffer: bool,

    /// Arcball screen radius as a fraction of the smaller window side.
    pub arcball_radius_factor: f32,
    /// World units per pixel for drags while no arcball is shown.
    pub fallback_translation_scale: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            window_width: 512,
            window_height: 512,
            min_fov_y: 60.0,
            near: 0.1,
            far: 50.0,
            ms_between_keyframes: DEFAULT_MS_BETWEEN_KEYFRAMES,
            fps: DEFAULT_FPS,
            animation_file: PathBuf::from("animation.txt"),
            srgb_framebuffer: true,
            arcball_radius_factor: 0.25,
            fallback_translation_scale: 0.01,
        }
    }
}

impl EditorSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::info!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection::new(
            self.window_width,
            self.window_height,
            self.min_fov_y,
            self.near,
            self.far,
        )
    }
}
