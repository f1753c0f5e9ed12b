//! Keyframe Animation
//!
//! - [`Frame`]: one local pose per transform node, in canonical order
//! - [`Animation`]: the editable keyframe list and its cursor
//! - [`interpolate`]: smooth in-between poses from four neighbouring frames
//! - [`io`]: the plain-text animation file
//! - [`Player`]: the tick driven playback state machine

pub mod frame;
pub mod interpolate;
pub mod io;
pub mod player;
pub mod track;

pub use frame::Frame;
pub use interpolate::{Interpolatable, interpolate_frames, interpolate_pose};
pub use io::{load_animation, load_animation_from_file, save_animation, save_animation_to_file};
pub use player::{PlaybackState, Player, TickOutcome};
pub use track::Animation;
