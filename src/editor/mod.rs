//! Editor session
//!
//! - [`EditorSession`]: the single owner of all mutable editor state (scene,
//!   eye, selection, arcball, keyframes, playback)
//! - [`Command`]: keyboard command mapping
//! - [`input`]: pointer and mouse button tracking

pub mod command;
pub mod input;
pub mod session;

pub use command::{Command, HELP_TEXT};
pub use input::{ButtonState, MouseButton, MouseButtons, PointerState};
pub use session::{EditorSession, SessionControl};
