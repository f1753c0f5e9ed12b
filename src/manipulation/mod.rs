//! Interactive pose editing: the reference-frame and inversion rules for
//! pointer drags, and the arcball widget.

pub mod arcball;
pub mod controller;

pub use arcball::Arcball;
pub use controller::{
    DragMode, Inversion, ManipulationContext, ManipulationSettings, drag_increment,
};
