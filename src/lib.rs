#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod math;
pub mod scene;
pub mod camera;
pub mod render;
pub mod pick;
pub mod animation;
pub mod manipulation;
pub mod editor;
pub mod settings;

pub use errors::{PoseError, Result};
pub use math::{QuatExt, RigidTransform};
pub use scene::{NodeKey, SceneGraph, SceneNode, SceneVisitor, Walk};
pub use camera::Projection;
pub use render::{HeadlessBackend, RenderBackend};
pub use animation::{Animation, Frame, Player};
pub use manipulation::ManipulationContext;
pub use editor::{Command, EditorSession};
pub use settings::EditorSettings;
