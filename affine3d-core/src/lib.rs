/// Affine3D Core Library - wireframe geometry, transforms and projection
///
/// This library provides the core of the interactive wireframe viewer:
/// procedural wire meshes, the model matrix pipeline, a pinhole projector,
/// the jump animation and the session that ties them to input events.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod session;
pub mod transform;

// Re-export commonly used types
pub use animation::{JumpAnimation, JumpState};
pub use config::{MeshKind, ViewerConfig};
pub use error::{Error, Result};
pub use geometry::{Edge, LetterParams, WireMesh};
pub use input::{ControlConfig, DragMode, InputEvent, Key};
pub use projection::{Camera, Frame, Segment, Viewport};
pub use session::{Hud, Session};
pub use transform::{Mat4, Pose, RotationState, Transform, Vec3};
