/// spin3d Core Library - Shared scene state and geometry
///
/// This library provides the front-end independent part of the demo:
/// mesh generation, rotation and projection math, the material/lighting
/// model, the control panel state and the scene host that ties them together.

pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod material;
pub mod projection;
pub mod scene;
pub mod shape;
pub mod speed;
pub mod transform;

// Re-export commonly used types
pub use config::{SceneConfig, ShapeSpec};
pub use controls::{ControlPanel, ErrorMessage, ShapeState};
pub use error::{ColorError, SpeedError};
pub use geometry::{GeometryArgs, Mesh, Triangle, Vertex};
pub use material::{AmbientLight, Color, DirectionalLight, LightRig, Material};
pub use projection::Camera;
pub use scene::SceneHost;
pub use shape::{ShapeInstance, ShapeKind, ShapeRenderer};
pub use speed::{RangeSpec, SPEED_RANGE};
pub use transform::{RotationState, Transform};
