#![forbid(unsafe_code)]

pub mod anim;
pub mod asset;
pub mod bounds;
pub mod camera;
pub mod compose;
pub mod error;
pub mod lighting;
pub mod memory;
pub mod render;
pub mod scene;
pub mod schedule;

pub use anim::{Curve, Interp, Key};
pub use asset::{AssetKind, AssetShape, NormalizedAsset};
pub use bounds::BoundingBox;
pub use camera::{CameraConfig, CameraRig, MotionMode, MotionPlan};
pub use compose::{ComposeConfig, ComposedScene, compose};
pub use error::{VitrineError, VitrineResult};
pub use lighting::LightingStyle;
pub use memory::RecordedScene;
pub use render::{RenderConfig, RenderEngine, RenderSettings};
pub use scene::{CameraSpec, Channel, DepthOfField, EntityId, LightKind, LightSpec, SceneBuilder};
