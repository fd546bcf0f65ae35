use std::path::Path;

use glam::{DQuat, DVec3};

use crate::{anim::Interp, error::VitrineResult, render::RenderSettings};

/// Stable handle for an entity created during the current run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(pub u32);

/// The animatable channels the composition writes. Frame numbers are always
/// explicit parameters; there is no ambient "current frame".
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Channel {
    /// World/parent-local Z position.
    LocationZ,
    /// Yaw around the vertical axis, in radians.
    RotationZ,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DepthOfField {
    /// Distance at which the subject is in focus. Held equal to the framing
    /// distance so the subject stays sharp for the whole move.
    pub focus_distance: f64,
    pub aperture_fstop: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraSpec {
    /// Angular aperture in degrees.
    pub fov_deg: f64,
    pub depth_of_field: Option<DepthOfField>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LightKind {
    Area,
    Spot,
    Sun,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightSpec {
    pub kind: LightKind,
    pub energy: f64,
    /// Emitter size for area lights.
    pub size: Option<f64>,
    /// Linear RGB tint; `None` means neutral white.
    pub color: Option<[f64; 3]>,
}

/// One mesh entity produced by a model import, with its vertex positions in
/// world space as reported by the host.
#[derive(Clone, Debug)]
pub struct ImportedPart {
    pub entity: EntityId,
    pub vertices: Vec<DVec3>,
}

/// The host scene-graph surface the composition pipeline writes through.
///
/// The engine never renders, rasterizes, or parses mesh files itself; it
/// asks the host to create entities and report imported geometry, then
/// drives transforms, keyframes, lights, and render settings. Substituting
/// an in-memory implementation ([`crate::memory::RecordedScene`]) makes the
/// whole pipeline testable without any host application.
pub trait SceneBuilder {
    /// Remove every entity from the scene. Idempotent; each run starts here.
    fn clear(&mut self);

    /// Create an invisible transform-only entity (parent group or pivot).
    fn create_empty(&mut self, name: &str) -> EntityId;

    /// Create a rectangular surface of the given dimensions centered at the
    /// origin, with the image at `source` mapped as its surface color.
    fn create_image_plane(
        &mut self,
        name: &str,
        source: &Path,
        width: f64,
        height: f64,
    ) -> VitrineResult<EntityId>;

    /// Import a mesh interchange file, returning every resulting part. An
    /// empty vec means the file produced no geometry.
    fn import_model(&mut self, path: &Path) -> VitrineResult<Vec<ImportedPart>>;

    fn create_camera(&mut self, name: &str, spec: CameraSpec) -> EntityId;

    fn create_light(&mut self, name: &str, spec: LightSpec) -> EntityId;

    fn set_parent(&mut self, child: EntityId, parent: EntityId);

    fn set_translation(&mut self, entity: EntityId, translation: DVec3);

    fn set_rotation(&mut self, entity: EntityId, rotation: DQuat);

    fn set_active_camera(&mut self, entity: EntityId);

    /// Write a keyframe anchor on one channel. Re-inserting at the same
    /// frame overwrites the existing anchor.
    fn insert_key(&mut self, entity: EntityId, channel: Channel, frame: u32, value: f64, interp: Interp);

    fn apply_render_settings(&mut self, settings: &RenderSettings);
}
