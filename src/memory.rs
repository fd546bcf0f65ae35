use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::{DQuat, DVec3};

use crate::{
    anim::{Curve, Interp, Key},
    error::VitrineResult,
    render::RenderSettings,
    scene::{CameraSpec, Channel, EntityId, ImportedPart, LightSpec, SceneBuilder},
};

#[derive(Clone, Debug, serde::Serialize)]
pub enum EntityKind {
    Empty,
    Mesh { vertex_count: usize },
    ImagePlane { source: PathBuf, width: f64, height: f64 },
    Camera(CameraSpec),
    Light(LightSpec),
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub parent: Option<EntityId>,
    pub translation: DVec3,
    pub rotation: DQuat,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct CurveRecord {
    pub entity: EntityId,
    pub channel: Channel,
    pub curve: Curve,
}

/// In-memory [`SceneBuilder`]: records every call instead of mutating a host
/// application, which makes the composition pipeline inspectable, dumpable
/// as JSON, and testable without a host.
///
/// Model imports resolve against geometry registered with [`stub_model`];
/// a path with no stub imports zero parts, the same observable outcome as a
/// file with no meshes.
///
/// [`stub_model`]: RecordedScene::stub_model
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RecordedScene {
    entities: Vec<EntityRecord>,
    curves: Vec<CurveRecord>,
    active_camera: Option<EntityId>,
    render: Option<RenderSettings>,
    #[serde(skip)]
    model_stubs: BTreeMap<PathBuf, Vec<Vec<DVec3>>>,
}

impl RecordedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the geometry the "host" reports for `path`. Stubs model the
    /// host's import capability, not scene state, so they survive `clear`.
    pub fn stub_model(&mut self, path: impl Into<PathBuf>, meshes: Vec<Vec<DVec3>>) {
        self.model_stubs.insert(path.into(), meshes);
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn lights(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Light(_)))
    }

    pub fn active_camera(&self) -> Option<EntityId> {
        self.active_camera
    }

    pub fn render_settings(&self) -> Option<&RenderSettings> {
        self.render.as_ref()
    }

    pub fn curve(&self, entity: EntityId, channel: Channel) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|c| c.entity == entity && c.channel == channel)
            .map(|c| &c.curve)
    }

    /// Evaluate an animated channel at a frame.
    pub fn sample(&self, entity: EntityId, channel: Channel, frame: u32) -> Option<f64> {
        self.curve(entity, channel)?.sample(frame)
    }

    /// Translation accumulated up the parent chain (rest pose, ignoring
    /// animation and parent rotation — enough to check recentering).
    pub fn world_translation(&self, id: EntityId) -> DVec3 {
        let mut acc = DVec3::ZERO;
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let Some(e) = self.entity(cur) else { break };
            acc += e.translation;
            cursor = e.parent;
        }
        acc
    }

    fn push(&mut self, name: &str, kind: EntityKind) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(EntityRecord {
            id,
            name: name.to_string(),
            kind,
            parent: None,
            translation: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        });
        id
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.entities.iter_mut().find(|e| e.id == id)
    }
}

impl SceneBuilder for RecordedScene {
    fn clear(&mut self) {
        self.entities.clear();
        self.curves.clear();
        self.active_camera = None;
        self.render = None;
    }

    fn create_empty(&mut self, name: &str) -> EntityId {
        self.push(name, EntityKind::Empty)
    }

    fn create_image_plane(
        &mut self,
        name: &str,
        source: &Path,
        width: f64,
        height: f64,
    ) -> VitrineResult<EntityId> {
        Ok(self.push(
            name,
            EntityKind::ImagePlane {
                source: source.to_path_buf(),
                width,
                height,
            },
        ))
    }

    fn import_model(&mut self, path: &Path) -> VitrineResult<Vec<ImportedPart>> {
        let meshes = self.model_stubs.get(path).cloned().unwrap_or_default();
        let mut parts = Vec::with_capacity(meshes.len());
        for (i, vertices) in meshes.into_iter().enumerate() {
            let entity = self.push(
                &format!("part_{i}"),
                EntityKind::Mesh {
                    vertex_count: vertices.len(),
                },
            );
            parts.push(ImportedPart { entity, vertices });
        }
        Ok(parts)
    }

    fn create_camera(&mut self, name: &str, spec: CameraSpec) -> EntityId {
        self.push(name, EntityKind::Camera(spec))
    }

    fn create_light(&mut self, name: &str, spec: LightSpec) -> EntityId {
        self.push(name, EntityKind::Light(spec))
    }

    fn set_parent(&mut self, child: EntityId, parent: EntityId) {
        if let Some(e) = self.record_mut(child) {
            e.parent = Some(parent);
        }
    }

    fn set_translation(&mut self, entity: EntityId, translation: DVec3) {
        if let Some(e) = self.record_mut(entity) {
            e.translation = translation;
        }
    }

    fn set_rotation(&mut self, entity: EntityId, rotation: DQuat) {
        if let Some(e) = self.record_mut(entity) {
            e.rotation = rotation;
        }
    }

    fn set_active_camera(&mut self, entity: EntityId) {
        self.active_camera = Some(entity);
    }

    fn insert_key(&mut self, entity: EntityId, channel: Channel, frame: u32, value: f64, interp: Interp) {
        let key = Key { frame, value, interp };
        if let Some(rec) = self
            .curves
            .iter_mut()
            .find(|c| c.entity == entity && c.channel == channel)
        {
            rec.curve.insert(key);
            return;
        }
        let mut curve = Curve::default();
        curve.insert(key);
        self.curves.push(CurveRecord {
            entity,
            channel,
            curve,
        });
    }

    fn apply_render_settings(&mut self, settings: &RenderSettings) {
        self.render = Some(*settings);
    }
}
