use std::path::Path;

use crate::{
    bounds::BoundingBox,
    error::{VitrineError, VitrineResult},
    scene::{EntityId, SceneBuilder},
};

/// Plane height for image assets, in world units. Width follows from the
/// source aspect ratio.
pub const REFERENCE_PLANE_HEIGHT: f64 = 10.0;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tga", "tif", "tiff", "webp"];
const MODEL_EXTENSIONS: &[&str] = &["glb", "gltf", "obj"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AssetKind {
    Image,
    Model,
}

#[derive(Clone, Debug, serde::Serialize)]
pub enum AssetShape {
    ImagePlane { width: f64, height: f64 },
    ModelGroup { bounds: BoundingBox },
}

/// An asset loaded into the scene and recentered at the world origin.
#[derive(Clone, Debug, serde::Serialize)]
pub struct NormalizedAsset {
    /// Top-level entity: the plane itself, or the parent group of all
    /// imported mesh parts.
    pub root: EntityId,
    /// Characteristic size used for camera framing: plane height for
    /// images, bounding-box max dimension for models.
    pub size: f64,
    pub shape: AssetShape,
}

impl NormalizedAsset {
    /// Half the asset's vertical extent, the anchor for roll motion.
    pub fn half_height(&self) -> f64 {
        match &self.shape {
            AssetShape::ImagePlane { height, .. } => height / 2.0,
            AssetShape::ModelGroup { bounds } => bounds.size().z / 2.0,
        }
    }
}

/// Load the asset at `path`, center it at the world origin, and return its
/// handle and characteristic size.
pub fn normalize(
    scene: &mut dyn SceneBuilder,
    path: &Path,
    kind: AssetKind,
) -> VitrineResult<NormalizedAsset> {
    if !path.exists() {
        return Err(VitrineError::not_found(path));
    }
    check_extension(path, kind)?;

    match kind {
        AssetKind::Image => normalize_image(scene, path),
        AssetKind::Model => normalize_model(scene, path),
    }
}

fn check_extension(path: &Path, kind: AssetKind) -> VitrineResult<()> {
    let allowed = match kind {
        AssetKind::Image => IMAGE_EXTENSIONS,
        AssetKind::Model => MODEL_EXTENSIONS,
    };
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !allowed.contains(&ext.as_str()) {
        return Err(VitrineError::unsupported_format(
            path,
            format!("extension '{ext}' is not one of {allowed:?}"),
        ));
    }
    Ok(())
}

fn normalize_image(scene: &mut dyn SceneBuilder, path: &Path) -> VitrineResult<NormalizedAsset> {
    let (px_width, px_height) =
        image::image_dimensions(path).map_err(|e| VitrineError::unsupported_format(path, e.to_string()))?;
    if px_width == 0 || px_height == 0 {
        return Err(VitrineError::empty_import(path));
    }

    let aspect_ratio = f64::from(px_width) / f64::from(px_height);
    let height = REFERENCE_PLANE_HEIGHT;
    let width = height * aspect_ratio;
    tracing::debug!(px_width, px_height, width, height, "sized image plane");

    let root = scene.create_image_plane("image_plane", path, width, height)?;
    Ok(NormalizedAsset {
        root,
        size: height,
        shape: AssetShape::ImagePlane { width, height },
    })
}

fn normalize_model(scene: &mut dyn SceneBuilder, path: &Path) -> VitrineResult<NormalizedAsset> {
    let parts = scene.import_model(path)?;
    if parts.is_empty() {
        return Err(VitrineError::empty_import(path));
    }

    let root = scene.create_empty("model_root");
    for part in &parts {
        scene.set_parent(part.entity, root);
    }

    let bounds = BoundingBox::from_points(
        parts.iter().flat_map(|p| p.vertices.iter().copied()),
    )
    .ok_or_else(|| VitrineError::empty_import(path))?;

    // Offset the parent so the group's visual center lands on the origin.
    scene.set_translation(root, -bounds.center());
    tracing::debug!(
        center = ?bounds.center(),
        max_dimension = bounds.max_dimension(),
        parts = parts.len(),
        "recentered model"
    );

    Ok(NormalizedAsset {
        root,
        size: bounds.max_dimension(),
        shape: AssetShape::ModelGroup { bounds },
    })
}
