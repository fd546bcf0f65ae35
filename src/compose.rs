use std::path::PathBuf;

use crate::{
    asset::{self, AssetKind, NormalizedAsset},
    camera::{self, CameraConfig, CameraRig, MotionMode, MotionPlan},
    error::{VitrineError, VitrineResult},
    lighting::{self, LightingStyle},
    render::{self, RenderConfig, RenderSettings},
    scene::{EntityId, SceneBuilder},
    schedule,
};

/// Default animation length, in frames.
pub const DEFAULT_FRAME_COUNT: u32 = 250;

/// Everything one composition run needs: the subject, the camera move, the
/// lighting style, and the output settings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ComposeConfig {
    pub asset_path: PathBuf,
    pub kind: AssetKind,
    pub camera: CameraConfig,
    pub lighting: LightingStyle,
    pub frame_count: u32,
    pub render: RenderConfig,
}

impl ComposeConfig {
    /// Roll over a flat image, with motion blur to smooth the translation.
    pub fn for_image(path: impl Into<PathBuf>) -> Self {
        Self {
            asset_path: path.into(),
            kind: AssetKind::Image,
            camera: CameraConfig::for_mode(MotionMode::Roll),
            lighting: LightingStyle::default(),
            frame_count: DEFAULT_FRAME_COUNT,
            render: RenderConfig {
                motion_blur: true,
                ..RenderConfig::default()
            },
        }
    }

    /// Turntable orbit around an imported model.
    pub fn for_model(path: impl Into<PathBuf>) -> Self {
        Self {
            asset_path: path.into(),
            kind: AssetKind::Model,
            camera: CameraConfig::for_mode(MotionMode::Orbit),
            lighting: LightingStyle::default(),
            frame_count: DEFAULT_FRAME_COUNT,
            render: RenderConfig::default(),
        }
    }

    /// Check every config-only precondition before touching the scene, so a
    /// bad run fails without leaving a half-built scene behind.
    pub fn validate(&self) -> VitrineResult<()> {
        self.camera.validate()?;
        self.render.validate()?;
        if self.frame_count < 2 {
            return Err(VitrineError::invalid_frame_range(format!(
                "need at least 2 frames, got {}",
                self.frame_count
            )));
        }
        Ok(())
    }
}

/// Summary of a finished run: the handles and derived values a caller may
/// want to inspect or hand to the host.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ComposedScene {
    pub asset: NormalizedAsset,
    pub rig: CameraRig,
    pub plan: MotionPlan,
    pub lights: Vec<EntityId>,
    pub settings: RenderSettings,
}

/// Run the whole pipeline against `scene`: reset, normalize the asset,
/// place the camera, schedule the motion anchors, insert the lighting rig,
/// and apply render settings.
#[tracing::instrument(skip(scene, config), fields(asset = %config.asset_path.display()))]
pub fn compose(
    scene: &mut dyn SceneBuilder,
    config: &ComposeConfig,
) -> VitrineResult<ComposedScene> {
    config.validate()?;

    scene.clear();
    tracing::info!("cleared scene");

    let asset = asset::normalize(scene, &config.asset_path, config.kind)?;
    tracing::info!(size = asset.size, "normalized asset");

    let (rig, plan) = camera::plan_camera(scene, &asset, &config.camera)?;
    tracing::info!(?config.camera.mode, "placed camera");

    schedule::schedule_motion(scene, &plan, config.frame_count)?;
    tracing::info!(frames = config.frame_count, "scheduled animation");

    let lights = lighting::apply_lighting(scene, config.lighting);
    tracing::info!(style = config.lighting.name(), lights = lights.len(), "added lighting");

    let settings = render::apply_render_settings(scene, &config.render, config.frame_count)?;
    tracing::info!(
        width = settings.resolution_x,
        height = settings.resolution_y,
        fps = settings.fps,
        "applied render settings"
    );

    Ok(ComposedScene {
        asset,
        rig,
        plan,
        lights,
        settings,
    })
}
