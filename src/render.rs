use crate::{
    error::{VitrineError, VitrineResult},
    scene::SceneBuilder,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RenderEngine {
    Eevee,
    Cycles,
}

impl RenderEngine {
    pub fn parse(name: &str) -> VitrineResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "eevee" => Ok(Self::Eevee),
            "cycles" => Ok(Self::Cycles),
            other => Err(VitrineError::invalid_config(format!(
                "unknown render engine '{other}'"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Eevee => "eevee",
            Self::Cycles => "cycles",
        }
    }
}

/// Output configuration. Pure data; the only failure modes are the
/// validation errors below.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub resolution: [u32; 2],
    pub fps: u32,
    pub engine: RenderEngine,
    pub ambient_occlusion: bool,
    pub bloom: bool,
    pub motion_blur: bool,
    pub transparent_background: bool,
    /// World background color, linear RGBA.
    pub background: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: [1920, 1080],
            fps: 30,
            engine: RenderEngine::Eevee,
            ambient_occlusion: true,
            bloom: true,
            motion_blur: false,
            transparent_background: false,
            background: [0.05, 0.05, 0.05, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> VitrineResult<()> {
        if self.resolution[0] == 0 || self.resolution[1] == 0 {
            return Err(VitrineError::invalid_config(
                "render resolution must be non-zero on both axes",
            ));
        }
        if self.fps == 0 {
            return Err(VitrineError::invalid_config("frame rate must be > 0"));
        }
        Ok(())
    }
}

/// The flattened record handed to the host once per run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub fps: u32,
    pub frame_start: u32,
    pub frame_end: u32,
    pub engine: RenderEngine,
    pub ambient_occlusion: bool,
    pub bloom: bool,
    pub motion_blur: bool,
    pub transparent_background: bool,
    pub background: [f64; 4],
}

/// Compose the host render settings from the config and the scheduled frame
/// range (`1..=frame_count`).
pub fn apply_render_settings(
    scene: &mut dyn SceneBuilder,
    config: &RenderConfig,
    frame_count: u32,
) -> VitrineResult<RenderSettings> {
    config.validate()?;
    if frame_count < 2 {
        return Err(VitrineError::invalid_frame_range(format!(
            "frame range 1..={frame_count} is empty"
        )));
    }

    let settings = RenderSettings {
        resolution_x: config.resolution[0],
        resolution_y: config.resolution[1],
        fps: config.fps,
        frame_start: 1,
        frame_end: frame_count,
        engine: config.engine,
        ambient_occlusion: config.ambient_occlusion,
        bloom: config.bloom,
        motion_blur: config.motion_blur,
        transparent_background: config.transparent_background,
        background: config.background,
    };
    scene.apply_render_settings(&settings);
    Ok(settings)
}
