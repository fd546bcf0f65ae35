use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat3, DQuat, DVec3};

use crate::{
    anim::Interp,
    asset::NormalizedAsset,
    error::{VitrineError, VitrineResult},
    scene::{CameraSpec, Channel, DepthOfField, EntityId, SceneBuilder},
};

/// Fixed lens aperture when depth of field is enabled.
pub const APERTURE_FSTOP: f64 = 2.8;

/// Orbit framing margin: the camera never orbits closer than this multiple
/// of the asset's characteristic size, so the subject stays inside the
/// frustum regardless of the configured default distance.
pub const ORBIT_FIT_FACTOR: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MotionMode {
    /// Linear top-to-bottom traversal of a flat subject, eased.
    Roll,
    /// Full 360° turn around the subject, constant angular velocity.
    Orbit,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraConfig {
    pub mode: MotionMode,
    /// Camera distance from the subject. Orbit mode treats this as a lower
    /// bound and widens it for large assets.
    pub distance: f64,
    /// Camera height above the subject center (orbit mode).
    pub height: f64,
    pub fov_deg: f64,
    pub depth_of_field: bool,
    /// Animate the asset's own transform instead of the camera or its pivot.
    pub rotate_subject: bool,
}

impl CameraConfig {
    pub fn for_mode(mode: MotionMode) -> Self {
        Self {
            mode,
            distance: 10.0,
            height: 5.0,
            fov_deg: 50.0,
            depth_of_field: true,
            rotate_subject: false,
        }
    }

    pub fn validate(&self) -> VitrineResult<()> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(VitrineError::invalid_config(format!(
                "camera distance must be positive, got {}",
                self.distance
            )));
        }
        if !self.fov_deg.is_finite() || self.fov_deg <= 0.0 || self.fov_deg >= 180.0 {
            return Err(VitrineError::invalid_config(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_deg
            )));
        }
        if !self.height.is_finite() {
            return Err(VitrineError::invalid_config("camera height must be finite"));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::for_mode(MotionMode::Orbit)
    }
}

/// Camera entity plus the optional orbit pivot and depth-of-field state.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct CameraRig {
    pub camera: EntityId,
    pub pivot: Option<EntityId>,
    pub depth_of_field: Option<DepthOfField>,
}

/// The single animated channel of a run: who moves, between which anchor
/// values, and how the motion is interpolated.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub enum MotionPlan {
    Roll {
        target: EntityId,
        start_z: f64,
        end_z: f64,
    },
    Orbit {
        target: EntityId,
    },
}

impl MotionPlan {
    pub fn target(&self) -> EntityId {
        match *self {
            Self::Roll { target, .. } | Self::Orbit { target } => target,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            Self::Roll { .. } => Channel::LocationZ,
            Self::Orbit { .. } => Channel::RotationZ,
        }
    }

    pub fn interp(&self) -> Interp {
        match self {
            Self::Roll { .. } => Interp::Smooth,
            Self::Orbit { .. } => Interp::Linear,
        }
    }

    /// Anchor values at the first and last frame.
    pub fn endpoints(&self) -> (f64, f64) {
        match *self {
            Self::Roll { start_z, end_z, .. } => (start_z, end_z),
            Self::Orbit { .. } => (0.0, TAU),
        }
    }
}

/// Rotation that points a camera's local -Z at `target` from `eye`, world
/// Z-up, falling back to a Y-up reference when sighting straight down the
/// vertical axis.
pub fn look_at_rotation(eye: DVec3, target: DVec3) -> DQuat {
    let Some(forward) = (target - eye).try_normalize() else {
        return DQuat::IDENTITY;
    };
    let z_axis = -forward;
    let x_axis = DVec3::Z
        .cross(z_axis)
        .try_normalize()
        .or_else(|| DVec3::Y.cross(z_axis).try_normalize())
        .unwrap_or(DVec3::X);
    let y_axis = z_axis.cross(x_axis);
    DQuat::from_mat3(&DMat3::from_cols(x_axis, y_axis, z_axis))
}

/// Place and orient the camera for the configured mode and derive the
/// run's motion plan.
pub fn plan_camera(
    scene: &mut dyn SceneBuilder,
    asset: &NormalizedAsset,
    config: &CameraConfig,
) -> VitrineResult<(CameraRig, MotionPlan)> {
    config.validate()?;
    match config.mode {
        MotionMode::Orbit => plan_orbit(scene, asset, config),
        MotionMode::Roll => plan_roll(scene, asset, config),
    }
}

fn plan_orbit(
    scene: &mut dyn SceneBuilder,
    asset: &NormalizedAsset,
    config: &CameraConfig,
) -> VitrineResult<(CameraRig, MotionPlan)> {
    let distance = config.distance.max(asset.size * ORBIT_FIT_FACTOR);
    tracing::debug!(
        configured = config.distance,
        effective = distance,
        "derived orbit distance"
    );

    let depth_of_field = config.depth_of_field.then_some(DepthOfField {
        focus_distance: distance,
        aperture_fstop: APERTURE_FSTOP,
    });
    let camera = scene.create_camera(
        "camera",
        CameraSpec {
            fov_deg: config.fov_deg,
            depth_of_field,
        },
    );

    let eye = DVec3::new(distance, 0.0, config.height);
    scene.set_translation(camera, eye);
    scene.set_rotation(camera, look_at_rotation(eye, DVec3::ZERO));
    scene.set_active_camera(camera);

    let (pivot, target) = if config.rotate_subject {
        (None, asset.root)
    } else {
        let pivot = scene.create_empty("orbit_pivot");
        scene.set_parent(camera, pivot);
        (Some(pivot), pivot)
    };

    let rig = CameraRig {
        camera,
        pivot,
        depth_of_field,
    };
    Ok((rig, MotionPlan::Orbit { target }))
}

fn plan_roll(
    scene: &mut dyn SceneBuilder,
    asset: &NormalizedAsset,
    config: &CameraConfig,
) -> VitrineResult<(CameraRig, MotionPlan)> {
    // Framing is constrained by the plane's own dimensions; the configured
    // distance applies as-is.
    let distance = config.distance;
    let half = asset.half_height();

    let depth_of_field = config.depth_of_field.then_some(DepthOfField {
        focus_distance: distance,
        aperture_fstop: APERTURE_FSTOP,
    });
    let camera = scene.create_camera(
        "camera",
        CameraSpec {
            fov_deg: config.fov_deg,
            depth_of_field,
        },
    );

    let camera_z = if config.rotate_subject { 0.0 } else { half };
    scene.set_translation(camera, DVec3::new(0.0, -distance, camera_z));
    // Face the plane head-on with the image upright.
    scene.set_rotation(camera, DQuat::from_rotation_x(FRAC_PI_2));
    scene.set_active_camera(camera);

    let plan = if config.rotate_subject {
        MotionPlan::Roll {
            target: asset.root,
            start_z: -half,
            end_z: half,
        }
    } else {
        MotionPlan::Roll {
            target: camera,
            start_z: half,
            end_z: -half,
        }
    };

    let rig = CameraRig {
        camera,
        pivot: None,
        depth_of_field,
    };
    Ok((rig, plan))
}
