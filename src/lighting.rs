use glam::{DQuat, DVec3, EulerRot};

use crate::scene::{EntityId, LightKind, LightSpec, SceneBuilder};

/// The three lighting presets. Selection is cosmetic: an unknown style name
/// degrades to [`Studio`](Self::Studio) instead of aborting the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingStyle {
    #[default]
    Studio,
    Outdoor,
    Dramatic,
}

impl LightingStyle {
    /// Parse a style name, trimmed and case-insensitive. Unrecognized names
    /// fall back to studio with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "studio" => Self::Studio,
            "outdoor" => Self::Outdoor,
            "dramatic" => Self::Dramatic,
            other => {
                tracing::warn!(style = other, "unknown lighting style, using studio");
                Self::Studio
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Outdoor => "outdoor",
            Self::Dramatic => "dramatic",
        }
    }
}

/// One light of a rig: what to create plus where to put it.
#[derive(Clone, Copy, Debug)]
pub struct LightDef {
    pub name: &'static str,
    pub spec: LightSpec,
    pub position: DVec3,
    /// XYZ euler angles in degrees.
    pub rotation_deg: DVec3,
}

impl LightDef {
    fn rotation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation_deg.x.to_radians(),
            self.rotation_deg.y.to_radians(),
            self.rotation_deg.z.to_radians(),
        )
    }
}

/// The fixed light list for a style.
pub fn rig(style: LightingStyle) -> Vec<LightDef> {
    match style {
        // Three-point setup: broad key, softer fill from the opposite
        // azimuth, spot rim from behind for silhouette separation.
        LightingStyle::Studio => vec![
            LightDef {
                name: "key_light",
                spec: LightSpec {
                    kind: LightKind::Area,
                    energy: 500.0,
                    size: Some(5.0),
                    color: None,
                },
                position: DVec3::new(5.0, -5.0, 8.0),
                rotation_deg: DVec3::new(45.0, 0.0, 45.0),
            },
            LightDef {
                name: "fill_light",
                spec: LightSpec {
                    kind: LightKind::Area,
                    energy: 200.0,
                    size: Some(5.0),
                    color: None,
                },
                position: DVec3::new(-5.0, -3.0, 5.0),
                rotation_deg: DVec3::new(45.0, 0.0, -45.0),
            },
            LightDef {
                name: "rim_light",
                spec: LightSpec {
                    kind: LightKind::Spot,
                    energy: 300.0,
                    size: None,
                    color: None,
                },
                position: DVec3::new(0.0, 5.0, 6.0),
                rotation_deg: DVec3::new(120.0, 0.0, 0.0),
            },
        ],
        // Sun for primary shading plus a large blue-tinted overhead area
        // light standing in for sky fill.
        LightingStyle::Outdoor => vec![
            LightDef {
                name: "sun_light",
                spec: LightSpec {
                    kind: LightKind::Sun,
                    energy: 3.0,
                    size: None,
                    color: None,
                },
                position: DVec3::new(5.0, -5.0, 10.0),
                rotation_deg: DVec3::new(45.0, 0.0, 45.0),
            },
            LightDef {
                name: "sky_light",
                spec: LightSpec {
                    kind: LightKind::Area,
                    energy: 100.0,
                    size: Some(10.0),
                    color: Some([0.6, 0.7, 1.0]),
                },
                position: DVec3::new(0.0, 0.0, 10.0),
                rotation_deg: DVec3::ZERO,
            },
        ],
        // Narrow off-axis key with a very weak fill; the high key-to-fill
        // ratio keeps hard shadows with a little detail left in them.
        LightingStyle::Dramatic => vec![
            LightDef {
                name: "dramatic_key",
                spec: LightSpec {
                    kind: LightKind::Spot,
                    energy: 800.0,
                    size: None,
                    color: None,
                },
                position: DVec3::new(8.0, -3.0, 6.0),
                rotation_deg: DVec3::new(60.0, 0.0, 30.0),
            },
            LightDef {
                name: "dramatic_fill",
                spec: LightSpec {
                    kind: LightKind::Area,
                    energy: 50.0,
                    size: Some(3.0),
                    color: None,
                },
                position: DVec3::new(0.0, -6.0, 3.0),
                rotation_deg: DVec3::ZERO,
            },
        ],
    }
}

/// Insert the style's lights into the scene.
pub fn apply_lighting(scene: &mut dyn SceneBuilder, style: LightingStyle) -> Vec<EntityId> {
    let defs = rig(style);
    let mut handles = Vec::with_capacity(defs.len());
    for def in &defs {
        let id = scene.create_light(def.name, def.spec);
        scene.set_translation(id, def.position);
        scene.set_rotation(id, def.rotation());
        handles.push(id);
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordedScene;

    #[test]
    fn style_names_round_trip() {
        for style in [
            LightingStyle::Studio,
            LightingStyle::Outdoor,
            LightingStyle::Dramatic,
        ] {
            assert_eq!(LightingStyle::from_name(style.name()), style);
        }
        assert_eq!(LightingStyle::from_name(" DRAMATIC "), LightingStyle::Dramatic);
    }

    #[test]
    fn unknown_style_falls_back_to_studio() {
        assert_eq!(LightingStyle::from_name("neon"), LightingStyle::Studio);
        assert_eq!(LightingStyle::from_name(""), LightingStyle::Studio);
    }

    #[test]
    fn studio_is_three_point() {
        let defs = rig(LightingStyle::Studio);
        assert_eq!(defs.len(), 3);
        assert!(matches!(defs[0].spec.kind, LightKind::Area));
        assert!(matches!(defs[2].spec.kind, LightKind::Spot));
        // Key outshines fill.
        assert!(defs[0].spec.energy > defs[1].spec.energy);
    }

    #[test]
    fn outdoor_has_sun_and_blue_sky_fill() {
        let defs = rig(LightingStyle::Outdoor);
        assert_eq!(defs.len(), 2);
        assert!(matches!(defs[0].spec.kind, LightKind::Sun));
        let sky = defs[1].spec.color.unwrap();
        assert!(sky[2] > sky[0]);
    }

    #[test]
    fn dramatic_has_highest_key_to_fill_ratio() {
        let ratio = |style| {
            let defs = rig(style);
            defs[0].spec.energy / defs[1].spec.energy
        };
        assert!(ratio(LightingStyle::Dramatic) > ratio(LightingStyle::Studio));
        assert!(ratio(LightingStyle::Dramatic) > ratio(LightingStyle::Outdoor));
    }

    #[test]
    fn apply_inserts_every_light_of_the_rig() {
        let mut scene = RecordedScene::new();
        let handles = apply_lighting(&mut scene, LightingStyle::Studio);
        assert_eq!(handles.len(), 3);
        assert_eq!(scene.lights().count(), 3);
        let key = scene.entity(handles[0]).unwrap();
        assert_eq!(key.translation, DVec3::new(5.0, -5.0, 8.0));
    }

    #[test]
    fn unknown_name_yields_the_studio_light_set() {
        let mut a = RecordedScene::new();
        apply_lighting(&mut a, LightingStyle::from_name("neon"));
        let mut b = RecordedScene::new();
        apply_lighting(&mut b, LightingStyle::Studio);
        let specs = |s: &RecordedScene| {
            s.lights()
                .map(|e| (e.name.clone(), e.translation))
                .collect::<Vec<_>>()
        };
        assert_eq!(specs(&a), specs(&b));
    }
}
