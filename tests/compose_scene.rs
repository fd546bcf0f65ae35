use std::f64::consts::TAU;
use std::io::Cursor;
use std::path::PathBuf;

use glam::DVec3;
use vitrine::{
    AssetShape, Channel, ComposeConfig, LightingStyle, MotionMode, RecordedScene, VitrineError,
    compose,
};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "vitrine_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &PathBuf, width: u32, height: u32) {
    let img = image::RgbaImage::new(width, height);
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

/// An on-disk stand-in for a mesh file plus the stubbed geometry the
/// recorder reports for it.
fn model_scene(dir: &PathBuf, meshes: Vec<Vec<DVec3>>) -> (RecordedScene, PathBuf) {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("model.glb");
    std::fs::write(&path, b"").unwrap();
    let mut scene = RecordedScene::new();
    scene.stub_model(&path, meshes);
    (scene, path)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn model_recenters_to_origin_for_arbitrary_offsets() {
    init_tracing();
    let tmp = temp_dir("recenter");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![
            vec![DVec3::new(100.0, -40.0, 7.0), DVec3::new(130.0, -20.0, 19.0)],
            vec![DVec3::new(95.0, -35.0, 12.0)],
        ],
    );

    let composed = compose(&mut scene, &ComposeConfig::for_model(&path)).unwrap();

    let AssetShape::ModelGroup { bounds } = composed.asset.shape else {
        panic!("expected a model group");
    };
    let root = scene.entity(composed.asset.root).unwrap();
    let world_center = bounds.center() + root.translation;
    assert!(world_center.length() < 1e-6);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn image_plane_dimensions_follow_aspect_ratio() {
    let tmp = temp_dir("plane_dims");
    std::fs::create_dir_all(&tmp).unwrap();
    let png = tmp.join("frame.png");
    write_png(&png, 1600, 900);

    let mut scene = RecordedScene::new();
    let composed = compose(&mut scene, &ComposeConfig::for_image(&png)).unwrap();

    let AssetShape::ImagePlane { width, height } = composed.asset.shape else {
        panic!("expected an image plane");
    };
    assert_eq!(height, 10.0);
    assert_eq!(width, 10.0 * (1600.0 / 900.0));
    assert!((width - 17.78).abs() < 0.01);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn orbit_distance_is_the_larger_of_configured_and_fitted() {
    // Bounding box [-2,-1,-3]..[2,1,3]: max dimension 6, fitted 9, the
    // configured 10 wins and the camera sits at (10, 0, height).
    let tmp = temp_dir("orbit_cfg");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::new(-2.0, -1.0, -3.0), DVec3::new(2.0, 1.0, 3.0)]],
    );
    let config = ComposeConfig::for_model(&path);
    let composed = compose(&mut scene, &config).unwrap();
    let cam = scene.entity(composed.rig.camera).unwrap();
    assert_eq!(cam.translation, DVec3::new(10.0, 0.0, config.camera.height));
    assert_eq!(composed.rig.depth_of_field.unwrap().focus_distance, 10.0);
    std::fs::remove_dir_all(&tmp).ok();

    // Max dimension 40: the fitted 60 beats the configured 10.
    let tmp = temp_dir("orbit_fit");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-20.0), DVec3::splat(20.0)]],
    );
    let composed = compose(&mut scene, &ComposeConfig::for_model(&path)).unwrap();
    let cam = scene.entity(composed.rig.camera).unwrap();
    assert_eq!(cam.translation.x, 60.0);
    assert_eq!(composed.rig.depth_of_field.unwrap().focus_distance, 60.0);
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn orbit_yaw_runs_one_linear_turn() {
    let tmp = temp_dir("orbit_yaw");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-1.0), DVec3::splat(1.0)]],
    );
    let mut config = ComposeConfig::for_model(&path);
    config.frame_count = 120;
    let composed = compose(&mut scene, &config).unwrap();

    let pivot = composed.rig.pivot.unwrap();
    let curve = scene.curve(pivot, Channel::RotationZ).unwrap();
    assert_eq!(curve.keys().len(), 2);
    assert_eq!((curve.keys()[0].frame, curve.keys()[0].value), (1, 0.0));
    assert_eq!((curve.keys()[1].frame, curve.keys()[1].value), (120, TAU));

    // Constant angular velocity across the whole range.
    let q1 = scene.sample(pivot, Channel::RotationZ, 31).unwrap();
    let q3 = scene.sample(pivot, Channel::RotationZ, 91).unwrap();
    assert!((q1 - TAU * 30.0 / 119.0).abs() < 1e-12);
    assert!((q3 - TAU * 90.0 / 119.0).abs() < 1e-12);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn roll_traverses_the_plane_top_to_bottom_eased() {
    init_tracing();
    let tmp = temp_dir("roll");
    std::fs::create_dir_all(&tmp).unwrap();
    let png = tmp.join("tall.png");
    write_png(&png, 300, 600);

    let mut scene = RecordedScene::new();
    let composed = compose(&mut scene, &ComposeConfig::for_image(&png)).unwrap();

    let curve = scene.curve(composed.rig.camera, Channel::LocationZ).unwrap();
    assert_eq!(curve.keys()[0].value, 5.0);
    assert_eq!(curve.keys()[1].value, -5.0);

    // Eased start: the camera has moved less than a constant-speed one.
    let early = scene
        .sample(composed.rig.camera, Channel::LocationZ, 26)
        .unwrap();
    let linear = 5.0 - 10.0 * (25.0 / 249.0);
    assert!(early > linear);

    // Focus stays at the configured distance for the whole roll.
    assert_eq!(composed.rig.depth_of_field.unwrap().focus_distance, 10.0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn rotate_subject_moves_the_asset_not_the_camera() {
    let tmp = temp_dir("subject");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-1.0), DVec3::splat(1.0)]],
    );
    let mut config = ComposeConfig::for_model(&path);
    config.camera.rotate_subject = true;
    let composed = compose(&mut scene, &config).unwrap();

    assert!(composed.rig.pivot.is_none());
    assert!(scene.curve(composed.asset.root, Channel::RotationZ).is_some());
    assert!(scene.curve(composed.rig.camera, Channel::RotationZ).is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unknown_lighting_style_degrades_to_studio() {
    let tmp = temp_dir("lighting");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-1.0), DVec3::splat(1.0)]],
    );
    let mut config = ComposeConfig::for_model(&path);
    config.lighting = LightingStyle::from_name("neon");
    let composed = compose(&mut scene, &config).unwrap();

    let names: Vec<_> = scene.lights().map(|l| l.name.clone()).collect();
    assert_eq!(names, ["key_light", "fill_light", "rim_light"]);
    assert_eq!(composed.lights.len(), 3);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn rerunning_resets_to_a_single_composition() {
    let tmp = temp_dir("rerun");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-1.0), DVec3::splat(1.0)]],
    );
    let config = ComposeConfig::for_model(&path);

    compose(&mut scene, &config).unwrap();
    let first = scene.entities().len();
    let composed = compose(&mut scene, &config).unwrap();

    assert_eq!(scene.entities().len(), first);
    let pivot = composed.rig.pivot.unwrap();
    assert_eq!(scene.curve(pivot, Channel::RotationZ).unwrap().keys().len(), 2);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn render_settings_match_the_scheduled_range() {
    let tmp = temp_dir("render");
    let (mut scene, path) = model_scene(
        &tmp,
        vec![vec![DVec3::splat(-1.0), DVec3::splat(1.0)]],
    );
    let mut config = ComposeConfig::for_model(&path);
    config.frame_count = 72;
    let composed = compose(&mut scene, &config).unwrap();

    let settings = scene.render_settings().unwrap();
    assert_eq!((settings.frame_start, settings.frame_end), (1, 72));
    assert_eq!(settings.resolution_x, 1920);
    assert_eq!(settings.fps, 30);
    assert_eq!(*settings, composed.settings);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn normalizer_error_taxonomy() {
    let tmp = temp_dir("errors");
    std::fs::create_dir_all(&tmp).unwrap();

    // Missing file.
    let mut scene = RecordedScene::new();
    let missing = tmp.join("nope.glb");
    assert!(matches!(
        compose(&mut scene, &ComposeConfig::for_model(&missing)),
        Err(VitrineError::NotFound { .. })
    ));

    // Wrong extension for the declared kind.
    let png = tmp.join("pic.png");
    write_png(&png, 4, 4);
    let mut scene = RecordedScene::new();
    assert!(matches!(
        compose(&mut scene, &ComposeConfig::for_model(&png)),
        Err(VitrineError::UnsupportedFormat { .. })
    ));

    // A model file the host reports no geometry for.
    let empty = tmp.join("hollow.glb");
    std::fs::write(&empty, b"").unwrap();
    let mut scene = RecordedScene::new();
    assert!(matches!(
        compose(&mut scene, &ComposeConfig::for_model(&empty)),
        Err(VitrineError::EmptyImport { .. })
    ));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn orbit_mode_works_for_image_planes() {
    let tmp = temp_dir("image_orbit");
    std::fs::create_dir_all(&tmp).unwrap();
    let png = tmp.join("square.png");
    write_png(&png, 500, 500);

    let mut scene = RecordedScene::new();
    let mut config = ComposeConfig::for_image(&png);
    config.camera.mode = MotionMode::Orbit;
    let composed = compose(&mut scene, &config).unwrap();

    // Plane height is the characteristic size: max(10, 10 * 1.5) = 15.
    let cam = scene.entity(composed.rig.camera).unwrap();
    assert_eq!(cam.translation.x, 15.0);

    std::fs::remove_dir_all(&tmp).ok();
}
