use std::io::Cursor;
use std::path::PathBuf;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_vitrine")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "vitrine.exe"
            } else {
                "vitrine"
            });
            p
        })
}

#[test]
fn cli_compose_image_writes_scene_json() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let png_path = dir.join("img.png");
    let img = image::RgbaImage::from_raw(16, 9, vec![200u8; 16 * 9 * 4]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&png_path, &buf).unwrap();

    let out_path = dir.join("scene.json");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["compose", "--kind", "image", "--asset"])
        .arg(&png_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&out_path).unwrap()).unwrap();
    let entities = json["entities"].as_array().unwrap();
    assert!(entities.iter().any(|e| e["name"] == "image_plane"));
    assert!(json["render"]["motion_blur"].as_bool().unwrap());
}

#[test]
fn cli_compose_model_dry_run_uses_stub_extent() {
    let dir = PathBuf::from("target").join("cli_smoke_model");
    std::fs::create_dir_all(&dir).unwrap();

    let model_path = dir.join("asset.glb");
    std::fs::write(&model_path, b"").unwrap();
    let out_path = dir.join("scene.json");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["compose", "--kind", "model", "--lighting", "dramatic", "--asset"])
        .arg(&model_path)
        .args(["--extent", "4", "2", "6", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&out_path).unwrap()).unwrap();
    let entities = json["entities"].as_array().unwrap();
    assert!(entities.iter().any(|e| e["name"] == "model_root"));
    assert!(entities.iter().any(|e| e["name"] == "dramatic_key"));
    assert!(json["active_camera"].is_number());
}

#[test]
fn cli_rejects_unknown_engine() {
    let dir = PathBuf::from("target").join("cli_smoke_engine");
    std::fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("asset.glb");
    std::fs::write(&model_path, b"").unwrap();

    let output = std::process::Command::new(bin_path())
        .args(["compose", "--kind", "model", "--engine", "luxrender", "--asset"])
        .arg(&model_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown render engine"));
}
