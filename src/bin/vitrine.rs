use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use glam::DVec3;

use vitrine::{ComposeConfig, LightingStyle, MotionMode, RecordedScene, RenderEngine};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a presentation scene around an asset (dry run against the
    /// in-memory scene recorder) and dump the recorded scene as JSON.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Asset file: a raster image or a mesh interchange file.
    #[arg(long)]
    asset: PathBuf,

    /// How to treat the asset.
    #[arg(long, value_enum)]
    kind: KindChoice,

    /// Camera move. Defaults to roll for images, orbit for models.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Camera distance from the subject.
    #[arg(long)]
    distance: Option<f64>,

    /// Camera height above the subject center (orbit).
    #[arg(long)]
    height: Option<f64>,

    /// Field of view in degrees.
    #[arg(long)]
    fov: Option<f64>,

    /// Disable depth of field.
    #[arg(long)]
    no_dof: bool,

    /// Animate the asset instead of the camera.
    #[arg(long)]
    rotate_subject: bool,

    /// Lighting style: studio, outdoor, or dramatic. Unknown names fall
    /// back to studio.
    #[arg(long, default_value = "studio")]
    lighting: String,

    /// Total animation frames.
    #[arg(long, default_value_t = vitrine::compose::DEFAULT_FRAME_COUNT)]
    frames: u32,

    /// Render engine: eevee or cycles.
    #[arg(long)]
    engine: Option<String>,

    /// Stand-in model extent (X Y Z) reported by the scene recorder for a
    /// model asset, since real imports are the host's job.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"])]
    extent: Option<Vec<f64>>,

    /// Output path for the recorded scene JSON. Stdout if omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Image,
    Model,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Roll,
    Orbit,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
    }
}

fn build_config(args: &ComposeArgs) -> anyhow::Result<ComposeConfig> {
    let mut config = match args.kind {
        KindChoice::Image => ComposeConfig::for_image(&args.asset),
        KindChoice::Model => ComposeConfig::for_model(&args.asset),
    };

    if let Some(mode) = args.mode {
        config.camera.mode = match mode {
            ModeChoice::Roll => MotionMode::Roll,
            ModeChoice::Orbit => MotionMode::Orbit,
        };
    }
    if let Some(distance) = args.distance {
        config.camera.distance = distance;
    }
    if let Some(height) = args.height {
        config.camera.height = height;
    }
    if let Some(fov) = args.fov {
        config.camera.fov_deg = fov;
    }
    config.camera.depth_of_field = !args.no_dof;
    config.camera.rotate_subject = args.rotate_subject;
    config.lighting = LightingStyle::from_name(&args.lighting);
    config.frame_count = args.frames;
    if let Some(engine) = &args.engine {
        config.render.engine = RenderEngine::parse(engine)?;
    }
    Ok(config)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    let mut scene = RecordedScene::new();
    if matches!(args.kind, KindChoice::Model) {
        let extent = args
            .extent
            .as_deref()
            .map(|e| DVec3::new(e[0], e[1], e[2]))
            .unwrap_or(DVec3::splat(2.0));
        scene.stub_model(&args.asset, vec![box_corners(extent)]);
    }

    let composed = vitrine::compose(&mut scene, &config)?;

    eprintln!(
        "composed '{}': {} entities, {} lights, frames 1..={}",
        args.asset.display(),
        scene.entities().len(),
        composed.lights.len(),
        composed.settings.frame_end,
    );
    eprintln!(
        "asset size {:.2}, lighting {}, engine {}",
        composed.asset.size,
        config.lighting.name(),
        composed.settings.engine.name(),
    );

    match &args.out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(f), &scene)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &scene)?;
            println!();
        }
    }
    Ok(())
}

/// Corners of an axis-aligned box spanning the origin to `extent`, offset
/// from the origin so the dry run exercises recentering.
fn box_corners(extent: DVec3) -> Vec<DVec3> {
    let mut corners = Vec::with_capacity(8);
    for &x in &[0.0, extent.x] {
        for &y in &[0.0, extent.y] {
            for &z in &[0.0, extent.z] {
                corners.push(DVec3::new(x, y, z));
            }
        }
    }
    corners
}
