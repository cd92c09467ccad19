use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gridplay", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a play as a framed PNG.
    Export(ExportArgs),
    /// Print player positions at a point in the playback.
    Playback(PlaybackArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input play JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Target aspect ratio (width / height).
    #[arg(long, default_value_t = gridplay::SAVE_EXPORT_RATIO)]
    ratio: f64,

    /// Route thickness multiplier.
    #[arg(long, default_value_t = 1.0)]
    thickness: f64,

    /// Device pixels per field unit.
    #[arg(long, default_value_t = 4.0)]
    pixel_ratio: f64,

    /// Defensive formation overlay ("No", "4-3", "3-4", "Nickel").
    #[arg(long, default_value = "No")]
    defense: gridplay::Formation,
}

#[derive(Parser, Debug)]
struct PlaybackArgs {
    /// Input play JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seconds since playback started.
    #[arg(long)]
    at: f64,

    /// Speed in field units per second.
    #[arg(long, default_value_t = gridplay::DEFAULT_SPEED)]
    speed: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Playback(args) => cmd_playback(args),
    }
}

fn read_play(path: &Path) -> anyhow::Result<(gridplay::Scene, String)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read play '{}'", path.display()))?;
    let record = gridplay::PlayRecord::from_json(&json)
        .with_context(|| format!("parse play '{}'", path.display()))?;
    let (_, state) = record.into_state(gridplay::FieldSize::STANDARD);
    Ok((state.scene, state.name))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (scene, name) = read_play(&args.in_path)?;
    let field = gridplay::FieldSize::STANDARD;

    let mut defense = gridplay::DefenseOverlay::default();
    defense.set_formation(args.defense, field);

    let mut surface = gridplay::RenderSurface::new(field, gridplay::SurfaceOptions::default());
    surface.draw(gridplay::SceneView {
        defense: defense.markers().to_vec(),
        ..gridplay::SceneView::of(scene)
    });

    let compositor = gridplay::Compositor::new(gridplay::ExportOptions {
        pixel_ratio: args.pixel_ratio,
        ..gridplay::ExportOptions::default()
    });
    let image = compositor
        .export(Some(&mut surface), &name, args.ratio, args.thickness)?
        .context("render surface unavailable")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &image.png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}

fn cmd_playback(args: PlaybackArgs) -> anyhow::Result<()> {
    let (scene, _) = read_play(&args.in_path)?;

    let mut engine = gridplay::PlaybackEngine::new(args.speed);
    engine.play(&scene, &gridplay::ManualClock::new());
    engine.advance(args.at);

    let positions: Vec<serde_json::Value> = scene
        .players()
        .iter()
        .zip(engine.visual_positions(&scene))
        .map(|(p, pos)| serde_json::json!({ "id": p.id, "x": pos.x, "y": pos.y }))
        .collect();
    let out = serde_json::json!({
        "at": args.at,
        "finished": engine.is_finished(),
        "players": positions,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
