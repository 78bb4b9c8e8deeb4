use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};

use beatline::encode::png::write_frame_png;
use beatline::render::svg::snapshot_to_svg;
use beatline::{
    Evaluator, OutputFormat, Quality, RenderConfig, RenderSession, RenderSessionOpts,
    SvgRasterBackend, scenes,
};

#[derive(Parser, Debug)]
#[command(name = "beatline", version, about = "Render the talk's animation scenes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog scenes.
    List,
    /// Render one scene to a video or PNG sequence.
    Render(RenderArgs),
    /// Render a single frame as PNG or SVG.
    Frame(FrameArgs),
    /// Write the finalized scene as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scene name (see `beatline list`).
    scene: String,

    /// Quality preset.
    #[arg(short, long, value_enum)]
    quality: Option<Quality>,

    /// Output container.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output path (defaults to `<out_dir>/<scene>.<ext>`).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// JSON render config; flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail instead of replacing an existing artifact.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene name.
    scene: String,

    /// Scene time in seconds.
    #[arg(long)]
    time: f64,

    /// Output path; `.svg` writes the vector frame, anything else a PNG.
    #[arg(short, long)]
    out: PathBuf,

    /// Quality preset (sets the canvas size).
    #[arg(short, long, value_enum, default_value = "m")]
    quality: Quality,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Scene name.
    scene: String,

    /// Output JSON path; stdout when omitted.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for entry in scenes::catalog() {
        let scene = entry
            .build()
            .with_context(|| format!("build scene '{}'", entry.name))?;
        println!(
            "{:<22} {:>6.1}s  {}",
            entry.name,
            scene.duration(),
            entry.description
        );
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load render config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(q) = args.quality {
        cfg.quality = q;
    }
    if let Some(f) = args.format {
        cfg.format = f;
    }
    if args.out.is_some() {
        cfg.output = args.out;
    }
    if args.no_overwrite {
        cfg.overwrite = false;
    }

    let scene = scenes::build(&args.scene)?;
    let (out, stats) = beatline::session::render_session::render_scene(scene, &cfg)
        .with_context(|| format!("render scene '{}'", args.scene))?;
    eprintln!(
        "wrote {} ({} frames, {} rendered)",
        out.display(),
        stats.frames_total,
        stats.frames_rendered
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !args.time.is_finite() || args.time < 0.0 {
        bail!("--time must be a finite, non-negative number of seconds");
    }
    let scene = scenes::build(&args.scene)?;
    let bg = scene.background.with_alpha(1.0).to_rgba8();
    let session = RenderSession::new(scene, RenderSessionOpts::from_quality(args.quality))?;
    let canvas = session.opts().canvas;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_svg = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let snap = Evaluator::sample(session.scene(), args.time)?;
        let svg = snapshot_to_svg(&snap, canvas)?;
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let mut backend = SvgRasterBackend::new();
        let frame = session.render_at(&mut backend, args.time)?;
        write_frame_png(&args.out, &frame, bg)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let scene = scenes::build(&args.scene)?;
    let json = scene.to_json_pretty()?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("write json '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
