use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wordreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene list and timeline as JSON.
    Scenes(ScenesArgs),
    /// Print the evaluated state of one frame as JSON.
    Frame(FrameArgs),
    /// Write every frame of the composition as JSON lines.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Transcript JSON (array of `{text, start, end}` in milliseconds).
    #[arg(long)]
    transcript: PathBuf,

    /// Render config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory scene images are resolved against.
    #[arg(long, default_value = "image")]
    image_dir: PathBuf,

    /// Scene image file extension.
    #[arg(long, default_value = "jpg")]
    image_ext: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames evaluated per batch.
    #[arg(long, default_value_t = 256)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scenes(args) => cmd_scenes(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn open_session(input: &InputArgs) -> anyhow::Result<wordreel::RenderSession> {
    let config = match &input.config {
        Some(path) => wordreel::RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => wordreel::RenderConfig::default(),
    };
    let transcript = wordreel::Transcript::from_path(&input.transcript)
        .with_context(|| format!("load transcript '{}'", input.transcript.display()))?;
    Ok(wordreel::RenderSession::new(config, transcript)?)
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let sess = open_session(&args.input)?;
    let images: Vec<PathBuf> = sess
        .scenes()
        .iter()
        .map(|s| s.image_ref.asset_path(&args.image_dir, &args.image_ext))
        .collect();
    let out = serde_json::json!({
        "fps": sess.config().fps,
        "duration_frames": sess.duration_frames(),
        "scenes": sess.scenes(),
        "images": images,
        "timeline": sess.timeline().spans(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let sess = open_session(&args.input)?;
    let snap = sess.frame_snapshot(wordreel::FrameIndex(args.frame))?;
    println!("{}", serde_json::to_string_pretty(&snap)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let sess = open_session(&args.input)?;
    ensure_parent_dir(&args.out)?;

    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut sink = wordreel::JsonLinesSink::new(BufWriter::new(file));

    let threading = wordreel::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let range = wordreel::FrameRange::new(
        wordreel::FrameIndex(0),
        wordreel::FrameIndex(sess.duration_frames()),
    )?;
    let stats = sess.render_range(range, &threading, &mut sink)?;

    eprintln!(
        "wrote {} ({} frames, {} with scene, {} with caption)",
        args.out.display(),
        stats.frames_total,
        stats.frames_with_scene,
        stats.frames_with_caption
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
