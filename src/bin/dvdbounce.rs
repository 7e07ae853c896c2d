use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use dvdbounce::{BounceConfig, Canvas, Direction, RenderOpts, Sprite};

#[derive(Parser, Debug)]
#[command(name = "dvdbounce", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the PNG frame sequence only.
    Frames(FramesArgs),
    /// Render the sequence and stitch it into an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Logo image to bounce.
    #[arg(long, short = 'i')]
    logo: PathBuf,

    /// Directory to store generated frames; a subdirectory named after the
    /// logo file is created inside it.
    #[arg(long, short = 'o', default_value = "./output")]
    out_dir: PathBuf,

    /// Run length in seconds.
    #[arg(long, short = 'd', default_value_t = 40)]
    duration: u32,

    /// Frames per second.
    #[arg(long, short = 'f', default_value_t = 30)]
    fps: u32,

    /// Change in x and y pixels each frame.
    #[arg(long, default_value_t = 10)]
    velocity: u32,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 3840)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 2160)]
    height: u32,

    /// Starting travel direction.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Southeast)]
    direction: DirectionChoice,

    /// Run configuration JSON; when set it replaces the flags above
    /// (except --logo and --out-dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the centered left.png / right.png stills.
    #[arg(long, default_value_t = false)]
    no_stills: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite the MP4 if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Southeast,
    Northeast,
    Northwest,
    Southwest,
}

impl From<DirectionChoice> for Direction {
    fn from(c: DirectionChoice) -> Self {
        match c {
            DirectionChoice::Southeast => Direction::Southeast,
            DirectionChoice::Northeast => Direction::Northeast,
            DirectionChoice::Northwest => Direction::Northwest,
            DirectionChoice::Southwest => Direction::Southwest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<BounceConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: BounceConfig = serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn build_config(scene: &SceneArgs) -> anyhow::Result<BounceConfig> {
    let cfg = match &scene.config {
        Some(path) => read_config_json(path)?,
        None => BounceConfig {
            canvas: Canvas {
                width: scene.width,
                height: scene.height,
            },
            fps: scene.fps,
            duration_secs: scene.duration,
            velocity: scene.velocity,
            direction: scene.direction.into(),
        },
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Frames land in `<out_dir>/<logo file stem>/`.
fn frame_dir(scene: &SceneArgs) -> PathBuf {
    let stem = scene
        .logo
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "frames".into());
    scene.out_dir.join(stem)
}

fn render_opts(scene: &SceneArgs) -> RenderOpts {
    RenderOpts {
        center_stills: !scene.no_stills,
        ..RenderOpts::default()
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args.scene)?;
    let mut sprite = Sprite::load(&args.scene.logo)?;

    let dir = frame_dir(&args.scene);
    let stats = dvdbounce::render_frames(&cfg, &mut sprite, &dir, &render_opts(&args.scene))?;

    eprintln!(
        "wrote {} frames ({} flips) to {}",
        stats.frames_total,
        stats.flips,
        dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args.scene)?;
    let mut sprite = Sprite::load(&args.scene.logo)?;

    let dir = frame_dir(&args.scene);
    let stats = dvdbounce::render_to_mp4(
        &cfg,
        &mut sprite,
        &dir,
        &args.out,
        args.overwrite,
        &render_opts(&args.scene),
    )?;

    eprintln!(
        "wrote {} frames and {}",
        stats.frames_total,
        args.out.display()
    );
    Ok(())
}
