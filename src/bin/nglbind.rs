use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nglbind::{
    GenerateOptions, NodeTypeRegistry, Player, PlayerSetup, Scene, Specs,
    config::PlayerConfig,
    logging::LogLevel,
    memory::{MemoryEngine, MemoryRenderer, RenderProbe},
    native::EngineRef,
    player::{FrameReport, IntervalRefresh, PlayerListener},
};

#[derive(Parser, Debug)]
#[command(name = "nglbind", version)]
struct Cli {
    /// Log level: verbose, debug, info, warning or error (defaults to RUST_LOG, then info).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate node wrappers and choice enums from a spec file.
    Generate(GenerateArgs),
    /// Parse, validate and synthesize a spec file without writing anything.
    Check(CheckArgs),
    /// Load a serialized scene and print its metadata and live controls.
    Inspect(InspectArgs),
    /// Play a serialized scene headlessly and log frame reports.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Spec file (defaults to the one found through NGL_ANDROID_ENV).
    #[arg(long)]
    specs: Option<PathBuf>,

    /// Output directory; its previous contents are replaced.
    #[arg(long)]
    out: PathBuf,

    /// Rust path of the runtime crate imported by the generated code.
    #[arg(long, default_value = "nglbind")]
    package: String,

    /// Prefix prepended to every generated type name.
    #[arg(long, default_value = "")]
    prefix: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Spec file (defaults to the one found through NGL_ANDROID_ENV).
    #[arg(long)]
    specs: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Serialized scene.
    #[arg(long)]
    scene: PathBuf,

    /// Spec file used to validate node fields.
    #[arg(long)]
    specs: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Serialized scene.
    #[arg(long)]
    scene: PathBuf,

    /// Player configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock seconds to play for.
    #[arg(long, default_value_t = 1.0)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    nglbind::logging::init(cli.log_level);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Check(args) => cmd_check(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn resolve_specs(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => nglbind::config::discover_specs().context("locate spec file"),
    }
}

fn load_specs(path: &Path, registry: &NodeTypeRegistry) -> anyhow::Result<Specs> {
    Specs::from_path(path, registry).with_context(|| format!("load specs '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let registry = NodeTypeRegistry::builtin();
    let specs_path = resolve_specs(args.specs)?;
    let specs = load_specs(&specs_path, &registry)?;
    let opts = GenerateOptions {
        package: args.package,
        prefix: args.prefix,
    };
    let report = nglbind::generate(&specs, &registry, &opts, &args.out)
        .with_context(|| format!("generate into '{}'", args.out.display()))?;
    println!(
        "wrote {} files ({} enums, {} nodes) to {}",
        report.files.len(),
        report.enums,
        report.classes,
        args.out.display()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let registry = NodeTypeRegistry::builtin();
    let specs_path = resolve_specs(args.specs)?;
    let specs = load_specs(&specs_path, &registry)?;
    let (defs, files) = nglbind::codegen::render(&specs, &registry, &GenerateOptions::default())
        .context("synthesize bindings")?;
    println!(
        "ok: {} enums, {} nodes, {} files",
        defs.enums.len(),
        defs.classes.len(),
        files.len()
    );
    Ok(())
}

fn memory_engine(specs: Option<&Path>) -> anyhow::Result<Arc<MemoryEngine>> {
    let engine = match specs {
        Some(path) => {
            let registry = NodeTypeRegistry::builtin();
            let specs = load_specs(path, &registry)?;
            MemoryEngine::from_specs(&specs, &registry)?
        }
        None => MemoryEngine::new(),
    };
    Ok(Arc::new(engine))
}

fn load_scene(engine: &EngineRef, path: &Path) -> anyhow::Result<Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read scene '{}'", path.display()))?;
    Scene::from_serialized(engine, &text)
        .with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mem = memory_engine(args.specs.as_deref())?;
    let engine: EngineRef = mem.clone();
    let scene = load_scene(&engine, &args.scene)?;
    println!("duration: {}s", scene.duration());
    println!("frame_rate: {}", scene.frame_rate());
    println!("aspect_ratio: {}", scene.aspect_ratio());
    println!("nodes: {}", mem.node_count());
    let ids: Vec<&str> = scene.live_control_ids().collect();
    if ids.is_empty() {
        println!("live_controls: none");
    } else {
        println!("live_controls: {}", ids.join(", "));
    }
    Ok(())
}

struct FrameLog {
    frames: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl PlayerListener for FrameLog {
    fn on_first_frame(&mut self) {
        tracing::info!("first frame");
    }

    fn on_frame_drawn(&mut self, report: &FrameReport) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        if report.status != 0 {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(
            frame = report.frame_index,
            time = report.time,
            status = report.status,
            "frame drawn"
        );
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let run_for = Duration::try_from_secs_f64(args.seconds)
        .with_context(|| format!("invalid --seconds {}", args.seconds))?;
    let mut config = match &args.config {
        Some(path) => PlayerConfig::from_path(path)?,
        None => PlayerConfig::default(),
    };
    if !config.render.offscreen {
        tracing::info!("no window available, rendering offscreen");
        config.render.offscreen = true;
        config.render.swap_interval = None;
        config.render.set_surface_pts = false;
    }
    if config.render.width == 0 || config.render.height == 0 {
        config.render.width = 640;
        config.render.height = 360;
    }

    let engine: EngineRef = memory_engine(None)?;
    let scene = load_scene(&engine, &args.scene)?;

    let frames = Arc::new(AtomicU64::new(0));
    let failures = Arc::new(AtomicU64::new(0));
    let listener = FrameLog {
        frames: frames.clone(),
        failures: failures.clone(),
    };
    let setup = PlayerSetup::new(
        Box::new(MemoryRenderer::new(RenderProbe::default())),
        config.render.clone(),
    )
    .with_refresh(Box::new(IntervalRefresh::from_hz(config.refresh_hz)))
    .with_listener(Box::new(listener))
    .with_timeline(config.frame_rate, config.duration);
    let mut player = Player::spawn(setup).context("start player")?;

    player.set_scene(Some(scene))?;
    player.start()?;
    std::thread::sleep(run_for);
    player.release()?;

    println!(
        "drew {} frames ({} failed)",
        frames.load(Ordering::Relaxed),
        failures.load(Ordering::Relaxed)
    );
    Ok(())
}
