use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cametrax", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the preset catalog.
    Presets,
    /// Print a configuration as JSON.
    Show(SelectArgs),
    /// Print the generation request derived from a configuration.
    Prompt(SelectArgs),
    /// Generate a preview image with the offline procedural service.
    Generate(GenerateArgs),
    /// Replay a JSON array of studio events and print the resulting state.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Start from this catalog preset.
    #[arg(long, conflicts_with = "in_path")]
    preset: Option<String>,

    /// Start from a configuration JSON file.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Field edits applied in order, as `namespace.field=value`.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    sets: Vec<String>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Event script (JSON array).
    #[arg(long)]
    script: PathBuf,

    /// Write the final current artifact here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Preview width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,
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
        Command::Presets => cmd_presets(),
        Command::Show(args) => cmd_show(args),
        Command::Prompt(args) => cmd_prompt(args),
        Command::Generate(args) => cmd_generate(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in cametrax::Preset::ALL {
        let cfg = preset.config();
        println!(
            "{:<10} yaw {:>4} pitch {:>4} roll {:>3} fov {:>3}  {} {} {}K{}",
            preset.name(),
            cfg.camera.yaw,
            cfg.camera.pitch,
            cfg.camera.roll,
            cfg.camera.fov,
            cfg.lighting.preset,
            cfg.lighting.intensity,
            cfg.lighting.temperature,
            if cfg.render.hdr { " hdr" } else { "" },
        );
    }
    Ok(())
}

fn cmd_show(args: SelectArgs) -> anyhow::Result<()> {
    let cfg = select_config(&args)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn cmd_prompt(args: SelectArgs) -> anyhow::Result<()> {
    let cfg = select_config(&args)?;
    let req = cametrax::GenerationRequest::from_config(&cfg);
    println!("aspect_ratio: {}", req.aspect_ratio);
    println!("number_of_images: {}", req.number_of_images);
    println!("output_mime_type: {}", req.output_mime_type);
    println!("prompt: {}", req.prompt);
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = select_config(&args.select)?;
    for field in cfg.out_of_range() {
        tracing::warn!(%field, "value outside declared range");
    }

    let mut studio = cametrax::Studio::default();
    studio.load_config(cfg);
    let service = cametrax::ProceduralService { width: args.width };
    match studio.generate(&service) {
        cametrax::GenerationOutcome::Recorded(entry) => {
            write_artifact(entry.artifact(), &args.out)?;
            Ok(())
        }
        cametrax::GenerationOutcome::Failed(msg) => anyhow::bail!("generation failed: {msg}"),
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let f = File::open(&args.script)
        .with_context(|| format!("open script '{}'", args.script.display()))?;
    let events: Vec<cametrax::StudioEvent> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse event script JSON")?;

    let service = cametrax::ProceduralService { width: args.width };
    let mut studio = cametrax::Studio::default();
    let mut rejected = 0usize;

    for (i, event) in events.into_iter().enumerate() {
        match studio.handle(event) {
            Ok(cametrax::Dispatched::Applied) => {}
            Ok(cametrax::Dispatched::Submitted(pending)) => {
                let result = cametrax::GenerationService::generate(&service, pending.request());
                if let cametrax::GenerationOutcome::Failed(msg) =
                    studio.complete_generation(pending, result)
                {
                    eprintln!("event {i}: generation failed: {msg}");
                }
            }
            Err(e) => {
                rejected += 1;
                eprintln!("event {i}: {e}");
            }
        }
    }

    let view = studio.view();
    println!("{}", view.config.to_json_pretty()?);
    println!("history: {}", view.history.len());
    for entry in view.history.iter() {
        let a = entry.artifact();
        println!("  {} {} {}x{}", entry.id(), a.id(), a.width(), a.height());
    }
    println!("keyframes: {}", view.keyframes.len());
    for kf in view.keyframes.iter() {
        println!("  {} {} ({})", kf.id(), kf.label(), kf.summary());
    }
    match view.comparison {
        Some(c) => println!(
            "comparison: {} vs {} at {}",
            c.reference().id(),
            c.current().id(),
            c.blend_position()
        ),
        None => println!("comparison: none"),
    }
    if let Some(err) = view.error {
        println!("error: {err}");
    }
    println!("rejected: {rejected}");

    if let Some(out) = &args.out {
        let artifact = view
            .artifact
            .with_context(|| "no current artifact to write")?;
        write_artifact(artifact, out)?;
    }
    Ok(())
}

fn select_config(args: &SelectArgs) -> anyhow::Result<cametrax::SceneConfig> {
    let mut cfg = match (&args.preset, &args.in_path) {
        (Some(name), _) => cametrax::apply_preset(name)?,
        (None, Some(path)) => read_config_json(path)?,
        (None, None) => cametrax::SceneConfig::default(),
    };
    for set in &args.sets {
        let (path, text) = set
            .split_once('=')
            .with_context(|| format!("expected PATH=VALUE, got '{set}'"))?;
        let field: cametrax::Field = path.trim().parse()?;
        let value = field.parse_value(text)?;
        cfg = cametrax::update(&cfg, field, value)?;
    }
    Ok(cfg)
}

fn read_config_json(path: &Path) -> anyhow::Result<cametrax::SceneConfig> {
    cametrax::SceneConfig::from_path(path)
        .with_context(|| format!("load configuration '{}'", path.display()))
}

fn write_artifact(artifact: &cametrax::ArtifactRef, out: &Path) -> anyhow::Result<()> {
    artifact
        .write_to(out)
        .with_context(|| format!("write image '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
