use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "yeargrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pre-render the 365 per-day overlay assets.
    Generate(GenerateArgs),
    /// Render one wallpaper for a device and date.
    Render(RenderArgs),
    /// Print year-progress metrics for a date as JSON.
    Metrics(MetricsArgs),
    /// List known device models.
    Devices(DevicesArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background image the dots are composited onto (overlay mode only).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Output directory for `001.png`..`365.png`.
    #[arg(long)]
    out: PathBuf,

    /// Dot layout mode applied to every asset.
    #[arg(long, value_enum, default_value_t = ModeChoice::Overlay)]
    mode: ModeChoice,

    /// Optional JSON grid spec overriding the reference layout.
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Render days on a thread pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory holding the pre-rendered overlays.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// JSON renderer config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device model key.
    #[arg(long)]
    model: Option<String>,

    /// Literal date override (`YYYY-MM-DD`).
    #[arg(long)]
    date: Option<String>,

    /// IANA timezone used to determine "today".
    #[arg(long)]
    tz: Option<String>,

    /// Output format: jpg (default) or png.
    #[arg(long)]
    format: Option<String>,

    /// Label font file; defaults to a system sans-serif face.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MetricsArgs {
    /// Literal date override (`YYYY-MM-DD`).
    #[arg(long)]
    date: Option<String>,

    /// IANA timezone used to determine "today".
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Parser, Debug)]
struct DevicesArgs {
    /// JSON device table replacing the built-in one.
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Overlay,
    Opaque,
}

impl From<ModeChoice> for yeargrid::GridMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Overlay => Self::Overlay,
            ModeChoice::Opaque => Self::OpaqueCanvas,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Render(args) => cmd_render(args),
        Command::Metrics(args) => cmd_metrics(args),
        Command::Devices(args) => cmd_devices(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("YEARGRID_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut spec = match &args.grid {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .with_context(|| format!("read grid spec '{}'", p.display()))?;
            serde_json::from_str::<yeargrid::GridSpec>(&s)
                .with_context(|| format!("parse grid spec '{}'", p.display()))?
        }
        None => yeargrid::GridSpec::for_mode(args.mode.into()),
    };
    spec.mode = args.mode.into();

    let background = args
        .background
        .as_deref()
        .map(yeargrid::load_image)
        .transpose()?;
    let generator = yeargrid::OverlayGenerator::new(spec, background.as_ref())?;
    let stats = generator.generate_all(
        &args.out,
        &yeargrid::GeneratorOpts {
            parallel: args.parallel,
            threads: args.threads,
        },
    )?;

    eprintln!("wrote {} overlays to {}", stats.written, stats.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(p) => yeargrid::RendererOpts::from_json_path(p)?,
        None => yeargrid::RendererOpts::default(),
    };
    if let Some(dir) = args.assets {
        opts.asset_dir = dir;
    }
    if let Some(font) = args.font {
        opts.font_path = Some(font);
    }

    let renderer = yeargrid::WallpaperRenderer::from_opts(&opts)?;
    let req = yeargrid::RenderRequest::from_params(
        args.model.as_deref(),
        args.date.as_deref(),
        args.tz.as_deref(),
        args.format.as_deref(),
    )?;

    let out = match renderer.render(&req) {
        Ok(out) => out,
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.to_response())?);
            return Err(e.into());
        }
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &out.bytes)
        .with_context(|| format!("write wallpaper '{}'", args.out.display()))?;

    println!("{}", serde_json::to_string_pretty(&out.metadata())?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let date = yeargrid::today(args.date.as_deref(), args.tz.as_deref())?;
    let metrics = yeargrid::DayMetrics::for_date(date);
    let body = serde_json::json!({
        "date": date,
        "day_of_year": metrics.day_of_year,
        "days_in_year": metrics.days_in_year,
        "days_left": metrics.days_left,
        "percent_elapsed": metrics.percent_label(),
        "overlay_day": yeargrid::overlay_day_for(metrics.day_of_year),
        "label": metrics.label_text(),
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn cmd_devices(args: DevicesArgs) -> anyhow::Result<()> {
    let table = match &args.table {
        Some(p) => yeargrid::DeviceTable::from_json_path(p)?,
        None => yeargrid::DeviceTable::builtin(),
    };
    for p in table.profiles() {
        let marker = if p.model == table.default_model() { " (default)" } else { "" };
        println!("{}\t{}{marker}", p.model, p.resolution);
    }
    Ok(())
}
