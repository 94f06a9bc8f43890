use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use posterframe::{
    ContentSource, FitPolicy, FrameReport, PosterConfig, SourceConfig, TextSource,
};

#[derive(Parser, Debug)]
#[command(name = "posterframe", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a local content image into a frame.
    Compose(ComposeArgs),
    /// Fetch content from the configured source and composite it.
    Generate(GenerateArgs),
    /// Print frame dimensions, transparency and the detected white area.
    Inspect(InspectArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    /// Stretch content to the frame size.
    FullBleed,
    /// Shrink content into `--scale` x frame, keeping aspect ratio.
    Contain,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Frame asset PNG.
    #[arg(long)]
    frame: PathBuf,

    /// Content image (PNG, JPEG or WebP).
    #[arg(long)]
    content: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Fit policy.
    #[arg(long, value_enum, default_value_t = FitChoice::Contain)]
    fit: FitChoice,

    /// Target box as a fraction of the frame (contain only).
    #[arg(long, default_value_t = posterframe::DEFAULT_CONTAIN_SCALE)]
    scale: f64,

    /// Save the unmodified content here when the frame is missing.
    #[arg(long)]
    raw_fallback: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Poster config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Image prompt.
    #[arg(long)]
    prompt: String,

    /// Override the configured output path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// API key for `generateContent` endpoints without one in the config.
    #[arg(long, env = "POSTERFRAME_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Skip the configured prompt refinement step.
    #[arg(long, default_value_t = false)]
    no_refine: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Frame asset PNG.
    #[arg(long)]
    frame: PathBuf,

    /// RGB value each channel must exceed to count as white.
    #[arg(long, default_value_t = posterframe::DEFAULT_WHITE_THRESHOLD)]
    threshold: u8,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let fit = match args.fit {
        FitChoice::FullBleed => FitPolicy::FullBleed,
        FitChoice::Contain => FitPolicy::contain(args.scale)?,
    };
    let config = PosterConfig {
        fit,
        raw_fallback_path: args.raw_fallback,
        ..PosterConfig::new(args.frame, args.out)
    };
    config.validate()?;

    let bytes = std::fs::read(&args.content)
        .with_context(|| format!("read content '{}'", args.content.display()))?;
    let content = posterframe::decode_image(&bytes)
        .with_context(|| format!("decode content '{}'", args.content.display()))?;

    let written = posterframe::compose_poster(&config, &content)?;
    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = PosterConfig::from_path(&args.config)?;
    if let Some(out) = args.out {
        config.output_path = out;
        config.validate()?;
    }

    let mut source_cfg = config
        .source
        .clone()
        .with_context(|| format!("config '{}' has no source", args.config.display()))?;
    let source: &dyn ContentSource = match &mut source_cfg {
        SourceConfig::HttpImage(src) => &*src,
        SourceConfig::GenerateContent(src) => {
            if src.api_key.is_none() {
                src.api_key.clone_from(&args.api_key);
            }
            &*src
        }
    };

    let written = match config.refine.clone().filter(|_| !args.no_refine) {
        Some(mut refine) => {
            if refine.text_source.api_key.is_none() {
                refine.text_source.api_key.clone_from(&args.api_key);
            }
            let text: &dyn TextSource = &refine.text_source;
            posterframe::generate_poster_refined(
                &config,
                source,
                text,
                &refine.instruction_for(&args.prompt),
                &args.prompt,
            )?
        }
        None => posterframe::generate_poster(&config, source, &args.prompt)?,
    };

    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let frame = posterframe::load_frame(&args.frame)?;
    let report = FrameReport::from_image(&frame, args.threshold);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize frame report")?
        );
    } else {
        println!("{report}");
    }
    Ok(())
}
