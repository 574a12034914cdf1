use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "walkcycle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the configured batch of characters.
    Run(RunArgs),
    /// Cut out one sprite and write its walk frames with default settings.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Pipeline config JSON. Relative paths inside resolve against its directory.
    #[arg(long)]
    config: PathBuf,

    /// Override the output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Process characters in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Source sprite image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Character name used in output file names.
    #[arg(long)]
    name: String,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Background key to use.
    #[arg(long, value_enum, default_value_t = KeyChoice::FloodFill)]
    key: KeyChoice,

    /// Move the whole sprite per frame instead of swinging the legs.
    #[arg(long, default_value_t = false)]
    rigid: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeyChoice {
    FloodFill,
    SoftRamp,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = walkcycle::PipelineConfig::from_path(&args.config)
        .with_context(|| format!("load config '{}'", args.config.display()))?;
    if let Some(out) = args.out {
        cfg.output_dir = out;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }

    let report = walkcycle::run_batch(&cfg)?;
    print_report(&report);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut cfg = walkcycle::PipelineConfig {
        output_dir: args.out,
        sources: vec![walkcycle::SpriteSource::new(args.name, args.in_path)],
        ..walkcycle::PipelineConfig::default()
    };
    if let KeyChoice::SoftRamp = args.key {
        cfg.background = walkcycle::BackgroundKey::SoftRamp(walkcycle::SoftRamp::default());
    }
    if args.rigid {
        cfg.walk.compositing = walkcycle::Compositing::Rigid;
    }

    let report = walkcycle::run_batch(&cfg)?;
    print_report(&report);
    if !report.is_clean() {
        anyhow::bail!("sprite was not processed");
    }
    Ok(())
}

// Written files are already logged by the library as they land.
fn print_report(report: &walkcycle::BatchReport) {
    eprintln!("{}", report.summary());
}
