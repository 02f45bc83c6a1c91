use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline length of a video record.
    Duration(DurationArgs),
    /// Evaluate a single frame and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate every frame and write the plan as JSON.
    Plan(PlanArgs),
    /// Look a record up in a store and print the player setup.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct TimelineArgs {
    /// Input video record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Optional timing config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the trailing overlap in frames.
    #[arg(long)]
    overlap_frames: Option<f64>,

    /// Override the fade-out lead in frames.
    #[arg(long)]
    fade_out_frames: Option<f64>,
}

#[derive(Parser, Debug)]
struct DurationArgs {
    #[command(flatten)]
    timeline: TimelineArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    timeline: TimelineArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    timeline: TimelineArgs,

    /// Output plan JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Record store JSON (one record or an array).
    #[arg(long)]
    store: PathBuf,

    /// Record id to open.
    #[arg(long)]
    id: String,

    /// Optional timing config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Duration(args) => cmd_duration(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn load_timing_config(
    path: Option<&Path>,
    overlap_frames: Option<f64>,
    fade_out_frames: Option<f64>,
) -> anyhow::Result<storyreel::TimingConfig> {
    let mut cfg = match path {
        Some(p) => storyreel::TimingConfig::from_path(p)?,
        None => storyreel::TimingConfig::default(),
    };
    if let Some(v) = overlap_frames {
        cfg.overlap_frames = v;
    }
    if let Some(v) = fade_out_frames {
        cfg.fade_out_frames = v;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn build_calculator(args: &TimelineArgs) -> anyhow::Result<storyreel::TimingCalculator> {
    let record = storyreel::VideoRecord::from_path(&args.in_path)
        .with_context(|| format!("load video record '{}'", args.in_path.display()))?;
    let cfg = load_timing_config(
        args.config.as_deref(),
        args.overlap_frames,
        args.fade_out_frames,
    )?;
    let fps = storyreel::Fps::integer(args.fps)?;
    Ok(storyreel::TimingCalculator::from_record(&record, fps, cfg)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_duration(args: DurationArgs) -> anyhow::Result<()> {
    let calc = build_calculator(&args.timeline)?;
    print_json(&serde_json::json!({
        "totalFrames": calc.total_frames(),
        "durationInFrames": calc.duration_in_frames(),
    }))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let calc = build_calculator(&args.timeline)?;
    let state = calc.eval_frame(storyreel::FrameIndex(args.frame))?;
    print_json(&state)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let calc = build_calculator(&args.timeline)?;
    let plan = storyreel::FramePlan::build(
        &calc,
        storyreel::PlanOpts {
            parallel: args.parallel,
            threads: args.threads,
        },
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create plan '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &plan)
        .with_context(|| format!("write plan '{}'", args.out.display()))?;
    w.flush()?;

    eprintln!("wrote {} ({} frames)", args.out.display(), plan.frames.len());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let source = storyreel::JsonRecordSource::new(&args.store);
    let timing = load_timing_config(args.config.as_deref(), None, None)?;
    let preview = storyreel::PreviewSession::open(
        &source,
        &storyreel::RecordId(args.id),
        storyreel::PlayerConfig::default(),
        timing,
    )?;

    eprintln!("{}", preview.notice());
    if let storyreel::Preview::Ready { input, .. } = &preview {
        print_json(input)?;
    }
    Ok(())
}
