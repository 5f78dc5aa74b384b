use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use ec_core::{FrameView, FrameViewMut, Image};
use ec_edge::{EDGE, ThresholdPair, canny, gradient_magnitude};
use ec_filter::{GaussianKernel1D, gaussian_blur, to_gray};
use ec_pipeline::{FpsCounter, FrameProcessor, FrameStats, PipelineConfig, ProcessingMode};
use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "ec_gallery")]
#[command(about = "Run the edgecam frame pipeline on image files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one processing mode and write the RGBA result.
    #[command(name = "process")]
    Process(ProcessArgs),
    /// Write every intermediate plane of the edge path.
    #[command(name = "stages")]
    Stages(StagesArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/gallery")]
    out: PathBuf,
    /// JSON pipeline config; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    low: Option<f32>,
    #[arg(long)]
    high: Option<f32>,
}

#[derive(Args, Debug, Clone)]
struct ProcessArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value = "edge-detect")]
    mode: ProcessingMode,
    /// Process the frame this many times to measure throughput.
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

#[derive(Args, Debug, Clone)]
struct StagesArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize)]
struct MetaProcess {
    input: String,
    stats: FrameStats,
    config: PipelineConfig,
    repeat: usize,
    mean_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MetaStages {
    width: usize,
    height: usize,
    kernel: usize,
    sigma: f32,
    thresholds: ThresholdPair,
    l2_gradient: bool,
    max_gradient: f32,
    edge_pixels: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Process(args) => run_process(args),
        Command::Stages(args) => run_stages(args),
    }
}

fn run_process(args: ProcessArgs) -> Result<()> {
    if args.repeat == 0 {
        bail!("--repeat must be at least 1");
    }

    let config = load_config(&args.common)?;
    let rgba = load_input_rgba(&args.common.input)?;
    let (w, h) = (rgba.width() as usize, rgba.height() as usize);
    fs::create_dir_all(&args.common.out)
        .with_context(|| format!("creating {}", args.common.out.display()))?;

    let processor = FrameProcessor::new(config.clone());
    let input = FrameView::from_slice(w, h, 4, rgba.as_raw()).context("wrapping input frame")?;
    let mut out = vec![0u8; rgba.as_raw().len()];

    let mut fps = FpsCounter::new();
    let started = Instant::now();
    for _ in 0..args.repeat {
        let mut output =
            FrameViewMut::from_slice_mut(w, h, 4, &mut out).context("wrapping output frame")?;
        processor
            .process(args.mode, &input, &mut output)
            .with_context(|| {
                format!(
                    "processing {} in {} mode",
                    args.common.input.display(),
                    args.mode
                )
            })?;
        let _ = fps.tick(Instant::now());
    }
    let elapsed = started.elapsed().as_secs_f64();
    let rate = fps
        .fps()
        .or_else(|| (elapsed > 0.0).then(|| args.repeat as f64 / elapsed));

    let output = FrameView::from_slice(w, h, 4, &out).context("wrapping output frame")?;
    let stats = FrameStats::from_output(args.mode, &output, rate);
    log::info!(
        "{}x{} {}: {:.2} ms/frame{}",
        w,
        h,
        args.mode,
        1e3 * elapsed / args.repeat as f64,
        stats
            .edge_pixels
            .map(|n| format!(", {n} edge pixels"))
            .unwrap_or_default()
    );

    save_rgba(args.common.out.join("output.png"), w, h, out)?;
    write_json(
        args.common.out.join("meta.json"),
        &MetaProcess {
            input: args.common.input.display().to_string(),
            stats,
            config,
            repeat: args.repeat,
            mean_ms: 1e3 * elapsed / args.repeat as f64,
        },
    )
}

fn run_stages(args: StagesArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let rgba = load_input_rgba(&args.common.input)?;
    let (w, h) = (rgba.width() as usize, rgba.height() as usize);
    fs::create_dir_all(&args.common.out)
        .with_context(|| format!("creating {}", args.common.out.display()))?;

    let input = FrameView::from_slice(w, h, 4, rgba.as_raw()).context("wrapping input frame")?;
    let gray = to_gray(&input);
    let smoothed = gaussian_blur(&gray.as_view(), &config.blur);
    let magnitude = gradient_magnitude(&smoothed.as_view(), config.canny.l2_gradient);
    let edges = canny(&smoothed.as_view(), &config.canny);

    let max_gradient = magnitude.data().iter().copied().fold(0.0f32, f32::max);
    let edge_pixels = edges.data().iter().filter(|&&v| v == EDGE).count();

    save_u8_image(args.common.out.join("gray.png"), &gray)?;
    save_u8_image(args.common.out.join("blur.png"), &smoothed)?;
    save_luma_raw(
        args.common.out.join("gradient.png"),
        w,
        h,
        f32_to_u8_vis(magnitude.data()),
    )?;
    save_u8_image(args.common.out.join("edges.png"), &edges)?;

    let kernel = GaussianKernel1D::new(config.blur.kernel, config.blur.sigma);
    write_json(
        args.common.out.join("meta.json"),
        &MetaStages {
            width: w,
            height: h,
            kernel: config.blur.kernel.get(),
            sigma: kernel.sigma,
            thresholds: config.canny.thresholds.normalized(),
            l2_gradient: config.canny.l2_gradient,
            max_gradient,
            edge_pixels,
        },
    )
}

fn load_config(args: &CommonArgs) -> Result<PipelineConfig> {
    let mut config: PipelineConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => PipelineConfig::default(),
    };

    let thresholds = &mut config.canny.thresholds;
    if let Some(low) = args.low {
        thresholds.low = low;
    }
    if let Some(high) = args.high {
        thresholds.high = high;
    }

    Ok(config)
}

fn load_input_rgba(path: &Path) -> Result<RgbaImage> {
    ensure_file_exists(path, "input")?;
    let img = image::open(path).with_context(|| format!("decoding image {}", path.display()))?;
    Ok(img.to_rgba8())
}

fn save_rgba(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let rgba = RgbaImage::from_raw(width as u32, height as u32, data)
        .context("constructing RgbaImage from raw bytes")?;
    rgba.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    save_luma_raw(path, img.width(), img.height(), img.data().to_vec())
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    let max_v = data.iter().copied().fold(0.0f32, f32::max);
    if max_v <= 0.0 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / max_v;
    data.iter()
        .map(|&v| (v * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
