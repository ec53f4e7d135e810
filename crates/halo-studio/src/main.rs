//! Halo studio: plays a script of ring values through the full pipeline
//! (group → scene → renderer → event bus) and writes the last frame as PNG.

mod cues;
mod steps;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use halo_engine::device::{GpuInit, HeadlessGpu};
use halo_engine::logging::{init_logging, LoggingConfig};
use halo_engine::render::shapes::arc::ArcRenderer;
use halo_engine::render::Canvas;
use halo_engine::scene::DrawList;
use halo_engine::time::FrameClock;
use halo_ui::prelude::*;

use cues::CueLogger;
use steps::{default_steps, Step};

/// Upper bound on frames spent letting a final animation settle.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Longest accepted `--duration`, in seconds.
const MAX_DURATION_SECS: f32 = 3600.0;

#[derive(Parser, Debug)]
#[command(name = "halo-studio")]
#[command(about = "Drive a three-ring progress group and snapshot the result")]
struct Args {
    /// Side of the square canvas, in pixels
    #[arg(long, default_value_t = 300)]
    size: u32,

    /// Stroke width of every ring
    #[arg(long, default_value_t = 20.0)]
    ring_width: f32,

    /// Gap between neighbouring rings
    #[arg(long, default_value_t = 1.0)]
    padding: f32,

    /// Animation duration in seconds
    #[arg(long, default_value_t = 1.5)]
    duration: f32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Frames rendered after each step (default: one animation's worth)
    #[arg(long)]
    frames_per_step: Option<u32>,

    /// Value change as ring=value (inner|middle|outer or 0..=2); repeatable
    #[arg(long = "step")]
    steps: Vec<Step>,

    /// Animate value changes instead of jumping
    #[arg(long)]
    animated: bool,

    /// Output PNG path
    #[arg(long, default_value = "halo.png")]
    out: PathBuf,

    /// Render every frame on a headless GPU and write the GPU frame
    #[arg(long)]
    gpu: bool,

    /// Log filter (env_logger syntax); falls back to RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn config(&self) -> Result<RingGroupConfig> {
        anyhow::ensure!(self.size > 0, "--size must be positive");
        anyhow::ensure!(
            self.duration.is_finite() && self.duration >= 0.0,
            "--duration must be a non-negative number of seconds"
        );
        anyhow::ensure!(
            self.duration <= MAX_DURATION_SECS,
            "--duration must be at most {MAX_DURATION_SECS} seconds"
        );
        let duration = Duration::try_from_secs_f32(self.duration).context("--duration out of range")?;
        Ok(RingGroupConfig::default()
            .ring_width(self.ring_width)
            .ring_padding(self.padding)
            .animation_duration(duration))
    }

    fn frames_per_step(&self) -> u32 {
        self.frames_per_step
            .unwrap_or_else(|| ((self.duration * self.fps.max(1) as f32).ceil() as u32).saturating_add(1))
            .max(1)
    }

    fn steps(&self) -> Vec<Step> {
        if self.steps.is_empty() { default_steps() } else { self.steps.clone() }
    }
}

/// Headless GPU plus the arc pipeline built for its target.
struct GpuPass {
    gpu: HeadlessGpu,
    renderer: ArcRenderer,
}

impl GpuPass {
    fn new() -> Result<Self> {
        let gpu = HeadlessGpu::new(GpuInit::default()).context("headless GPU unavailable")?;
        let renderer = ArcRenderer::new(gpu.device(), gpu.format())?;
        Ok(Self { gpu, renderer })
    }

    fn render(&mut self, list: &DrawList, viewport: Viewport) -> Result<()> {
        let Self { gpu, renderer } = self;
        gpu.render_frame(Color::BLACK, viewport, |ctx, target| {
            renderer.render(ctx, target, list);
        })
    }

    /// RGBA8 pixels of the last rendered frame.
    fn pixels(&self) -> Result<Vec<u8>> {
        self.gpu.read_rgba8()
    }
}

/// Result of playing a script.
struct Run {
    canvas: Canvas,
    cues: Vec<&'static str>,
    frames: u64,
}

fn play(args: &Args, mut gpu: Option<&mut GpuPass>) -> Result<Run> {
    let config = args.config()?;
    let bus = EventBus::new();
    let cues = CueLogger::attach(&bus);

    let mut group = RingGroup::with_config(config, bus.clone());
    let mut scene = Scene::new();
    let mut clock = FrameClock::at_fps(args.fps);
    let viewport = Viewport::new(args.size as f32, args.size as f32);

    let mut frame = |group: &mut RingGroup, dt: f32| -> Result<bool> {
        let list = scene.frame(group, viewport, dt);
        if let Some(gpu) = gpu.as_deref_mut() {
            gpu.render(list, viewport)?;
        }
        bus.dispatch();
        Ok(scene.is_animating())
    };

    frame(&mut group, 0.0)?;

    let frames_per_step = args.frames_per_step();
    for step in args.steps() {
        info!("step {step} (animated: {})", args.animated);
        group.set_value(step.ring, step.value, args.animated);
        for _ in 0..frames_per_step {
            frame(&mut group, clock.tick().dt)?;
        }
    }

    let mut settle = 0;
    while frame(&mut group, clock.tick().dt)? {
        settle += 1;
        if settle >= MAX_SETTLE_FRAMES {
            log::warn!("animation still running after {settle} extra frames");
            break;
        }
    }

    let mut canvas = Canvas::new(args.size, args.size);
    canvas.clear(Color::BLACK);
    canvas.draw(scene.draw_list());

    let played = cues.played();
    cues.detach(&bus);

    Ok(Run {
        canvas,
        cues: played,
        frames: clock.tick().frame_index,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let mut gpu = if args.gpu {
        info!("initializing headless GPU");
        Some(GpuPass::new()?)
    } else {
        None
    };

    let run = play(&args, gpu.as_mut())?;
    info!("{} frames, cues: {:?}", run.frames, run.cues);

    // The GPU target is cleared to opaque black, so its premultiplied texels
    // equal the canvas's straight RGBA output.
    let pixels = match &gpu {
        Some(gpu) => {
            info!("reading back GPU frame");
            gpu.pixels()?
        }
        None => run.canvas.to_rgba8(),
    };
    let image = image::RgbaImage::from_raw(run.canvas.width(), run.canvas.height(), pixels)
        .context("frame size does not match its pixel buffer")?;
    image
        .save(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!("wrote {}", args.out.display());

    Ok(())
}
