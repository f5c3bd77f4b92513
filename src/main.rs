use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueHint};
use driftfield::prelude::*;
use driftfield::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Parser)]
#[command(author, version, about = "Render flow-field and palette-picker sketches to PNG")]
struct Cli {
    /// Log per-frame debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the flow field for a number of frames and save the final canvas
    Flow(FlowArgs),

    /// Render the Oklch palette picker, optionally after simulated clicks
    Picker(PickerArgs),
}

#[derive(Args)]
struct FlowArgs {
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frame rate; each frame advances 1/fps seconds
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seed for noise and spawning (overrides the config file)
    #[arg(long)]
    seed: Option<u32>,

    /// Number of particles (overrides the config file)
    #[arg(long)]
    particles: Option<usize>,

    /// Viewport size as WIDTHxHEIGHT (overrides the config file)
    #[arg(long, value_parser = parse_viewport)]
    viewport: Option<(f64, f64)>,

    /// JSON config file
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, default_value = "flow.png", value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

#[derive(Args)]
struct PickerArgs {
    /// Viewport width used to size the picker
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,

    /// Starting hue in degrees
    #[arg(long)]
    hue: Option<f64>,

    /// Click at X,Y in canvas pixels; repeatable
    #[arg(long = "click", value_parser = parse_point)]
    clicks: Vec<(f64, f64)>,

    /// Output PNG path
    #[arg(long, default_value = "picker.png", value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

fn parse_pair(s: &str, sep: char) -> std::result::Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}', got '{s}'"))?;
    let a = a.trim().parse::<f64>().map_err(|e| format!("'{a}': {e}"))?;
    let b = b.trim().parse::<f64>().map_err(|e| format!("'{b}': {e}"))?;
    Ok((a, b))
}

fn parse_viewport(s: &str) -> std::result::Result<(f64, f64), String> {
    let (w, h) = parse_pair(&s.to_ascii_lowercase(), 'x')?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got {s}"));
    }
    Ok((w, h))
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    parse_pair(s, ',')
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn run_flow(args: FlowArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            SketchConfig::load(path)?
        }
        None => SketchConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.flow.seed = seed;
    }
    if let Some(count) = args.particles {
        config.flow.particle_count = count;
    }
    if let Some((w, h)) = args.viewport {
        config.viewport_width = w;
        config.viewport_height = h;
    }

    let (width, height) = config.canvas_size();
    let flow = FlowField::from_config(&config.flow)
        .with_canvas_fraction(config.canvas_fraction)
        .build(config.canvas_bounds());
    info!(
        width,
        height,
        particles = config.flow.particle_count,
        seed = config.flow.seed,
        "starting flow field"
    );

    let fps = if args.fps > 0.0 { args.fps } else { 60.0 };
    let canvas = PixelCanvas::new(width, height)?;
    let mut runner = Runner::new(flow, canvas, Time::fixed_step(1.0 / fps));
    let drawn = runner.run_frames(args.frames);

    let elapsed = runner.time().elapsed();
    let (flow, canvas) = runner.into_parts();
    info!(drawn, elapsed, color_bias = flow.color_bias(), "simulation finished");

    canvas.save_png(&args.out)?;
    info!(path = %args.out.display(), "saved");
    Ok(())
}

fn run_picker(args: PickerArgs) -> Result<()> {
    let layout = PickerLayout::for_viewport_width(args.viewport_width);
    let mut picker = PalettePicker::new(layout);
    if let Some(hue) = args.hue {
        picker = picker.with_hue(hue);
    }

    let (width, height) = layout.canvas_size();
    info!(width, height, em = layout.em, hue = picker.hue(), "starting picker");

    let canvas = PixelCanvas::new(width, height)?;
    let mut runner = Runner::new(picker, canvas, Time::fixed_step(1.0 / 60.0));
    runner.step();
    for (x, y) in args.clicks {
        runner.input_mut().click(x, y);
        if runner.step() {
            info!(x, y, hue = runner.sketch().hue(), "hue selected");
        } else {
            warn!(x, y, "click outside hue bar ignored");
        }
    }

    let (picker, canvas) = runner.into_parts();
    canvas.save_png(&args.out)?;
    info!(path = %args.out.display(), hue = picker.hue(), "saved");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Flow(args) => run_flow(args),
        Command::Picker(args) => run_picker(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
