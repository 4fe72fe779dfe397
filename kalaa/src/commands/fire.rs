//! Fire effect command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use kalaa_fire::{
    DrawCommand, FireConfig, FireEngine, FrameClock, FrameStats, ManualScheduler, RasterSurface,
    RecordingSurface, Surface, SurfaceSize,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::utils::{
    add_table_row, create_progress_bar, create_table, format_bytes, parse_hex_color,
};

#[derive(Subcommand)]
pub enum FireCommands {
    /// Render frames to PNG files
    Render {
        /// Surface width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,

        /// Write every Nth frame
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Random seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration file (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Opaque background color (#rrggbb); frames are transparent otherwise
        #[arg(long, value_parser = parse_hex_color)]
        background: Option<[u8; 3]>,
    },

    /// Run the engine headless and report pool statistics
    Simulate {
        /// Surface width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,

        /// Report a row every N frames
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
        report_every: u64,

        /// Random seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration file (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame after which the viewport changes
        #[arg(long, requires = "resize_to")]
        resize_at: Option<u64>,

        /// New viewport, as WIDTHxHEIGHT
        #[arg(long, requires = "resize_at")]
        resize_to: Option<SurfaceSize>,
    },

    /// Print the draw commands of the last simulated frame
    Trace {
        /// Surface width in pixels
        #[arg(long, default_value = "400")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "300")]
        height: u32,

        /// Number of frames to simulate
        #[arg(short, long, default_value = "1")]
        frames: u64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Configuration file to load instead of the defaults
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

pub fn execute(command: FireCommands, quiet: bool) -> Result<()> {
    match command {
        FireCommands::Render {
            width,
            height,
            frames,
            every,
            out,
            seed,
            config,
            background,
        } => render(
            RenderArgs {
                size: SurfaceSize::new(width, height),
                frames,
                every,
                out,
                background,
            },
            seed,
            config.as_deref(),
            quiet,
        ),
        FireCommands::Simulate {
            width,
            height,
            frames,
            report_every,
            seed,
            config,
            resize_at,
            resize_to,
        } => simulate(
            SurfaceSize::new(width, height),
            frames,
            report_every,
            seed,
            config.as_deref(),
            resize_at.zip(resize_to),
        ),
        FireCommands::Trace {
            width,
            height,
            frames,
            seed,
            json,
        } => trace(SurfaceSize::new(width, height), frames, seed, json),
        FireCommands::Config { file, format } => print_config(file.as_deref(), format),
    }
}

fn load_config(path: Option<&Path>) -> Result<FireConfig> {
    match path {
        Some(path) => FireConfig::load(path)
            .with_context(|| format!("Failed to load fire config {}", path.display())),
        None => Ok(FireConfig::default()),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!("Using seed {seed}");
    seed
}

/// Engine with a manual scheduler, as every headless command uses
fn headless_engine<S: Surface>(
    surface: S,
    size: SurfaceSize,
    seed: u64,
    config: FireConfig,
) -> Result<FireEngine<S, ManualScheduler, StdRng>> {
    FireEngine::attach(
        Some(surface),
        size,
        ManualScheduler::new(),
        StdRng::seed_from_u64(seed),
        config,
    )
    .context("Failed to start fire engine")
}

/// Grant the engine's pending frame request and run it
fn step<S: Surface>(
    engine: &mut FireEngine<S, ManualScheduler, StdRng>,
    clock: &mut FrameClock,
) -> Option<FrameStats> {
    engine
        .scheduler_mut()
        .take_request()
        .then(|| engine.frame(clock.tick()))
}

struct RenderArgs {
    size: SurfaceSize,
    frames: u64,
    every: u64,
    out: PathBuf,
    background: Option<[u8; 3]>,
}

fn render(args: RenderArgs, seed: Option<u64>, config: Option<&Path>, quiet: bool) -> Result<()> {
    let config = load_config(config)?;
    let seed = resolve_seed(seed);
    fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let mut engine = headless_engine(RasterSurface::new(args.size), args.size, seed, config)?;
    let mut clock = FrameClock::default();
    let pb = create_progress_bar(args.frames, "Rendering frames", quiet);

    let mut written = 0u64;
    let mut bytes = 0u64;
    for frame in 1..=args.frames {
        if step(&mut engine, &mut clock).is_none() {
            break;
        }
        pb.inc(1);
        if frame % args.every != 0 {
            continue;
        }

        let path = args.out.join(format!("frame_{frame:05}.png"));
        let surface = engine.surface();
        match args.background {
            Some(background) => surface.flatten_onto(background).save(&path)?,
            None => surface.save_png(&path)?,
        }
        bytes += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        written += 1;
    }
    pb.finish_and_clear();

    info!(
        "Wrote {written} frame(s), {} total, to {}",
        format_bytes(bytes),
        args.out.display()
    );
    if !quiet {
        println!(
            "✓ Rendered {} frames at {} ({} written to {})",
            engine.frame_index(),
            args.size,
            written,
            args.out.display()
        );
    }
    Ok(())
}

fn simulate(
    size: SurfaceSize,
    frames: u64,
    report_every: u64,
    seed: Option<u64>,
    config: Option<&Path>,
    resize: Option<(u64, SurfaceSize)>,
) -> Result<()> {
    let config = load_config(config)?;
    let seed = resolve_seed(seed);
    let mut engine = headless_engine(RecordingSurface::new(size), size, seed, config)?;
    let mut clock = FrameClock::default();

    println!("Fire simulation: {size}, seed {seed}");
    println!("Initial pool: {} embers", engine.ember_count());
    println!();

    let mut table = create_table(&["Frame", "Surface", "Pool", "Painted", "Respawned", "Topped up"]);
    let mut total_respawned = 0;
    let mut total_topped_up = 0;
    for frame in 1..=frames {
        let Some(stats) = step(&mut engine, &mut clock) else {
            break;
        };
        // Recorded commands are not needed past the frame
        engine.surface_mut().take_commands();
        total_respawned += stats.respawned;
        total_topped_up += stats.topped_up;

        if frame % report_every == 0 || frame == frames {
            add_table_row(
                &mut table,
                vec![
                    frame.to_string(),
                    engine.surface().size().to_string(),
                    stats.pool_size.to_string(),
                    stats.painted.to_string(),
                    stats.respawned.to_string(),
                    stats.topped_up.to_string(),
                ],
            );
        }

        if let Some((at, new_size)) = resize {
            if frame == at {
                info!("Resizing to {new_size} after frame {frame}");
                engine.resize(new_size);
            }
        }
    }
    table.printstd();

    println!();
    println!("Frames run: {}", engine.frame_index());
    println!("Final pool: {} embers", engine.ember_count());
    println!("Respawned: {total_respawned}");
    println!("Topped up: {total_topped_up}");
    println!("Animation time: {:.2}", engine.time());
    Ok(())
}

fn trace(size: SurfaceSize, frames: u64, seed: u64, json: bool) -> Result<()> {
    let mut engine = headless_engine(
        RecordingSurface::new(size),
        size,
        seed,
        FireConfig::default(),
    )?;
    engine.surface_mut().take_commands();
    let mut clock = FrameClock::default();

    let mut last = Vec::new();
    for _ in 0..frames {
        if step(&mut engine, &mut clock).is_none() {
            break;
        }
        last = engine.surface_mut().take_commands();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&last)?);
        return Ok(());
    }

    println!(
        "Frame {} at {}: {} command(s)",
        engine.frame_index(),
        size,
        last.len()
    );
    for command in &last {
        println!("{}", describe(command));
    }
    Ok(())
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Resize { size } => format!("resize {size}"),
        DrawCommand::Clear => "clear".to_string(),
        DrawCommand::Save => "save".to_string(),
        DrawCommand::Restore => "restore".to_string(),
        DrawCommand::Translate { x, y } => format!("  translate {x:.2} {y:.2}"),
        DrawCommand::Rotate { angle } => format!("  rotate {angle:.4}"),
        DrawCommand::Fill { path, paint } => format!(
            "  fill {} command(s) with {}",
            path.commands().len(),
            match paint {
                kalaa_fire::Paint::Solid(color) => color.to_string(),
                kalaa_fire::Paint::LinearGradient { stops, .. } =>
                    format!("linear gradient ({} stops)", stops.len()),
            }
        ),
    }
}

fn print_config(file: Option<&Path>, format: ConfigFormat) -> Result<()> {
    let config = load_config(file)?;
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
        ConfigFormat::Yaml => serde_yaml_ng::to_string(&config)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
