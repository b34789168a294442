//! litho - press-simulation pipeline host
//!
//! Decodes a PNG, runs the pipeline at a requested task-class scale, and
//! writes the result back out as a PNG.

use anyhow::{Context, Result};
use clap::Parser;
use litho_core::{ActiveSet, ModuleParams, Raster, RenderOptions, TaskId};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

mod presets;

// =============================================================================
// Logging infrastructure
// =============================================================================

/// Global logger instance for file logging.
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

/// File logger that writes messages to a log file.
struct Logger {
    file: File,
}

impl Logger {
    /// Creates a new logger writing to the specified path (append mode).
    fn new(path: &PathBuf) -> std::io::Result<Self> {
        let file = File::options().append(true).create(true).open(path)?;
        Ok(Self { file })
    }

    /// Writes a message to the log file.
    fn log(&mut self, msg: &str) {
        let _ = writeln!(self.file, "{msg}");
    }
}

/// Logs a message to stderr and optionally to the log file.
pub fn log(msg: &str) {
    eprintln!("{msg}");
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(msg);
        }
    }
}

/// Returns the default log file path (next to the binary).
fn get_default_log_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        let mut log_path = exe_path;
        log_path.set_extension("log");
        log_path
    } else {
        PathBuf::from("litho.log")
    }
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbose: u8, log_path: Option<&PathBuf>) {
    let filter = match verbose {
        0 => "warn",
        1 => "litho=info",
        2 => "litho=debug",
        _ => "litho=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if let Some(path) = log_path {
        let log_dir = path.parent().unwrap_or(Path::new("."));
        let log_filename = path.file_name().unwrap_or(std::ffi::OsStr::new("litho.log"));
        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .with_ansi(false)
            .with_writer(file_appender)
            .init();
    } else if verbose > 0 {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .init();
    }
}

// =============================================================================
// CLI surface (§10.4)
// =============================================================================

#[derive(Parser)]
#[command(name = "litho")]
#[command(author, version, about = "Print/halftone/offset-press simulation host")]
#[command(long_about = "
Renders a source image through the press-simulation pipeline: film
stock response, velox crush, grain, halftone screening, ink bleed, and
paper tooth.

Examples:
  litho in.png out.png --preset cmyk-glossy
  litho in.png out.png --preset trix-bw --task export --upscale 2
  litho in.png out.png --set filmstock.stock=portra --set grain.amount=0.2
")]
struct Cli {
    /// Source image path (PNG).
    source: PathBuf,

    /// Output image path (PNG).
    output: PathBuf,

    /// Task class, selecting the resample behavior of §4.0.
    #[arg(long, default_value = "export")]
    task: String,

    /// Bundled preset name (trix-bw, duotone-news, cmyk-glossy, faded-polaroid).
    #[arg(long)]
    preset: Option<String>,

    /// Explicit `module.param=value` override, layered on top of the preset.
    /// May be repeated.
    #[arg(long = "set", value_name = "module.param=value")]
    overrides: Vec<String>,

    /// Preview downscale cap (only used when `--task preview`).
    #[arg(long, default_value_t = 1024)]
    preview_max_px: u32,

    /// Integer upscale factor (only used when `--task export`).
    #[arg(long, default_value_t = 1)]
    upscale: u32,

    /// Verbose output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log to file (-l default, -l path.log custom).
    #[arg(short = 'l', long = "log", global = true)]
    log: Option<Option<PathBuf>>,
}

/// Parses a single `module.param=value` override into the bundle.
fn apply_override(params: &mut ModuleParams, spec: &str) -> Result<()> {
    let (key, value) = spec
        .split_once('=')
        .with_context(|| format!("override '{spec}' is missing '='"))?;
    let (module, param) = key
        .split_once('.')
        .with_context(|| format!("override '{spec}' is missing 'module.param'"))?;

    if let Ok(i) = value.parse::<i64>() {
        params.set(module, param, i);
    } else if let Ok(f) = value.parse::<f32>() {
        params.set(module, param, f);
    } else if value == "on" || value == "true" {
        params.set(module, param, true);
    } else if value == "off" || value == "false" {
        params.set(module, param, false);
    } else {
        params.set(module, param, value);
    }
    Ok(())
}

fn decode_png(path: &Path) -> Result<Raster> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoder = png::Decoder::new(file);
    let mut reader = decoder.read_info().context("reading PNG header")?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).context("decoding PNG frame")?;
    let bytes = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes.chunks_exact(3).flat_map(|c| [c[0], c[1], c[2], 255]).collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => bytes.chunks_exact(2).flat_map(|c| [c[0], c[0], c[0], c[1]]).collect(),
        other => anyhow::bail!("unsupported PNG color type: {other:?}"),
    };

    Raster::from_raw(info.width, info.height, rgba).map_err(|e| anyhow::anyhow!(e))
}

fn encode_png(path: &Path, raster: &Raster) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().context("writing PNG header")?;
    writer.write_image_data(raster.data()).context("writing PNG image data")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.log {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(get_default_log_path()),
        None => None,
    };
    init_tracing(cli.verbose, log_path.as_ref());
    if let Some(ref path) = log_path {
        if let Ok(logger) = Logger::new(path) {
            if let Ok(mut guard) = LOGGER.lock() {
                *guard = Some(logger);
            }
            if cli.verbose > 0 {
                log(&format!("Logging to: {}", path.display()));
            }
        }
    }

    let task_id: TaskId = cli.task.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let options = match task_id {
        TaskId::Preview => RenderOptions::preview(cli.preview_max_px),
        TaskId::Loupe => RenderOptions::loupe(),
        TaskId::Export => RenderOptions::export(cli.upscale),
    };

    let mut params = match &cli.preset {
        Some(name) => presets::lookup(name)
            .with_context(|| format!("unknown preset '{name}', expected one of {:?}", presets::NAMES))?,
        None => ModuleParams::new(),
    };
    let mut overrides = ModuleParams::new();
    for spec in &cli.overrides {
        apply_override(&mut overrides, spec)?;
    }
    params = params.layered_over(&overrides);

    let active = ActiveSet::from_ids(params.module_ids().map(str::to_string).collect::<Vec<_>>());

    let source = decode_png(&cli.source)?;
    log(&format!("rendering {} ({}x{}) as {}", cli.source.display(), source.width(), source.height(), cli.task));

    let result = match litho_ops::render::render(&source, &active, &params, &options) {
        Ok(result) => result,
        Err(err) if err.is_input_error() => {
            log(&format!("run rejected ({err}), writing source unchanged"));
            source.clone()
        }
        Err(err) => return Err(anyhow::anyhow!(err)),
    };
    encode_png(&cli.output, &result)?;
    log(&format!("wrote {}", cli.output.display()));

    Ok(())
}
