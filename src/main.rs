// SPDX-License-Identifier: MPL-2.0
use photo_session::config;
use photo_session::domain::geometry::Size;
use photo_session::media::{self, ExportService, ImageProcessor, ProcessImage, RasterKernels};
use photo_session::{EditState, Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
photo-session: apply saved edits to a photo and flatten it

USAGE:
  photo-session <INPUT> --output <FILE> [OPTIONS]

OPTIONS:
  -o, --output <FILE>     Where to write the flattened image
  -e, --edits <FILE>      Edit state as TOML (default: no edits)
  -c, --canvas <WxH>      Canvas size (default: processed image size)
      --config-dir <DIR>  Directory holding settings.toml
  -h, --help              Print this help
";

struct Args {
    input: PathBuf,
    output: PathBuf,
    edits: Option<PathBuf>,
    canvas: Option<(u32, u32)>,
    config_dir: Option<PathBuf>,
}

fn parse_canvas(value: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid canvas dimension '{s}'"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let parsed = Args {
        output: args.value_from_str(["-o", "--output"])?,
        edits: args.opt_value_from_str(["-e", "--edits"])?,
        canvas: args.opt_value_from_fn(["-c", "--canvas"], parse_canvas)?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        input: args.free_from_str()?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring extra arguments: {rest:?}");
    }
    Ok(Some(parsed))
}

fn read_edits(path: Option<&PathBuf>) -> Result<EditState> {
    match path {
        Some(path) => Ok(toml::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(EditState::default()),
    }
}

fn run(args: &Args) -> Result<()> {
    let (config, warning) = config::load_with_override(args.config_dir.clone());
    if let Some(key) = warning {
        log::warn!("using default settings ({key})");
    }

    let source = Arc::new(media::load_image(&args.input)?);
    let mut state = read_edits(args.edits.as_ref())?;
    let dropped = state.remove_blank_texts();
    if dropped > 0 {
        log::info!("skipping {dropped} empty text overlay(s)");
    }
    if let Some(crop) = &state.crop {
        crop.validate(Size::from_pixels(source.width(), source.height()))
            .map_err(|err| Error::Processing(err.into()))?;
    }

    let processor = ImageProcessor::new(RasterKernels::default());
    let processed = processor.process_image(&source, &state)?;
    let (width, height) = args
        .canvas
        .unwrap_or((processed.width(), processed.height()));

    let exporter = ExportService::new(config.text.style());
    let strokes = state.drawing.clone().unwrap_or_default();
    let flat = exporter.export_canvas(
        Size::from_pixels(width, height),
        &strokes,
        &processed,
        &state,
    )?;
    media::save_image(&flat, &args.output)?;
    log::info!(
        "wrote {}x{} image to {}",
        width,
        height,
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
