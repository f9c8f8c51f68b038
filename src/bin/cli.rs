//! Donut De-polar - click-calibrated batch unwrapping of annular images
//!
//! This is the CLI entry point for the donut-depolar tool.
//! Run with: cargo run --bin donut-depolar -- <image>...

use anyhow::Context;
use clap::{CommandFactory, Parser};
use donut_depolar::capture::PointRole;
use donut_depolar::gui::run_capture_window;
use donut_depolar::input::load_image;
use donut_depolar::{
    validate_inputs, AppSettings, BatchTransformer, DryRunTransform,
    MagickTransform, TransformProvider,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Unwrap donut-shaped images with a calibration clicked on the first one",
    long_about = None
)]
struct Args {
    /// Images to unwrap; the first one is shown for calibration
    files: Vec<PathBuf>,

    #[arg(
        long,
        env = "DEPOLAR_PREFIX",
        help = "Prefix prepended to output file names [default: out_]"
    )]
    prefix: Option<String>,

    #[arg(
        long,
        env = "MAGICK_PATH",
        help = "ImageMagick binary to run [default: convert]"
    )]
    magick: Option<String>,

    #[arg(
        long,
        env = "DEPOLAR_FILTER",
        help = "Resampling filter for the distort [default: Cubic]"
    )]
    filter: Option<String>,

    #[arg(long, help = "Capture window width in pixels")]
    window_width: Option<u32>,

    #[arg(long, help = "Capture window height in pixels")]
    window_height: Option<u32>,

    #[arg(long, help = "Print the transforms instead of running them")]
    dry_run: bool,

    #[arg(long, help = "Save the effective options as defaults for later runs")]
    save_settings: bool,
}

impl Args {
    /// Layer flags and their environment variables over loaded settings.
    ///
    /// An empty prefix is kept so the caller can reject it; an empty binary
    /// or filter name falls back to the settings.
    fn apply_to(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(ref prefix) = self.prefix {
            settings.output_prefix = prefix.clone();
        }
        if let Some(magick) = self.magick.as_ref().filter(|m| !m.is_empty()) {
            settings.magick_path = magick.clone();
        }
        if let Some(filter) = self.filter.as_ref().filter(|f| !f.is_empty()) {
            settings.filter = filter.clone();
        }
        if let Some(width) = self.window_width {
            settings.window_width = width;
        }
        if let Some(height) = self.window_height {
            settings.window_height = height;
        }
        settings
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Fail fast, before any window exists
    let files = match validate_inputs(&args.files) {
        Ok(files) => files,
        Err(e) => {
            println!("{}", e);
            println!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
    };

    let settings = args.apply_to(AppSettings::load());
    anyhow::ensure!(
        !settings.output_prefix.is_empty(),
        "Output prefix must not be empty, outputs would overwrite the inputs"
    );

    if args.save_settings {
        match settings.save() {
            Ok(()) => tracing::info!("Saved settings to {:?}", AppSettings::settings_path()),
            Err(e) => tracing::warn!("Could not save settings: {}", e),
        }
    }

    let provider: Box<dyn TransformProvider> = if args.dry_run {
        Box::new(DryRunTransform)
    } else {
        let magick = MagickTransform::with_path(&settings.magick_path).with_filter(&settings.filter);
        if !magick.is_available() {
            tracing::warn!(
                "{} could not be launched, every transform will fail",
                settings.magick_path
            );
        }
        Box::new(magick)
    };

    println!("🍩 Donut De-polar");
    println!("================================================");
    println!("Images: {}", files.len());
    println!("Transform: {}", provider.name());
    println!("Output prefix: {}", settings.output_prefix);
    println!("================================================\n");

    // Calibrate on the first image
    let first = &files[0];
    let image = load_image(first).context("Cannot show the calibration image")?;
    let image_name = first
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| first.display().to_string());

    println!("🎯 Click the center, the inner edge, then the outer edge. Press Esc when done.\n");
    let points = run_capture_window(
        &image,
        &image_name,
        (settings.window_width, settings.window_height),
    )
    .context("Capture window failed")?;

    for (i, point) in points.as_slice().iter().enumerate() {
        println!("   {:<16} {}", PointRole::for_index(i).as_str(), point);
    }

    // Apply to every image, the first included
    let batch = BatchTransformer::new(provider).with_prefix(&settings.output_prefix);
    let (_, report) = batch.run_calibrated(files, &points)?;

    println!(
        "\n✅ Done: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    for failure in report.failures() {
        if let Err(ref e) = failure.result {
            eprintln!("   ❌ {}: {}", failure.item.input.display(), e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("donut-depolar").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_settings() {
        let args = parse(&["--prefix", "flat_", "--magick", "magick", "--window-width", "800", "a.png"]);
        let settings = args.apply_to(AppSettings::default());
        assert_eq!(settings.output_prefix, "flat_");
        assert_eq!(settings.magick_path, "magick");
        assert_eq!(settings.filter, "Cubic");
        assert_eq!((settings.window_width, settings.window_height), (800, 1024));
    }

    #[test]
    fn test_empty_binary_and_filter_fall_back() {
        let args = parse(&["--magick", "", "--filter", "", "a.png"]);
        let settings = args.apply_to(AppSettings::default());
        assert_eq!(settings.magick_path, "convert");
        assert_eq!(settings.filter, "Cubic");
    }

    #[test]
    fn test_files_keep_argument_order() {
        let args = parse(&["b.png", "a.png"]);
        assert_eq!(args.files, vec![PathBuf::from("b.png"), PathBuf::from("a.png")]);
    }
}
