// ============================================================================
// filmgrade CLI — headless batch grading via command-line arguments
// ============================================================================
//
// Usage examples:
//   filmgrade --input photo.png --preset velvia.json --output result.png
//   filmgrade -i photo.jpg --film classic-chrome -o out.png
//   filmgrade -i *.jpg --preset grade.json --output-dir graded/ --format png
//   filmgrade -i scan.tif --cube print_look.cube -o out.jpg --quality 85
//
// All processing runs synchronously; each file is loaded, rendered through
// the grading engine, and written back out. The LUT is synthesized once and
// reused for every file in the batch.
// ============================================================================

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use image::RgbaImage;

use crate::engine::GradingEngine;
use crate::film::FilmType;
use crate::ops::lut::Lut3D;
use crate::ops::pipeline::Histogram;
use crate::params::GradePreset;
use crate::{log_err, log_info};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// filmgrade headless image grader.
///
/// Apply film emulation, color grading, and texture to image files — no GUI
/// required.
#[derive(Parser, Debug)]
#[command(
    name = "filmgrade",
    about = "filmgrade headless batch image grader",
    long_about = "Grade image files with film emulation presets or external .cube LUTs\n\
                  without opening a GUI. Supports PNG, JPEG, WEBP, BMP, and TIFF input.\n\n\
                  Example:\n  \
                  filmgrade --input photo.png --preset velvia.json --output result.png\n  \
                  filmgrade -i *.jpg --film classic-chrome --output-dir graded/ --format png"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Grade preset file (JSON with a film stock and adjustment values).
    /// When omitted, neutral adjustments are used.
    #[arg(short, long, value_name = "PRESET.json")]
    pub preset: Option<PathBuf>,

    /// Film stock override. Takes precedence over the preset's film.
    #[arg(long, value_enum, value_name = "FILM")]
    pub film: Option<FilmType>,

    /// External .cube LUT applied instead of the synthesized film LUT.
    #[arg(long, value_name = "LUT.cube")]
    pub cube: Option<PathBuf>,

    /// Output file path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    /// Files are written here with the original stem and the target format's extension.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, jpeg, bmp, tiff.
    /// When omitted, the format is inferred from --output's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Write the render histogram (256 bins per channel) to a JSON file.
    /// Only valid for single-file input.
    #[arg(long, value_name = "FILE.json")]
    pub histogram: Option<PathBuf>,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl SaveFormat {
    fn extension(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tiff => "tiff",
        }
    }

    /// Recognize a `--format` name or a file extension. One table serves
    /// both, so the flag and extension inference can never disagree.
    fn from_name(name: &str) -> Option<SaveFormat> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "tif" | "tiff" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> ExitCode {
    let inputs = gather_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files found.");
        return ExitCode::FAILURE;
    }

    // Batch runs write into --output-dir; a single --output path is ambiguous
    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: --output names one file but {} inputs were given; \
             use --output-dir for batch grading.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }
    if inputs.len() > 1 && args.histogram.is_some() {
        eprintln!("error: --histogram only accepts a single input file.");
        return ExitCode::FAILURE;
    }

    let save_format = pick_format(args.format.as_deref(), args.output.as_deref());

    // Load preset and apply the film override
    let mut preset = match &args.preset {
        Some(path) => match GradePreset::load(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GradePreset::default(),
    };
    if let Some(film) = args.film {
        preset.film = film;
    }

    // External LUT takes the place of the synthesized one
    let external_lut: Option<Lut3D> = match &args.cube {
        Some(path) => match Lut3D::load_cube(path) {
            Ok(lut) => Some(lut),
            Err(e) => {
                eprintln!("error: could not load '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("error: cannot create output directory '{}': {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let mut engine = GradingEngine::new();
    let total = inputs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, input_path) in inputs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, input_path.display());
        }

        let file_start = Instant::now();

        let output_path = match destination_for(
            input_path,
            args.output.as_deref(),
            args.output_dir.as_deref(),
            save_format,
        ) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("  error: {}", e);
                any_failure = true;
                continue;
            }
        };

        match run_one(
            input_path,
            &output_path,
            &mut engine,
            &preset,
            external_lut.as_ref(),
            save_format,
            args.quality,
            args.histogram.as_deref(),
        ) {
            Ok(()) => {
                if args.verbose || multi {
                    println!(
                        "  wrote {} in {:.0}ms",
                        output_path.display(),
                        file_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                log_err!("{}: {}", input_path.display(), e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-file processing pipeline
// ============================================================================

fn run_one(
    input: &Path,
    output: &Path,
    engine: &mut GradingEngine,
    preset: &GradePreset,
    external_lut: Option<&Lut3D>,
    format: SaveFormat,
    quality: u8,
    histogram_out: Option<&Path>,
) -> Result<(), String> {
    // -- Step 1: Load ----------------------------------------------------
    let src: RgbaImage = image::open(input)
        .map_err(|e| format!("load failed: {}", e))?
        .to_rgba8();

    // -- Step 2: Render --------------------------------------------------
    let (graded, histogram) = match external_lut {
        Some(lut) => crate::engine::render_with_lut(&src, lut, &preset.adjustments, &[]),
        None => engine.render(&src, preset.film, &preset.adjustments, &[]),
    }
    .map_err(|e| format!("render failed: {}", e))?;

    log_info!(
        "graded {} ({}x{}) with {:?}",
        input.display(),
        src.width(),
        src.height(),
        preset.film
    );

    // -- Step 3: Save ----------------------------------------------------
    write_image(&graded, output, format, quality)?;

    if let Some(path) = histogram_out {
        write_histogram(&histogram, path)?;
    }

    Ok(())
}

fn write_image(
    img: &RgbaImage,
    output: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), String> {
    let err = |e: image::ImageError| format!("save failed: {}", e);
    match format {
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel — flatten before encoding
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let file = std::fs::File::create(output)
                .map_err(|e| format!("save failed: {}", e))?;
            let mut writer = std::io::BufWriter::new(file);
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut writer,
                quality.clamp(1, 100),
            );
            encoder
                .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ColorType::Rgb8)
                .map_err(err)
        }
        SaveFormat::Png => img
            .save_with_format(output, image::ImageFormat::Png)
            .map_err(err),
        SaveFormat::Bmp => img
            .save_with_format(output, image::ImageFormat::Bmp)
            .map_err(err),
        SaveFormat::Tiff => img
            .save_with_format(output, image::ImageFormat::Tiff)
            .map_err(err),
    }
}

fn write_histogram(histogram: &Histogram, path: &Path) -> Result<(), String> {
    let json = serde_json::json!({
        "r": histogram.r.to_vec(),
        "g": histogram.g.to_vec(),
        "b": histogram.b.to_vec(),
    });
    let text = serde_json::to_string(&json)
        .map_err(|e| format!("histogram serialization failed: {}", e))?;
    std::fs::write(path, text)
        .map_err(|e| format!("cannot write histogram {}: {}", path.display(), e))
}

// ============================================================================
// Helpers
// ============================================================================

/// Expand the `--input` arguments into an ordered, de-duplicated file list.
/// Each argument is tried as a literal file first and as a glob pattern
/// otherwise; glob hits that are not regular files (directories, sockets)
/// are dropped.
fn gather_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let literal = PathBuf::from(pattern);
        if literal.is_file() {
            if !files.contains(&literal) {
                files.push(literal);
            }
            continue;
        }

        let Ok(matches) = glob::glob(pattern) else {
            eprintln!("warning: '{}' is neither a file nor a valid glob", pattern);
            continue;
        };
        let before = files.len();
        for path in matches.flatten() {
            if path.is_file() && !files.contains(&path) {
                files.push(path);
            }
        }
        if files.len() == before {
            eprintln!("warning: nothing matched '{}'", pattern);
        }
    }

    files
}

/// Output format from the `--format` flag, the `--output` extension, or PNG.
/// An unrecognized flag value is reported rather than silently remapped.
fn pick_format(format_arg: Option<&str>, output: Option<&Path>) -> SaveFormat {
    if let Some(name) = format_arg {
        match SaveFormat::from_name(name) {
            Some(f) => return f,
            None => eprintln!("warning: unknown format '{}', defaulting to png", name),
        }
    }
    output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(SaveFormat::from_name)
        .unwrap_or(SaveFormat::Png)
}

/// Where the graded result for `input` is written. An explicit `--output`
/// wins; `--output-dir` keeps the source stem; with neither, the file lands
/// next to the source with a `_graded` stem suffix so the original is never
/// clobbered, not even when grading png→png in place.
fn destination_for(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: SaveFormat,
) -> Result<PathBuf, String> {
    if let Some(explicit) = output {
        return Ok(explicit.to_path_buf());
    }

    let stem = input
        .file_stem()
        .ok_or_else(|| format!("'{}' has no usable file name", input.display()))?;

    let mut name = stem.to_os_string();
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            name.push("_graded");
            input.parent().unwrap_or(Path::new(".")).to_path_buf()
        }
    };
    name.push(".");
    name.push(format.extension());
    Ok(dir.join(name))
}
