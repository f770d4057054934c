//! Command-line interface implementation
//!
//! The `spritepad` binary is the headless collaborator for `.ssp` files:
//! create a blank sprite, inspect one, or export frames to PNG. The GUI
//! proper lives elsewhere and talks to the same [`Editor`] seam.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::codec;
use crate::color::Color;
use crate::editor::{Editor, MAX_DIMENSION, MIN_DIMENSION};
use crate::output::{save_png, scale_image};
use crate::tools;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// spritepad - create, inspect, and export .ssp sprite animations
#[derive(Parser)]
#[command(name = "spritepad")]
#[command(about = "Create, inspect, and export .ssp sprite animations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blank sprite file
    New {
        /// Sprite size as WxH, both in 1..=64 (e.g. 16x16)
        size: String,

        /// Output .ssp file
        #[arg(short, long)]
        output: PathBuf,

        /// Flood-fill the initial frame with a hex color (e.g. "#FF00FF")
        #[arg(long)]
        fill: Option<String>,
    },
    /// Print dimensions and frame count of a sprite file
    Info {
        /// Input .ssp file
        input: PathBuf,
    },
    /// Export frames of a sprite file to PNG
    Export {
        /// Input .ssp file
        input: PathBuf,

        /// Frame index to export; omit to export every frame
        #[arg(short, long)]
        frame: Option<usize>,

        /// Output file (single frame) or directory (all frames).
        /// Defaults to {input}_{frame}.png next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { size, output, fill } => run_new(&size, &output, fill.as_deref()),
        Commands::Info { input } => run_info(&input),
        Commands::Export {
            input,
            frame,
            output,
            scale,
        } => run_export(&input, frame, output.as_deref(), scale),
    }
}

/// Parse a "WxH" size argument.
fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    Some((w, h))
}

fn run_new(size: &str, output: &Path, fill: Option<&str>) -> ExitCode {
    let Some((width, height)) = parse_size(size) else {
        eprintln!("Error: invalid size '{}', expected WxH (e.g. 16x16)", size);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    if width < MIN_DIMENSION || width > MAX_DIMENSION || height < MIN_DIMENSION || height > MAX_DIMENSION {
        eprintln!(
            "Error: size {}x{} outside the supported range {}..={}",
            width, height, MIN_DIMENSION, MAX_DIMENSION
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut editor = match Editor::new(width, height) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(hex) = fill {
        let color = match Color::from_hex(hex) {
            Ok(color) => color,
            Err(e) => {
                eprintln!("Error: invalid fill color '{}': {}", hex, e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
        editor.set_color(color);
        editor.set_tool(tools::Tool::Fill);
        if let Err(e) = editor.edit_at((0.0, 0.0), (width, height), false) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let path = ensure_ssp_extension(output);
    if let Err(e) = editor.save(&path) {
        eprintln!("Error: failed to write {}: {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Created {} ({}x{}, 1 frame)", path.display(), width, height);
    ExitCode::from(EXIT_SUCCESS)
}

fn run_info(input: &Path) -> ExitCode {
    let sprite = match load_sprite(input) {
        Ok(sprite) => sprite,
        Err(code) => return code,
    };
    println!("{}", input.display());
    println!("  size:   {}x{}", sprite.width(), sprite.height());
    println!("  frames: {}", sprite.frame_count());
    ExitCode::from(EXIT_SUCCESS)
}

fn run_export(input: &Path, frame: Option<usize>, output: Option<&Path>, scale: u8) -> ExitCode {
    let sprite = match load_sprite(input) {
        Ok(sprite) => sprite,
        Err(code) => return code,
    };

    let indices: Vec<usize> = match frame {
        Some(i) if i >= sprite.frame_count() => {
            eprintln!(
                "Error: frame {} out of range ({} frames)",
                i,
                sprite.frame_count()
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Some(i) => vec![i],
        None => (0..sprite.frame_count()).collect(),
    };

    for &i in &indices {
        // index validated above
        let Ok(frame) = sprite.frame(i) else { continue };
        let image = scale_image(&frame.to_image(), scale);
        let path = export_path(input, output, i, indices.len() == 1);
        if let Err(e) = save_png(&image, &path) {
            eprintln!("Error: failed to write {}: {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Wrote {}", path.display());
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn load_sprite(input: &Path) -> Result<crate::sprite::Sprite, ExitCode> {
    let text = match std::fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", input.display(), e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    match codec::decode(&text) {
        Ok(sprite) => Ok(sprite),
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

fn ensure_ssp_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("ssp")
    }
}

/// Output path for one exported frame.
///
/// Single-frame export with an explicit output uses it verbatim; a
/// directory output (or all-frames export) gets `{stem}_{index}.png`.
fn export_path(input: &Path, output: Option<&Path>, index: usize, single: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprite".to_string());
    match output {
        Some(out) if single && !out.is_dir() => out.to_path_buf(),
        Some(out) if out.is_dir() => out.join(format!("{}_{}.png", stem, index)),
        Some(out) => out.with_file_name(format!("{}_{}.png", stem, index)),
        None => input.with_file_name(format!("{}_{}.png", stem, index)),
    }
}
