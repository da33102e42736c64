// main.rs      imgmatrix command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use imgmatrix::{Decoder, Encoder, IndexMatrix, Layout, Pixel};
use log::warn;
use pix::{rgb::SRgba8, Raster};
use rayon::prelude::*;
use std::error::Error;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &'static str = std::env!("CARGO_PKG_VERSION");

/// Image file extensions to look for in the current directory
const EXTENSIONS: &[&str] =
    &["jpeg", "jpg", "png", "gif", "tiff", "tif", "bmp"];

/// Error which can be sent between threads
type BoxError = Box<dyn Error + Send + Sync>;

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(color_choice(io::stdout()));
    let mut err = StandardStream::stderr(color_choice(io::stderr()));
    match create_app().get_matches().subcommand() {
        ("encode", Some(matches)) => encode(&mut out, &mut err, matches)?,
        ("decode", Some(matches)) => decode(&mut out, &mut err, matches)?,
        _ => unreachable!(),
    }
    out.reset()?;
    err.reset()?;
    Ok(())
}

/// Choose colors only for terminals, so piped matrices stay plain
fn color_choice<T: IsTerminal>(stream: T) -> ColorChoice {
    if stream.is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("imgmatrix")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("Image / index matrix utility")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("encode")
                .about("Encode images to index matrices, one per line")
                .arg(
                    Arg::with_name("files")
                        .multiple(true)
                        .help("input file(s); paths from stdin if omitted"),
                ),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("Decode index matrices from stdin to PNG images")
                .arg(
                    Arg::with_name("scale")
                        .short("s")
                        .long("scale")
                        .takes_value(true)
                        .default_value("1")
                        .validator(|v| match v.parse::<u32>() {
                            Ok(s) if s > 0 => Ok(()),
                            _ => Err("scale must be a positive integer".into()),
                        })
                        .help("scale factor"),
                )
                .arg(
                    Arg::with_name("dir")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .default_value(".")
                        .help("output directory"),
                )
                .arg(
                    Arg::with_name("colors")
                        .multiple(true)
                        .validator(|v| {
                            v.parse::<Pixel>().map(|_| ()).map_err(|_| {
                                format!("invalid color `{v}` (use r,g,b,a)")
                            })
                        })
                        .help("palette colors (r,g,b,a); first is overflow"),
                ),
        )
}

/// Handle encode subcommand
fn encode(
    out: &mut StandardStream,
    err: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let candidates: Vec<PathBuf> = match matches.values_of_os("files") {
        Some(values) => values.map(PathBuf::from).collect(),
        None if !io::stdin().is_terminal() => stdin_paths()?,
        None => scan_dir(Path::new("."))?,
    };
    encode_paths(out, err, &candidates)
}

/// Encode image files, writing one matrix line per image
fn encode_paths<W: WriteColor>(
    out: &mut W,
    err: &mut W,
    candidates: &[PathBuf],
) -> Result<(), Box<dyn Error>> {
    if candidates.is_empty() {
        error(err, "empty input")?;
        return Ok(());
    }
    let paths: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                warn!("skipping {:?}: not found", path);
            }
            exists
        })
        .collect();
    if paths.is_empty() {
        error(err, "wrong path")?;
        return Ok(());
    }
    let encoder = Encoder::default();
    let matrices: Vec<_> = paths
        .par_iter()
        .map(|path| encode_file(&encoder, path))
        .collect();
    for (path, matrix) in paths.iter().zip(matrices) {
        match matrix {
            Ok(matrix) => writeln!(out, "{matrix}")?,
            Err(e) => match e.downcast_ref::<imgmatrix::Error>() {
                Some(imgmatrix::Error::UnsupportedBackground(_)) => error(
                    err,
                    &format!(
                        "use black/white/transparent background ({})",
                        path.display()
                    ),
                )?,
                _ => error(err, &format!("{}: {e}", path.display()))?,
            },
        }
    }
    Ok(())
}

/// Read input paths from stdin, one per line
fn stdin_paths() -> io::Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}

/// Find image files in a directory
fn scan_dir(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Check if a path has an image file extension
fn is_image(path: &Path) -> bool {
    extension(path).map_or(false, |ext| EXTENSIONS.contains(&ext.as_str()))
}

/// Get lowercase file extension
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

/// Encode one image file
fn encode_file(
    encoder: &Encoder,
    path: &Path,
) -> Result<IndexMatrix, BoxError> {
    let raster = load_image(path)?;
    Ok(encoder.encode(&raster)?)
}

/// Load an image file (first frame only) as RGBA
fn load_image(path: &Path) -> Result<Raster<SRgba8>, BoxError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(imgmatrix::rgba_raster(
        width,
        height,
        Layout::Rgba,
        img.as_raw(),
    )?)
}

/// Handle decode subcommand
fn decode(
    out: &mut StandardStream,
    err: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let scale = matches.value_of("scale").unwrap_or("1").parse()?;
    let palette = match matches.values_of("colors") {
        Some(values) => {
            values.map(str::parse).collect::<Result<Vec<Pixel>, _>>()?
        }
        None => vec![],
    };
    let decoder = Decoder::default().with_palette(palette).with_scale(scale);
    let dir = matches.value_of_os("dir").unwrap_or_else(|| OsStr::new("."));
    fs::create_dir_all(dir)?;
    let dir = fs::canonicalize(dir)?;
    let mut lines = vec![];
    for (i, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((i + 1, line));
        }
    }
    decode_lines(out, err, &decoder, &dir, &lines)
}

/// Decode numbered matrix lines into image files in a directory
fn decode_lines<W: WriteColor>(
    out: &mut W,
    err: &mut W,
    decoder: &Decoder,
    dir: &Path,
    lines: &[(usize, String)],
) -> Result<(), Box<dyn Error>> {
    let results: Vec<_> = lines
        .par_iter()
        .map(|(number, line)| {
            let path = dir.join(file_name(*number));
            decode_line(decoder, line, &path).map(|d| (path, d))
        })
        .collect();
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    for ((number, _), res) in lines.iter().zip(results) {
        match res {
            Ok((path, deficiency)) => {
                if deficiency > 0 {
                    error(err, &advice(deficiency, &file_name(*number)))?;
                }
                write!(out, "Create image: ")?;
                out.set_color(&magenta)?;
                writeln!(out, "{}", path.display())?;
                out.reset()?;
            }
            Err(e) => error(err, &format!("line {number}: {e}"))?,
        }
    }
    Ok(())
}

/// Get the output file name for a matrix number
fn file_name(number: usize) -> String {
    format!("mapimg_{number}.png")
}

/// Make advice for a palette deficiency
fn advice(deficiency: u32, file: &str) -> String {
    let adds = if deficiency > 1 { "s" } else { "" };
    format!("not enough colors. Add {deficiency} color{adds} for {file}.")
}

/// Decode one matrix line and save as PNG, returning the deficiency
fn decode_line(
    decoder: &Decoder,
    line: &str,
    path: &Path,
) -> Result<u32, BoxError> {
    let matrix: IndexMatrix = line.parse()?;
    let rendering = decoder.decode(&matrix)?;
    save_png(rendering.raster(), path)?;
    Ok(rendering.deficiency())
}

/// Save a raster as a PNG file
fn save_png(raster: &Raster<SRgba8>, path: &Path) -> Result<(), BoxError> {
    let writer = BufWriter::new(File::create(path)?);
    let (width, height) = (raster.width(), raster.height());
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.as_u8_slice())?;
    writer.finish()?;
    Ok(())
}

/// Write an error message
fn error<W: WriteColor>(err: &mut W, msg: &str) -> io::Result<()> {
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    err.set_color(&red)?;
    write!(err, "Error:")?;
    err.reset()?;
    writeln!(err, " {msg}")
}
