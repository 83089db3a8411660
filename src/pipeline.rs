//! The two console flows: direct decoding and ZXing location + annotation.
//!
//! Both write their user-facing report to a caller-supplied writer and
//! return what they found, so the binary and the tests drive the same code.

use crate::annotate::{POLYGON_COLOR, POLYGON_THICKNESS, draw_closed_polygon, load_rgb, save_rgb};
use crate::decoder::decode_file;
use crate::display::{Viewer, WINDOW_TITLE};
use crate::error::{Error, Result};
use crate::models::{BarcodeResult, DecodedSymbol, Point, SymbolType};
use crate::zxing::{CommandRunner, ZxingConfig, invoke_zxing, is_no_barcode, parse_output};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reasons printed when ZXing finds nothing
pub const NO_BARCODE_CAUSES: [&str; 4] = [
    "The image does not contain a valid PDF417 barcode.",
    "The barcode is not clearly visible or is distorted.",
    "The image quality is poor (e.g., blurry, low resolution, or improper lighting).",
    "The barcode is rotated or skewed.",
];

/// Shown before handing the annotated image to an interactive viewer
pub const CLOSE_PROMPT: &str = "Press Escape or close the window to continue.";

const SEPARATOR_WIDTH: usize = 30;

/// Decode every QR code in `image` and print type and payload of each
pub fn run_decode<W: Write>(image: &Path, out: &mut W) -> Result<Vec<DecodedSymbol>> {
    let symbols = decode_file(image)?;
    if symbols.is_empty() {
        writeln!(out, "No codes detected in the image.")?;
        return Ok(symbols);
    }

    for symbol in &symbols {
        writeln!(out, "Type: {}", symbol.symbol_type)?;
        writeln!(out, "Data: {}", symbol.text())?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(symbols)
}

/// Outcome of a successful location run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateReport {
    /// What was parsed from the decoder output
    pub result: BarcodeResult,
    /// Where the annotated image was written, if enough points were found
    pub annotated: Option<PathBuf>,
}

/// Run ZXing on the configured image, report the payload, and outline the
/// barcode when at least four points come back.
///
/// The `No barcode found` marker is honoured whatever ZXing's exit status.
pub fn run_locate<R, V, W>(
    config: &ZxingConfig,
    runner: &mut R,
    viewer: &mut V,
    out: &mut W,
) -> Result<LocateReport>
where
    R: CommandRunner,
    V: Viewer + ?Sized,
    W: Write,
{
    let output = invoke_zxing(config, runner)?;
    if output.success {
        writeln!(out, "Decoded Output:")?;
        writeln!(out, "{}", output.stdout.trim())?;
    }

    if is_no_barcode(&output.combined()) {
        writeln!(out)?;
        writeln!(out, "{}", Error::NoBarcodeDetected)?;
        writeln!(out, "Possible reasons:")?;
        for (i, cause) in NO_BARCODE_CAUSES.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, cause)?;
        }
        return Err(Error::NoBarcodeDetected);
    }
    let output = output.check()?;

    let result = parse_output(&output.stdout);
    match result.payload() {
        Some(payload) if !payload.is_empty() => {
            writeln!(out)?;
            writeln!(out, "Decoded Information (Human Readable):")?;
            if let Some(format) = result.format() {
                writeln!(out, "Type: {}", SymbolType::from_tag(format))?;
            }
            writeln!(out, "{}", payload)?;
        }
        _ => writeln!(out, "No decoded data found.")?,
    }

    if !result.has_bounding_box() {
        writeln!(out, "No bounding box points detected.")?;
        return Ok(LocateReport {
            result,
            annotated: None,
        });
    }

    let mut image = load_rgb(config.resolve(&config.image))?;
    writeln!(out, "Drawing polygon with points: {}", format_points(result.points()))?;
    draw_closed_polygon(&mut image, result.points(), POLYGON_COLOR, POLYGON_THICKNESS);

    let annotated = config.resolve(&config.output);
    save_rgb(&image, &annotated)?;
    info!("wrote {}", annotated.display());
    writeln!(out, "Annotated image saved as {}", config.output.display())?;

    if viewer.is_interactive() {
        writeln!(out, "{}", CLOSE_PROMPT)?;
    }
    out.flush()?;
    viewer.show(WINDOW_TITLE, &image)?;

    Ok(LocateReport {
        result,
        annotated: Some(annotated),
    })
}

fn format_points(points: &[Point]) -> String {
    let joined = points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
