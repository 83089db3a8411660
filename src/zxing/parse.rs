//! Parser for the text report printed by ZXing's `CommandLineRunner`
//!
//! A report for one file looks like:
//!
//! ```text
//! file:///app/pdf417_code.png (format: PDF_417, type: TEXT):
//! Raw result:
//! 123456789
//! Parsed result:
//! 123456789
//! Found 4 result points.
//!   Point 0: (10.0,20.0)
//!   Point 1: (10.0,80.0)
//! ```
//!
//! Result text may also sit on the header line itself (`Raw result: 123`).

use crate::models::{BarcodeResult, Point};
use log::warn;

const RAW_RESULT: &str = "Raw result:";
const PARSED_RESULT: &str = "Parsed result:";
const RAW_BITS: &str = "Raw bits:";
const POINT_PREFIX: &str = "  Point";
const FORMAT_MARKER: &str = "(format:";

/// Marker ZXing prints when an image holds no decodable barcode
pub const NO_BARCODE_MARKER: &str = "No barcode found";

/// Whether decoder output reports that no barcode was found
pub fn is_no_barcode(output: &str) -> bool {
    output.contains(NO_BARCODE_MARKER)
}

/// Parse decoder output into a payload and an ordered list of points.
///
/// The last `Raw result:` / `Parsed result:` section wins, even when it is
/// empty. Point lines that do not hold two numbers are skipped.
pub fn parse_output(output: &str) -> BarcodeResult {
    let lines: Vec<&str> = output.lines().collect();
    let mut format = None;
    let mut payload = None;
    let mut points = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        i += 1;

        if let Some(rest) = header_text(trimmed) {
            if !rest.is_empty() {
                payload = Some(rest.to_string());
                continue;
            }
            let start = i;
            while i < lines.len() && !ends_block(lines[i]) {
                i += 1;
            }
            let block = lines[start..i].join("\n");
            let block = block.trim();
            payload = (!block.is_empty()).then(|| block.to_string());
        } else if line.starts_with(POINT_PREFIX) {
            match parse_point(line) {
                Some(point) => points.push(point),
                None => warn!("skipping malformed point line: {:?}", line),
            }
        } else if format.is_none() {
            format = parse_format(trimmed);
        }
    }

    BarcodeResult::new(format, payload, points)
}

/// Trailing text of a result header line, trimmed
fn header_text(trimmed: &str) -> Option<&str> {
    [RAW_RESULT, PARSED_RESULT]
        .iter()
        .find_map(|header| trimmed.strip_prefix(header))
        .map(str::trim)
}

fn ends_block(line: &str) -> bool {
    let trimmed = line.trim();
    header_text(trimmed).is_some()
        || trimmed.starts_with(RAW_BITS)
        || line.starts_with(POINT_PREFIX)
        || (trimmed.starts_with("Found ") && trimmed.ends_with("result points."))
        || (trimmed.starts_with("file:") && trimmed.contains(FORMAT_MARKER))
}

/// `  Point 3: (90.5,20.0)` -> `(90, 20)`
fn parse_point(line: &str) -> Option<Point> {
    let (_, coords) = line.split_once(':')?;
    let coords = coords.trim().replace(['(', ')'], "");
    let mut parts = coords.split(',');
    let x = parts.next()?.trim().parse::<f64>().ok()?;
    let y = parts.next()?.trim().parse::<f64>().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::truncate(x, y))
}

/// `file:///app/x.png (format: PDF_417, type: TEXT):` -> `PDF_417`
fn parse_format(trimmed: &str) -> Option<String> {
    let (_, rest) = trimmed.split_once(FORMAT_MARKER)?;
    let end = rest.find([',', ')'])?;
    let format = rest[..end].trim();
    (!format.is_empty()).then(|| format.to_string())
}
