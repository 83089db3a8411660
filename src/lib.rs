//! barscan - barcode decoding and bounding-box annotation
//!
//! Two independent flows:
//! - [`decode_file`] decodes QR codes in-process and yields their payloads.
//! - [`run_locate`] runs ZXing's command line runner in a container, parses
//!   its text report into a payload plus result points, and outlines the
//!   barcode on the source image.
//!
//! Parsing the ZXing report is a pure function, [`parse_output`], so it can be
//! exercised without a container runtime.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Bounding polygon drawing and image I/O
pub mod annotate;
/// In-process QR decoding
pub mod decoder;
/// Image presentation
pub mod display;
/// Error type shared by every module
pub mod error;
/// Core data structures (Point, DecodedSymbol, BarcodeResult)
pub mod models;
/// Console flows tying decoding, parsing, drawing and display together
pub mod pipeline;
/// ZXing invocation and output parsing
pub mod zxing;

pub use decoder::{decode_file, decode_luma};
pub use error::{Error, Result};
pub use models::{BarcodeResult, DecodedSymbol, MIN_POLYGON_POINTS, Point, SymbolType};
pub use pipeline::{LocateReport, run_decode, run_locate};
pub use zxing::{CommandRunner, ProcessOutput, SystemRunner, ZxingConfig, parse_output};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_then_outline() {
        let result = parse_output(
            "Raw result: 42\n  Point 0: (0.0,0.0)\n  Point 1: (0.0,9.0)\n  Point 2: (9.0,9.0)\n  Point 3: (9.0,0.0)\n",
        );
        assert_eq!(result.points().len(), MIN_POLYGON_POINTS);

        let mut image = image::RgbImage::new(10, 10);
        annotate::draw_closed_polygon(
            &mut image,
            result.points(),
            annotate::POLYGON_COLOR,
            annotate::POLYGON_THICKNESS,
        );
        assert_eq!(*image.get_pixel(0, 5), annotate::POLYGON_COLOR);
    }
}
