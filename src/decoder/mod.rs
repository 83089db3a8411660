//! In-process QR decoding
//!
//! Wraps `rqrr`: the image is reduced to 8-bit luma, candidate grids are
//! located, and every grid that decodes cleanly becomes a [`DecodedSymbol`].
//! Grids that fail error correction are dropped.

use crate::error::{Error, Result};
use crate::models::{DecodedSymbol, Point, SymbolType};
use image::GrayImage;
use log::debug;
use rqrr::PreparedImage;
use std::path::Path;

/// Decode every QR code in a grayscale image
pub fn decode_luma(gray: &GrayImage) -> Vec<DecodedSymbol> {
    let (width, height) = gray.dimensions();
    let mut prepared =
        PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0]
        });

    let grids = prepared.detect_grids();
    debug!("{}x{} image: {} candidate grids", width, height, grids.len());

    let mut symbols = Vec::with_capacity(grids.len());
    for (i, grid) in grids.iter().enumerate() {
        let mut payload = Vec::new();
        match grid.decode_to(&mut payload) {
            Ok(meta) => {
                debug!("grid {}: {:?}, {} payload bytes", i, meta, payload.len());
                let b = &grid.bounds;
                symbols.push(DecodedSymbol {
                    symbol_type: SymbolType::QrCode,
                    payload,
                    corners: [
                        Point::new(b[0].x, b[0].y),
                        Point::new(b[1].x, b[1].y),
                        Point::new(b[2].x, b[2].y),
                        Point::new(b[3].x, b[3].y),
                    ],
                });
            }
            Err(err) => debug!("grid {}: skipped, {:?}", i, err),
        }
    }

    symbols
}

/// Load an image from disk and decode every QR code in it
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Vec<DecodedSymbol>> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_luma(&img.to_luma8()))
}
