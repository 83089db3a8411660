//! Bounding polygon drawing

use crate::error::{Error, Result};
use crate::models::Point;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::path::Path;

/// Stroke colour of the bounding polygon
pub const POLYGON_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Stroke width of the bounding polygon, in pixels
pub const POLYGON_THICKNESS: u32 = 2;

/// Draw a closed polygon through `points` in order, last point joined back
/// to the first. Fewer than two points draws nothing.
pub fn draw_closed_polygon(image: &mut RgbImage, points: &[Point], color: Rgb<u8>, thickness: u32) {
    if points.len() < 2 {
        return;
    }
    let thickness = thickness.max(1) as i32;
    // Square brush centred on the line, biased toward +x/+y for even widths.
    let lo = -(thickness - 1) / 2;
    let hi = lo + thickness;

    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        for dy in lo..hi {
            for dx in lo..hi {
                draw_line_segment_mut(
                    image,
                    start.translate(dx, dy).as_f32(),
                    end.translate(dx, dy).as_f32(),
                    color,
                );
            }
        }
    }
}

/// Load an image as RGB
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Write an image, choosing the format from the file extension
pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn square() -> Vec<Point> {
        vec![
            Point::new(10, 20),
            Point::new(10, 80),
            Point::new(90, 80),
            Point::new(90, 20),
        ]
    }

    #[test]
    fn test_polygon_edges_are_drawn() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        draw_closed_polygon(&mut image, &square(), POLYGON_COLOR, 1);

        assert_eq!(*image.get_pixel(10, 50), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(50, 80), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(90, 50), POLYGON_COLOR);
        // closing edge, last point back to the first
        assert_eq!(*image.get_pixel(50, 20), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(50, 50), WHITE);
    }

    #[test]
    fn test_thickness_widens_stroke() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        draw_closed_polygon(&mut image, &square(), POLYGON_COLOR, 2);

        assert_eq!(*image.get_pixel(10, 50), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(11, 50), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(12, 50), WHITE);
    }

    #[test]
    fn test_single_point_draws_nothing() {
        let mut image = RgbImage::from_pixel(10, 10, WHITE);
        draw_closed_polygon(&mut image, &[Point::new(5, 5)], POLYGON_COLOR, 2);
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_points_outside_image_are_clipped() {
        let mut image = RgbImage::from_pixel(20, 20, WHITE);
        let points = [
            Point::new(-10, 5),
            Point::new(30, 5),
            Point::new(30, 40),
            Point::new(-10, 40),
        ];
        draw_closed_polygon(&mut image, &points, POLYGON_COLOR, 1);
        assert_eq!(*image.get_pixel(0, 5), POLYGON_COLOR);
        assert_eq!(*image.get_pixel(19, 5), POLYGON_COLOR);
    }

    #[test]
    fn test_save_then_load_keeps_outline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        draw_closed_polygon(&mut image, &square(), POLYGON_COLOR, POLYGON_THICKNESS);

        save_rgb(&image, &path).unwrap();

        let written = load_rgb(&path).unwrap();
        assert_eq!(*written.get_pixel(10, 50), POLYGON_COLOR);
        assert_eq!(*written.get_pixel(50, 50), WHITE);
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rgb(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_rgb(&RgbImage::new(4, 4), dir.path().join("nope").join("out.png")).unwrap_err();
        assert!(matches!(err, Error::ImageSave { .. }));
    }
}
