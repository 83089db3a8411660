use super::Point;

/// Minimum number of points needed to outline a barcode
pub const MIN_POLYGON_POINTS: usize = 4;

/// Payload and outline recovered from an external decoder's text output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarcodeResult {
    format: Option<String>,
    payload: Option<String>,
    points: Vec<Point>,
}

impl BarcodeResult {
    /// Create a result from its parts
    pub fn new(format: Option<String>, payload: Option<String>, points: Vec<Point>) -> Self {
        Self {
            format,
            payload,
            points,
        }
    }

    /// Format reported by the decoder (e.g. `PDF_417`), if it printed one
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Decoded text, if any
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Result points in the order the decoder reported them
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether enough points were reported to draw a bounding polygon
    pub fn has_bounding_box(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_needs_four_points() {
        let three = BarcodeResult::new(None, None, vec![Point::new(0, 0); 3]);
        assert!(!three.has_bounding_box());

        let four = BarcodeResult::new(None, None, vec![Point::new(0, 0); 4]);
        assert!(four.has_bounding_box());
    }
}
