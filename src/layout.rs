//! Text placement geometry
//!
//! Coordinates are in PDF points with the origin at the bottom-left of the
//! page, matching the coordinate system text is drawn in.

use crate::error::{Error, Result};

/// Rectangle within which text is centered, in page coordinates.
///
/// Supplied once per batch run; the same box is applied to every page of the
/// template (page sizes may differ, the box is page-relative).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// Create a bounding box, rejecting inverted or degenerate coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        if x1 >= x2 || y1 >= y2 {
            return Err(Error::InvalidBoundingBox(format!(
                "x1 must be less than x2 and y1 less than y2 (got {x1} {y1} {x2} {y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// Compute the baseline origin that centers a piece of text in a box.
///
/// Horizontal centering uses the measured advance width of the text.
/// Vertical centering is a baseline heuristic: the baseline sits a quarter
/// em above the vertical midpoint of the box, rather than being derived
/// from the font's ascent/descent metrics. The formula is a compatibility
/// contract; do not "fix" it without a coordinated change.
///
/// Text wider than the box is centered anyway and may overflow on both
/// sides. That is accepted, not an error.
pub fn centered_baseline(bbox: &BoundingBox, text_width: f32, font_size: f32) -> (f32, f32) {
    let x = bbox.x1 + (bbox.width() - text_width) / 2.0;
    let y = bbox.y1 + (bbox.height() - font_size) / 2.0 + font_size / 4.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_valid() {
        let bbox = BoundingBox::new(100.0, 200.0, 300.0, 260.0).unwrap();
        assert_eq!(bbox.width(), 200.0);
        assert_eq!(bbox.height(), 60.0);
    }

    #[test]
    fn test_bounding_box_inverted() {
        assert!(BoundingBox::new(300.0, 200.0, 100.0, 260.0).is_err());
        assert!(BoundingBox::new(100.0, 260.0, 300.0, 200.0).is_err());
        // Degenerate (zero-area) boxes are rejected too
        assert!(BoundingBox::new(100.0, 200.0, 100.0, 260.0).is_err());
    }

    #[test]
    fn test_horizontal_centering_within_box() {
        let bbox = BoundingBox::new(100.0, 0.0, 300.0, 50.0).unwrap();
        let (x, _) = centered_baseline(&bbox, 80.0, 24.0);
        assert_eq!(x, 100.0 + (200.0 - 80.0) / 2.0);
        assert!(x >= bbox.x1 && x + 80.0 <= bbox.x2);
    }

    #[test]
    fn test_vertical_placement_formula() {
        let bbox = BoundingBox::new(0.0, 100.0, 200.0, 160.0).unwrap();
        let (_, y) = centered_baseline(&bbox, 50.0, 24.0);
        // y1 + (h - size)/2 + size/4
        assert_eq!(y, 100.0 + (60.0 - 24.0) / 2.0 + 24.0 / 4.0);
    }

    #[test]
    fn test_vertical_placement_independent_of_text_width() {
        let bbox = BoundingBox::new(10.0, 10.0, 400.0, 90.0).unwrap();
        let (_, y_short) = centered_baseline(&bbox, 12.0, 18.0);
        let (_, y_long) = centered_baseline(&bbox, 950.0, 18.0);
        assert_eq!(y_short, y_long);
    }

    #[test]
    fn test_overflowing_text_still_centered() {
        let bbox = BoundingBox::new(100.0, 0.0, 200.0, 50.0).unwrap();
        let (x, _) = centered_baseline(&bbox, 300.0, 24.0);
        // Overflows symmetrically: starts 100pt left of the box
        assert_eq!(x, 0.0);
    }
}
