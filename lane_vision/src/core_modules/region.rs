// THEORY:
// Lane markings only appear in the lower part of a forward-looking frame. The region
// of interest is the polygon the edge map is masked with before line detection, so
// that sky, ceilings and horizon clutter never reach the Hough stage.
//
// Only the geometry lives here. Filling the polygon and masking the edge map are
// done by the image backend.

use crate::core_modules::segment::FrameGeometry;
use crate::params::detection::ROI_TOP_RATIO;

/// Corners of the region of interest in drawing order, as `(x, y)` pixels:
/// bottom-left, bottom-right, top-right, top-left. The region covers the bottom
/// half of the frame.
pub fn region_of_interest(geometry: FrameGeometry) -> [(i32, i32); 4] {
    let width = geometry.width as i32;
    let height = geometry.height as i32;
    let top = (geometry.height as f64 * ROI_TOP_RATIO) as i32;
    [(0, height), (width, height), (width, top), (0, top)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_half_of_vga() {
        let polygon = region_of_interest(FrameGeometry::new(640, 480));
        assert_eq!(polygon, [(0, 480), (640, 480), (640, 240), (0, 240)]);
    }

    #[test]
    fn odd_height_rounds_down() {
        let polygon = region_of_interest(FrameGeometry::new(320, 241));
        assert_eq!(polygon[2], (320, 120));
        assert_eq!(polygon[3], (0, 120));
    }
}
