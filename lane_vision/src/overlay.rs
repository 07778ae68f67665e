// THEORY:
// The overlay renderer decides *what* gets drawn for a frame; the image backend
// decides *how* pixels change. Lanes are drawn onto a blank layer the size of the
// frame, and the backend then blends that layer over the original frame with fixed
// weights from `OverlayStyle`.
//
// The renderer's one job beyond iteration is to refuse bad input per entry: a missing
// entry or a segment whose coordinates are NaN, infinite or beyond the pixel range is
// counted as skipped and the rest of the frame is still drawn. Backend failures are
// not coordinate problems and are returned to the caller unchanged.

use crate::core_modules::segment::{LaneBoundary, Segment};
use crate::error::Result;
use crate::params::overlay::{
    BLEND_GAMMA, FRAME_WEIGHT, LANE_COLOR, LANE_THICKNESS, OVERLAY_WEIGHT,
};

/// Fixed look of the lane overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Line colour in BGR order.
    pub color: [f64; 3],
    pub thickness: i32,
    /// Weight of the original frame in the final blend.
    pub frame_weight: f64,
    /// Weight of the lane layer in the final blend.
    pub overlay_weight: f64,
    /// Constant added to every blended pixel.
    pub gamma: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: LANE_COLOR,
            thickness: LANE_THICKNESS,
            frame_weight: FRAME_WEIGHT,
            overlay_weight: OVERLAY_WEIGHT,
            gamma: BLEND_GAMMA,
        }
    }
}

/// A surface that can draw straight lines between integer pixel positions.
pub trait LineCanvas {
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), style: &OverlayStyle) -> Result<()>;
}

/// How many entries of a frame's overlay made it onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawSummary {
    pub drawn: usize,
    pub skipped: usize,
}

/// Draws every well-formed segment and skips the rest.
pub fn draw_segments<C: LineCanvas + ?Sized>(
    canvas: &mut C,
    segments: &[Option<Segment>],
    style: &OverlayStyle,
) -> Result<DrawSummary> {
    let mut summary = DrawSummary::default();
    for entry in segments {
        let Some((from, to)) = entry.as_ref().and_then(Segment::to_pixels) else {
            summary.skipped += 1;
            continue;
        };
        canvas.draw_line(from, to, style)?;
        summary.drawn += 1;
    }
    Ok(summary)
}

pub fn draw_lanes<C: LineCanvas + ?Sized>(
    canvas: &mut C,
    lanes: &[LaneBoundary],
    style: &OverlayStyle,
) -> Result<DrawSummary> {
    let segments: Vec<Option<Segment>> = lanes.iter().map(|lane| Some(lane.segment)).collect();
    draw_segments(canvas, &segments, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::segment::LaneSide;
    use crate::error::LaneVisionError;

    #[derive(Default)]
    struct RecordingCanvas {
        lines: Vec<((i32, i32), (i32, i32))>,
    }

    impl LineCanvas for RecordingCanvas {
        fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), _style: &OverlayStyle) -> Result<()> {
            self.lines.push((from, to));
            Ok(())
        }
    }

    struct BrokenCanvas;

    impl LineCanvas for BrokenCanvas {
        fn draw_line(&mut self, _from: (i32, i32), _to: (i32, i32), _style: &OverlayStyle) -> Result<()> {
            Err(LaneVisionError::Render("canvas released".to_string()))
        }
    }

    #[test]
    fn none_entries_are_skipped() {
        let mut canvas = RecordingCanvas::default();
        let segments = [
            Some(Segment::new(0.0, 480.0, 240.0, 288.0)),
            None,
            Some(Segment::new(640.0, 480.0, 400.0, 288.0)),
        ];
        let summary = draw_segments(&mut canvas, &segments, &OverlayStyle::default()).unwrap();
        assert_eq!(summary, DrawSummary { drawn: 2, skipped: 1 });
        assert_eq!(canvas.lines, vec![((0, 480), (240, 288)), ((640, 480), (400, 288))]);
    }

    #[test]
    fn nan_and_overflowing_segments_are_skipped() {
        let mut canvas = RecordingCanvas::default();
        let segments = [
            Some(Segment::new(f64::NAN, 480.0, 240.0, 288.0)),
            Some(Segment::new(1e15, 480.0, 240.0, 288.0)),
            Some(Segment::new(10.0, 20.0, 30.0, 40.0)),
        ];
        let summary = draw_segments(&mut canvas, &segments, &OverlayStyle::default()).unwrap();
        assert_eq!(summary, DrawSummary { drawn: 1, skipped: 2 });
        assert_eq!(canvas.lines, vec![((10, 20), (30, 40))]);
    }

    #[test]
    fn canvas_errors_are_propagated() {
        let segments = [Some(Segment::new(0.0, 0.0, 1.0, 1.0))];
        let result = draw_segments(&mut BrokenCanvas, &segments, &OverlayStyle::default());
        assert!(matches!(result, Err(LaneVisionError::Render(_))));
    }

    #[test]
    fn lanes_are_drawn_in_order() {
        let mut canvas = RecordingCanvas::default();
        let lanes = [
            LaneBoundary { side: LaneSide::Left, segment: Segment::new(0.0, 480.0, 240.0, 288.0) },
            LaneBoundary { side: LaneSide::Right, segment: Segment::new(640.0, 480.0, 400.0, 288.0) },
        ];
        let summary = draw_lanes(&mut canvas, &lanes, &OverlayStyle::default()).unwrap();
        assert_eq!(summary.drawn, 2);
        assert_eq!(canvas.lines[0].0, (0, 480));
    }

    #[test]
    fn default_style_is_green_five_pixels() {
        let style = OverlayStyle::default();
        assert_eq!(style.color, [0.0, 255.0, 0.0]);
        assert_eq!(style.thickness, 5);
        assert_eq!((style.frame_weight, style.overlay_weight, style.gamma), (0.8, 1.0, 1.0));
    }
}
