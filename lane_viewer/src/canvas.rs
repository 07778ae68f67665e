//! Lane overlay on an OpenCV `Mat`.

use lane_vision::error::LaneVisionError;
use lane_vision::pipeline::{DrawSummary, LaneReport, LineCanvas, OverlayStyle};
use lane_vision::overlay::draw_lanes;
use opencv::{
    core::{self, Mat, Point, Scalar},
    imgproc,
    prelude::*,
};

/// A black layer the size of the frame that lanes are drawn onto before blending.
pub struct MatCanvas {
    layer: Mat,
}

impl MatCanvas {
    pub fn blank_like(frame: &Mat) -> opencv::Result<Self> {
        let layer = Mat::new_size_with_default(frame.size()?, frame.typ(), Scalar::all(0.0))?;
        Ok(Self { layer })
    }

    /// `frame * frame_weight + layer * overlay_weight + gamma`, saturated per channel.
    pub fn blend_onto(&self, frame: &Mat, style: &OverlayStyle) -> opencv::Result<Mat> {
        let mut blended = Mat::default();
        core::add_weighted(
            frame,
            style.frame_weight,
            &self.layer,
            style.overlay_weight,
            style.gamma,
            &mut blended,
            -1,
        )?;
        Ok(blended)
    }
}

impl LineCanvas for MatCanvas {
    fn draw_line(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        style: &OverlayStyle,
    ) -> lane_vision::error::Result<()> {
        let [b, g, r] = style.color;
        imgproc::line(
            &mut self.layer,
            Point::new(from.0, from.1),
            Point::new(to.0, to.1),
            Scalar::new(b, g, r, 0.0),
            style.thickness,
            imgproc::LINE_8,
            0,
        )
        .map_err(|e| LaneVisionError::Render(e.message))
    }
}

/// Draws the report's lanes on a fresh layer and blends it over `frame`.
pub fn render_overlay(
    frame: &Mat,
    report: &LaneReport,
    style: &OverlayStyle,
) -> anyhow::Result<(Mat, DrawSummary)> {
    let mut canvas = MatCanvas::blank_like(frame)?;
    let summary = draw_lanes(&mut canvas, &report.lanes, style)?;
    let output = canvas.blend_onto(frame, style)?;
    Ok((output, summary))
}
