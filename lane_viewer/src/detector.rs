//! Canny + probabilistic Hough segment detection on OpenCV frames.

use lane_vision::core_modules::region::region_of_interest;
use lane_vision::error::LaneVisionError;
use lane_vision::params::detection::*;
use lane_vision::pipeline::{Detection, SegmentDetector};
use lane_vision::{FrameGeometry, Segment};
use opencv::{
    core::{self, Mat, Point, Scalar, Size, Vec4i, Vector},
    imgproc,
    prelude::*,
};

/// Edge/line detector. Holds only scratch buffers reused from frame to frame.
#[derive(Default)]
pub struct CannyHoughDetector {
    gray: Mat,
    blurred: Mat,
    edges: Mat,
    masked: Mat,
}

impl SegmentDetector for CannyHoughDetector {
    type Frame = Mat;

    fn detect(&mut self, frame: &Mat) -> lane_vision::error::Result<Detection> {
        self.run(frame)
            .map_err(|e| LaneVisionError::Detection(e.message))
    }
}

impl CannyHoughDetector {
    fn run(&mut self, frame: &Mat) -> opencv::Result<Detection> {
        let size = frame.size()?;
        let geometry = FrameGeometry::new(size.width as u32, size.height as u32);

        // --- 1. Grayscale & blur ---
        imgproc::cvt_color(frame, &mut self.gray, imgproc::COLOR_BGR2GRAY, 0)?;
        imgproc::gaussian_blur(
            &self.gray,
            &mut self.blurred,
            Size::new(BLUR_KERNEL, BLUR_KERNEL),
            0.0,
            0.0,
            core::BORDER_DEFAULT,
        )?;

        // --- 2. Edge map ---
        imgproc::canny(
            &self.blurred,
            &mut self.edges,
            CANNY_LOW,
            CANNY_HIGH,
            CANNY_APERTURE,
            false,
        )?;

        // --- 3. Region of interest ---
        self.masked = mask_region(&self.edges, geometry)?;

        // --- 4. Hough segments ---
        let mut lines = Vector::<Vec4i>::new();
        imgproc::hough_lines_p(
            &self.masked,
            &mut lines,
            HOUGH_RHO,
            HOUGH_THETA,
            HOUGH_THRESHOLD,
            HOUGH_MIN_LINE_LENGTH,
            HOUGH_MAX_LINE_GAP,
        )?;

        let segments = lines.iter().map(|line| Segment::from_endpoints(line.0)).collect();
        Ok(Detection { geometry, segments })
    }
}

/// Zeroes every edge pixel outside the region of interest.
fn mask_region(edges: &Mat, geometry: FrameGeometry) -> opencv::Result<Mat> {
    let mut mask = Mat::new_size_with_default(edges.size()?, edges.typ(), Scalar::all(0.0))?;

    let polygon: Vector<Point> = region_of_interest(geometry)
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect();
    let mut polygons = Vector::<Vector<Point>>::new();
    polygons.push(polygon);
    imgproc::fill_poly(
        &mut mask,
        &polygons,
        Scalar::all(255.0),
        imgproc::LINE_8,
        0,
        Point::new(0, 0),
    )?;

    let mut masked = Mat::default();
    core::bitwise_and(edges, &mask, &mut masked, &core::no_array())?;
    Ok(masked)
}
