// THEORY:
// The lane aggregator is the only piece of real logic in the lane pipeline. It takes
// the raw segments the Hough stage found in one frame and reduces them to at most two
// representative lines, one per lane boundary.
//
// Algorithm steps:
// 1.  **Fit**: every segment is reduced to a slope/intercept pair. Vertical and
//     malformed segments have no fit and are dropped here.
// 2.  **Bucket**: y grows downward in image space, so the left boundary of a lane
//     seen from the driver's seat has a negative slope. Strictly negative slopes go
//     left; everything else, including exactly horizontal, goes right.
// 3.  **Average**: each non-empty bucket is collapsed to its mean slope and mean
//     intercept.
// 4.  **Reconstruct**: the averaged line is clipped to a fixed vertical band, from
//     the bottom row of the frame up to 3/5 of its height, and the x coordinates are
//     solved for and truncated to whole pixels. A bucket whose averaged line cannot
//     be solved (flat, or running off the pixel range) produces no output.
//
// The aggregator is stateless. Nothing from one frame influences the next.

use crate::core_modules::line_fit::LineFit;
use crate::core_modules::segment::{LaneBoundary, LaneSide, Segment};
use crate::error::FitError;
use crate::params::aggregation::{HORIZON_DENOMINATOR, HORIZON_NUMERATOR};

pub mod lane_aggregator {
    use super::*;

    /// Reduces one frame's raw segments to its left and right lane boundaries.
    ///
    /// An empty slice (including "the detector found nothing") gives an empty result.
    /// When both sides are present the left boundary comes first.
    pub fn aggregate(frame_height: u32, segments: &[Segment]) -> Vec<LaneBoundary> {
        if segments.is_empty() {
            return Vec::new();
        }

        let mut left_fits: Vec<LineFit> = Vec::new();
        let mut right_fits: Vec<LineFit> = Vec::new();

        for segment in segments {
            let Ok(fit) = LineFit::through(segment) else {
                continue;
            };
            match LaneSide::of_slope(fit.slope) {
                LaneSide::Left => left_fits.push(fit),
                LaneSide::Right => right_fits.push(fit),
            }
        }

        let mut lanes = Vec::with_capacity(2);
        for (side, fits) in [(LaneSide::Left, &left_fits), (LaneSide::Right, &right_fits)] {
            let Some(mean) = LineFit::mean(fits) else {
                continue;
            };
            if let Ok(segment) = reconstruct_segment(frame_height, &mean) {
                lanes.push(LaneBoundary { side, segment });
            }
        }
        lanes
    }

    /// Row the reconstructed lanes stop at: 3/5 of the frame height, rounded down.
    pub fn horizon_row(frame_height: u32) -> u32 {
        (frame_height as u64 * HORIZON_NUMERATOR as u64 / HORIZON_DENOMINATOR as u64) as u32
    }

    /// Turns an averaged fit back into a drawable segment spanning
    /// `frame_height` (bottom row) to `horizon_row(frame_height)`.
    pub fn reconstruct_segment(frame_height: u32, fit: &LineFit) -> Result<Segment, FitError> {
        let y1 = frame_height as f64;
        let y2 = horizon_row(frame_height) as f64;
        let x1 = truncate_pixel(fit.x_at(y1)?)?;
        let x2 = truncate_pixel(fit.x_at(y2)?)?;
        Ok(Segment::new(x1, y1, x2, y2))
    }

    fn truncate_pixel(value: f64) -> Result<f64, FitError> {
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(FitError::OutOfRange { value });
        }
        // -0.0 from a zero numerator is reported as 0
        Ok(value.trunc() + 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::lane_aggregator::*;
    use super::*;

    fn sides(lanes: &[LaneBoundary]) -> Vec<LaneSide> {
        lanes.iter().map(|l| l.side).collect()
    }

    #[test]
    fn empty_input_gives_no_lanes() {
        assert!(aggregate(480, &[]).is_empty());
    }

    #[test]
    fn one_segment_per_side() {
        let segments = [
            Segment::new(0.0, 480.0, 100.0, 400.0),
            Segment::new(640.0, 480.0, 540.0, 400.0),
        ];
        let lanes = aggregate(480, &segments);
        assert_eq!(sides(&lanes), vec![LaneSide::Left, LaneSide::Right]);
        for lane in &lanes {
            assert_eq!(lane.segment.y1, 480.0);
            assert_eq!(lane.segment.y2, 288.0);
        }
        assert_eq!(lanes[0].segment.x1, 0.0);
        assert_eq!(lanes[0].segment.x2, 240.0);
        assert!((lanes[1].segment.x1 - 640.0).abs() <= 1.0);
        assert!((lanes[1].segment.x2 - 400.0).abs() <= 1.0);
    }

    #[test]
    fn left_is_listed_first_regardless_of_input_order() {
        let segments = [
            Segment::new(640.0, 480.0, 540.0, 400.0),
            Segment::new(0.0, 480.0, 100.0, 400.0),
        ];
        let lanes = aggregate(480, &segments);
        assert_eq!(sides(&lanes), vec![LaneSide::Left, LaneSide::Right]);
    }

    #[test]
    fn reconstruct_known_fit() {
        let segment = reconstruct_segment(480, &LineFit::new(-0.8, 480.0)).unwrap();
        assert_eq!(segment, Segment::new(0.0, 480.0, 240.0, 288.0));
        assert!(segment.x1.is_sign_positive());
    }

    #[test]
    fn reconstruct_truncates_toward_zero() {
        // x = (480 - 0) / 7 = 68.57.., x = (288 - 0) / 7 = 41.14..
        let segment = reconstruct_segment(480, &LineFit::new(7.0, 0.0)).unwrap();
        assert_eq!(segment.x1, 68.0);
        assert_eq!(segment.x2, 41.0);
    }

    #[test]
    fn vertical_segments_are_skipped() {
        let segments = [
            Segment::new(100.0, 480.0, 100.0, 300.0),
            Segment::new(0.0, 480.0, 100.0, 400.0),
        ];
        let lanes = aggregate(480, &segments);
        assert_eq!(sides(&lanes), vec![LaneSide::Left]);
    }

    #[test]
    fn flat_right_group_is_omitted() {
        let segments = [
            Segment::new(0.0, 300.0, 200.0, 300.0),
            Segment::new(0.0, 480.0, 100.0, 400.0),
        ];
        let lanes = aggregate(480, &segments);
        assert_eq!(sides(&lanes), vec![LaneSide::Left]);
    }

    #[test]
    fn nan_segment_does_not_poison_average() {
        let segments = [
            Segment::new(f64::NAN, 480.0, 100.0, 400.0),
            Segment::new(640.0, 480.0, 540.0, 400.0),
        ];
        let lanes = aggregate(480, &segments);
        assert_eq!(sides(&lanes), vec![LaneSide::Right]);
    }

    #[test]
    fn nearly_flat_average_runs_out_of_range() {
        let err = reconstruct_segment(480, &LineFit::new(1e-8, 0.0)).unwrap_err();
        assert!(matches!(err, FitError::OutOfRange { .. }));
    }

    #[test]
    fn horizon_row_rounds_down() {
        assert_eq!(horizon_row(480), 288);
        assert_eq!(horizon_row(481), 288);
        assert_eq!(horizon_row(0), 0);
    }
}
