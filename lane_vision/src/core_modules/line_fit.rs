// THEORY:
// A `LineFit` is the slope/intercept form `y = slope * x + intercept` of a segment.
// It is the currency of the aggregator: segments are reduced to fits, fits are
// bucketed and averaged, and the averaged fit is turned back into a segment.
//
// Both directions involve a division, and both are guarded here at the point of
// division: a fit through two points sharing an x coordinate has no slope, and a fit
// with a zero slope never reaches the rows we reconstruct on. Callers get a
// `FitError` and decide what to skip.

use crate::core_modules::segment::Segment;
use crate::error::FitError;
use crate::params::aggregation::DEGENERATE_SLOPE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Degree-1 least-squares fit through a segment's two endpoints.
    pub fn through(segment: &Segment) -> Result<Self, FitError> {
        if !segment.is_finite() {
            return Err(FitError::NonFinite);
        }
        Self::least_squares(&[(segment.x1, segment.y1), (segment.x2, segment.y2)])
    }

    /// Ordinary least squares over `points`, minimising vertical residuals.
    pub fn least_squares(points: &[(f64, f64)]) -> Result<Self, FitError> {
        if points.is_empty() {
            return Err(FitError::NonFinite);
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for &(x, y) in points {
            sxx += (x - mean_x) * (x - mean_x);
            sxy += (x - mean_x) * (y - mean_y);
        }

        if sxx <= f64::EPSILON {
            return Err(FitError::VerticalSegment { x: mean_x });
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(FitError::NonFinite);
        }
        Ok(Self { slope, intercept })
    }

    /// Arithmetic mean of slopes and of intercepts. `None` for an empty group.
    pub fn mean(fits: &[LineFit]) -> Option<Self> {
        if fits.is_empty() {
            return None;
        }
        let n = fits.len() as f64;
        let slope = fits.iter().map(|f| f.slope).sum::<f64>() / n;
        let intercept = fits.iter().map(|f| f.intercept).sum::<f64>() / n;
        Some(Self { slope, intercept })
    }

    /// Solves the line equation for x on row `y`.
    pub fn x_at(&self, y: f64) -> Result<f64, FitError> {
        if !self.slope.is_finite() || self.slope.abs() < DEGENERATE_SLOPE {
            return Err(FitError::FlatSlope { slope: self.slope });
        }
        let x = (y - self.intercept) / self.slope;
        if !x.is_finite() {
            return Err(FitError::OutOfRange { value: x });
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_through_descending_segment() {
        let fit = LineFit::through(&Segment::new(0.0, 480.0, 100.0, 400.0)).unwrap();
        assert!((fit.slope + 0.8).abs() < 1e-12);
        assert!((fit.intercept - 480.0).abs() < 1e-9);
    }

    #[test]
    fn fit_ignores_endpoint_order() {
        let a = LineFit::through(&Segment::new(10.0, 20.0, 30.0, 60.0)).unwrap();
        let b = LineFit::through(&Segment::new(30.0, 60.0, 10.0, 20.0)).unwrap();
        assert!((a.slope - b.slope).abs() < 1e-12);
        assert!((a.intercept - b.intercept).abs() < 1e-9);
    }

    #[test]
    fn vertical_segment_is_rejected() {
        let err = LineFit::through(&Segment::new(42.0, 0.0, 42.0, 100.0)).unwrap_err();
        assert_eq!(err, FitError::VerticalSegment { x: 42.0 });
    }

    #[test]
    fn nan_segment_is_rejected() {
        let err = LineFit::through(&Segment::new(0.0, f64::NAN, 10.0, 10.0)).unwrap_err();
        assert_eq!(err, FitError::NonFinite);
    }

    #[test]
    fn least_squares_over_many_points() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fit = LineFit::least_squares(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mean_of_fits() {
        let fits = [LineFit::new(-1.0, 100.0), LineFit::new(-0.5, 200.0)];
        let mean = LineFit::mean(&fits).unwrap();
        assert_eq!(mean, LineFit::new(-0.75, 150.0));
        assert!(LineFit::mean(&[]).is_none());
    }

    #[test]
    fn x_at_rejects_flat_slope() {
        let err = LineFit::new(0.0, 10.0).x_at(480.0).unwrap_err();
        assert!(matches!(err, FitError::FlatSlope { .. }));
    }

    #[test]
    fn x_at_solves_line_equation() {
        let fit = LineFit::new(-0.8, 480.0);
        assert_eq!(fit.x_at(288.0).unwrap(), 240.0);
    }
}
