// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use std::ops::Range;

use arrayvec::ArrayVec;

use crate::{
    ParamCurve, ParamCurveArclen, ParamCurveCurvature, ParamCurveDeriv, ParamCurveExtrema,
    ParamCurveNearest, Point, Rect, MAX_EXTREMA,
};

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        self.arclen(1e-9)
    }

    /// The bounding box of the line; for a line the control polygon
    /// bound and the tight bound coincide.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }

    /// The same line, with endpoints reversed.
    #[inline]
    pub fn reversed(&self) -> Line {
        Line::new(self.p1, self.p0)
    }

    /// Is this line finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen(&self, _accuracy: f64) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    #[inline]
    fn inv_arclen(&self, arclen: f64, _accuracy: f64) -> f64 {
        let length = (self.p1 - self.p0).hypot();
        if length == 0.0 {
            return 0.0;
        }
        (arclen / length).clamp(0.0, 1.0)
    }
}

impl ParamCurveExtrema for Line {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        ArrayVec::new()
    }
}

impl ParamCurveNearest for Line {
    fn nearest(&self, p: Point, _accuracy: f64) -> (f64, f64) {
        let d = self.p1 - self.p0;
        let dotp = d.dot(p - self.p0);
        let d_squared = d.dot(d);
        if dotp <= 0.0 || d_squared == 0.0 {
            (0.0, (p - self.p0).hypot2())
        } else if dotp >= d_squared {
            (1.0, (p - self.p1).hypot2())
        } else {
            let t = dotp / d_squared;
            let dist = (p - self.eval(t)).hypot2();
            (t, dist)
        }
    }
}

impl ParamCurveCurvature for Line {
    /// A line has zero curvature, degenerate lines included.
    #[inline]
    fn curvature(&self, _t: f64) -> f64 {
        0.0
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
pub struct ConstPoint(Point);

impl ParamCurve for ConstPoint {
    #[inline]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    #[inline]
    fn subsegment(&self, _range: Range<f64>) -> ConstPoint {
        *self
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::ZERO)
    }
}

impl ParamCurveArclen for ConstPoint {
    #[inline]
    fn arclen(&self, _accuracy: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_eval() {
        let l = Line::new((0., 0.), (2., 2.));
        assert_eq!(l.eval(0.5), Point::new(1., 1.));
        assert_eq!(l.start(), Point::new(0., 0.));
        assert_eq!(l.end(), Point::new(2., 2.));
        // Parameters outside [0, 1] extrapolate.
        assert_eq!(l.eval(2.0), Point::new(4., 4.));
    }

    #[test]
    fn line_arclen() {
        let l = Line::new((0., 0.), (3., 4.));
        assert_eq!(l.arclen(1e-9), 5.);
        let t = l.inv_arclen(2.5, 1e-9);
        assert!((t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn line_nearest() {
        let l = Line::new((0., 0.), (10., 0.));
        let (t, d2) = l.nearest(Point::new(5., 3.), 1e-9);
        assert!((t - 0.5).abs() < 1e-9);
        assert!((d2 - 9.).abs() < 1e-9);
        // Beyond the ends clamps.
        let (t, _) = l.nearest(Point::new(-2., 0.), 1e-9);
        assert_eq!(t, 0.0);
        let (t, _) = l.nearest(Point::new(12., 0.), 1e-9);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn degenerate_line_nearest() {
        let l = Line::new((1., 1.), (1., 1.));
        let (t, d2) = l.nearest(Point::new(2., 1.), 1e-9);
        assert_eq!(t, 0.0);
        assert!((d2 - 1.).abs() < 1e-12);
    }
}
