// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use std::ops::Range;

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{
    ParamCurve, ParamCurveArclen, ParamCurveCurvature, ParamCurveDeriv, ParamCurveExtrema,
    ParamCurveNearest, Point, QuadBez, Rect, MAX_EXTREMA,
};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

/// An iterator which produces quadratic Bézier segments.
struct ToQuads {
    c: CubicBez,
    max_hypot2: f64,
    t: f64,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Convert to quadratic Béziers.
    ///
    /// The iterator returns the start and end parameter in the cubic of each
    /// quadratic segment, along with the quadratic.
    ///
    /// Note that the resulting quadratic Béziers are not in general G1
    /// continuous; they are optimized for minimizing distance error.
    #[inline]
    pub fn to_quads(&self, accuracy: f64) -> impl Iterator<Item = (f64, f64, QuadBez)> {
        // This magic number is the square of 36 / sqrt(3).
        // See: http://caffeineowl.com/graphics/2d/vectorial/cubic2quad01.html
        let max_hypot2 = 432.0 * accuracy * accuracy;
        ToQuads {
            c: *self,
            max_hypot2,
            t: 0.0,
        }
    }

    /// The bounding box of the control polygon.
    ///
    /// Cheap, and always encloses [`bounds`](Self::bounds).
    pub fn approx_bounds(&self) -> Rect {
        Rect::from_points(self.p0, self.p3)
            .union_pt(self.p1)
            .union_pt(self.p2)
    }

    /// The tight bounding box, from the endpoints and interior extrema.
    pub fn bounds(&self) -> Rect {
        let mut bounds = Rect::from_points(self.p0, self.p3);
        for t in self.extrema() {
            bounds = bounds.union_pt(self.eval(t));
        }
        bounds
    }

    /// Parameters of the curve's inflection points, if any.
    ///
    /// A cubic can have at most two inflections; parameters outside the
    /// open interval (0, 1) are discarded.
    pub fn inflections(&self) -> ArrayVec<f64, 2> {
        // Axis-align the curve, which zeroes enough terms that the
        // curvature numerator becomes a simple quadratic in t.
        let a = self.aligned_to_x_axis();
        let c0 = a.p1 - a.p0;
        let c1 = a.p2 - a.p0;
        let p1 = a.p3 - a.p0;
        let ca = c1.x * c0.y;
        let cb = p1.x * c0.y;
        let cc = c0.x * c1.y;
        let cd = p1.x * c1.y;
        let qa = 18.0 * (-3.0 * ca + 2.0 * cb + 3.0 * cc - cd);
        let qb = 18.0 * (3.0 * ca - cb - 3.0 * cc);
        let qc = 18.0 * (cc - ca);
        let mut result = ArrayVec::new();
        let mut roots = solve_quadratic(qc, qb, qa);
        roots.as_mut_slice().sort_by(f64::total_cmp);
        for t in roots {
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }
        result
    }

    /// The curve translated so its start is the origin and rotated so its
    /// end lies on the positive or negative x-axis.
    pub(crate) fn aligned_to_x_axis(&self) -> CubicBez {
        let chord = self.p3 - self.p0;
        let angle = -chord.atan2();
        let align = |p: Point| (p - self.p0).rotated(angle).to_point();
        CubicBez::new(Point::ZERO, align(self.p1), align(self.p2), align(self.p3))
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                ((self.p0.to_vec2() + self.p1.to_vec2() * 2.0 + self.p2.to_vec2()) * 0.25)
                    .to_point(),
                pm,
            ),
            CubicBez::new(
                pm,
                ((self.p1.to_vec2() + self.p2.to_vec2() * 2.0 + self.p3.to_vec2()) * 0.25)
                    .to_point(),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl ParamCurveArclen for CubicBez {
    /// Arc length of a cubic Bézier segment.
    ///
    /// This algorithm is based on "Adaptive subdivision and the length and
    /// energy of Bézier curves" by Jens Gravesen.
    fn arclen(&self, accuracy: f64) -> f64 {
        // Chord/polygon estimate for an undivided segment.
        fn calc_l0(c: &CubicBez) -> f64 {
            let lc = (c.p3 - c.p0).hypot();
            let lp = (c.p1 - c.p0).hypot() + (c.p2 - c.p1).hypot() + (c.p3 - c.p2).hypot();
            (lc + lp) * 0.5
        }
        const MAX_DEPTH: usize = 16;
        fn rec(c: &CubicBez, l0: f64, accuracy: f64, depth: usize) -> f64 {
            let (c0, c1) = c.subdivide();
            let l0_c0 = calc_l0(&c0);
            let l0_c1 = calc_l0(&c1);
            let l1 = l0_c0 + l0_c1;
            let error = (l0 - l1) * (1.0 / 15.0);
            if error.abs() < accuracy || depth == MAX_DEPTH {
                l1 - error
            } else {
                rec(&c0, l0_c0, accuracy * 0.5, depth + 1)
                    + rec(&c1, l0_c1, accuracy * 0.5, depth + 1)
            }
        }
        rec(self, calc_l0(self), accuracy, 0)
    }
}

impl ParamCurveNearest for CubicBez {
    /// Find nearest point, by approximating with quadratics.
    fn nearest(&self, p: Point, accuracy: f64) -> (f64, f64) {
        let mut best_r = None;
        let mut best_t = 0.0;
        for (t0, t1, q) in self.to_quads(accuracy) {
            let (t, r) = q.nearest(p, accuracy);
            if best_r.map(|best_r| r < best_r).unwrap_or(true) {
                best_t = t0 + t * (t1 - t0);
                best_r = Some(r);
            }
        }
        (best_t, best_r.unwrap_or(0.0))
    }
}

impl ParamCurveCurvature for CubicBez {}

impl ParamCurveExtrema for CubicBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            let roots = solve_quadratic(c, b, a);
            for &t in &roots {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.as_mut_slice().sort_by(f64::total_cmp);
        result
    }
}

impl Iterator for ToQuads {
    type Item = (f64, f64, QuadBez);

    fn next(&mut self) -> Option<(f64, f64, QuadBez)> {
        let t0 = self.t;
        let mut t1 = 1.0;
        if t0 == t1 {
            return None;
        }
        loop {
            let seg = self.c.subsegment(t0..t1);
            // Compute error for candidate quadratic.
            let p1x2 = 3.0 * seg.p1.to_vec2() - seg.p0.to_vec2();
            let p2x2 = 3.0 * seg.p2.to_vec2() - seg.p3.to_vec2();
            let err = (p2x2 - p1x2).hypot2();
            if err < self.max_hypot2 {
                let result = QuadBez::new(seg.p0, ((p1x2 + p2x2) / 4.0).to_point(), seg.p3);
                self.t = t1;
                return Some((t0, t1, result));
            } else {
                let shrink = if t1 == 1.0 && err < 64.0 * self.max_hypot2 {
                    0.5
                } else {
                    0.999_999 * (self.max_hypot2 / err).powf(1. / 6.0)
                };
                t1 = t0 + shrink * (t1 - t0);
            }
        }
    }
}
