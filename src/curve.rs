// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A Bézier curve of inferred order: line, quadratic or cubic.

use std::fmt;
use std::ops::Range;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::intersect;
use crate::{
    CubicBez, Line, ParamCurve, ParamCurveArclen, ParamCurveCurvature, ParamCurveExtrema,
    ParamCurveNearest, Point, QuadBez, Rect, Vec2, MAX_EXTREMA,
};

/// A single Bézier segment of linear, quadratic or cubic order.
///
/// `Curve` is the evaluation form used wherever the order of a segment
/// is data rather than a static type: a curve is defined by its two
/// anchor points plus zero, one or two control points, and every
/// operation branches on the order. Curves are transient values; they
/// are computed on demand from [`Contour`] components and never stored.
///
/// [`Contour`]: crate::Contour
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// A line segment.
    Linear(Line),
    /// A quadratic Bézier segment.
    Quadratic(QuadBez),
    /// A cubic Bézier segment.
    Cubic(CubicBez),
}

/// The canonical shape category of a curve.
///
/// Lower orders classify trivially; cubics are categorized from the
/// canonical-form end point alone, following Stone & DeRose, "A
/// Geometric Characterization of Parametric Cubic Curves".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveCategory {
    /// All points coincide.
    Point,
    /// The curve traces a line segment, whatever its stored order.
    Linear,
    /// A (possibly disguised) quadratic arch.
    Quadratic,
    /// A cubic arch with no inflection, loop or cusp.
    Simple,
    /// A cubic with exactly one inflection.
    SingleInflection,
    /// A cubic with two inflections.
    DoubleInflection,
    /// A cubic that crosses itself.
    Loop,
    /// A cubic whose loop touches the start point.
    LoopAtStart,
    /// A cubic whose loop touches the end point.
    LoopAtEnd,
    /// A cubic whose endpoints coincide, closing its loop.
    LoopClosed,
    /// A cubic with a cusp.
    Cusp,
}

impl Curve {
    /// Create a linear curve.
    #[inline]
    pub fn linear(p0: impl Into<Point>, p1: impl Into<Point>) -> Curve {
        Curve::Linear(Line::new(p0, p1))
    }

    /// Create a quadratic curve.
    #[inline]
    pub fn quadratic(p0: impl Into<Point>, c: impl Into<Point>, p1: impl Into<Point>) -> Curve {
        Curve::Quadratic(QuadBez::new(p0, c, p1))
    }

    /// Create a cubic curve.
    #[inline]
    pub fn cubic(
        p0: impl Into<Point>,
        c0: impl Into<Point>,
        c1: impl Into<Point>,
        p1: impl Into<Point>,
    ) -> Curve {
        Curve::Cubic(CubicBez::new(p0, c0, c1, p1))
    }

    /// Create a curve from anchor points and optional control points,
    /// inferring the order from how many control points are present.
    ///
    /// Control points equal to [`Point::INVALID`] (or any non-finite
    /// point) count as absent. A lone second control point is accepted
    /// as a quadratic rather than rejected.
    pub fn from_control_points(
        p0: Point,
        c0: Option<Point>,
        c1: Option<Point>,
        p1: Point,
    ) -> Curve {
        let c0 = c0.filter(|c| c.is_finite());
        let c1 = c1.filter(|c| c.is_finite());
        match (c0, c1) {
            (Some(c0), Some(c1)) => Curve::cubic(p0, c0, c1, p1),
            (Some(c), None) | (None, Some(c)) => Curve::quadratic(p0, c, p1),
            (None, None) => Curve::linear(p0, p1),
        }
    }

    /// The first anchor point.
    #[inline]
    pub fn p0(&self) -> Point {
        self.start()
    }

    /// The second anchor point.
    #[inline]
    pub fn p1(&self) -> Point {
        self.end()
    }

    /// The first control point, if the order has one.
    #[inline]
    pub fn c0(&self) -> Option<Point> {
        match self {
            Curve::Linear(_) => None,
            Curve::Quadratic(q) => Some(q.p1),
            Curve::Cubic(c) => Some(c.p1),
        }
    }

    /// The second control point, if the order has one.
    #[inline]
    pub fn c1(&self) -> Option<Point> {
        match self {
            Curve::Linear(_) | Curve::Quadratic(_) => None,
            Curve::Cubic(c) => Some(c.p2),
        }
    }

    /// Is every point of this curve finite?
    pub fn is_finite(&self) -> bool {
        match self {
            Curve::Linear(line) => line.is_finite(),
            Curve::Quadratic(q) => q.is_finite(),
            Curve::Cubic(c) => c.is_finite(),
        }
    }

    /// The curve reduced to a line between its anchor points.
    #[inline]
    pub fn as_linear(&self) -> Curve {
        Curve::linear(self.p0(), self.p1())
    }

    /// The curve reduced (or raised) to quadratic order.
    ///
    /// A cubic reduces using the midpoint of its control points; a line
    /// raises using the midpoint of its chord. Both agree with the
    /// original at the anchor points.
    pub fn as_quadratic(&self) -> Curve {
        match self {
            Curve::Linear(line) => {
                Curve::quadratic(line.p0, line.p0.midpoint(line.p1), line.p1)
            }
            Curve::Quadratic(_) => *self,
            Curve::Cubic(c) => Curve::quadratic(c.p0, c.p1.midpoint(c.p2), c.p3),
        }
    }

    /// The curve raised to cubic order.
    ///
    /// Raising a quadratic is exact; raising a line uses the anchor
    /// points as control points.
    pub fn as_cubic(&self) -> Curve {
        match self {
            Curve::Linear(line) => Curve::cubic(line.p0, line.p0, line.p1, line.p1),
            Curve::Quadratic(q) => Curve::Cubic(q.raise()),
            Curve::Cubic(_) => *self,
        }
    }

    /// Evaluate position and derivatives in one pass of de Casteljau's
    /// algorithm.
    ///
    /// Returns `(position, first, second)`. The derivative vectors are
    /// the de Casteljau hull differences: the span of the final linear
    /// interpolation, which is the true derivative divided by the curve
    /// order. Tangent queries use them directly. Only cubics have a
    /// nonzero second difference.
    pub fn evaluate(&self, t: f64) -> (Point, Vec2, Vec2) {
        match self {
            Curve::Linear(line) => (line.eval(t), line.p1 - line.p0, Vec2::ZERO),
            Curve::Quadratic(q) => {
                let qp0 = q.p0.lerp(q.p1, t);
                let qp1 = q.p1.lerp(q.p2, t);
                let sp = qp0.lerp(qp1, t);
                (sp, qp1 - qp0, Vec2::ZERO)
            }
            Curve::Cubic(c) => {
                let qp0 = c.p0.lerp(c.p1, t);
                let qc = c.p1.lerp(c.p2, t);
                let qp1 = c.p2.lerp(c.p3, t);
                let rp0 = qp0.lerp(qc, t);
                let rp1 = qc.lerp(qp1, t);
                let sp = rp0.lerp(rp1, t);
                (sp, rp1 - rp0, qp1 - qp0)
            }
        }
    }

    /// The tangent vector at `t`, in the hull-difference convention of
    /// [`evaluate`](Self::evaluate).
    #[inline]
    pub fn tangent(&self, t: f64) -> Vec2 {
        self.evaluate(t).1
    }

    /// The unit tangent at `t`.
    ///
    /// Produces NaN components where the tangent is zero.
    #[inline]
    pub fn tangent_unit(&self, t: f64) -> Vec2 {
        self.tangent(t).normalize()
    }

    /// The normal vector at `t` (the tangent turned 90° counter-clockwise).
    #[inline]
    pub fn normal(&self, t: f64) -> Vec2 {
        self.tangent(t).turn_90()
    }

    /// The unit normal at `t`.
    #[inline]
    pub fn normal_unit(&self, t: f64) -> Vec2 {
        self.normal(t).normalize()
    }

    /// The signed curvature at `t`.
    ///
    /// Lines have zero curvature, degenerate ones included.
    pub fn curvature(&self, t: f64) -> f64 {
        let k = match self {
            Curve::Linear(_) => 0.0,
            Curve::Quadratic(q) => q.curvature(t),
            Curve::Cubic(c) => c.curvature(t),
        };
        if k.is_nan() {
            0.0
        } else {
            k
        }
    }

    /// The canonical end point of the cubic's characteristic map, with
    /// the basis (p0, c0, c1) sent to (0,0), (0,1), (1,1).
    ///
    /// Returns `None` for non-cubic curves and cubics whose control
    /// polygon degenerates the basis.
    pub fn canonical_form(&self) -> Option<Point> {
        let Curve::Cubic(c) = self else {
            return None;
        };
        let c0 = c.p1 - c.p0;
        let c1 = c.p2 - c.p0;
        let p1 = c.p3 - c.p0;

        let ycc = c1.y / c0.y;
        let ypc = p1.y / c0.y;
        let x = (p1.x - c0.x * ypc) / (c1.x - c0.x * ycc);
        let y = x * (1.0 - ycc) + ypc;
        let p = Point::new(x, y);
        p.is_finite().then_some(p)
    }

    /// Classify the curve's canonical shape.
    ///
    /// `accuracy` controls every degeneracy decision: point coincidence,
    /// control-polygon colinearity (which classifies as [`Linear`]
    /// before any discriminant work), a cubic that is a disguised
    /// quadratic, and the loop/cusp boundary edges of the canonical
    /// plane.
    ///
    /// [`Linear`]: CurveCategory::Linear
    pub fn category(&self, accuracy: f64) -> CurveCategory {
        match self {
            Curve::Linear(line) => {
                if line.p0.is_near(line.p1, accuracy) {
                    CurveCategory::Point
                } else {
                    CurveCategory::Linear
                }
            }
            Curve::Quadratic(q) => Self::category_quadratic(q, accuracy),
            Curve::Cubic(c) => Self::category_cubic(c, accuracy),
        }
    }

    fn category_quadratic(q: &QuadBez, accuracy: f64) -> CurveCategory {
        let p0c = q.p0.is_near(q.p1, accuracy);
        let p1c = q.p2.is_near(q.p1, accuracy);
        if p0c && q.p0.is_near(q.p2, accuracy) {
            return CurveCategory::Point;
        }
        if p0c || p1c || colinear(q.p0, q.p2, &[q.p1], accuracy) {
            return CurveCategory::Linear;
        }
        CurveCategory::Quadratic
    }

    fn category_cubic(c: &CubicBez, accuracy: f64) -> CurveCategory {
        let p0p1 = c.p0.is_near(c.p3, accuracy);
        let p0c0 = c.p0.is_near(c.p1, accuracy);
        let p0c1 = c.p0.is_near(c.p2, accuracy);
        let p1c0 = c.p3.is_near(c.p1, accuracy);
        let p1c1 = c.p3.is_near(c.p2, accuracy);
        let c0c1 = c.p1.is_near(c.p2, accuracy);
        if p0p1 && p0c0 && p0c1 {
            return CurveCategory::Point;
        }
        if (p0c0 && p1c1) || (p0c1 && p1c0) {
            return CurveCategory::Linear;
        }
        if colinear(c.p0, c.p3, &[c.p1, c.p2], accuracy) {
            return CurveCategory::Linear;
        }
        if p0c1 || p1c0 || c0c1 {
            return CurveCategory::Simple;
        }

        // A cubic whose raised control points meet at a single point is a
        // quadratic in disguise.
        let q0 = c.p0 + 1.5 * (c.p1 - c.p0);
        let q1 = c.p3 + 1.5 * (c.p2 - c.p3);
        if q0.is_near(q1, accuracy) {
            return CurveCategory::Quadratic;
        }

        let Some(p) = Curve::Cubic(*c).canonical_form() else {
            return CurveCategory::Simple;
        };
        Self::category_canonical(p, accuracy)
    }

    /// Categorize from a canonical end point.
    ///
    /// Region boundaries per Stone & DeRose; equality against an edge is
    /// tested within `accuracy`.
    fn category_canonical(p: Point, accuracy: f64) -> CurveCategory {
        if p.is_near(Point::new(1.0, 1.0), accuracy) {
            return CurveCategory::Simple;
        }
        if p.is_near(Point::ZERO, accuracy) {
            return CurveCategory::LoopClosed;
        }
        if p.y > 1.0 {
            return CurveCategory::SingleInflection;
        }
        if p.x > 1.0 {
            return CurveCategory::Simple;
        }
        let cusp_edge = (-p.x * p.x + 2.0 * p.x + 3.0) * 0.25;
        if (p.y - cusp_edge).abs() <= accuracy {
            return CurveCategory::Cusp;
        }
        if p.y > cusp_edge {
            return CurveCategory::DoubleInflection;
        }
        if p.x > 0.0 {
            let loop_at_end_edge = ((-3.0 * p.x * p.x + 12.0 * p.x).sqrt() - p.x) * 0.5;
            if (p.y - loop_at_end_edge).abs() <= accuracy {
                return CurveCategory::LoopAtEnd;
            }
            if p.y > loop_at_end_edge {
                return CurveCategory::Loop;
            }
        } else {
            let loop_at_start_edge = (-p.x * p.x + 3.0 * p.x) * (1.0 / 3.0);
            if (p.y - loop_at_start_edge).abs() <= accuracy {
                return CurveCategory::LoopAtStart;
            }
            if p.y > loop_at_start_edge {
                return CurveCategory::Loop;
            }
        }
        CurveCategory::Simple
    }

    /// The curve's extrema, in increasing parameter order.
    pub fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        match self {
            Curve::Linear(line) => line.extrema(),
            Curve::Quadratic(q) => q.extrema(),
            Curve::Cubic(c) => c.extrema(),
        }
    }

    /// Parameters of the curve's inflection points.
    ///
    /// Only cubics can have inflections.
    pub fn inflections(&self) -> ArrayVec<f64, 2> {
        match self {
            Curve::Linear(_) | Curve::Quadratic(_) => ArrayVec::new(),
            Curve::Cubic(c) => c.inflections(),
        }
    }

    /// The bounding box of the control polygon.
    ///
    /// Cheap, and always encloses [`bounds`](Self::bounds).
    pub fn approx_bounds(&self) -> Rect {
        match self {
            Curve::Linear(line) => line.bounds(),
            Curve::Quadratic(q) => q.approx_bounds(),
            Curve::Cubic(c) => c.approx_bounds(),
        }
    }

    /// The tight bounding box, from the endpoints and interior extrema.
    pub fn bounds(&self) -> Rect {
        match self {
            Curve::Linear(line) => line.bounds(),
            Curve::Quadratic(q) => q.bounds(),
            Curve::Cubic(c) => c.bounds(),
        }
    }

    /// The distance from `p` to the nearest point on the curve.
    ///
    /// Never exceeds the distance from `p` to any control point.
    pub fn distance_from(&self, p: Point, accuracy: f64) -> f64 {
        let (_, d2) = self.nearest(p, accuracy);
        d2.sqrt()
    }

    /// Split the curve at `t`, producing two curves of the same order
    /// whose concatenation reproduces the original.
    pub fn split(&self, t: f64) -> (Curve, Curve) {
        match self {
            Curve::Linear(line) => {
                let sp = line.eval(t);
                (Curve::linear(line.p0, sp), Curve::linear(sp, line.p1))
            }
            Curve::Quadratic(q) => {
                let qp0 = q.p0.lerp(q.p1, t);
                let qp1 = q.p1.lerp(q.p2, t);
                let sp = qp0.lerp(qp1, t);
                (
                    Curve::quadratic(q.p0, qp0, sp),
                    Curve::quadratic(sp, qp1, q.p2),
                )
            }
            Curve::Cubic(c) => {
                let qp0 = c.p0.lerp(c.p1, t);
                let qc = c.p1.lerp(c.p2, t);
                let qp1 = c.p2.lerp(c.p3, t);
                let rp0 = qp0.lerp(qc, t);
                let rp1 = qc.lerp(qp1, t);
                let sp = rp0.lerp(rp1, t);
                (
                    Curve::cubic(c.p0, qp0, rp0, sp),
                    Curve::cubic(sp, rp1, qp1, c.p3),
                )
            }
        }
    }

    /// The curve translated so its start is at the origin and rotated so
    /// its end lies on the x-axis.
    pub fn x_axis_aligned(&self) -> Curve {
        let p0 = self.p0();
        let angle = -(self.p1() - p0).atan2();
        self.transformed(|p| (p - p0).rotated(angle).to_point())
    }

    /// The curve translated so its start is at the origin and rotated so
    /// its end lies on the y-axis.
    pub fn y_axis_aligned(&self) -> Curve {
        self.x_axis_aligned().transformed(|p| {
            let v = p.to_vec2();
            Point::new(-v.y, v.x)
        })
    }

    pub(crate) fn transformed(&self, f: impl Fn(Point) -> Point) -> Curve {
        match self {
            Curve::Linear(line) => Curve::linear(f(line.p0), f(line.p1)),
            Curve::Quadratic(q) => Curve::quadratic(f(q.p0), f(q.p1), f(q.p2)),
            Curve::Cubic(c) => Curve::cubic(f(c.p0), f(c.p1), f(c.p2), f(c.p3)),
        }
    }

    /// Reshape the curve so it passes through `p` at parameter `t`,
    /// preserving endpoints and order.
    ///
    /// The required displacement is distributed over the control points
    /// in closed form. Lines have no control points and are returned
    /// unchanged, as are curves whose Bernstein weights vanish at `t`
    /// (`t` at an endpoint), where no control movement can help.
    pub fn mould(&self, t: f64, p: Point) -> Curve {
        let delta = p - self.eval(t);
        match self {
            Curve::Linear(_) => *self,
            Curve::Quadratic(q) => {
                let b = 2.0 * t * (1.0 - t);
                if b.abs() < f64::EPSILON {
                    return *self;
                }
                Curve::quadratic(q.p0, q.p1 + delta / b, q.p2)
            }
            Curve::Cubic(c) => {
                let mt = 1.0 - t;
                let b = 3.0 * mt * mt * t;
                let cw = 3.0 * mt * t * t;
                let weight = b + cw;
                if weight.abs() < f64::EPSILON {
                    return *self;
                }
                let shift = delta / weight;
                Curve::cubic(c.p0, c.p1 + shift, c.p2 + shift, c.p3)
            }
        }
    }

    /// A linear curve from `p0` passing through `p` at parameter `t`.
    ///
    /// With `t` at or near zero there is no such line; the segment from
    /// `p0` to `p` itself is returned.
    pub fn linear_through(p0: Point, p: Point, t: f64) -> Curve {
        if t.abs() < f64::EPSILON {
            return Curve::linear(p0, p);
        }
        Curve::linear(p0, p0 + (p - p0) / t)
    }

    /// A quadratic curve between `p0` and `p1` passing through `p` at
    /// parameter `t`.
    ///
    /// Falls back to the linear segment when the control weight
    /// vanishes (`t` at an endpoint).
    pub fn quadratic_through(p0: Point, p1: Point, p: Point, t: f64) -> Curve {
        let mt = 1.0 - t;
        let b = 2.0 * t * mt;
        if b.abs() < f64::EPSILON {
            return Curve::linear(p0, p1);
        }
        let r = p.to_vec2() - p0.to_vec2() * (mt * mt) - p1.to_vec2() * (t * t);
        Curve::quadratic(p0, (r / b).to_point(), p1)
    }

    /// A cubic curve between `p0` and `p1` passing through `p` at
    /// parameter `t`, with the control polygon's middle leg along
    /// `tangent` (`c1 = c0 + tangent`).
    ///
    /// Falls back to the quadratic formula when the control weights
    /// vanish.
    pub fn cubic_through(p0: Point, p1: Point, p: Point, t: f64, tangent: Vec2) -> Curve {
        let mt = 1.0 - t;
        let b = 3.0 * mt * mt * t;
        let cw = 3.0 * mt * t * t;
        let weight = b + cw;
        if weight.abs() < f64::EPSILON {
            return Curve::quadratic_through(p0, p1, p, t);
        }
        let r = p.to_vec2() - p0.to_vec2() * (mt * mt * mt) - p1.to_vec2() * (t * t * t);
        let c0 = (r - tangent * cw) / weight;
        let c0 = c0.to_point();
        Curve::cubic(p0, c0, c0 + tangent, p1)
    }

    /// Find the intersections of two curves.
    ///
    /// Each record is a parameter pair `(t, u)` with `self.eval(t)` and
    /// `other.eval(u)` coincident within the search tolerance. The count
    /// is bounded by the algebraic maximum for the orders involved. The
    /// records are reported in the order the subdivision search finds
    /// them, which is not sorted.
    pub fn intersections(&self, other: &Curve) -> SmallVec<[(f64, f64); 9]> {
        intersect::curve_curve(self, other)
    }
}

/// Are all of `points` within `accuracy` of the line through `a` and `b`?
fn colinear(a: Point, b: Point, points: &[Point], accuracy: f64) -> bool {
    let chord = b - a;
    let len = chord.hypot();
    if len <= accuracy {
        return false;
    }
    points
        .iter()
        .all(|p| (chord.cross(*p - a) / len).abs() <= accuracy)
}

impl ParamCurve for Curve {
    fn eval(&self, t: f64) -> Point {
        match self {
            Curve::Linear(line) => line.eval(t),
            Curve::Quadratic(q) => q.eval(t),
            Curve::Cubic(c) => c.eval(t),
        }
    }

    fn subsegment(&self, range: Range<f64>) -> Curve {
        match self {
            Curve::Linear(line) => Curve::Linear(line.subsegment(range)),
            Curve::Quadratic(q) => Curve::Quadratic(q.subsegment(range)),
            Curve::Cubic(c) => Curve::Cubic(c.subsegment(range)),
        }
    }

    fn start(&self) -> Point {
        match self {
            Curve::Linear(line) => line.start(),
            Curve::Quadratic(q) => q.start(),
            Curve::Cubic(c) => c.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            Curve::Linear(line) => line.end(),
            Curve::Quadratic(q) => q.end(),
            Curve::Cubic(c) => c.end(),
        }
    }
}

impl ParamCurveArclen for Curve {
    fn arclen(&self, accuracy: f64) -> f64 {
        match self {
            Curve::Linear(line) => line.arclen(accuracy),
            Curve::Quadratic(q) => q.arclen(accuracy),
            Curve::Cubic(c) => c.arclen(accuracy),
        }
    }
}

impl ParamCurveNearest for Curve {
    fn nearest(&self, p: Point, accuracy: f64) -> (f64, f64) {
        match self {
            Curve::Linear(line) => line.nearest(p, accuracy),
            Curve::Quadratic(q) => q.nearest(p, accuracy),
            Curve::Cubic(c) => c.nearest(p, accuracy),
        }
    }
}

impl From<Line> for Curve {
    fn from(line: Line) -> Curve {
        Curve::Linear(line)
    }
}

impl From<QuadBez> for Curve {
    fn from(q: QuadBez) -> Curve {
        Curve::Quadratic(q)
    }
}

impl From<CubicBez> for Curve {
    fn from(c: CubicBez) -> Curve {
        Curve::Cubic(c)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Linear(line) => write!(f, "{} {}", line.p0, line.p1),
            Curve::Quadratic(q) => write!(f, "{} {} {}", q.p0, q.p1, q.p2),
            Curve::Cubic(c) => write!(f, "{} {} {} {}", c.p0, c.p1, c.p2, c.p3),
        }
    }
}
