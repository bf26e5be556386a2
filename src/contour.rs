// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contours: chains of curve segments forming one sub-path.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Curve, ParamCurve, ParamCurveArclen, ParamCurveNearest, Point, Rect, Vec2};

/// One component of a [`Contour`]: the end point of an edge plus that
/// edge's optional control points.
///
/// The edge's start point is implicit: the previous component's `p`, or
/// the contour's start point for the first edge. The first component of
/// a contour carries no control points and exists only to record the
/// start point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContourComponent {
    /// The first control point, if the edge is quadratic or cubic.
    pub c0: Option<Point>,
    /// The second control point, if the edge is cubic.
    pub c1: Option<Point>,
    /// The edge's end point.
    pub p: Point,
}

impl ContourComponent {
    /// A component ending a linear edge.
    #[inline]
    pub fn linear(p: Point) -> ContourComponent {
        ContourComponent {
            c0: None,
            c1: None,
            p,
        }
    }

    /// A component ending a quadratic edge.
    #[inline]
    pub fn quadratic(c: Point, p: Point) -> ContourComponent {
        ContourComponent {
            c0: Some(c),
            c1: None,
            p,
        }
    }

    /// A component ending a cubic edge.
    #[inline]
    pub fn cubic(c0: Point, c1: Point, p: Point) -> ContourComponent {
        ContourComponent {
            c0: Some(c0),
            c1: Some(c1),
            p,
        }
    }
}

/// An ordered, open-or-closed chain of curve segments sharing endpoints.
///
/// A contour with N components has exactly N−1 curve segments. When the
/// contour is closed, the final edge back to the start point is implied
/// and never stored; callers that need it compose it explicitly.
///
/// Every curve query is re-exposed here in terms of one contour-global
/// parameter t ∈ [0, 1], which divides evenly across the segments by
/// count (not by arc length): segment i owns [i/(N−1), (i+1)/(N−1)).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    components: Vec<ContourComponent>,
    closed: bool,
}

/// An intersection between two contours.
///
/// The parameters are contour-global; the segment indices identify the
/// curve of each contour the intersection originated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourIntersection {
    /// Index of the originating segment in the first contour.
    pub segment: usize,
    /// Index of the originating segment in the second contour.
    pub other_segment: usize,
    /// Global parameter on the first contour.
    pub t: f64,
    /// Global parameter on the second contour.
    pub u: f64,
}

impl Contour {
    /// Create a new open contour with the given start point and no edges.
    pub fn new(start: Point) -> Contour {
        Contour {
            components: vec![ContourComponent::linear(start)],
            closed: false,
        }
    }

    /// A contour through a sequence of points joined by linear edges.
    pub fn from_polyline(start: Point, points: &[Point], closed: bool) -> Contour {
        let mut contour = Contour::new(start);
        for &p in points {
            contour.add_linear(p);
        }
        contour.closed = closed;
        contour
    }

    /// A contour of quadratic edges, each given as `(control, end)`.
    pub fn from_quadratics(start: Point, edges: &[(Point, Point)], closed: bool) -> Contour {
        let mut contour = Contour::new(start);
        for &(c, p) in edges {
            contour.add_quadratic(c, p);
        }
        contour.closed = closed;
        contour
    }

    /// A contour of cubic edges, each given as `(control0, control1, end)`.
    pub fn from_cubics(start: Point, edges: &[(Point, Point, Point)], closed: bool) -> Contour {
        let mut contour = Contour::new(start);
        for &(c0, c1, p) in edges {
            contour.add_cubic(c0, c1, p);
        }
        contour.closed = closed;
        contour
    }

    /// A contour from raw components.
    ///
    /// The first component's control points are ignored; an empty slice
    /// produces a contour starting at the origin.
    pub fn from_components(components: &[ContourComponent], closed: bool) -> Contour {
        match components.split_first() {
            None => Contour {
                components: vec![ContourComponent::linear(Point::ORIGIN)],
                closed,
            },
            Some((first, rest)) => {
                let mut all = Vec::with_capacity(components.len());
                all.push(ContourComponent::linear(first.p));
                all.extend_from_slice(rest);
                Contour {
                    components: all,
                    closed,
                }
            }
        }
    }

    /// Append a linear edge ending at `p`.
    pub fn add_linear(&mut self, p: Point) {
        self.components.push(ContourComponent::linear(p));
    }

    /// Append a quadratic edge with control point `c` ending at `p`.
    pub fn add_quadratic(&mut self, c: Point, p: Point) {
        self.components.push(ContourComponent::quadratic(c, p));
    }

    /// Append a cubic edge with control points `c0`, `c1` ending at `p`.
    pub fn add_cubic(&mut self, c0: Point, c1: Point, p: Point) {
        self.components.push(ContourComponent::cubic(c0, c1, p));
    }

    /// Remove the most recently appended edge.
    ///
    /// The start component is never removed; removing from an edgeless
    /// contour returns `None`.
    pub fn remove_last_component(&mut self) -> Option<ContourComponent> {
        if self.components.len() > 1 {
            self.components.pop()
        } else {
            None
        }
    }

    /// Mark the contour closed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Mark the contour open or closed.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Is the contour closed?
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The contour's start point.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.components[0].p
    }

    /// The contour's end point; for a closed contour this is the start
    /// point.
    #[inline]
    pub fn end_point(&self) -> Point {
        if self.closed {
            self.start_point()
        } else {
            self.components[self.components.len() - 1].p
        }
    }

    /// The number of components, including the start component.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The component at `index`.
    #[inline]
    pub fn component_at(&self, index: usize) -> ContourComponent {
        self.components[index]
    }

    /// The components as a slice.
    #[inline]
    pub fn components(&self) -> &[ContourComponent] {
        &self.components
    }

    /// The number of curve segments; one less than the component count.
    #[inline]
    pub fn curve_count(&self) -> usize {
        self.components.len() - 1
    }

    /// The curve for segment `index`.
    pub fn curve_at(&self, index: usize) -> Curve {
        let start = self.components[index].p;
        let component = self.components[index + 1];
        Curve::from_control_points(start, component.c0, component.c1, component.p)
    }

    /// Iterate over the contour's curve segments.
    pub fn curves(&self) -> impl Iterator<Item = Curve> + '_ {
        (0..self.curve_count()).map(move |i| self.curve_at(i))
    }

    /// The explicit closing curve from the end point of the last edge
    /// back to the start point.
    ///
    /// Never part of the segment list; compose it when the closed shape
    /// boundary is needed in full.
    pub fn closing_curve(&self) -> Curve {
        Curve::linear(self.components[self.components.len() - 1].p, self.start_point())
    }

    /// The index of the segment owning global parameter `t`.
    ///
    /// Parameter space divides evenly across segments by count; segment
    /// i owns [i/(N−1), (i+1)/(N−1)), with t = 1 owned by the last.
    pub fn curve_index_containing(&self, t: f64) -> usize {
        let n = self.curve_count();
        if n == 0 {
            return 0;
        }
        ((t * n as f64).floor() as usize).min(n - 1)
    }

    /// The local parameter on the owning segment for global `t`.
    pub fn curve_parameter(&self, t: f64) -> f64 {
        let n = self.curve_count();
        if n == 0 {
            return 0.0;
        }
        let index = self.curve_index_containing(t);
        (t * n as f64 - index as f64).clamp(0.0, 1.0)
    }

    /// The global parameter for a local parameter on segment `index`.
    pub fn parameter_for_curve_parameter(&self, index: usize, t: f64) -> f64 {
        let n = self.curve_count();
        if n == 0 {
            return 0.0;
        }
        ((index as f64 + t) / n as f64).clamp(0.0, 1.0)
    }

    fn segment_containing(&self, t: f64) -> Option<(Curve, f64)> {
        if self.curve_count() == 0 {
            return None;
        }
        let index = self.curve_index_containing(t);
        Some((self.curve_at(index), self.curve_parameter(t)))
    }

    /// The contour's value at global parameter `t`.
    ///
    /// An edgeless contour evaluates to its start point.
    pub fn value(&self, t: f64) -> Point {
        match self.segment_containing(t) {
            Some((curve, ct)) => curve.eval(ct),
            None => self.start_point(),
        }
    }

    /// The tangent vector at global parameter `t`.
    pub fn tangent(&self, t: f64) -> Vec2 {
        match self.segment_containing(t) {
            Some((curve, ct)) => curve.tangent(ct),
            None => Vec2::ZERO,
        }
    }

    /// The normal vector at global parameter `t`.
    pub fn normal(&self, t: f64) -> Vec2 {
        match self.segment_containing(t) {
            Some((curve, ct)) => curve.normal(ct),
            None => Vec2::ZERO,
        }
    }

    /// The signed curvature at global parameter `t`.
    pub fn curvature(&self, t: f64) -> f64 {
        match self.segment_containing(t) {
            Some((curve, ct)) => curve.curvature(ct),
            None => 0.0,
        }
    }

    /// The extrema of all segments, as global parameters in segment order.
    pub fn extrema(&self) -> Vec<f64> {
        let mut result = Vec::new();
        for (index, curve) in self.curves().enumerate() {
            for t in curve.extrema() {
                result.push(self.parameter_for_curve_parameter(index, t));
            }
        }
        result
    }

    /// The inflections of all segments, as global parameters in segment
    /// order.
    pub fn inflections(&self) -> Vec<f64> {
        let mut result = Vec::new();
        for (index, curve) in self.curves().enumerate() {
            for t in curve.inflections() {
                result.push(self.parameter_for_curve_parameter(index, t));
            }
        }
        result
    }

    /// The bounding box of all component anchor and control points.
    pub fn approx_bounds(&self) -> Rect {
        let start = self.start_point();
        let mut bounds = Rect::from_points(start, start);
        for component in &self.components[1..] {
            if let Some(c0) = component.c0 {
                bounds = bounds.union_pt(c0);
            }
            if let Some(c1) = component.c1 {
                bounds = bounds.union_pt(c1);
            }
            bounds = bounds.union_pt(component.p);
        }
        bounds
    }

    /// The tight bounding box: the union of the segments' tight bounds.
    pub fn bounds(&self) -> Rect {
        let start = self.start_point();
        let mut bounds = Rect::from_points(start, start);
        for curve in self.curves() {
            bounds = bounds.union(curve.bounds());
        }
        bounds
    }

    /// The total arc length: the sum of the segments' lengths.
    pub fn length(&self, accuracy: f64) -> f64 {
        self.curves().map(|curve| curve.arclen(accuracy)).sum()
    }

    /// The global parameter at arc length `d` from the start.
    ///
    /// Walks segments until the one containing the length is reached,
    /// then delegates the remainder to that segment's arc-length
    /// parameterization. Lengths beyond the contour map to 1.
    pub fn parameter_at_length(&self, d: f64, accuracy: f64) -> f64 {
        if self.curve_count() == 0 || d <= 0.0 {
            return 0.0;
        }
        let mut length = 0.0;
        for (index, curve) in self.curves().enumerate() {
            let segment_length = curve.arclen(accuracy);
            if length + segment_length > d {
                let ct = curve.inv_arclen(d - length, accuracy);
                return self.parameter_for_curve_parameter(index, ct);
            }
            length += segment_length;
        }
        1.0
    }

    /// The global parameter of the point on the contour nearest `p`.
    pub fn nearest_parameter(&self, p: Point, accuracy: f64) -> f64 {
        let mut nearest_distance = f64::INFINITY;
        let mut nearest_parameter = 0.0;
        for (index, curve) in self.curves().enumerate() {
            let (ct, d2) = curve.nearest(p, accuracy);
            if d2 < nearest_distance {
                nearest_distance = d2;
                nearest_parameter = self.parameter_for_curve_parameter(index, ct);
            }
        }
        nearest_parameter
    }

    /// The distance from `p` to the nearest point on the contour.
    pub fn distance_from(&self, p: Point, accuracy: f64) -> f64 {
        let t = self.nearest_parameter(p, accuracy);
        self.value(t).distance(p)
    }

    /// Find all intersections between this contour and another.
    ///
    /// Every pair of segments is intersected; local parameter pairs are
    /// remapped to the two contours' global parameters.
    pub fn intersections(&self, other: &Contour) -> Vec<ContourIntersection> {
        let mut result = Vec::new();
        for (segment, curve) in self.curves().enumerate() {
            for (other_segment, other_curve) in other.curves().enumerate() {
                for (ct, cu) in curve.intersections(&other_curve) {
                    result.push(ContourIntersection {
                        segment,
                        other_segment,
                        t: self.parameter_for_curve_parameter(segment, ct),
                        u: other.parameter_for_curve_parameter(other_segment, cu),
                    });
                }
            }
        }
        result
    }
}

impl Hash for Contour {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.closed.hash(state);
        for component in &self.components {
            for c in [component.c0, component.c1] {
                match c {
                    Some(p) => {
                        p.x.to_bits().hash(state);
                        p.y.to_bits().hash(state);
                    }
                    None => u64::MAX.hash(state),
                }
            }
            component.p.x.to_bits().hash(state);
            component.p.y.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contour start:{}", self.start_point())?;
        for component in &self.components[1..] {
            if let Some(c0) = component.c0 {
                write!(f, " {}", c0)?;
            }
            if let Some(c1) = component.c1 {
                write!(f, " {}", c1)?;
            }
            write!(f, " {}", component.p)?;
        }
        write!(f, " {}", if self.closed { "closed" } else { "open" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Contour {
        Contour::from_polyline(
            Point::new(1., 1.),
            &[Point::new(3., 1.), Point::new(3., 3.), Point::new(1., 3.)],
            true,
        )
    }

    #[test]
    fn square_structure() {
        let contour = square();
        assert_eq!(contour.component_count(), 4);
        assert_eq!(contour.curve_count(), 3);
        assert!(contour.is_closed());
        for curve in contour.curves() {
            assert!(matches!(curve, Curve::Linear(_)));
        }
        assert_eq!(contour.start_point(), Point::new(1., 1.));
        // A closed contour ends where it starts.
        assert_eq!(contour.end_point(), Point::new(1., 1.));
        assert_eq!(
            contour.closing_curve(),
            Curve::linear((1., 3.), (1., 1.))
        );
    }

    #[test]
    fn parameter_round_trip() {
        let contour = square();
        for i in 0..=20 {
            let t = (i as f64) / 20.0;
            let index = contour.curve_index_containing(t);
            let local = contour.curve_parameter(t);
            let back = contour.parameter_for_curve_parameter(index, local);
            assert!((back - t).abs() < 1e-12, "t={} back={}", t, back);
        }
    }

    #[test]
    fn parameter_ownership() {
        let contour = square();
        // Segment i owns [i/3, (i+1)/3); t = 1 belongs to the last.
        assert_eq!(contour.curve_index_containing(0.0), 0);
        assert_eq!(contour.curve_index_containing(0.3), 0);
        assert_eq!(contour.curve_index_containing(1.0 / 3.0), 1);
        assert_eq!(contour.curve_index_containing(0.9), 2);
        assert_eq!(contour.curve_index_containing(1.0), 2);
    }

    #[test]
    fn value_and_tangent() {
        let contour = square();
        // Midpoint of the first edge.
        assert_eq!(contour.value(1.0 / 6.0), Point::new(2., 1.));
        // First edge points +x, second +y.
        let t0 = contour.tangent(1.0 / 6.0);
        assert!(t0.y.abs() < 1e-12 && t0.x > 0.);
        let t1 = contour.tangent(0.5);
        assert!(t1.x.abs() < 1e-12 && t1.y > 0.);
    }

    #[test]
    fn length_and_bounds() {
        let contour = square();
        // Three edges of length 2 each; the implied closing edge is not
        // part of the segment list.
        assert!((contour.length(1e-9) - 6.0).abs() < 1e-9);
        assert_eq!(contour.bounds(), Rect::new(1., 1., 3., 3.));
        assert_eq!(contour.approx_bounds(), Rect::new(1., 1., 3., 3.));
    }

    #[test]
    fn parameter_at_length_walks_segments() {
        let contour = square();
        // Halfway down the second edge, 3 units in.
        let t = contour.parameter_at_length(3.0, 1e-9);
        assert_eq!(contour.curve_index_containing(t), 1);
        let p = contour.value(t);
        assert!(p.distance(Point::new(3., 2.)) < 1e-6);
        // Monotone and saturating.
        assert_eq!(contour.parameter_at_length(-1.0, 1e-9), 0.0);
        assert_eq!(contour.parameter_at_length(100.0, 1e-9), 1.0);
    }

    #[test]
    fn nearest_and_distance() {
        let contour = square();
        // A point outside the right edge projects onto it.
        let t = contour.nearest_parameter(Point::new(4., 2.), 1e-9);
        assert_eq!(contour.curve_index_containing(t), 1);
        assert!((contour.distance_from(Point::new(4., 2.), 1e-9) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_orders() {
        let mut contour = Contour::new(Point::new(0., 0.));
        contour.add_quadratic(Point::new(5., 10.), Point::new(10., 0.));
        contour.add_cubic(
            Point::new(12., -5.),
            Point::new(18., -5.),
            Point::new(20., 0.),
        );
        assert_eq!(contour.curve_count(), 2);
        assert!(matches!(contour.curve_at(0), Curve::Quadratic(_)));
        assert!(matches!(contour.curve_at(1), Curve::Cubic(_)));
        // Segment boundary: the end of the quadratic is the start of the
        // cubic.
        let p = contour.value(0.5);
        assert!(p.distance(Point::new(10., 0.)) < 1e-9);
    }

    #[test]
    fn remove_last_is_lifo() {
        let mut contour = Contour::new(Point::new(0., 0.));
        contour.add_linear(Point::new(1., 0.));
        contour.add_linear(Point::new(1., 1.));
        assert_eq!(contour.curve_count(), 2);
        let removed = contour.remove_last_component().unwrap();
        assert_eq!(removed.p, Point::new(1., 1.));
        assert_eq!(contour.end_point(), Point::new(1., 0.));
        contour.remove_last_component();
        // The start component stays.
        assert!(contour.remove_last_component().is_none());
        assert_eq!(contour.component_count(), 1);
    }

    #[test]
    fn contour_intersections_remap() {
        // Two squares overlapping in a cross shape intersect on specific
        // segments.
        let a = square();
        let b = Contour::from_polyline(
            Point::new(2., 0.),
            &[Point::new(4., 0.), Point::new(4., 2.), Point::new(2., 2.)],
            true,
        );
        let hits = a.intersections(&b);
        assert!(!hits.is_empty());
        for hit in &hits {
            let pa = a.value(hit.t);
            let pb = b.value(hit.u);
            assert!(pa.distance(pb) < 1e-6, "{:?} vs {:?}", pa, pb);
            // The parameters land inside the originating segments.
            assert_eq!(a.curve_index_containing(hit.t), hit.segment);
            assert_eq!(b.curve_index_containing(hit.u), hit.other_segment);
        }
    }

    #[test]
    fn edgeless_contour() {
        let contour = Contour::new(Point::new(2., 3.));
        assert_eq!(contour.value(0.7), Point::new(2., 3.));
        assert_eq!(contour.length(1e-9), 0.0);
        assert_eq!(contour.tangent(0.3), Vec2::ZERO);
    }
}
