// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths: multi-contour Bézier geometry built from draw commands.

use std::hash::{Hash, Hasher};

use crate::{Contour, Curve, Point, Rect, Vec2};

/// The element of a path.
///
/// A path is an ordered list of elements; contours are a derived view.
/// A new contour begins at each `MoveTo` (or at the path start), and
/// `ClosePath` marks the active contour closed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Start a new contour at the point.
    MoveTo(Point),
    /// Append a line to the point.
    LineTo(Point),
    /// Append a quadratic segment with one control point, ending at the
    /// second point.
    QuadTo(Point, Point),
    /// Append a cubic segment with two control points, ending at the
    /// third point.
    CurveTo(Point, Point, Point),
    /// Close the active contour, returning the current point to the
    /// contour's start.
    ClosePath,
}

/// The rule deciding which points are inside a filled path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    /// A point is inside if a ray from it crosses the boundary an odd
    /// number of times.
    EvenOdd,
    /// A point is inside if the boundary's signed crossings sum to a
    /// nonzero winding number.
    NonZero,
}

/// An intersection between two paths.
///
/// The parameters are path-global; the contour indices identify the
/// contour of each path the intersection originated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathIntersection {
    /// Index of the originating contour in the first path.
    pub contour: usize,
    /// Index of the originating contour in the second path.
    pub other_contour: usize,
    /// Global parameter on the first path.
    pub t: f64,
    /// Global parameter on the second path.
    pub u: f64,
}

/// Coarse flattening threshold, for previews.
pub const FLATNESS_COARSE: f64 = 1.01;
/// Default flattening threshold.
pub const FLATNESS_NORMAL: f64 = 1.001;
/// Fine flattening threshold, for high-fidelity output.
pub const FLATNESS_FINE: f64 = 1.0001;

/// A path: an ordered element list, its derived contours, per-element
/// flattened polylines, and a running bounds rectangle.
///
/// Construction is a state machine over the draw commands. The element
/// list is authoritative; contours, polylines and bounds are maintained
/// incrementally in step with every append and removal.
#[derive(Clone, Debug, Default)]
pub struct Path {
    elements: Vec<PathEl>,
    contours: Vec<Contour>,
    polylines: Vec<Vec<Point>>,
    bounds: Rect,
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Create a path from a sequence of elements.
    pub fn from_elements(elements: impl IntoIterator<Item = PathEl>) -> Path {
        let mut path = Path::new();
        for el in elements {
            path.push(el);
        }
        path
    }

    /// Create a path holding a single contour.
    pub fn from_contour(contour: &Contour) -> Path {
        Path::from_contours(std::slice::from_ref(contour))
    }

    /// Create a path from a sequence of contours, in order.
    pub fn from_contours(contours: &[Contour]) -> Path {
        let mut path = Path::new();
        for contour in contours {
            path.move_to(contour.start_point());
            for component in &contour.components()[1..] {
                match (component.c0, component.c1) {
                    (Some(c0), Some(c1)) => path.curve_to(c0, c1, component.p),
                    (Some(c), None) | (None, Some(c)) => path.quad_to(c, component.p),
                    (None, None) => path.line_to(component.p),
                }
            }
            if contour.is_closed() {
                path.close_path();
            }
        }
        path
    }

    /// This path translated by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Path {
        let v = Vec2::new(dx, dy);
        self.transformed(|p| p + v)
    }

    /// This path scaled by `(sx, sy)` about the origin.
    pub fn scaled(&self, sx: f64, sy: f64) -> Path {
        self.transformed(|p| Point::new(p.x * sx, p.y * sy))
    }

    /// This path rotated by `angle` radians about the origin.
    pub fn rotated(&self, angle: f64) -> Path {
        self.transformed(|p| p.to_vec2().rotated(angle).to_point())
    }

    fn transformed(&self, f: impl Fn(Point) -> Point) -> Path {
        Path::from_elements(self.elements.iter().map(|el| match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(f(p)),
            PathEl::LineTo(p) => PathEl::LineTo(f(p)),
            PathEl::QuadTo(c, p) => PathEl::QuadTo(f(c), f(p)),
            PathEl::CurveTo(c0, c1, p) => PathEl::CurveTo(f(c0), f(c1), f(p)),
            PathEl::ClosePath => PathEl::ClosePath,
        }))
    }

    // ---- Attributes ------------------------------------------------------

    /// Does the path contain no elements?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The number of elements.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The element at `index`.
    #[inline]
    pub fn element_at(&self, index: usize) -> PathEl {
        self.elements[index]
    }

    /// The elements as a slice.
    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    /// The bounding rectangle of everything drawn so far.
    ///
    /// Tracks the flattened polylines; an empty path has zero bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    // ---- Polylines -------------------------------------------------------

    /// The number of flattened polylines; one per element.
    #[inline]
    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    /// The polyline for the element at `index`.
    ///
    /// Empty for `MoveTo` elements.
    #[inline]
    pub fn polyline_at(&self, index: usize) -> &[Point] {
        &self.polylines[index]
    }

    /// The number of points in the polyline for the element at `index`.
    #[inline]
    pub fn polyline_point_count(&self, index: usize) -> usize {
        self.polylines[index].len()
    }

    /// A single polyline point.
    #[inline]
    pub fn polyline_point_at(&self, index: usize, point_index: usize) -> Point {
        self.polylines[index][point_index]
    }

    // ---- Contours --------------------------------------------------------

    /// The number of derived contours.
    #[inline]
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// The contour at `index`.
    #[inline]
    pub fn contour_at(&self, index: usize) -> &Contour {
        &self.contours[index]
    }

    /// The contours as an ordered slice.
    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// The number of curve segments in the contour at `index`.
    #[inline]
    pub fn contour_curve_count(&self, index: usize) -> usize {
        self.contours[index].curve_count()
    }

    /// The curve at `curve_index` of the contour at `contour_index`.
    #[inline]
    pub fn curve_at(&self, contour_index: usize, curve_index: usize) -> Curve {
        self.contours[contour_index].curve_at(curve_index)
    }

    /// Is the contour at `index` closed?
    #[inline]
    pub fn contour_is_closed(&self, index: usize) -> bool {
        self.contours[index].is_closed()
    }

    /// The index of the contour each element belongs to.
    ///
    /// `None` for a `ClosePath` with no contour to close.
    pub fn contour_index_containing_element(&self, element_index: usize) -> Option<usize> {
        self.element_contour_indices().get(element_index).copied()?
    }

    fn element_contour_indices(&self) -> Vec<Option<usize>> {
        let mut result = Vec::with_capacity(self.elements.len());
        let mut current = None;
        let mut closed = false;
        let mut count = 0usize;
        for el in &self.elements {
            match el {
                PathEl::MoveTo(_) => {
                    current = Some(count);
                    count += 1;
                    closed = false;
                }
                PathEl::ClosePath => closed = true,
                _ => {
                    if current.is_none() || closed {
                        current = Some(count);
                        count += 1;
                        closed = false;
                    }
                }
            }
            result.push(current);
        }
        result
    }

    /// Each contour as its own single-contour path, in order.
    pub fn contour_paths(&self) -> Vec<Path> {
        self.contours.iter().map(Path::from_contour).collect()
    }

    /// A path holding only the open contours.
    pub fn open_contours(&self) -> Path {
        let open: Vec<Contour> = self
            .contours
            .iter()
            .filter(|c| !c.is_closed())
            .cloned()
            .collect();
        Path::from_contours(&open)
    }

    /// A path holding only the closed contours.
    pub fn closed_contours(&self) -> Path {
        let closed: Vec<Contour> = self
            .contours
            .iter()
            .filter(|c| c.is_closed())
            .cloned()
            .collect();
        Path::from_contours(&closed)
    }

    // ---- Construction state machine --------------------------------------

    /// The current point: the end point of the last element.
    ///
    /// After a `ClosePath` this is the closed contour's start point; an
    /// empty path's current point is the origin.
    pub fn current_point(&self) -> Point {
        match self.elements.last() {
            None => Point::ORIGIN,
            Some(PathEl::MoveTo(p)) | Some(PathEl::LineTo(p)) => *p,
            Some(PathEl::QuadTo(_, p)) => *p,
            Some(PathEl::CurveTo(_, _, p)) => *p,
            Some(PathEl::ClosePath) => {
                // The most recent move, or the origin when the contour
                // was opened implicitly.
                self.elements
                    .iter()
                    .rev()
                    .find_map(|el| match el {
                        PathEl::MoveTo(p) => Some(*p),
                        _ => None,
                    })
                    .unwrap_or(Point::ORIGIN)
            }
        }
    }

    /// The contour under construction, if any.
    pub fn current_contour(&self) -> Option<&Contour> {
        self.contours.last()
    }

    /// Start a new contour at an absolute point.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Append a line from the current point.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Append a quadratic segment from the current point.
    pub fn quad_to(&mut self, c: impl Into<Point>, p: impl Into<Point>) {
        self.push(PathEl::QuadTo(c.into(), p.into()));
    }

    /// Append a cubic segment from the current point.
    pub fn curve_to(
        &mut self,
        c0: impl Into<Point>,
        c1: impl Into<Point>,
        p: impl Into<Point>,
    ) {
        self.push(PathEl::CurveTo(c0.into(), c1.into(), p.into()));
    }

    /// Close the active contour and reset the current point to its start.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Append a generic element, updating contours, polylines and bounds.
    pub fn push(&mut self, el: PathEl) {
        let current = self.current_point();
        self.elements.push(el);

        // Keep the derived contours in step.
        match el {
            PathEl::MoveTo(p) => self.contours.push(Contour::new(p)),
            PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
                if self.contours.last().map_or(true, Contour::is_closed) {
                    // No contour is active; open one at the current point.
                    self.contours.push(Contour::new(current));
                }
                let contour = self.contours.last_mut().unwrap();
                match el {
                    PathEl::LineTo(p) => contour.add_linear(p),
                    PathEl::QuadTo(c, p) => contour.add_quadratic(c, p),
                    PathEl::CurveTo(c0, c1, p) => contour.add_cubic(c0, c1, p),
                    _ => unreachable!(),
                }
            }
            PathEl::ClosePath => {
                if let Some(contour) = self.contours.last_mut() {
                    contour.close();
                }
            }
        }

        // Flatten the element.
        let mut polyline = Vec::new();
        match el {
            PathEl::MoveTo(_) => {}
            PathEl::LineTo(p) => add_line_to_polyline(current, p, &mut polyline),
            PathEl::QuadTo(c, p) => {
                flatten_quadratic(current, c, p, FLATNESS_NORMAL, 0, &mut polyline);
            }
            PathEl::CurveTo(c0, c1, p) => {
                flatten_cubic(current, c0, c1, p, FLATNESS_NORMAL, 0, &mut polyline);
            }
            PathEl::ClosePath => {
                add_line_to_polyline(current, self.current_point(), &mut polyline);
            }
        }
        self.polylines.push(polyline);

        // Grow the bounds.
        if self.elements.len() == 1 {
            if let PathEl::MoveTo(p) = el {
                self.bounds = Rect::from_points(p, p);
                return;
            }
        }
        let polyline = self.polylines.last().unwrap();
        for point in polyline {
            self.bounds = self.bounds.union_pt(*point);
        }
    }

    /// Remove the most recently appended element, exactly reversing its
    /// state transition.
    ///
    /// Returns the removed element, or `None` for an empty path.
    pub fn remove_last_element(&mut self) -> Option<PathEl> {
        let el = self.elements.pop()?;
        match el {
            PathEl::MoveTo(_) => {
                self.contours.pop();
            }
            PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
                if let Some(contour) = self.contours.last_mut() {
                    contour.remove_last_component();
                    if contour.curve_count() == 0 {
                        // The contour was opened implicitly by this
                        // element; a move-started contour stays.
                        match self.elements.last() {
                            None | Some(PathEl::ClosePath) => {
                                self.contours.pop();
                            }
                            _ => {}
                        }
                    }
                }
            }
            PathEl::ClosePath => {
                // Reopen, unless an earlier close already closed this
                // contour (adjacent closes share one).
                if !matches!(self.elements.last(), Some(PathEl::ClosePath)) {
                    if let Some(contour) = self.contours.last_mut() {
                        contour.set_closed(false);
                    }
                }
            }
        }
        self.polylines.pop();

        // Shrink the bounds back over the remaining polylines.
        if self.elements.is_empty() {
            self.bounds = Rect::ZERO;
        } else {
            let p = self.current_point();
            let mut bounds = Rect::from_points(p, p);
            for polyline in &self.polylines {
                for point in polyline {
                    bounds = bounds.union_pt(*point);
                }
            }
            self.bounds = bounds;
        }
        Some(el)
    }

    // ---- Whole-path parameter operations ---------------------------------

    /// The index of the contour owning global parameter `t`.
    ///
    /// Parameter space divides evenly across contours by count.
    pub fn contour_index_containing(&self, t: f64) -> usize {
        let n = self.contours.len();
        if n == 0 {
            return 0;
        }
        ((t * n as f64).floor() as usize).min(n - 1)
    }

    /// The contour-local parameter for path-global `t`.
    pub fn contour_parameter(&self, t: f64) -> f64 {
        let n = self.contours.len();
        if n == 0 {
            return 0.0;
        }
        let index = self.contour_index_containing(t);
        (t * n as f64 - index as f64).clamp(0.0, 1.0)
    }

    /// The path-global parameter for a contour-local parameter.
    pub fn parameter_for_contour_parameter(&self, index: usize, t: f64) -> f64 {
        let n = self.contours.len();
        if n == 0 {
            return 0.0;
        }
        ((index as f64 + t) / n as f64).clamp(0.0, 1.0)
    }

    /// The path's value at global parameter `t`.
    pub fn value(&self, t: f64) -> Point {
        match self.contours.get(self.contour_index_containing(t)) {
            Some(contour) => contour.value(self.contour_parameter(t)),
            None => Point::ORIGIN,
        }
    }

    /// The tangent vector at global parameter `t`.
    pub fn tangent(&self, t: f64) -> Vec2 {
        match self.contours.get(self.contour_index_containing(t)) {
            Some(contour) => contour.tangent(self.contour_parameter(t)),
            None => Vec2::ZERO,
        }
    }

    /// The normal vector at global parameter `t`.
    pub fn normal(&self, t: f64) -> Vec2 {
        match self.contours.get(self.contour_index_containing(t)) {
            Some(contour) => contour.normal(self.contour_parameter(t)),
            None => Vec2::ZERO,
        }
    }

    /// The signed curvature at global parameter `t`.
    pub fn curvature(&self, t: f64) -> f64 {
        match self.contours.get(self.contour_index_containing(t)) {
            Some(contour) => contour.curvature(self.contour_parameter(t)),
            None => 0.0,
        }
    }

    /// The global parameter at arc length `d` from the path start.
    pub fn parameter_at_length(&self, d: f64, accuracy: f64) -> f64 {
        if self.contours.is_empty() || d <= 0.0 {
            return 0.0;
        }
        let mut length = 0.0;
        for (index, contour) in self.contours.iter().enumerate() {
            let contour_length = contour.length(accuracy);
            if length + contour_length > d {
                let ct = contour.parameter_at_length(d - length, accuracy);
                return self.parameter_for_contour_parameter(index, ct);
            }
            length += contour_length;
        }
        1.0
    }

    /// The global parameter of the point on the path nearest `p`.
    pub fn nearest_parameter(&self, p: Point, accuracy: f64) -> f64 {
        let mut nearest_distance = f64::INFINITY;
        let mut nearest_parameter = 0.0;
        for (index, contour) in self.contours.iter().enumerate() {
            let ct = contour.nearest_parameter(p, accuracy);
            let distance = contour.value(ct).distance(p);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_parameter = self.parameter_for_contour_parameter(index, ct);
            }
        }
        nearest_parameter
    }

    /// The distance from `p` to the nearest point on the path.
    pub fn distance_from(&self, p: Point, accuracy: f64) -> f64 {
        let t = self.nearest_parameter(p, accuracy);
        self.value(t).distance(p)
    }

    // ---- Containment and intersection ------------------------------------

    /// Is `p` inside the path, by the even-odd rule?
    ///
    /// Containment is approximate: it is evaluated against the flattened
    /// polylines of the closed contours. Open contours never contribute.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_with_rule(p, FillRule::EvenOdd)
    }

    /// Is `p` inside the path, by the chosen fill rule?
    pub fn contains_with_rule(&self, p: Point, rule: FillRule) -> bool {
        let contour_indices = self.element_contour_indices();
        let mut crossings = 0i32;
        let mut winding = 0i32;
        for (index, polyline) in self.polylines.iter().enumerate() {
            let closed = contour_indices[index]
                .map(|ci| self.contours[ci].is_closed())
                .unwrap_or(false);
            if !closed || polyline.len() < 2 {
                continue;
            }
            for pair in polyline.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                // Crossing of the horizontal ray from p towards +x.
                let upward = a.y <= p.y && p.y < b.y;
                let downward = b.y <= p.y && p.y < a.y;
                if !upward && !downward {
                    continue;
                }
                let cross = (b - a).cross(p - a);
                if upward && cross > 0.0 {
                    crossings += 1;
                    winding += 1;
                } else if downward && cross < 0.0 {
                    crossings += 1;
                    winding -= 1;
                }
            }
        }
        match rule {
            FillRule::EvenOdd => crossings % 2 == 1,
            FillRule::NonZero => winding != 0,
        }
    }

    /// Does this path intersect another?
    pub fn intersects(&self, other: &Path) -> bool {
        for contour in &self.contours {
            for other_contour in &other.contours {
                if !contour.intersections(other_contour).is_empty() {
                    return true;
                }
            }
        }
        false
    }

    /// Find all intersections between this path and another.
    ///
    /// Every pair of contours is intersected; contour-global parameters
    /// are remapped to the two paths' global parameters.
    pub fn intersections(&self, other: &Path) -> Vec<PathIntersection> {
        let mut result = Vec::new();
        for (contour_index, contour) in self.contours.iter().enumerate() {
            for (other_index, other_contour) in other.contours.iter().enumerate() {
                for hit in contour.intersections(other_contour) {
                    result.push(PathIntersection {
                        contour: contour_index,
                        other_contour: other_index,
                        t: self.parameter_for_contour_parameter(contour_index, hit.t),
                        u: other.parameter_for_contour_parameter(other_index, hit.u),
                    });
                }
            }
        }
        result
    }
}

fn add_line_to_polyline(p0: Point, p1: Point, polyline: &mut Vec<Point>) {
    if polyline.is_empty() {
        polyline.push(p0);
    }
    polyline.push(p1);
}

/// Recursion bound for flattening; the flatness test terminates far
/// earlier for reasonable geometry.
const MAX_FLATTEN_DEPTH: usize = 16;

fn flatten_quadratic(
    p0: Point,
    c: Point,
    p1: Point,
    flatness: f64,
    depth: usize,
    polyline: &mut Vec<Point>,
) {
    let leg0 = p0.distance(c);
    let leg1 = c.distance(p1);
    let chord = p0.distance(p1);
    if leg0 + leg1 + chord <= f64::EPSILON {
        return;
    }
    let ratio = (leg0 + leg1) / chord;
    if ratio < flatness || depth >= MAX_FLATTEN_DEPTH {
        add_line_to_polyline(p0, p1, polyline);
        return;
    }
    let q0 = p0.midpoint(c);
    let q1 = c.midpoint(p1);
    let mid = q0.midpoint(q1);
    flatten_quadratic(p0, q0, mid, flatness, depth + 1, polyline);
    flatten_quadratic(mid, q1, p1, flatness, depth + 1, polyline);
}

#[allow(clippy::too_many_arguments)]
fn flatten_cubic(
    p0: Point,
    c0: Point,
    c1: Point,
    p1: Point,
    flatness: f64,
    depth: usize,
    polyline: &mut Vec<Point>,
) {
    let leg0 = p0.distance(c0);
    let leg1 = c0.distance(c1);
    let leg2 = c1.distance(p1);
    let chord = p0.distance(p1);
    if leg0 + leg1 + leg2 + chord <= f64::EPSILON {
        return;
    }
    let ratio = (leg0 + leg1 + leg2) / chord;
    if ratio < flatness || depth >= MAX_FLATTEN_DEPTH {
        add_line_to_polyline(p0, p1, polyline);
        return;
    }
    let q0 = p0.midpoint(c0);
    let qc = c0.midpoint(c1);
    let q1 = c1.midpoint(p1);
    let r0 = q0.midpoint(qc);
    let r1 = qc.midpoint(q1);
    let mid = r0.midpoint(r1);
    flatten_cubic(p0, q0, r0, mid, flatness, depth + 1, polyline);
    flatten_cubic(mid, r1, q1, p1, flatness, depth + 1, polyline);
}

impl PartialEq for Path {
    fn eq(&self, other: &Path) -> bool {
        self.elements == other.elements
    }
}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn hash_point<H: Hasher>(p: &Point, state: &mut H) {
            p.x.to_bits().hash(state);
            p.y.to_bits().hash(state);
        }
        for el in &self.elements {
            std::mem::discriminant(el).hash(state);
            match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => hash_point(p, state),
                PathEl::QuadTo(c, p) => {
                    hash_point(c, state);
                    hash_point(p, state);
                }
                PathEl::CurveTo(c0, c1, p) => {
                    hash_point(c0, state);
                    hash_point(c1, state);
                    hash_point(p, state);
                }
                PathEl::ClosePath => {}
            }
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = PathEl;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().cloned()
    }
}

impl FromIterator<PathEl> for Path {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Path {
        Path::from_elements(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Path {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.line_to((10., 10.));
        path.line_to((0., 10.));
        path.close_path();
        path
    }

    #[test]
    fn state_machine_basics() {
        let mut path = Path::new();
        assert_eq!(path.current_point(), Point::ORIGIN);
        path.move_to((1., 2.));
        assert_eq!(path.current_point(), Point::new(1., 2.));
        path.line_to((5., 2.));
        assert_eq!(path.current_point(), Point::new(5., 2.));
        path.quad_to((6., 4.), (7., 2.));
        assert_eq!(path.current_point(), Point::new(7., 2.));
        path.curve_to((8., 0.), (9., 4.), (10., 2.));
        assert_eq!(path.current_point(), Point::new(10., 2.));
        path.close_path();
        // Closing resets the current point to the contour start.
        assert_eq!(path.current_point(), Point::new(1., 2.));
        assert_eq!(path.element_count(), 5);
        assert_eq!(path.contour_count(), 1);
        assert!(path.contour_is_closed(0));
        assert_eq!(path.contour_curve_count(0), 3);
    }

    #[test]
    fn add_without_move_opens_contour_at_origin() {
        let mut path = Path::new();
        path.line_to((3., 4.));
        assert_eq!(path.contour_count(), 1);
        assert_eq!(path.contour_at(0).start_point(), Point::ORIGIN);
        assert_eq!(path.current_point(), Point::new(3., 4.));
    }

    #[test]
    fn add_after_close_opens_new_contour() {
        let mut path = unit_square();
        path.line_to((20., 20.));
        assert_eq!(path.contour_count(), 2);
        // The new contour starts at the closed contour's start point.
        assert_eq!(path.contour_at(1).start_point(), Point::new(0., 0.));
    }

    #[test]
    fn remove_reverses_append() {
        let mut path = Path::new();
        path.move_to((1., 1.));
        path.line_to((5., 1.));
        let snapshot_elements = path.elements().to_vec();
        let snapshot_bounds = path.bounds();
        let snapshot_point = path.current_point();

        path.quad_to((7., 5.), (9., 1.));
        path.remove_last_element();
        assert_eq!(path.elements(), snapshot_elements.as_slice());
        assert_eq!(path.bounds(), snapshot_bounds);
        assert_eq!(path.current_point(), snapshot_point);
        assert_eq!(path.contour_curve_count(0), 1);
    }

    #[test]
    fn remove_close_reopens_contour() {
        let mut path = unit_square();
        assert!(path.contour_is_closed(0));
        path.remove_last_element();
        assert!(!path.contour_is_closed(0));
        assert_eq!(path.current_point(), Point::new(0., 10.));
    }

    #[test]
    fn remove_move_drops_contour() {
        let mut path = unit_square();
        path.move_to((50., 50.));
        assert_eq!(path.contour_count(), 2);
        path.remove_last_element();
        assert_eq!(path.contour_count(), 1);
    }

    #[test]
    fn remove_implicit_contour() {
        let mut path = Path::new();
        path.line_to((3., 4.));
        path.remove_last_element();
        assert_eq!(path.contour_count(), 0);
        assert!(path.is_empty());
        assert_eq!(path.bounds(), Rect::ZERO);
    }

    #[test]
    fn remove_everything_restores_empty_state() {
        let mut path = unit_square();
        while path.remove_last_element().is_some() {}
        assert!(path.is_empty());
        assert_eq!(path.contour_count(), 0);
        assert_eq!(path.polyline_count(), 0);
        assert_eq!(path.current_point(), Point::ORIGIN);
    }

    #[test]
    fn polylines_follow_elements() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.quad_to((15., 10.), (20., 0.));
        assert_eq!(path.polyline_count(), 3);
        // A move contributes no polyline points.
        assert_eq!(path.polyline_point_count(0), 0);
        assert_eq!(path.polyline_at(1), &[Point::new(0., 0.), Point::new(10., 0.)]);
        // The flattened quadratic starts and ends at the segment ends.
        let n = path.polyline_point_count(2);
        assert!(n > 2, "curve should flatten into multiple segments");
        assert_eq!(path.polyline_point_at(2, 0), Point::new(10., 0.));
        assert_eq!(path.polyline_point_at(2, n - 1), Point::new(20., 0.));
        // Flattened points stay near the curve.
        let curve = path.curve_at(0, 1);
        for i in 0..n {
            let p = path.polyline_point_at(2, i);
            let d = curve.distance_from(p, 1e-6);
            assert!(d < 0.5, "flattened point {:?} strays {} from curve", p, d);
        }
    }

    #[test]
    fn close_element_polyline_closes_contour() {
        let path = unit_square();
        assert_eq!(
            path.polyline_at(4),
            &[Point::new(0., 10.), Point::new(0., 0.)]
        );
    }

    #[test]
    fn bounds_track_geometry() {
        let mut path = Path::new();
        path.move_to((5., 5.));
        assert_eq!(path.bounds(), Rect::new(5., 5., 5., 5.));
        path.line_to((10., 0.));
        assert_eq!(path.bounds(), Rect::new(5., 0., 10., 5.));
    }

    #[test]
    fn containment_even_odd() {
        let path = unit_square();
        assert!(path.contains(Point::new(5., 5.)));
        assert!(!path.contains(Point::new(15., 5.)));
        assert!(!path.contains(Point::new(-1., 5.)));
    }

    #[test]
    fn containment_rules_differ_on_nested_same_winding() {
        // Outer and inner squares wound the same direction: even-odd
        // makes the inner square a hole, non-zero fills it.
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.line_to((10., 10.));
        path.line_to((0., 10.));
        path.close_path();
        path.move_to((2., 2.));
        path.line_to((8., 2.));
        path.line_to((8., 8.));
        path.line_to((2., 8.));
        path.close_path();

        let inner = Point::new(5., 5.);
        let ring = Point::new(1., 5.);
        assert!(!path.contains_with_rule(inner, FillRule::EvenOdd));
        assert!(path.contains_with_rule(inner, FillRule::NonZero));
        assert!(path.contains_with_rule(ring, FillRule::EvenOdd));
        assert!(path.contains_with_rule(ring, FillRule::NonZero));
    }

    #[test]
    fn open_contours_never_contain() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.line_to((10., 10.));
        path.line_to((0., 10.));
        // Not closed.
        assert!(!path.contains(Point::new(5., 5.)));
    }

    #[test]
    fn path_value_spans_contours() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.move_to((0., 10.));
        path.line_to((10., 10.));
        // First half of parameter space belongs to the first contour.
        assert_eq!(path.value(0.25), Point::new(5., 0.));
        assert_eq!(path.value(0.75), Point::new(5., 10.));
        assert_eq!(path.contour_index_containing(0.25), 0);
        assert_eq!(path.contour_index_containing(0.75), 1);
    }

    #[test]
    fn path_intersections_remap() {
        let mut a = Path::new();
        a.move_to((0., 5.));
        a.line_to((10., 5.));
        let mut b = Path::new();
        b.move_to((5., 0.));
        b.line_to((5., 10.));
        let hits = a.intersections(&b);
        assert_eq!(hits.len(), 1);
        let hit = hits[0];
        assert_eq!(hit.contour, 0);
        assert_eq!(hit.other_contour, 0);
        assert!(a.value(hit.t).distance(Point::new(5., 5.)) < 1e-9);
        assert!(b.value(hit.u).distance(Point::new(5., 5.)) < 1e-9);
        assert!(a.intersects(&b));
    }

    #[test]
    fn transforms() {
        let path = unit_square();
        let moved = path.translated(5., 5.);
        assert_eq!(moved.bounds(), Rect::new(5., 5., 15., 15.));
        let scaled = path.scaled(2., 0.5);
        assert_eq!(scaled.bounds(), Rect::new(0., 0., 20., 5.));
        let rotated = path.rotated(std::f64::consts::PI);
        assert!(rotated.bounds().is_near(Rect::new(-10., -10., 0., 0.), 1e-9));
    }

    #[test]
    fn contour_selection() {
        let mut path = unit_square();
        path.move_to((20., 20.));
        path.line_to((30., 20.));
        assert_eq!(path.contour_count(), 2);
        let closed = path.closed_contours();
        assert_eq!(closed.contour_count(), 1);
        assert!(closed.contour_is_closed(0));
        let open = path.open_contours();
        assert_eq!(open.contour_count(), 1);
        assert!(!open.contour_is_closed(0));
        assert_eq!(path.contour_paths().len(), 2);
    }

    #[test]
    fn element_contour_correspondence() {
        let mut path = unit_square();
        path.move_to((20., 20.));
        path.line_to((30., 20.));
        assert_eq!(path.contour_index_containing_element(0), Some(0));
        assert_eq!(path.contour_index_containing_element(4), Some(0));
        assert_eq!(path.contour_index_containing_element(5), Some(1));
        assert_eq!(path.contour_index_containing_element(6), Some(1));
    }

    #[test]
    fn parameter_at_length_spans_contours() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.move_to((0., 10.));
        path.line_to((10., 10.));
        // 15 units in: 10 along the first contour, 5 into the second.
        let t = path.parameter_at_length(15.0, 1e-9);
        assert!(path.value(t).distance(Point::new(5., 10.)) < 1e-6);
    }

    #[test]
    fn nearest_across_contours() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.move_to((0., 10.));
        path.line_to((10., 10.));
        let t = path.nearest_parameter(Point::new(5., 9.), 1e-9);
        assert!(path.value(t).distance(Point::new(5., 10.)) < 1e-9);
        assert!((path.distance_from(Point::new(5., 9.), 1e-9) - 1.0).abs() < 1e-9);
    }
}
