// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Approximate path set operations.
//!
//! These are sampling-based, not exact polygon boolean algebra: each
//! path's closed contours are taken as their flattened polylines, every
//! boundary segment is classified by testing its midpoint for
//! containment in the other path, and the segments the operation keeps
//! are stitched back into polyline contours. The result traces the
//! combined boundary to flattening accuracy; it is best-effort by
//! design.

use crate::{Path, Point};

/// A boolean combination of two filled paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOperation {
    /// Points inside either path.
    Union,
    /// Points inside both paths.
    Intersection,
    /// Points inside the first path but not the second.
    Difference,
    /// Points inside exactly one of the paths.
    ExclusiveOr,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Keep {
    Inside,
    Outside,
    All,
}

impl Path {
    /// Combine this path with another, approximately.
    ///
    /// The result's contours trace the flattened boundary fragments that
    /// bound the combined region: for a union, the parts of each
    /// boundary outside the other path; for an intersection, the parts
    /// inside; for a difference, this path's boundary outside the other
    /// plus the other's boundary inside this; for an exclusive-or, both
    /// boundaries in full. Open contours never participate.
    pub fn combined(&self, other: &Path, operation: PathOperation) -> Path {
        let (keep_self, keep_other) = match operation {
            PathOperation::Union => (Keep::Outside, Keep::Outside),
            PathOperation::Intersection => (Keep::Inside, Keep::Inside),
            PathOperation::Difference => (Keep::Outside, Keep::Inside),
            PathOperation::ExclusiveOr => (Keep::All, Keep::All),
        };
        let mut result = Path::new();
        append_boundary_runs(&mut result, self, other, keep_self);
        append_boundary_runs(&mut result, other, self, keep_other);
        result
    }

    /// The flattened boundary of one closed contour, as a point list.
    fn contour_boundary(&self, contour_index: usize) -> Vec<Point> {
        let mut boundary: Vec<Point> = Vec::new();
        for (element_index, polyline) in (0..self.polyline_count())
            .map(|i| (i, self.polyline_at(i)))
        {
            if self.contour_index_containing_element(element_index) != Some(contour_index) {
                continue;
            }
            for (i, point) in polyline.iter().enumerate() {
                // Consecutive element polylines share their joint point.
                if i == 0 && boundary.last() == Some(point) {
                    continue;
                }
                boundary.push(*point);
            }
        }
        boundary
    }
}

/// Classify `source`'s closed-contour boundary segments against `clip`
/// and append the kept runs to `result` as polyline contours.
///
/// Long boundary segments are subdivided to a sampling step derived
/// from the combined extent, so classification changes mid-edge are
/// caught to that resolution.
fn append_boundary_runs(result: &mut Path, source: &Path, clip: &Path, keep: Keep) {
    let extent = source.bounds().union(clip.bounds());
    let step = (extent.width().hypot(extent.height()) / 128.0).max(f64::EPSILON);
    for contour_index in 0..source.contour_count() {
        if !source.contour_is_closed(contour_index) {
            continue;
        }
        let boundary = source.contour_boundary(contour_index);
        if boundary.len() < 2 {
            continue;
        }

        let mut run: Vec<Point> = Vec::new();
        let mut kept_all = true;
        for pair in boundary.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let pieces = (a.distance(b) / step).ceil().max(1.0) as usize;
            for k in 0..pieces {
                let sub_a = a.lerp(b, k as f64 / pieces as f64);
                let sub_b = a.lerp(b, (k + 1) as f64 / pieces as f64);
                let inside = clip.contains(sub_a.midpoint(sub_b));
                let kept = match keep {
                    Keep::Inside => inside,
                    Keep::Outside => !inside,
                    Keep::All => true,
                };
                if kept {
                    if run.is_empty() {
                        run.push(sub_a);
                    }
                    run.push(sub_b);
                } else {
                    kept_all = false;
                    flush_run(result, &mut run, false);
                }
            }
        }
        // A fully-kept boundary is the original closed contour.
        flush_run(result, &mut run, kept_all);
    }
}

fn flush_run(result: &mut Path, run: &mut Vec<Point>, closed: bool) {
    if run.len() < 2 {
        run.clear();
        return;
    }
    result.move_to(run[0]);
    // The boundary of a closed contour already repeats its start point.
    let end = if closed && run.first() == run.last() {
        run.len() - 1
    } else {
        run.len()
    };
    for point in &run[1..end] {
        result.line_to(*point);
    }
    if closed {
        result.close_path();
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Path {
        let mut path = Path::new();
        path.move_to((x0, y0));
        path.line_to((x0 + size, y0));
        path.line_to((x0 + size, y0 + size));
        path.line_to((x0, y0 + size));
        path.close_path();
        path
    }

    #[test]
    fn disjoint_union_keeps_both() {
        let a = square(0., 0., 10.);
        let b = square(20., 0., 10.);
        let union = a.combined(&b, PathOperation::Union);
        assert_eq!(union.contour_count(), 2);
        assert!(union.contour_is_closed(0));
        assert!(union.contour_is_closed(1));
        assert!(union.contains(Point::new(5., 5.)));
        assert!(union.contains(Point::new(25., 5.)));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = square(0., 0., 10.);
        let b = square(20., 0., 10.);
        let intersection = a.combined(&b, PathOperation::Intersection);
        assert!(intersection.is_empty());
    }

    #[test]
    fn union_boundary_stays_outside() {
        let a = square(0., 0., 10.);
        let b = square(5., 5., 10.);
        let union = a.combined(&b, PathOperation::Union);
        assert!(!union.is_empty());
        // No kept segment midpoint lies strictly inside the other path.
        for index in 0..union.polyline_count() {
            let polyline = union.polyline_at(index);
            for pair in polyline.windows(2) {
                let mid = pair[0].midpoint(pair[1]);
                assert!(
                    !(a.contains(mid) && b.contains(mid)),
                    "union boundary point {:?} is interior",
                    mid
                );
            }
        }
    }

    #[test]
    fn intersection_boundary_stays_inside() {
        let a = square(0., 0., 10.);
        let b = square(5., 5., 10.);
        let intersection = a.combined(&b, PathOperation::Intersection);
        assert!(!intersection.is_empty());
        for index in 0..intersection.polyline_count() {
            let polyline = intersection.polyline_at(index);
            for pair in polyline.windows(2) {
                let mid = pair[0].midpoint(pair[1]);
                assert!(a.contains(mid) || b.contains(mid));
            }
        }
    }

    #[test]
    fn difference_keeps_far_edge() {
        let a = square(0., 0., 10.);
        let b = square(5., 5., 10.);
        let difference = a.combined(&b, PathOperation::Difference);
        // A's bottom-left corner survives, B's overlapped corner region
        // contributes the cut boundary.
        let boundary_points: Vec<Point> = (0..difference.polyline_count())
            .flat_map(|i| difference.polyline_at(i).to_vec())
            .collect();
        assert!(boundary_points.contains(&Point::new(0., 0.)));
        assert!(boundary_points.contains(&Point::new(5., 5.)));
        assert!(!boundary_points.contains(&Point::new(15., 15.)));
    }

    #[test]
    fn exclusive_or_keeps_both_boundaries() {
        let a = square(0., 0., 10.);
        let b = square(5., 5., 10.);
        let xor = a.combined(&b, PathOperation::ExclusiveOr);
        assert_eq!(xor.contour_count(), 2);
        assert!(xor.contour_is_closed(0));
        assert!(xor.contour_is_closed(1));
    }
}
