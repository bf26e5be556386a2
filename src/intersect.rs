// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve-curve intersection.
//!
//! Pairings involving a line are solved in closed form by aligning the
//! line to the x-axis and finding the roots of the other curve's aligned
//! y component. Curve-curve pairings are found by recursive bounding-box
//! clipping: split both curves, discard sub-curve pairs whose boxes do
//! not overlap, and recurse until the surviving parameter span is small
//! enough to call its midpoint an intersection.

use smallvec::SmallVec;

use crate::common::{solve_cubic, solve_quadratic};
use crate::{Curve, CubicBez, Line, ParamCurve, Point, QuadBez};

/// Parameter span below which a surviving sub-curve pair is reported as
/// an intersection.
const PARAM_TOLERANCE: f64 = 1e-3;

/// De-duplication radius for reported parameter pairs. Several adjacent
/// leaf cells can survive the clip around one crossing; anything this
/// close to an accepted result in both parameters is the same
/// intersection.
const DEDUP_TOLERANCE: f64 = 5e-3;

/// Backstop on clip recursion; the span threshold terminates the search
/// an order of magnitude earlier in the normal case.
const MAX_DEPTH: usize = 32;

/// Intersection parameter pairs for two curves.
pub(crate) fn curve_curve(p: &Curve, q: &Curve) -> SmallVec<[(f64, f64); 9]> {
    match (p, q) {
        (Curve::Linear(pl), Curve::Linear(ql)) => {
            let mut result = SmallVec::new();
            if let Some(hit) = line_line(pl, ql) {
                result.push(hit);
            }
            result
        }
        (Curve::Linear(pl), Curve::Quadratic(qq)) => line_quad(pl, qq, false),
        (Curve::Quadratic(pq), Curve::Linear(ql)) => line_quad(ql, pq, true),
        (Curve::Linear(pl), Curve::Cubic(qc)) => line_cubic(pl, qc, false),
        (Curve::Cubic(pc), Curve::Linear(ql)) => line_cubic(ql, pc, true),
        _ => {
            let mut result = SmallVec::new();
            let cap = degree(p) * degree(q);
            clip(p, 0.0, 1.0, q, 0.0, 1.0, cap, MAX_DEPTH, &mut result);
            result
        }
    }
}

fn degree(curve: &Curve) -> usize {
    match curve {
        Curve::Linear(_) => 1,
        Curve::Quadratic(_) => 2,
        Curve::Cubic(_) => 3,
    }
}

/// Intersection of two line segments, if any.
fn line_line(p: &Line, q: &Line) -> Option<(f64, f64)> {
    let d = (p.p0.x - p.p1.x) * (q.p0.y - q.p1.y) - (p.p0.y - p.p1.y) * (q.p0.x - q.p1.x);
    if d == 0.0 {
        return None;
    }
    let t =
        ((p.p0.x - q.p0.x) * (q.p0.y - q.p1.y) - (p.p0.y - q.p0.y) * (q.p0.x - q.p1.x)) / d;
    let u =
        -((p.p0.x - p.p1.x) * (p.p0.y - q.p0.y) - (p.p0.y - p.p1.y) * (p.p0.x - q.p0.x)) / d;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some((t, u))
}

/// Translate and rotate `p` so the line from `origin` along `angle` maps
/// onto the positive x-axis.
fn align(p: Point, origin: Point, angle: f64) -> Point {
    (p - origin).rotated(angle).to_point()
}

/// Validate a root of the aligned curve and convert it to a parameter
/// pair, ordering the line parameter first unless `swap` is set.
fn push_aligned_root(
    out: &mut SmallVec<[(f64, f64); 9]>,
    root: f64,
    aligned: &Curve,
    line_len: f64,
    swap: bool,
) {
    if !(0.0..=1.0).contains(&root) {
        return;
    }
    let hit = aligned.eval(root);
    let t = hit.x / line_len;
    if !(0.0..=1.0).contains(&t) {
        return;
    }
    out.push(if swap { (root, t) } else { (t, root) });
}

fn line_quad(line: &Line, q: &QuadBez, swap: bool) -> SmallVec<[(f64, f64); 9]> {
    let mut result = SmallVec::new();
    let angle = -(line.p1 - line.p0).atan2();
    let line_len = align(line.p1, line.p0, angle).x;
    let a0 = align(q.p0, line.p0, angle);
    let ac = align(q.p1, line.p0, angle);
    let a1 = align(q.p2, line.p0, angle);
    let aligned = Curve::quadratic(a0, ac, a1);

    // Zero crossings of the aligned quadratic's y component.
    let c2 = a0.y - 2.0 * ac.y + a1.y;
    let c1 = -2.0 * a0.y + 2.0 * ac.y;
    let c0 = a0.y;
    for root in solve_quadratic(c0, c1, c2) {
        push_aligned_root(&mut result, root, &aligned, line_len, swap);
    }
    result
}

fn line_cubic(line: &Line, c: &CubicBez, swap: bool) -> SmallVec<[(f64, f64); 9]> {
    let mut result = SmallVec::new();
    let angle = -(line.p1 - line.p0).atan2();
    let line_len = align(line.p1, line.p0, angle).x;
    let a0 = align(c.p0, line.p0, angle);
    let ac0 = align(c.p1, line.p0, angle);
    let ac1 = align(c.p2, line.p0, angle);
    let a1 = align(c.p3, line.p0, angle);
    let aligned = Curve::cubic(a0, ac0, ac1, a1);

    // Zero crossings of the aligned cubic's y component, in power basis.
    let c3 = -a0.y + 3.0 * ac0.y - 3.0 * ac1.y + a1.y;
    let c2 = 3.0 * a0.y - 6.0 * ac0.y + 3.0 * ac1.y;
    let c1 = -3.0 * a0.y + 3.0 * ac0.y;
    let c0 = a0.y;
    for root in solve_cubic(c0, c1, c2, c3) {
        push_aligned_root(&mut result, root, &aligned, line_len, swap);
    }
    result
}

/// Recursive bounding-box clip over the parameter rectangle
/// [pts, pte] × [qts, qte].
#[allow(clippy::too_many_arguments)]
fn clip(
    p: &Curve,
    pts: f64,
    pte: f64,
    q: &Curve,
    qts: f64,
    qte: f64,
    cap: usize,
    depth: usize,
    out: &mut SmallVec<[(f64, f64); 9]>,
) {
    if out.len() >= cap {
        return;
    }
    if !p.bounds().overlaps(q.bounds()) {
        return;
    }

    let pt = 0.5 * (pts + pte);
    let qt = 0.5 * (qts + qte);
    let span = (pte - pts).min(qte - qts);
    if span < PARAM_TOLERANCE || depth == 0 {
        // Neighboring surviving boxes round to the same intersection;
        // keep only the first within tolerance.
        let duplicate = out
            .iter()
            .any(|&(t, u)| (pt - t).abs() <= DEDUP_TOLERANCE && (qt - u).abs() <= DEDUP_TOLERANCE);
        if !duplicate {
            out.push((pt, qt));
        }
        return;
    }

    let (ps, pe) = p.split(0.5);
    let (qs, qe) = q.split(0.5);
    clip(&ps, pts, pt, &qs, qts, qt, cap, depth - 1, out);
    clip(&ps, pts, pt, &qe, qt, qte, cap, depth - 1, out);
    clip(&pe, pt, pte, &qs, qts, qt, cap, depth - 1, out);
    clip(&pe, pt, pte, &qe, qt, qte, cap, depth - 1, out);
}
