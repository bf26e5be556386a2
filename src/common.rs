// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations.

use arrayvec::ArrayVec;

/// Find real roots of a quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// When the equation is nearly linear, the quadratic term is ignored and
/// the linear root is returned. In the fully degenerate case where all
/// coefficients are zero, every x is a solution and a single `0.0` is
/// returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 / c2;
    let sc1 = c1 / c2;
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or tiny, treat as the linear equation c0 + c1 x = 0.
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            result.push(0.0);
        }
        return result;
    }
    let discriminant = sc1 * sc1 - 4.0 * sc0;
    if !discriminant.is_finite() || discriminant < 0.0 {
        return result;
    }
    if discriminant == 0.0 {
        result.push(-0.5 * sc1);
        return result;
    }
    let sqrt_discriminant = discriminant.sqrt();
    let root0 = 0.5 * (-sc1 - sqrt_discriminant);
    let root1 = 0.5 * (-sc1 + sqrt_discriminant);
    result.push(root0);
    result.push(root1);
    result
}

/// Find real roots of a cubic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² + c3 x³ = 0, computed
/// with Cardano's method. When the cubic coefficient is zero or nearly
/// so, the equation degrades to [`solve_quadratic`].
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;
    if !a.is_finite() || !b.is_finite() || !c.is_finite() {
        for root in solve_quadratic(c0, c1, c2) {
            result.push(root);
        }
        return result;
    }

    // Depressed cubic t³ + p t + q with x = t - a/3.
    let p = (3.0 * b - a * a) / 3.0;
    let q = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
    let q2 = 0.5 * q;
    let p3 = p / 3.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;
    if discriminant < 0.0 {
        // Three real roots, trigonometric branch.
        let mp3 = -p3;
        let r = (mp3 * mp3 * mp3).sqrt();
        let cos_phi = (-q / (2.0 * r)).clamp(-1.0, 1.0);
        let phi = cos_phi.acos();
        let s = 2.0 * r.cbrt();
        let offset = a / 3.0;
        result.push(s * (phi / 3.0).cos() - offset);
        result.push(s * ((phi + 2.0 * std::f64::consts::PI) / 3.0).cos() - offset);
        result.push(s * ((phi + 4.0 * std::f64::consts::PI) / 3.0).cos() - offset);
    } else if discriminant == 0.0 {
        // Repeated root.
        let u = if q2 < 0.0 { (-q2).cbrt() } else { -q2.cbrt() };
        result.push(2.0 * u - a / 3.0);
        result.push(-u - a / 3.0);
    } else {
        // One real root.
        let sd = discriminant.sqrt();
        let u = (sd - q2).cbrt();
        let v = (sd + q2).cbrt();
        result.push(u - v - a / 3.0);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify_roots(mut roots: Vec<f64>, expected: &[f64]) {
        roots.sort_by(f64::total_cmp);
        assert_eq!(roots.len(), expected.len(), "got {:?}", roots);
        for (root, want) in roots.iter().zip(expected) {
            assert!((root - want).abs() < 1e-9, "{} != {}", root, want);
        }
    }

    #[test]
    fn quadratic_roots() {
        // (x - 1)(x - 2) = x² - 3x + 2
        verify_roots(solve_quadratic(2.0, -3.0, 1.0).to_vec(), &[1.0, 2.0]);
        // x² + 1 has no real roots.
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
        // Degenerates to linear 2x - 1 = 0.
        verify_roots(solve_quadratic(-1.0, 2.0, 0.0).to_vec(), &[0.5]);
        // All zero.
        verify_roots(solve_quadratic(0.0, 0.0, 0.0).to_vec(), &[0.0]);
    }

    #[test]
    fn cubic_roots() {
        // (x + 1)x(x - 1) = x³ - x
        verify_roots(solve_cubic(0.0, -1.0, 0.0, 1.0).to_vec(), &[-1.0, 0.0, 1.0]);
        // x³ - 1 has a single real root.
        verify_roots(solve_cubic(-1.0, 0.0, 0.0, 1.0).to_vec(), &[1.0]);
        // Degenerates to the quadratic (x - 1)(x - 2).
        verify_roots(solve_cubic(2.0, -3.0, 1.0, 0.0).to_vec(), &[1.0, 2.0]);
    }

    #[test]
    fn cubic_repeated_root() {
        // (x - 1)²(x + 2) = x³ - 3x + 2
        let roots = solve_cubic(2.0, -3.0, 0.0, 1.0);
        assert!(roots.iter().any(|r| (r - 1.0).abs() < 1e-9));
        assert!(roots.iter().any(|r| (r + 2.0).abs() < 1e-9));
    }
}
