// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path-data import and export.
//!
//! The importer understands the SVG path-data subset `M m L l H h V v
//! Q q T t C c S s A a Z z` with whitespace/comma-separated numbers,
//! per-command repetition, and the implicit line-to after a move.
//! Parsing is best-effort: a malformed numeric token or an unsupported
//! byte stops the parse, yielding the path built from every well-formed
//! element consumed so far, never a half-applied element.
//!
//! Export uses only the absolute, non-shorthand forms `M L Q C Z`, so
//! re-parsing exported text reproduces an equivalent element list.

use std::f64::consts::PI;
use std::fmt;
use std::fmt::Write;

use crate::{Path, PathEl, Point};

impl Path {
    /// Parse SVG path data, yielding the path built from all well-formed
    /// elements up to the first malformed token.
    pub fn from_svg_data(data: &str) -> Path {
        let mut path = Path::new();
        let mut lexer = Lexer::new(data);

        let mut cmd = 0u8;
        let mut expected = 0usize;
        let mut args = [0.0f64; 7];
        let mut count = 0usize;

        // Parser state: where the active contour started, the current
        // position, and the control points eligible for reflection.
        let mut contour_start = Point::ORIGIN;
        let mut position = Point::ORIGIN;
        let mut prev_quad_control: Option<Point> = None;
        let mut prev_cubic_control: Option<Point> = None;

        loop {
            lexer.skip_separators();
            let Some(byte) = lexer.peek() else {
                break;
            };
            if byte.is_ascii_alphabetic() {
                lexer.advance();
                match byte {
                    b'M' | b'm' | b'L' | b'l' | b'Q' | b'q' | b'T' | b't' => {
                        cmd = byte;
                        expected = match byte {
                            b'Q' | b'q' => 4,
                            _ => 2,
                        };
                    }
                    b'H' | b'h' | b'V' | b'v' => {
                        cmd = byte;
                        expected = 1;
                    }
                    b'C' | b'c' => {
                        cmd = byte;
                        expected = 6;
                    }
                    b'S' | b's' => {
                        cmd = byte;
                        expected = 4;
                    }
                    b'A' | b'a' => {
                        cmd = byte;
                        expected = 7;
                    }
                    b'Z' | b'z' => {
                        path.close_path();
                        position = contour_start;
                        prev_quad_control = None;
                        prev_cubic_control = None;
                        cmd = 0;
                    }
                    // Unsupported command letter: stop, keeping what we have.
                    _ => break,
                }
                count = 0;
                continue;
            }

            // Not a letter, so it must be an argument number for the
            // active command.
            let Some(number) = lexer.number() else {
                break;
            };
            if cmd == 0 {
                break;
            }
            args[count] = number;
            count += 1;
            if count < expected {
                continue;
            }
            count = 0;

            let relative = cmd.is_ascii_lowercase();
            match cmd.to_ascii_uppercase() {
                b'M' => {
                    let mut p = Point::new(args[0], args[1]);
                    if relative {
                        p += position.to_vec2();
                    }
                    path.move_to(p);
                    contour_start = p;
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = None;
                    // Trailing coordinate pairs after a move are lines.
                    cmd = if relative { b'l' } else { b'L' };
                }
                b'L' => {
                    let mut p = Point::new(args[0], args[1]);
                    if relative {
                        p += position.to_vec2();
                    }
                    path.line_to(p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = None;
                }
                b'H' => {
                    let x = if relative { position.x + args[0] } else { args[0] };
                    let p = Point::new(x, position.y);
                    path.line_to(p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = None;
                }
                b'V' => {
                    let y = if relative { position.y + args[0] } else { args[0] };
                    let p = Point::new(position.x, y);
                    path.line_to(p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = None;
                }
                b'Q' => {
                    let mut c = Point::new(args[0], args[1]);
                    let mut p = Point::new(args[2], args[3]);
                    if relative {
                        c += position.to_vec2();
                        p += position.to_vec2();
                    }
                    path.quad_to(c, p);
                    position = p;
                    prev_quad_control = Some(c);
                    prev_cubic_control = None;
                }
                b'T' => {
                    let mut p = Point::new(args[0], args[1]);
                    if relative {
                        p += position.to_vec2();
                    }
                    // Reflect the previous quadratic control through the
                    // current point; without one, the control collapses
                    // onto the current point.
                    let c = match prev_quad_control {
                        Some(prev) => prev.lerp(position, 2.0),
                        None => position,
                    };
                    path.quad_to(c, p);
                    position = p;
                    prev_quad_control = Some(c);
                    prev_cubic_control = None;
                }
                b'C' => {
                    let mut c0 = Point::new(args[0], args[1]);
                    let mut c1 = Point::new(args[2], args[3]);
                    let mut p = Point::new(args[4], args[5]);
                    if relative {
                        c0 += position.to_vec2();
                        c1 += position.to_vec2();
                        p += position.to_vec2();
                    }
                    path.curve_to(c0, c1, p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = Some(c1);
                }
                b'S' => {
                    let mut c1 = Point::new(args[0], args[1]);
                    let mut p = Point::new(args[2], args[3]);
                    if relative {
                        c1 += position.to_vec2();
                        p += position.to_vec2();
                    }
                    let c0 = match prev_cubic_control {
                        Some(prev) => prev.lerp(position, 2.0),
                        None => position,
                    };
                    path.curve_to(c0, c1, p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = Some(c1);
                }
                b'A' => {
                    let mut p = Point::new(args[5], args[6]);
                    if relative {
                        p += position.to_vec2();
                    }
                    let rotation = args[2] / 180.0 * PI;
                    path.arc_to(args[0], args[1], rotation, args[3] != 0.0, args[4] != 0.0, p);
                    position = p;
                    prev_quad_control = None;
                    prev_cubic_control = None;
                }
                _ => unreachable!(),
            }
        }
        path
    }

    /// Append cubic curves approximating an elliptical arc from the
    /// current point to `p`, as described by the SVG 7-tuple arc command
    /// (`rotation` already in radians).
    ///
    /// Degenerate radii draw a line; coincident endpoints draw nothing.
    /// Radii too small to span the endpoints are scaled up, per the SVG
    /// out-of-range handling.
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        p: Point,
    ) {
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        let rotation = rotation % (2.0 * PI);
        if rx == 0.0 || ry == 0.0 {
            self.line_to(p);
            return;
        }
        let p0 = self.current_point();
        if p0 == p {
            return;
        }
        let (sin_rotation, cos_rotation) = rotation.sin_cos();

        // Convert from endpoint to center parameterization, growing the
        // radii if they cannot span the gap between the endpoints.
        let mid_x = 0.5 * (p0.x - p.x);
        let mid_y = 0.5 * (p0.y - p.y);
        let x1p = cos_rotation * mid_x + sin_rotation * mid_y;
        let y1p = -sin_rotation * mid_x + cos_rotation * mid_y;
        let radii_scale_squared = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if radii_scale_squared > 1.0 {
            let radii_scale = radii_scale_squared.sqrt();
            rx *= radii_scale;
            ry *= radii_scale;
        }
        let ccn = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
        let ccd = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
        let mut cc = (ccn.abs() / ccd).sqrt();
        if large_arc == sweep {
            cc = -cc;
        }
        let cxp = cc * ((rx / ry) * y1p);
        let cyp = cc * -((ry / rx) * x1p);
        let cx = cos_rotation * cxp - sin_rotation * cyp + 0.5 * (p0.x + p.x);
        let cy = sin_rotation * cxp + cos_rotation * cyp + 0.5 * (p0.y + p.y);
        let angle_start = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
        let angle_end = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
        let mut angle_span = (angle_end - angle_start).abs();
        if large_arc && angle_span < PI {
            angle_span = (angle_span - 2.0 * PI).abs();
        }
        if !large_arc && angle_span > PI {
            angle_span = (angle_span - 2.0 * PI).abs();
        }

        // Approximate the arc with one cubic per slice of at most π/2.
        let mut remaining = angle_span;
        let mut angle = angle_start;
        while remaining > 0.0 {
            let slice_span = remaining.min(PI * 0.5);
            let slice = slice_span * if sweep { 1.0 } else { -1.0 };
            let k = 4.0 / 3.0 * (slice * 0.25).tan();
            let (sin_slice, cos_slice) = slice.sin_cos();

            // Cubic control points for the slice on the unit circle, in
            // the frame starting at `angle`.
            let c0 = (1.0, k);
            let c1 = (cos_slice + k * sin_slice, sin_slice - k * cos_slice);
            let end = (cos_slice, sin_slice);

            // Rotate into place on the unit circle, scale to the ellipse
            // radii, rotate by the ellipse rotation, then center.
            let (sin_angle, cos_angle) = angle.sin_cos();
            let place = |(x, y): (f64, f64)| {
                let ex = rx * (cos_angle * x - sin_angle * y);
                let ey = ry * (sin_angle * x + cos_angle * y);
                Point::new(
                    cos_rotation * ex - sin_rotation * ey + cx,
                    sin_rotation * ex + cos_rotation * ey + cy,
                )
            };
            let c0 = place(c0);
            let c1 = place(c1);
            let mut end = place(end);

            remaining -= slice_span;
            angle = (angle + slice) % (2.0 * PI);

            // The final slice lands exactly on the commanded endpoint.
            if remaining <= 0.0 {
                end = p;
            }
            self.curve_to(c0, c1, end);
        }
    }

    /// Serialize as SVG path data, using only the absolute forms
    /// `M L Q C Z`.
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        // Writing to a String cannot fail.
        self.write_svg(&mut result).unwrap();
        result
    }

    /// Write SVG path data to a formatter.
    pub fn write_svg<W: Write>(&self, writer: &mut W) -> fmt::Result {
        for (index, el) in self.elements().iter().enumerate() {
            if index > 0 {
                writer.write_char(' ')?;
            }
            match el {
                PathEl::MoveTo(p) => write!(writer, "M {} {}", p.x, p.y)?,
                PathEl::LineTo(p) => write!(writer, "L {} {}", p.x, p.y)?,
                PathEl::QuadTo(c, p) => write!(writer, "Q {} {} {} {}", c.x, c.y, p.x, p.y)?,
                PathEl::CurveTo(c0, c1, p) => write!(
                    writer,
                    "C {} {} {} {} {} {}",
                    c0.x, c0.y, c1.x, c1.y, p.x, p.y
                )?,
                PathEl::ClosePath => writer.write_char('Z')?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_svg(f)
    }
}

/// A lexer over path-data bytes: separators, command letters, numbers.
struct Lexer<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Lexer<'a> {
        Lexer {
            data: data.as_bytes(),
            index: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b',' || byte.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scan one real number; `None` when the upcoming text is not a
    /// well-formed number.
    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.index;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.advance();
        }
        let mut digits = 0;
        let mut seen_period = false;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if byte == b'.' && !seen_period {
                seen_period = true;
                self.advance();
            } else {
                break;
            }
        }
        if digits == 0 {
            self.index = start;
            return None;
        }
        // Optional exponent.
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = self.index;
            self.advance();
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.advance();
            }
            let mut exponent_digits = 0;
            while let Some(byte) = self.peek() {
                if byte.is_ascii_digit() {
                    exponent_digits += 1;
                    self.advance();
                } else {
                    break;
                }
            }
            if exponent_digits == 0 {
                self.index = mark;
            }
        }
        std::str::from_utf8(&self.data[start..self.index])
            .ok()
            .and_then(|text| text.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamCurve;

    #[test]
    fn parse_move_and_horizontal() {
        // Spec example: exactly two elements.
        let path = Path::from_svg_data("M 10 20 H 50");
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(10., 20.)),
                PathEl::LineTo(Point::new(50., 20.)),
            ]
        );
    }

    #[test]
    fn parse_relative_commands() {
        let path = Path::from_svg_data("M 10 10 l 5 0 v 5 h -5 z");
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(10., 10.)),
                PathEl::LineTo(Point::new(15., 10.)),
                PathEl::LineTo(Point::new(15., 15.)),
                PathEl::LineTo(Point::new(10., 15.)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn parse_implicit_repetition() {
        // Coordinate pairs after a move continue as implicit lines.
        let path = Path::from_svg_data("m10 10 100 0 0 100 -100 0z");
        assert_eq!(path.element_count(), 5);
        assert_eq!(path.contour_count(), 1);
        assert!(path.contour_is_closed(0));
        assert_eq!(path.contour_curve_count(0), 3);
        assert_eq!(
            path.element_at(3),
            PathEl::LineTo(Point::new(10., 110.))
        );
        // An explicit command repeats too.
        let path = Path::from_svg_data("M 0 0 L 1 0 2 0 3 0");
        assert_eq!(path.element_count(), 4);
    }

    #[test]
    fn parse_smooth_quadratic() {
        let path = Path::from_svg_data("M 0 0 Q 5 10 10 0 T 20 0");
        assert_eq!(path.element_count(), 3);
        // The reflected control mirrors (5, 10) through (10, 0).
        assert_eq!(
            path.element_at(2),
            PathEl::QuadTo(Point::new(15., -10.), Point::new(20., 0.))
        );
        // Without a preceding quadratic the control collapses onto the
        // current point.
        let path = Path::from_svg_data("M 0 0 L 10 0 T 20 0");
        assert_eq!(
            path.element_at(2),
            PathEl::QuadTo(Point::new(10., 0.), Point::new(20., 0.))
        );
    }

    #[test]
    fn parse_smooth_cubic() {
        let path = Path::from_svg_data("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0");
        assert_eq!(path.element_count(), 3);
        assert_eq!(
            path.element_at(2),
            PathEl::CurveTo(
                Point::new(10., -10.),
                Point::new(20., -10.),
                Point::new(20., 0.)
            )
        );
    }

    #[test]
    fn parse_arc_ends_exactly() {
        let path = Path::from_svg_data("M 0 0 A 10 10 0 0 1 20 0");
        assert!(path.element_count() >= 2);
        assert_eq!(path.current_point(), Point::new(20., 0.));
        // Every generated element is a cubic.
        for el in &path.elements()[1..] {
            assert!(matches!(el, PathEl::CurveTo(..)));
        }
        // The approximation stays on the circle of radius 10 about
        // (10, 0).
        let center = Point::new(10., 0.);
        for i in 0..path.contour_curve_count(0) {
            let curve = path.curve_at(0, i);
            for j in 0..=8 {
                let t = (j as f64) / 8.0;
                let r = curve.eval(t).distance(center);
                assert!((r - 10.0).abs() < 0.1, "radius {} at t={}", r, t);
            }
        }
    }

    #[test]
    fn parse_arc_degenerate_radius_is_line() {
        let path = Path::from_svg_data("M 0 0 A 0 10 0 0 1 20 0");
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0., 0.)),
                PathEl::LineTo(Point::new(20., 0.)),
            ]
        );
    }

    #[test]
    fn parse_stops_at_malformed_token() {
        // The malformed second argument discards the line, keeping the
        // well-formed prefix.
        let path = Path::from_svg_data("M 10 20 L 30 oops 40 40");
        assert_eq!(path.elements(), &[PathEl::MoveTo(Point::new(10., 20.))]);
        // A bare number with no command in effect also stops.
        let path = Path::from_svg_data("10 20 L 5 5");
        assert!(path.is_empty());
        // An unsupported command letter stops.
        let path = Path::from_svg_data("M 1 2 L 3 4 X 5 6 L 7 8");
        assert_eq!(path.element_count(), 2);
    }

    #[test]
    fn parse_exponents_and_commas() {
        let path = Path::from_svg_data("M1e1,2E1L3e0,4.5e-1");
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(10., 20.)),
                PathEl::LineTo(Point::new(3., 0.45)),
            ]
        );
    }

    #[test]
    fn export_uses_absolute_long_forms() {
        let path = Path::from_svg_data("m 1 2 h 4 q 1 1 2 0 c 1 -1 2 -1 3 0 z");
        let svg = path.to_svg();
        for shorthand in ["h", "H", "v", "V", "T", "S", "A"] {
            assert!(!svg.contains(shorthand), "shorthand {} in {}", shorthand, svg);
        }
        assert!(svg.starts_with("M 1 2 L 5 2 Q "));
        assert!(svg.ends_with('Z'));
    }

    #[test]
    fn svg_round_trip() {
        let mut path = Path::new();
        path.move_to((1.5, 2.25));
        path.line_to((5., 2.));
        path.quad_to((6., 4.), (7., 2.));
        path.curve_to((8., 0.), (9., 4.), (10., 2.));
        path.close_path();
        path.move_to((20., 20.));
        path.line_to((30., 20.));

        let reparsed = Path::from_svg_data(&path.to_svg());
        assert_eq!(reparsed.elements(), path.elements());
        // Display is the same serialization.
        assert_eq!(format!("{}", path), path.to_svg());
    }
}
