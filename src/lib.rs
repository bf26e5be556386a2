// Copyright 2026 the Contura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D Bézier curve, contour and path geometry.
//!
//! The contura library represents paths built from line, quadratic and
//! cubic Bézier segments, organized into contours (open or closed
//! sub-paths) and multi-contour paths, and provides the mathematics
//! needed to render, query and edit them: evaluation, differentiation,
//! bounding, length and arc-length reparametrization, extrema and
//! inflection detection, canonical shape classification, curve-curve
//! intersection, nearest-point queries, constrained reshaping and an
//! SVG-subset textual import/export format.
//!
//! # Examples
//!
//! Evaluating a curve and finding where two curves cross:
//!
//! ```
//! use contura::{Curve, ParamCurve, Point};
//!
//! let arch = Curve::quadratic((1.0, 2.0), (3.0, 4.0), (5.0, 2.0));
//! assert_eq!(arch.eval(0.5), Point::new(3.0, 3.0));
//!
//! let a = Curve::linear((0.0, 0.0), (100.0, 100.0));
//! let b = Curve::linear((100.0, 0.0), (0.0, 100.0));
//! let hits = a.intersections(&b);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0], (0.5, 0.5));
//! ```
//!
//! Building a path from draw commands or SVG path data:
//!
//! ```
//! use contura::{Path, Point};
//!
//! let mut path = Path::new();
//! path.move_to((0.0, 0.0));
//! path.line_to((10.0, 0.0));
//! path.line_to((10.0, 10.0));
//! path.close_path();
//! assert!(path.contains(Point::new(8.0, 1.0)));
//!
//! let parsed = Path::from_svg_data("M 10 20 H 50");
//! assert_eq!(parsed.element_count(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]

pub mod common;
mod contour;
mod cubicbez;
mod curve;
mod intersect;
mod line;
mod param_curve;
mod path;
mod pathops;
mod point;
mod quadbez;
mod rect;
mod svg;
mod vec2;

pub use crate::contour::*;
pub use crate::curve::*;
pub use crate::cubicbez::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::pathops::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::vec2::*;

/// The maximum number of extrema a curve can report.
///
/// A cubic can have two derivative roots per axis.
pub const MAX_EXTREMA: usize = 4;
