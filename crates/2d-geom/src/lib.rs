//! Two-dimensional convex polygon intersection, built on top of `euclid`.

#![deny(missing_docs, missing_debug_implementations)]

mod convex_polygon;
mod line;
mod polygon;

pub use crate::{convex_polygon::*, line::*, polygon::*};

use cull_utils::NoMorePartial;
use euclid::{point2, Point2D};
use std::cmp::Ordering;

/// Absolute tolerance for geometric comparisons.
///
/// Every comparison in this crate — collinearity, point equality, half-plane
/// membership — goes through this one constant, so near-degenerate
/// configurations classify the same way everywhere.
pub const EPSILON: f64 = 1e-9;

/// Twice the signed area of the triangle `a`, `b`, `c`. Positive when the
/// triangle winds counter-clockwise.
#[inline]
fn area2<U>(a: Point2D<f64, U>, b: Point2D<f64, U>, c: Point2D<f64, U>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Twice the signed area of the polygon described by `vertices`. Positive
/// when the vertices wind counter-clockwise.
fn signed_double_area<U>(vertices: &[Point2D<f64, U>]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 1..vertices.len() - 1 {
        sum += area2(vertices[0], vertices[i], vertices[i + 1]);
    }
    sum
}

/// Are the two points within [`EPSILON`] of each other on both axes?
///
/// # Example
///
/// ```
/// use cull_2d_geom::approx_eq;
/// use euclid::{point2, UnknownUnit};
///
/// assert!(approx_eq::<UnknownUnit>(point2(1.0, 1.0), point2(1.0 + 1e-12, 1.0)));
/// assert!(!approx_eq::<UnknownUnit>(point2(1.0, 1.0), point2(1.1, 1.0)));
/// ```
#[inline]
pub fn approx_eq<U>(a: Point2D<f64, U>, b: Point2D<f64, U>) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// Find the center (mean) of a set of points.
///
/// # Panics
///
/// Will panic if the given `points` is empty.
///
/// # Example
///
/// ```
/// use cull_2d_geom::center;
/// use euclid::{point2, UnknownUnit};
///
/// let c = center::<UnknownUnit>(&[
///     point2(0.0, 0.0), point2(2.0, 0.0),
///     point2(0.0, 2.0), point2(2.0, 2.0),
/// ]);
///
/// assert_eq!(c, point2(1.0, 1.0));
/// ```
pub fn center<U>(points: &[Point2D<f64, U>]) -> Point2D<f64, U> {
    assert!(!points.is_empty());
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    point2(sum_x / n, sum_y / n)
}

/// Sort the given `points` around the given `pivot` point in
/// counter-clockwise order, starting from 12 o'clock.
///
/// # Example
///
/// ```
/// use cull_2d_geom::{center, sort_around};
/// use euclid::{point2, Point2D, UnknownUnit};
///
/// let mut points: Vec<Point2D<f64, UnknownUnit>> = vec![
///     point2(0.0, 2.0), point2(2.0, 2.0),
///     point2(0.0, 0.0), point2(2.0, 0.0),
/// ];
///
/// let pivot = center(&points);
/// sort_around(pivot, &mut points);
///
/// assert_eq!(points, vec![
///     point2(0.0, 2.0),
///     point2(0.0, 0.0),
///     point2(2.0, 0.0),
///     point2(2.0, 2.0),
/// ]);
/// ```
pub fn sort_around<U>(pivot: Point2D<f64, U>, points: &mut [Point2D<f64, U>]) {
    points.sort_by(|&a, &b| {
        let a_dx = a.x - pivot.x;
        let b_dx = b.x - pivot.x;

        if a_dx >= 0.0 && b_dx < 0.0 {
            Ordering::Greater
        } else if a_dx < 0.0 && b_dx >= 0.0 {
            Ordering::Less
        } else if a_dx == 0.0 && b_dx == 0.0 {
            // Break ties with distance to the pivot.
            if a.y - pivot.y >= 0.0 || b.y - pivot.y >= 0.0 {
                NoMorePartial(a.y).cmp(&NoMorePartial(b.y))
            } else {
                NoMorePartial(b.y).cmp(&NoMorePartial(a.y))
            }
        } else {
            let c = (a - pivot).cross(b - pivot);
            if c < 0.0 {
                Ordering::Greater
            } else if c > 0.0 {
                Ordering::Less
            } else {
                // Same ray out of the pivot; break ties with distance.
                let d1 = (a - pivot).square_length();
                let d2 = (b - pivot).square_length();
                NoMorePartial(d1).cmp(&NoMorePartial(d2))
            }
        }
    });
}

/// Are the given vertices in counter-clockwise order?
///
/// ```
/// use cull_2d_geom::is_counter_clockwise;
/// use euclid::{point2, UnknownUnit};
///
/// assert!(is_counter_clockwise::<UnknownUnit>(&[
///     point2(0.0, 1.0),
///     point2(0.0, 0.0),
///     point2(1.0, 0.0),
///     point2(1.0, 1.0),
/// ]));
///
/// assert!(!is_counter_clockwise::<UnknownUnit>(&[
///     point2(1.0, 1.0),
///     point2(1.0, 0.0),
///     point2(0.0, 0.0),
///     point2(0.0, 1.0),
/// ]));
/// ```
pub fn is_counter_clockwise<U>(vertices: &[Point2D<f64, U>]) -> bool {
    let mut sum = 0.0;
    for (i, j) in (0..vertices.len()).zip((1..vertices.len()).chain(Some(0))) {
        let a = vertices[i];
        let b = vertices[j];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum <= 0.0
}
