use crate::{
    approx_eq, area2, center, signed_double_area, sort_around, LineIntersection, Polygon, EPSILON,
};
use cull_aabb::{Aabb, ToAabb};
use euclid::Point2D;
use failure::Fail;
use std::fmt;
use std::ops::Deref;

/// A convex polygon.
///
/// This is a thin newtype wrapper over `Polygon`, and dereferences to the
/// underlying `Polygon`, but it's guaranteed that this polygon is convex.
pub struct ConvexPolygon<U> {
    inner: Polygon<U>,
}

impl<U> Clone for ConvexPolygon<U> {
    fn clone(&self) -> Self {
        ConvexPolygon {
            inner: self.inner.clone(),
        }
    }
}

impl<U> PartialEq for ConvexPolygon<U> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<U> fmt::Debug for ConvexPolygon<U> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ConvexPolygon")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<U> AsRef<Polygon<U>> for ConvexPolygon<U> {
    fn as_ref(&self) -> &Polygon<U> {
        &self.inner
    }
}

impl<U> Deref for ConvexPolygon<U> {
    type Target = Polygon<U>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// NB: No `DerefMut` implementation because mutating the inner polygon might
// remove the convexity.

impl<U> From<ConvexPolygon<U>> for Polygon<U> {
    #[inline]
    fn from(c: ConvexPolygon<U>) -> Polygon<U> {
        c.inner
    }
}

/// Why a vertex list failed to form a convex polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
pub enum InvalidPolygon {
    /// Fewer than three vertices were given.
    #[fail(display = "a convex polygon needs at least three vertices")]
    TooFewVertices,

    /// A vertex coordinate was NaN or infinite.
    #[fail(display = "a vertex coordinate is not finite")]
    NonFinite,

    /// The vertices wind clockwise.
    #[fail(display = "the vertices are not in counter-clockwise order")]
    NotCounterClockwise,

    /// Two consecutive vertices coincide, or the polygon encloses no area.
    #[fail(display = "the polygon is degenerate")]
    Degenerate,

    /// Some corner turns clockwise.
    #[fail(display = "the vertices do not describe a convex polygon")]
    NotConvex,
}

impl<U> ConvexPolygon<U> {
    /// Construct a convex polygon from vertices in counter-clockwise order.
    ///
    /// The vertices are validated: at least three of them, every coordinate
    /// finite, counter-clockwise winding, no coincident consecutive
    /// vertices, positive area, and a counter-clockwise turn at every
    /// corner. Collinear corners are tolerated.
    ///
    /// # Example
    ///
    /// ```
    /// use cull_2d_geom::{ConvexPolygon, InvalidPolygon};
    /// use euclid::{point2, UnknownUnit};
    ///
    /// let triangle = ConvexPolygon::<UnknownUnit>::new(vec![
    ///     point2(0.0, 0.0),
    ///     point2(1.0, 0.0),
    ///     point2(1.0, 1.0),
    /// ]);
    /// assert!(triangle.is_ok());
    ///
    /// // The same triangle, wound the wrong way.
    /// let backwards = ConvexPolygon::<UnknownUnit>::new(vec![
    ///     point2(1.0, 1.0),
    ///     point2(1.0, 0.0),
    ///     point2(0.0, 0.0),
    /// ]);
    /// assert_eq!(backwards.unwrap_err(), InvalidPolygon::NotCounterClockwise);
    /// ```
    pub fn new(vertices: Vec<Point2D<f64, U>>) -> Result<ConvexPolygon<U>, InvalidPolygon> {
        if vertices.len() < 3 {
            return Err(InvalidPolygon::TooFewVertices);
        }
        if vertices
            .iter()
            .any(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(InvalidPolygon::NonFinite);
        }

        let n = vertices.len();
        for i in 0..n {
            if approx_eq(vertices[i], vertices[(i + 1) % n]) {
                return Err(InvalidPolygon::Degenerate);
            }
        }

        let doubled = signed_double_area(&vertices);
        if doubled < -EPSILON {
            return Err(InvalidPolygon::NotCounterClockwise);
        }
        if doubled <= EPSILON {
            return Err(InvalidPolygon::Degenerate);
        }

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            if area2(a, b, c) < -EPSILON {
                return Err(InvalidPolygon::NotConvex);
            }
        }

        Ok(ConvexPolygon {
            inner: Polygon::new(vertices),
        })
    }

    /// Does this convex polygon contain the given point?
    ///
    /// Containment is closed: points on the boundary count as contained.
    ///
    /// # Example
    ///
    /// ```
    /// use cull_2d_geom::ConvexPolygon;
    /// use euclid::{point2, UnknownUnit};
    ///
    /// let p = ConvexPolygon::<UnknownUnit>::new(vec![
    ///     point2(0.0, 0.0),
    ///     point2(10.0, 2.0),
    ///     point2(5.0, 10.0),
    /// ]).unwrap();
    ///
    /// assert!(p.contains_point(point2(5.0, 5.0)));
    /// assert!(!p.contains_point(point2(-3.0, -3.0)));
    ///
    /// // Points exactly on the boundary are contained.
    /// assert!(p.contains_point(point2(0.0, 0.0)));
    /// ```
    pub fn contains_point(&self, point: Point2D<f64, U>) -> bool {
        self.edges().all(|e| e.is_left_or_collinear(point))
    }

    /// Compute the intersection of two convex polygons.
    ///
    /// The intersection of two convex regions is itself convex. When the
    /// polygons properly overlap, the result is a `Polygon` in
    /// counter-clockwise order. When they only touch — a shared corner or a
    /// shared stretch of edge — the result is `Degenerate` with the one or
    /// two contact points. Disjoint polygons yield `Empty`.
    ///
    /// # Example
    ///
    /// ```
    /// use cull_2d_geom::{ConvexPolygon, PolygonIntersection};
    /// use euclid::{point2, UnknownUnit};
    ///
    /// let square = |x: f64, y: f64| {
    ///     ConvexPolygon::<UnknownUnit>::new(vec![
    ///         point2(x, y),
    ///         point2(x + 1.0, y),
    ///         point2(x + 1.0, y + 1.0),
    ///         point2(x, y + 1.0),
    ///     ]).unwrap()
    /// };
    ///
    /// let a = square(0.0, 0.0);
    /// let b = square(0.5, 0.5);
    /// match a.intersection(&b) {
    ///     PolygonIntersection::Polygon(p) => assert_eq!(
    ///         p.vertices().to_vec(),
    ///         vec![
    ///             point2(0.5, 1.0),
    ///             point2(0.5, 0.5),
    ///             point2(1.0, 0.5),
    ///             point2(1.0, 1.0),
    ///         ],
    ///     ),
    ///     other => panic!("unexpected intersection: {:?}", other),
    /// }
    ///
    /// let c = square(5.0, 5.0);
    /// assert!(a.intersection(&c).is_empty());
    /// ```
    pub fn intersection(&self, other: &ConvexPolygon<U>) -> PolygonIntersection<U> {
        // Cheap reject when the bounding boxes cannot meet. Touching boxes
        // still pass, so contact configurations make it to the exact test.
        if !self.to_aabb().intersects(&other.to_aabb()) {
            return PolygonIntersection::Empty;
        }

        // One polygon swallowing the other short-circuits the edge walk.
        if self.vertices().iter().all(|&v| other.contains_point(v)) {
            return PolygonIntersection::Polygon(self.clone());
        }
        if other.vertices().iter().all(|&v| self.contains_point(v)) {
            return PolygonIntersection::Polygon(other.clone());
        }

        // Walk every edge pair, collecting crossings and collinear overlap
        // end points, then add each polygon's vertices inside the other.
        let mut points = Vec::new();
        for ea in self.edges() {
            for eb in other.edges() {
                match ea.intersection(&eb) {
                    LineIntersection::None => {}
                    LineIntersection::Point(p) => points.push(p),
                    LineIntersection::Overlapping(p, q) => {
                        points.push(p);
                        points.push(q);
                    }
                }
            }
        }
        points.extend(
            self.vertices()
                .iter()
                .cloned()
                .filter(|&v| other.contains_point(v)),
        );
        points.extend(
            other
                .vertices()
                .iter()
                .cloned()
                .filter(|&v| self.contains_point(v)),
        );

        let mut points = dedup_points(points);
        match points.len() {
            0 => return PolygonIntersection::Empty,
            1 | 2 => return PolygonIntersection::Degenerate(points),
            _ => {}
        }

        // Restore counter-clockwise order and drop collinear runs so the
        // result is a well-formed convex polygon.
        let pivot = center(&points);
        sort_around(pivot, &mut points);
        let points = drop_collinear(points);

        match points.len() {
            0 => PolygonIntersection::Empty,
            1 | 2 => PolygonIntersection::Degenerate(points),
            _ => match ConvexPolygon::new(points.clone()) {
                Ok(p) => PolygonIntersection::Polygon(p),
                // Numerically flat results reduce to their contact points.
                Err(_) => PolygonIntersection::Degenerate(points),
            },
        }
    }
}

impl<U> ToAabb<f64, U> for ConvexPolygon<U> {
    fn to_aabb(&self) -> Aabb<f64, U> {
        self.inner.to_aabb()
    }
}

/// The result of `ConvexPolygon::intersection`.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonIntersection<U> {
    /// The polygons do not meet at all.
    Empty,

    /// The polygons only touch: a shared corner (one point) or a shared
    /// stretch of edge (two points).
    Degenerate(Vec<Point2D<f64, U>>),

    /// The polygons properly overlap in the given convex polygon.
    Polygon(ConvexPolygon<U>),
}

impl<U> PolygonIntersection<U> {
    /// Is this `PolygonIntersection::Empty`?
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            PolygonIntersection::Empty => true,
            _ => false,
        }
    }

    /// The intersection's points — the polygon's vertices in
    /// counter-clockwise order, the contact points, or nothing.
    pub fn points(&self) -> &[Point2D<f64, U>] {
        match self {
            PolygonIntersection::Empty => &[],
            PolygonIntersection::Degenerate(points) => points,
            PolygonIntersection::Polygon(p) => p.vertices(),
        }
    }
}

/// Keep the first of every cluster of points within `EPSILON` of each other.
fn dedup_points<U>(points: Vec<Point2D<f64, U>>) -> Vec<Point2D<f64, U>> {
    let mut unique: Vec<Point2D<f64, U>> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|&q| approx_eq(p, q)) {
            unique.push(p);
        }
    }
    unique
}

/// Remove vertices that sit on the line between their ring neighbors.
fn drop_collinear<U>(mut points: Vec<Point2D<f64, U>>) -> Vec<Point2D<f64, U>> {
    let mut changed = true;
    while changed && points.len() >= 3 {
        changed = false;
        let mut i = 0;
        while i < points.len() && points.len() >= 3 {
            let n = points.len();
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            if area2(prev, points[i], next).abs() <= EPSILON {
                points.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    points
}
