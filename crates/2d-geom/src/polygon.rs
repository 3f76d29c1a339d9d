use crate::{is_counter_clockwise, line, signed_double_area, Line};
use cull_aabb::{Aabb, ToAabb};
use euclid::Point2D;
use std::fmt;

/// A polygon.
///
/// The polygon's vertices are in counter-clockwise order.
///
/// No guarantees whether this polygon is convex or not.
pub struct Polygon<U> {
    vertices: Vec<Point2D<f64, U>>,
}

impl<U> Clone for Polygon<U> {
    fn clone(&self) -> Self {
        Polygon {
            vertices: self.vertices.clone(),
        }
    }
}

impl<U> PartialEq for Polygon<U> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl<U> fmt::Debug for Polygon<U> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Polygon")
            .field(
                "vertices",
                &self
                    .vertices
                    .iter()
                    .map(|v| (&v.x, &v.y))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<U> Polygon<U> {
    /// Construct a new polygon.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three vertices are given, or if the vertices are
    /// not in counter-clockwise order.
    pub fn new(vertices: Vec<Point2D<f64, U>>) -> Polygon<U> {
        assert!(vertices.len() >= 3);
        assert!(
            is_counter_clockwise(&vertices),
            "vertices are not counter clockwise"
        );
        Polygon { vertices }
    }

    /// Get this polygon's vertices.
    pub fn vertices(&self) -> &[Point2D<f64, U>] {
        &self.vertices
    }

    /// Get the number of vertices in this polygon.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Get the area of this polygon.
    ///
    /// ```
    /// use cull_2d_geom::Polygon;
    /// use euclid::{point2, UnknownUnit};
    ///
    /// let square: Polygon<UnknownUnit> = Polygon::new(vec![
    ///     point2(0.0, 0.0),
    ///     point2(10.0, 0.0),
    ///     point2(10.0, 10.0),
    ///     point2(0.0, 10.0),
    /// ]);
    ///
    /// assert_eq!(square.area(), 100.0);
    /// ```
    #[inline]
    pub fn area(&self) -> f64 {
        (signed_double_area(&self.vertices) / 2.0).abs()
    }

    /// Iterate over this polygon's edge lines.
    ///
    /// # Example
    ///
    /// ```
    /// use cull_2d_geom::{line, Polygon};
    /// use euclid::{point2, UnknownUnit};
    ///
    /// let p: Polygon<UnknownUnit> = Polygon::new(vec![
    ///     point2(0.0, 0.0),
    ///     point2(2.0, 0.0),
    ///     point2(1.0, 2.0),
    /// ]);
    ///
    /// assert_eq!(
    ///     p.edges().collect::<Vec<_>>(),
    ///     [
    ///         line(point2(0.0, 0.0), point2(2.0, 0.0)),
    ///         line(point2(2.0, 0.0), point2(1.0, 2.0)),
    ///         line(point2(1.0, 2.0), point2(0.0, 0.0)),
    ///     ]
    /// );
    /// ```
    pub fn edges<'a>(&'a self) -> impl 'a + Iterator<Item = Line<U>> {
        let ps = self.vertices.iter().cloned();
        let qs = self
            .vertices
            .iter()
            .cloned()
            .skip(1)
            .chain(Some(self.vertices[0]));

        ps.zip(qs).map(|(p, q)| line(p, q))
    }
}

impl<U> ToAabb<f64, U> for Polygon<U> {
    fn to_aabb(&self) -> Aabb<f64, U> {
        Aabb::for_vertices(self.vertices.iter().cloned())
    }
}
