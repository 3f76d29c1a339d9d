use crate::{area2, EPSILON};
use euclid::Point2D;
use partial_min_max::{max, min};

/// A line segment between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line<U = euclid::UnknownUnit> {
    /// The first point.
    pub a: Point2D<f64, U>,
    /// The second point.
    pub b: Point2D<f64, U>,
}

/// The direction a point lies relative to a line. Returned by
/// `Line::relative_direction_of`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelativeDirection {
    /// The point lies left relative to the line.
    Left = 1,

    /// The point is collinear with the line.
    Collinear = 0,

    /// The point lies right relative to the line.
    Right = -1,
}

/// Convenience function for creating lines.
#[inline]
pub fn line<U>(a: Point2D<f64, U>, b: Point2D<f64, U>) -> Line<U> {
    Line { a, b }
}

impl<U> Line<U> {
    /// Create a new line between the given points.
    #[inline]
    pub fn new(a: Point2D<f64, U>, b: Point2D<f64, U>) -> Line<U> {
        line(a, b)
    }

    /// Get the direction of the point relative to this line.
    ///
    /// Points whose doubled triangle area with the line is within
    /// [`EPSILON`] count as collinear.
    #[inline]
    pub fn relative_direction_of(&self, point: Point2D<f64, U>) -> RelativeDirection {
        let det = area2(self.a, self.b, point);
        if det > EPSILON {
            RelativeDirection::Left
        } else if det < -EPSILON {
            RelativeDirection::Right
        } else {
            RelativeDirection::Collinear
        }
    }

    /// Is the given point on the left of this line?
    ///
    /// ```
    /// use cull_2d_geom::{line, Line};
    /// use euclid::point2;
    ///
    /// let l: Line = line(point2(0.0, 0.0), point2(1.0, 1.0));
    ///
    /// assert!(l.is_left(point2(0.0, 1.0)));
    /// assert!(!l.is_left(point2(1.0, 0.0)));
    ///
    /// // Collinear points are not considered on the left of the line. See
    /// // also `is_left_or_collinear`.
    /// assert!(!l.is_left(point2(2.0, 2.0)));
    /// ```
    #[inline]
    pub fn is_left(&self, point: Point2D<f64, U>) -> bool {
        self.relative_direction_of(point) == RelativeDirection::Left
    }

    /// Is the given point on the left of this line or collinear with it?
    ///
    /// ```
    /// use cull_2d_geom::{line, Line};
    /// use euclid::point2;
    ///
    /// let l: Line = line(point2(0.0, 0.0), point2(1.0, 1.0));
    ///
    /// assert!(l.is_left_or_collinear(point2(0.0, 1.0)));
    /// assert!(l.is_left_or_collinear(point2(2.0, 2.0)));
    ///
    /// assert!(!l.is_left_or_collinear(point2(1.0, 0.0)));
    /// ```
    #[inline]
    pub fn is_left_or_collinear(&self, point: Point2D<f64, U>) -> bool {
        match self.relative_direction_of(point) {
            RelativeDirection::Left | RelativeDirection::Collinear => true,
            RelativeDirection::Right => false,
        }
    }

    /// Is the given point collinear with this line?
    ///
    /// ```
    /// use cull_2d_geom::{line, Line};
    /// use euclid::point2;
    ///
    /// let l: Line = line(point2(0.0, 0.0), point2(1.0, 1.0));
    ///
    /// assert!(l.is_collinear(point2(2.0, 2.0)));
    ///
    /// assert!(!l.is_collinear(point2(0.0, 1.0)));
    /// assert!(!l.is_collinear(point2(1.0, 0.0)));
    /// ```
    #[inline]
    pub fn is_collinear(&self, point: Point2D<f64, U>) -> bool {
        self.relative_direction_of(point) == RelativeDirection::Collinear
    }

    /// Get the intersection between two line segments.
    ///
    /// Segments that cross, even just barely at their end points, yield a
    /// `Point`. Collinear segments whose projections overlap yield
    /// `Overlapping` with the overlap's end points. Everything else yields
    /// `None`.
    ///
    /// ```
    /// use cull_2d_geom::{line, Line, LineIntersection};
    /// use euclid::point2;
    ///
    /// // Proper crossing.
    /// assert_eq!(
    ///     line::<euclid::UnknownUnit>(point2(0.0, 0.0), point2(2.0, 2.0))
    ///         .intersection(&line(point2(0.0, 2.0), point2(2.0, 0.0))),
    ///     LineIntersection::Point(point2(1.0, 1.0)),
    /// );
    ///
    /// // No intersection.
    /// assert_eq!(
    ///     line::<euclid::UnknownUnit>(point2(0.0, 0.0), point2(1.0, 1.0))
    ///         .intersection(&line(point2(2.0, 0.0), point2(3.0, 1.0))),
    ///     LineIntersection::None,
    /// );
    ///
    /// // Collinear overlap.
    /// assert_eq!(
    ///     line::<euclid::UnknownUnit>(point2(0.0, 0.0), point2(2.0, 0.0))
    ///         .intersection(&line(point2(1.0, 0.0), point2(3.0, 0.0))),
    ///     LineIntersection::Overlapping(point2(1.0, 0.0), point2(2.0, 0.0)),
    /// );
    /// ```
    pub fn intersection(&self, other: &Line<U>) -> LineIntersection<U> {
        let dir = self.b - self.a;
        let other_dir = other.b - other.a;
        let denom = dir.cross(other_dir);

        if denom.abs() < EPSILON {
            return self.parallel_intersection(other);
        }

        let to_other = other.a - self.a;
        let t = to_other.cross(other_dir) / denom;
        let u = to_other.cross(dir) / denom;

        if t < -EPSILON || t > 1.0 + EPSILON || u < -EPSILON || u > 1.0 + EPSILON {
            return LineIntersection::None;
        }

        LineIntersection::Point(self.a.lerp(self.b, t))
    }

    fn parallel_intersection(&self, other: &Line<U>) -> LineIntersection<U> {
        if !self.is_collinear(other.a) {
            return LineIntersection::None;
        }

        // Project the other segment onto this one and intersect the
        // parameter intervals.
        let dir = self.b - self.a;
        let len2 = dir.square_length();
        if len2 < EPSILON * EPSILON {
            return LineIntersection::None;
        }
        let t_c = (other.a - self.a).dot(dir) / len2;
        let t_d = (other.b - self.a).dot(dir) / len2;
        let lo = max(min(t_c, t_d), 0.0);
        let hi = min(max(t_c, t_d), 1.0);

        if hi < lo - EPSILON {
            return LineIntersection::None;
        }

        LineIntersection::Overlapping(self.a.lerp(self.b, lo), self.a.lerp(self.b, hi))
    }
}

/// The result of `Line::intersection` providing the intersection between two
/// line segments, if any.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LineIntersection<U> {
    /// The line segments do not intersect.
    None,

    /// The line segments cross at the given point.
    Point(Point2D<f64, U>),

    /// The line segments are collinear and their projections overlap in the
    /// sub-segment between the two given points. The points coincide when
    /// the segments only touch end to end.
    Overlapping(Point2D<f64, U>, Point2D<f64, U>),
}

impl<U> LineIntersection<U> {
    /// Is this a `LineIntersection::None`?
    #[inline]
    pub fn is_none(&self) -> bool {
        match self {
            LineIntersection::None => true,
            _ => false,
        }
    }

    /// Is this a `LineIntersection::Point`?
    #[inline]
    pub fn is_point(&self) -> bool {
        match self {
            LineIntersection::Point(_) => true,
            _ => false,
        }
    }

    /// Is this a `LineIntersection::Overlapping`?
    #[inline]
    pub fn is_overlapping(&self) -> bool {
        match self {
            LineIntersection::Overlapping(..) => true,
            _ => false,
        }
    }
}
