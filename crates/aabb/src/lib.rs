//! Two dimensional axis-aligned bounding boxes (AABB) and an R-tree over
//! them.
//!
//! Used for fast-but-imprecise overlap queries between shapes. Once
//! candidates for intersection are quickly found with the R-tree, callers
//! can determine whether they precisely intersect with a more expensive
//! algorithm.

use euclid::{point2, Point2D};
use num_traits::{Bounded, Num};
use partial_min_max::{max as partial_max, min as partial_min};
use std::fmt;

mod rtree;

pub use crate::rtree::{Entry, IterOverlapping, NodeChildren, NodeRef, RTree};

/// An axis-aligned bounding box.
///
/// * `T` is the numeric type. `i32` or `f64` etc.
/// * `U` is the unit. `ScreenSpace` or `WorldSpace` etc.
pub struct Aabb<T, U = euclid::UnknownUnit> {
    min: Point2D<T, U>,
    max: Point2D<T, U>,
}

impl<T: Clone, U> Clone for Aabb<T, U> {
    fn clone(&self) -> Self {
        Aabb {
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }
}

impl<T: PartialEq, U> PartialEq for Aabb<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<T, U> fmt::Debug for Aabb<T, U>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Aabb")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl<T, U> Aabb<T, U>
where
    T: Copy + Num + PartialOrd,
{
    /// Construct a new axis-aligned bounding box.
    ///
    /// `min`'s `x` and `y` components must be less than or equal to `max`'s.
    #[inline]
    pub fn new(min: Point2D<T, U>, max: Point2D<T, U>) -> Aabb<T, U> {
        assert!(min.x <= max.x);
        assert!(min.y <= max.y);
        Aabb { min, max }
    }

    /// Construct a new axis-aligned bounding box that contains the given set
    /// of vertices.
    ///
    /// # Panics
    ///
    /// Panics if `vertices` is empty.
    pub fn for_vertices<I>(vertices: I) -> Aabb<T, U>
    where
        I: IntoIterator<Item = Point2D<T, U>>,
    {
        let mut vertices = vertices.into_iter();
        let first = vertices
            .next()
            .expect("Must have at least one vertex to create a bounding box");
        let mut min = first;
        let mut max = first;
        for v in vertices {
            min.x = partial_min(min.x, v.x);
            min.y = partial_min(min.y, v.y);
            max.x = partial_max(max.x, v.x);
            max.y = partial_max(max.y, v.y);
        }
        Aabb::new(min, max)
    }

    /// Get this AABB's min.
    #[inline]
    pub fn min(&self) -> Point2D<T, U> {
        self.min
    }

    /// Get this AABB's max.
    #[inline]
    pub fn max(&self) -> Point2D<T, U> {
        self.max
    }

    /// Is this the empty AABB?
    ///
    /// Only [`Aabb::empty`] boxes are empty; every box built from vertices
    /// covers at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get this AABB's area.
    ///
    /// The empty AABB has zero area, as does any box degenerated to a point
    /// or a segment.
    pub fn area(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            (self.max.x - self.min.x) * (self.max.y - self.min.y)
        }
    }

    /// Return the least upper bound of `self` and `other`.
    ///
    /// The empty AABB is the identity: joining with it returns the other box
    /// unchanged.
    #[inline]
    pub fn join(&self, other: &Aabb<T, U>) -> Aabb<T, U> {
        let min = Point2D::new(
            partial_min(self.min.x, other.min.x),
            partial_min(self.min.y, other.min.y),
        );
        let max = Point2D::new(
            partial_max(self.max.x, other.max.x),
            partial_max(self.max.y, other.max.y),
        );
        Aabb { min, max }
    }

    /// How much would this AABB's area grow to accommodate `other`?
    #[inline]
    pub fn enlargement(&self, other: &Aabb<T, U>) -> T {
        self.join(other).area() - self.area()
    }

    /// Does `self` contain `other`?
    pub fn contains(&self, other: &Aabb<T, U>) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Does `self` contain the given point?
    ///
    /// Containment is closed: points on the boundary count.
    pub fn contains_point(&self, point: Point2D<T, U>) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Does `self` intersect with `other`?
    ///
    /// Intersection is closed: boxes that merely touch along an edge or at a
    /// corner count as intersecting. The empty AABB intersects nothing.
    ///
    /// ```
    /// use cull_aabb::Aabb;
    /// use euclid::point2;
    ///
    /// let a = Aabb::<f64>::new(point2(0.0, 0.0), point2(1.0, 1.0));
    /// let b = Aabb::<f64>::new(point2(1.0, 1.0), point2(2.0, 2.0));
    /// let c = Aabb::<f64>::new(point2(3.0, 3.0), point2(4.0, 4.0));
    ///
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Aabb<T, U>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

impl<T, U> Aabb<T, U>
where
    T: Copy + Num + Bounded + PartialOrd,
{
    /// The empty AABB.
    ///
    /// Covers no points, has zero area, and acts as the identity for
    /// [`Aabb::join`].
    ///
    /// ```
    /// use cull_aabb::Aabb;
    /// use euclid::point2;
    ///
    /// let a = Aabb::<f64>::new(point2(1.0, 2.0), point2(3.0, 4.0));
    ///
    /// assert_eq!(Aabb::empty().join(&a), a);
    /// assert_eq!(Aabb::<f64>::empty().area(), 0.0);
    /// ```
    pub fn empty() -> Aabb<T, U> {
        Aabb {
            min: point2(T::max_value(), T::max_value()),
            max: point2(T::min_value(), T::min_value()),
        }
    }
}

/// Things that have an axis-aligned bounding box.
///
/// While we can construct an AABB from anything with vertices,
/// implementations of this trait are intended to be the fastest way to get
/// an AABB for the given `Self` type.
pub trait ToAabb<T, U> {
    /// Get the axis-aligned bounding box for `self`.
    fn to_aabb(&self) -> Aabb<T, U>;
}
