//! # `cull`: pairwise convex polygon intersection, filtered by an R-tree
//!
//! Given a collection of convex polygons ("hulls"), find the pairs that
//! actually intersect without running the exact polygon–polygon test on all
//! `n * (n - 1) / 2` pairs: an R-tree over the hulls' axis-aligned bounding
//! boxes prunes the candidate set first, and only pairs whose boxes overlap
//! get the exact test.
//!
//! ```
//! use cull::find_intersecting_hulls;
//! use euclid::point2;
//!
//! let hulls = vec![
//!     vec![point2(0.0, 0.0), point2(1.0, 0.0), point2(1.0, 1.0)],
//!     vec![point2(0.0, 1.0), point2(1.0, 0.0), point2(1.0, 1.0)],
//!     vec![point2(5.0, 5.0), point2(6.0, 5.0), point2(6.0, 6.0)],
//! ];
//!
//! let pairs = find_intersecting_hulls(2, 4, &hulls)?;
//! assert_eq!(pairs, vec![(0, 1)]);
//! # Ok::<(), cull::Error>(())
//! ```

#![deny(missing_docs, missing_debug_implementations)]

// Re-exports of our public dependencies.
pub use cull_2d_geom as geom;
pub use cull_aabb as aabb;
pub use euclid;
pub use failure;

use cull_2d_geom::InvalidPolygon;
use failure::Fail;

mod filter;

pub use crate::filter::{
    bounding_box, build_index, find_intersecting_hulls, find_overlapping_pairs, intersection,
    search_overlaps, HullSpace, IndexedBox, Point2, TreeNode, INTERIOR_NODE,
};

/// Either an `Ok(T)` or an `Err(cull::Error)`.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors reported at the public API boundary.
///
/// Every operation validates its arguments up front, so a failed call never
/// leaves a partially built index behind.
#[derive(Debug, Fail)]
pub enum Error {
    /// The branching parameters do not describe a valid R-tree.
    #[fail(
        display = "invalid branching: min_children = {}, max_children = {}; \
                   need max_children >= 2 and 1 <= min_children <= ceil(max_children / 2)",
        min_children, max_children
    )]
    InvalidBranching {
        /// The requested minimum number of children per node.
        min_children: usize,
        /// The requested maximum number of children per node.
        max_children: usize,
    },

    /// A bounding box was requested for zero points.
    #[fail(display = "cannot compute the bounding box of zero points")]
    NoPoints,

    /// An index was requested for zero entries.
    #[fail(display = "cannot build an index over zero entries")]
    NoEntries,

    /// A point coordinate was NaN or infinite.
    #[fail(display = "point {} has a non-finite coordinate", index)]
    NonFinitePoint {
        /// The offending point's position in its input sequence.
        index: usize,
    },

    /// An entry's box was inverted or had a non-finite coordinate.
    #[fail(display = "entry {} does not hold a valid bounding box", index)]
    InvalidEntry {
        /// The offending entry's position in its input sequence.
        index: usize,
    },

    /// A query box was inverted or had a non-finite coordinate.
    #[fail(display = "query {} does not hold a valid bounding box", index)]
    InvalidQuery {
        /// The offending query's position in its input sequence.
        index: usize,
    },

    /// A vertex list did not describe a convex polygon.
    #[fail(display = "hull {} is invalid: {}", index, cause)]
    InvalidHull {
        /// The offending hull's position in its input sequence.
        index: usize,
        /// What exactly was wrong with it.
        #[fail(cause)]
        cause: InvalidPolygon,
    },
}
