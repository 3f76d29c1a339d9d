//! The filtering pipeline: bounding boxes, the index over them, and the
//! pairwise intersection search.

use crate::{Error, Result};
use cull_2d_geom::ConvexPolygon;
use cull_aabb::{Aabb, NodeChildren, NodeRef, RTree, ToAabb};
use euclid::point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unit for hull coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HullSpace;

/// A point in hull space.
pub type Point2 = euclid::Point2D<f64, HullSpace>;

/// A caller-supplied index entry: an identifier plus its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexedBox {
    /// The caller's identifier for this box.
    pub id: i64,
    /// The box's smallest x coordinate.
    pub min_x: f64,
    /// The box's smallest y coordinate.
    pub min_y: f64,
    /// The box's largest x coordinate.
    pub max_x: f64,
    /// The box's largest y coordinate.
    pub max_y: f64,
}

impl IndexedBox {
    /// Construct an entry from an identifier and corner coordinates.
    pub fn new(id: i64, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> IndexedBox {
        IndexedBox {
            id,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn validate(&self, index: usize) -> Result<Aabb<f64, HullSpace>> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        if !finite || self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(Error::InvalidEntry { index });
        }
        Ok(Aabb::new(
            point2(self.min_x, self.min_y),
            point2(self.max_x, self.max_y),
        ))
    }
}

/// One node of a serialized index, as returned by [`build_index`].
///
/// A leaf entry becomes a node with no children whose `value` is the
/// entry's id; every other node carries [`INTERIOR_NODE`] as its `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The entry's identifier, or [`INTERIOR_NODE`].
    pub value: i64,
    /// The node's bounding box as `[min_x, min_y, max_x, max_y]`.
    pub bb: [f64; 4],
    /// The node's children; empty for leaf entries.
    pub children: Vec<TreeNode>,
}

/// The `value` given to every non-entry node in a serialized tree.
///
/// It is a sentinel and carries no information.
pub const INTERIOR_NODE: i64 = -1;

fn check_branching(min_children: usize, max_children: usize) -> Result<()> {
    if max_children < 2 || min_children < 1 || min_children > (max_children + 1) / 2 {
        return Err(Error::InvalidBranching {
            min_children,
            max_children,
        });
    }
    Ok(())
}

fn validate_entries(entries: &[IndexedBox]) -> Result<Vec<Aabb<f64, HullSpace>>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.validate(index))
        .collect()
}

fn build_tree<V>(
    min_children: usize,
    max_children: usize,
    boxes: impl IntoIterator<Item = (Aabb<f64, HullSpace>, V)>,
) -> RTree<f64, HullSpace, V> {
    let mut tree = RTree::new(min_children, max_children);
    for (bb, value) in boxes {
        tree.insert(bb, value);
    }
    tree
}

fn hull(index: usize, apexes: &[Point2]) -> Result<ConvexPolygon<HullSpace>> {
    ConvexPolygon::new(apexes.to_vec()).map_err(|cause| Error::InvalidHull { index, cause })
}

/// Compute the axis-aligned bounding box of a non-empty point sequence.
///
/// # Example
///
/// ```
/// use cull::bounding_box;
/// use euclid::point2;
///
/// let bb = bounding_box(&[
///     point2(1.0, 3.0),
///     point2(0.0, 4.0),
///     point2(2.0, 2.0),
/// ])?;
///
/// assert_eq!(bb.min(), point2(0.0, 2.0));
/// assert_eq!(bb.max(), point2(2.0, 4.0));
/// # Ok::<(), cull::Error>(())
/// ```
pub fn bounding_box(apexes: &[Point2]) -> Result<Aabb<f64, HullSpace>> {
    if apexes.is_empty() {
        return Err(Error::NoPoints);
    }
    if let Some(index) = apexes
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(Error::NonFinitePoint { index });
    }
    Ok(Aabb::for_vertices(apexes.iter().cloned()))
}

/// Compute the intersection polygon of two convex polygons.
///
/// Both polygons must be given counter-clockwise; the first reports
/// validation failures as hull `0`, the second as hull `1`. The returned
/// vertices are in counter-clockwise order. Polygons that merely touch
/// yield their one or two contact points; disjoint polygons yield nothing.
///
/// # Example
///
/// ```
/// use cull::intersection;
/// use euclid::point2;
///
/// let a = vec![point2(0.0, 0.0), point2(2.0, 0.0), point2(2.0, 2.0), point2(0.0, 2.0)];
/// let b = vec![point2(5.0, 5.0), point2(6.0, 5.0), point2(6.0, 6.0)];
///
/// assert!(intersection(&a, &b)?.is_empty());
/// # Ok::<(), cull::Error>(())
/// ```
pub fn intersection(a: &[Point2], b: &[Point2]) -> Result<Vec<Point2>> {
    let a = hull(0, a)?;
    let b = hull(1, b)?;
    Ok(a.intersection(&b).points().to_vec())
}

/// Build an R-tree over the given entries and return it as a nested record.
///
/// Entries are inserted one at a time, in input order. At least one entry is
/// required.
pub fn build_index(
    min_children: usize,
    max_children: usize,
    entries: &[IndexedBox],
) -> Result<TreeNode> {
    check_branching(min_children, max_children)?;
    if entries.is_empty() {
        return Err(Error::NoEntries);
    }
    let boxes = validate_entries(entries)?;
    let tree = build_tree(
        min_children,
        max_children,
        boxes.into_iter().zip(entries.iter().map(|e| e.id)),
    );
    debug!(entries = entries.len(), height = tree.height(), "built index");
    Ok(serialize_node(tree.root()))
}

fn serialize_node(node: NodeRef<f64, HullSpace, i64>) -> TreeNode {
    let children = match node.children() {
        NodeChildren::Entries(entries) => entries
            .iter()
            .map(|entry| TreeNode {
                value: entry.value,
                bb: corners(&entry.bb),
                children: Vec::new(),
            })
            .collect(),
        NodeChildren::Nodes(nodes) => nodes.into_iter().map(serialize_node).collect(),
    };
    TreeNode {
        value: INTERIOR_NODE,
        bb: corners(node.bb()),
        children,
    }
}

fn corners(bb: &Aabb<f64, HullSpace>) -> [f64; 4] {
    [bb.min().x, bb.min().y, bb.max().x, bb.max().y]
}

/// For each query box `[min_x, min_y, max_x, max_y]`, find the ids of the
/// entries whose boxes overlap it.
///
/// Boxes that merely touch count as overlapping. The order of ids within one
/// query's result is not defined, but no id appears twice.
pub fn search_overlaps(
    min_children: usize,
    max_children: usize,
    entries: &[IndexedBox],
    queries: &[[f64; 4]],
) -> Result<Vec<Vec<i64>>> {
    check_branching(min_children, max_children)?;
    let boxes = validate_entries(entries)?;
    let query_boxes = queries
        .iter()
        .enumerate()
        .map(|(index, q)| {
            if q.iter().any(|c| !c.is_finite()) || q[0] > q[2] || q[1] > q[3] {
                Err(Error::InvalidQuery { index })
            } else {
                Ok(Aabb::new(point2(q[0], q[1]), point2(q[2], q[3])))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let tree = build_tree(
        min_children,
        max_children,
        boxes.into_iter().zip(entries.iter().map(|e| e.id)),
    );
    Ok(query_boxes
        .into_iter()
        .map(|q| tree.iter_overlapping(q).map(|(_, id)| *id).collect())
        .collect())
}

/// Find the `i < j` index pairs of entries whose bounding boxes overlap.
///
/// Boxes that merely touch count as overlapping. Pairs come back sorted.
pub fn find_overlapping_pairs(
    min_children: usize,
    max_children: usize,
    entries: &[IndexedBox],
) -> Result<Vec<(usize, usize)>> {
    check_branching(min_children, max_children)?;
    let boxes = validate_entries(entries)?;
    Ok(overlapping_pairs(min_children, max_children, &boxes))
}

fn overlapping_pairs(
    min_children: usize,
    max_children: usize,
    boxes: &[Aabb<f64, HullSpace>],
) -> Vec<(usize, usize)> {
    let tree = build_tree(min_children, max_children, boxes.iter().cloned().zip(0..));
    let mut pairs = Vec::new();
    for (i, bb) in boxes.iter().enumerate() {
        for (_, &j) in tree.iter_overlapping(bb.clone()) {
            if j > i {
                pairs.push((i, j));
            }
        }
    }
    pairs.sort();
    pairs
}

/// Find the pairs of convex hulls that actually intersect.
///
/// Builds an R-tree over the hulls' bounding boxes, probes it for candidate
/// pairs, and only runs the exact convex intersection on those candidates.
/// Hulls that merely touch count as intersecting. The returned `(i, j)`
/// index pairs have `i < j` and come back sorted.
pub fn find_intersecting_hulls(
    min_children: usize,
    max_children: usize,
    hulls: &[Vec<Point2>],
) -> Result<Vec<(usize, usize)>> {
    check_branching(min_children, max_children)?;
    let polygons = hulls
        .iter()
        .enumerate()
        .map(|(index, apexes)| hull(index, apexes))
        .collect::<Result<Vec<_>>>()?;
    let boxes: Vec<_> = polygons.iter().map(|p| p.to_aabb()).collect();

    let candidates = overlapping_pairs(min_children, max_children, &boxes);
    let candidate_count = candidates.len();
    let pairs: Vec<_> = candidates
        .into_iter()
        .filter(|&(i, j)| !polygons[i].intersection(&polygons[j]).is_empty())
        .collect();
    debug!(
        hulls = hulls.len(),
        candidates = candidate_count,
        intersecting = pairs.len(),
        "filtered hull pairs"
    );
    Ok(pairs)
}
