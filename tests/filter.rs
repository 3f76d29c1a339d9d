#[macro_use]
extern crate quickcheck;

use cull::geom::InvalidPolygon;
use cull::{
    bounding_box, build_index, find_intersecting_hulls, find_overlapping_pairs, intersection,
    search_overlaps, Error, IndexedBox, Point2, TreeNode, INTERIOR_NODE,
};
use euclid::point2;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn brute_force_pairs(entries: &[IndexedBox]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..entries.len() {
        for j in i + 1..entries.len() {
            let a = &entries[i];
            let b = &entries[j];
            if a.min_x <= b.max_x
                && b.min_x <= a.max_x
                && a.min_y <= b.max_y
                && b.min_y <= a.max_y
            {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Collect the depth of every entry node in a serialized tree, checking the
/// sentinel convention along the way.
fn entry_depths(node: &TreeNode, depth: usize, out: &mut Vec<usize>) {
    if node.children.is_empty() {
        assert_ne!(node.value, INTERIOR_NODE, "leaf entries carry the caller id");
        out.push(depth);
    } else {
        assert_eq!(node.value, INTERIOR_NODE, "non-entry nodes carry the sentinel");
        for child in &node.children {
            entry_depths(child, depth + 1, out);
        }
    }
}

/// Check the fanout of every node that directly holds entries.
fn check_leaf_fanout(node: &TreeNode, max_children: usize) {
    if node.children.is_empty() {
        return;
    }
    let holds_entries = node.children.iter().all(|c| c.children.is_empty());
    if holds_entries {
        assert!(!node.children.is_empty());
        assert!(node.children.len() <= max_children);
    } else {
        for child in &node.children {
            check_leaf_fanout(child, max_children);
        }
    }
}

fn close(a: Point2, b: Point2) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

#[test]
fn bounding_box_of_apexes() {
    let bb = bounding_box(&[point2(1.0, 3.0), point2(0.0, 4.0), point2(2.0, 2.0)]).unwrap();
    assert_eq!(bb.min(), point2(0.0, 2.0));
    assert_eq!(bb.max(), point2(2.0, 4.0));

    match bounding_box(&[]) {
        Err(Error::NoPoints) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match bounding_box(&[point2(0.0, 0.0), point2(std::f64::NAN, 1.0)]) {
        Err(Error::NonFinitePoint { index: 1 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn intersection_of_crossing_triangles() {
    let a = vec![point2(0.0, 0.0), point2(1.0, 0.0), point2(1.0, 1.0)];
    let e = vec![point2(0.0, 1.0), point2(1.0, 0.0), point2(1.0, 1.0)];
    let points = intersection(&a, &e).unwrap();

    let expected = [
        point2(1.0, 0.0),
        point2(1.0, 1.0),
        point2(0.5, 0.5),
    ];
    assert_eq!(points.len(), expected.len());
    let n = points.len();
    let rotated = (0..n).any(|r| (0..n).all(|k| close(points[(r + k) % n], expected[k])));
    assert!(rotated, "expected a rotation of {:?}, got {:?}", expected, points);
}

#[test]
fn intersection_of_squares_sharing_an_edge() {
    // Degenerate contact: the shared edge comes back as its two end points.
    let a = vec![
        point2(0.0, 0.0),
        point2(1.0, 0.0),
        point2(1.0, 1.0),
        point2(0.0, 1.0),
    ];
    let e = vec![
        point2(1.0, 0.0),
        point2(2.0, 0.0),
        point2(2.0, 1.0),
        point2(1.0, 1.0),
    ];
    let points = intersection(&a, &e).unwrap();
    assert_eq!(points.len(), 2);
    for expected in &[point2(1.0, 0.0), point2(1.0, 1.0)] {
        assert!(points.iter().any(|p| close(*p, *expected)));
    }
}

#[test]
fn intersection_rejects_bad_hulls() {
    let triangle = vec![point2(0.0, 0.0), point2(1.0, 0.0), point2(1.0, 1.0)];
    match intersection(&[point2(0.0, 0.0), point2(1.0, 0.0)], &triangle) {
        Err(Error::InvalidHull {
            index: 0,
            cause: InvalidPolygon::TooFewVertices,
        }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let clockwise = vec![point2(0.0, 1.0), point2(1.0, 1.0), point2(1.0, 0.0)];
    match intersection(&triangle, &clockwise) {
        Err(Error::InvalidHull {
            index: 1,
            cause: InvalidPolygon::NotCounterClockwise,
        }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn disjoint_entries_have_no_pairs() {
    let entries = [
        IndexedBox::new(0, 0.0, 0.0, 1.0, 1.0),
        IndexedBox::new(1, 2.0, 2.0, 3.0, 3.0),
    ];
    assert_eq!(find_overlapping_pairs(1, 2, &entries).unwrap(), vec![]);
}

#[test]
fn chained_entries_pair_up_consecutively() {
    // Unit boxes along the diagonal, each touching the next at one corner.
    let entries: Vec<IndexedBox> = (0..5)
        .map(|i| {
            let f = f64::from(i);
            IndexedBox::new(i64::from(i), f, f, f + 1.0, f + 1.0)
        })
        .collect();

    let pairs = find_overlapping_pairs(1, 3, &entries).unwrap();
    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);

    let tree = build_index(1, 3, &entries).unwrap();
    let mut depths = Vec::new();
    entry_depths(&tree, 0, &mut depths);
    assert_eq!(depths.len(), entries.len());
    assert!(depths.windows(2).all(|w| w[0] == w[1]));
    assert!(depths[0] == 2 || depths[0] == 3, "tree depth was {}", depths[0]);
    check_leaf_fanout(&tree, 3);
}

#[test]
fn search_overlaps_reports_ids() {
    let entries = [
        IndexedBox::new(10, 0.0, 0.0, 2.0, 2.0),
        IndexedBox::new(20, 1.0, 1.0, 3.0, 3.0),
        IndexedBox::new(30, 10.0, 10.0, 12.0, 12.0),
    ];
    let queries = [
        [1.5, 1.5, 1.6, 1.6],
        [-1.0, -1.0, 0.0, 0.0],
        [4.0, 4.0, 9.0, 9.0],
    ];
    let mut results = search_overlaps(2, 4, &entries, &queries).unwrap();
    for found in &mut results {
        found.sort();
    }
    assert_eq!(results, vec![vec![10, 20], vec![10], vec![]]);
}

#[test]
fn hull_pairs_survive_the_exact_test() {
    // The second and third hulls have overlapping bounding boxes but are
    // geometrically disjoint, so only the crossing pair is reported.
    let hulls: Vec<Vec<Point2>> = vec![
        vec![point2(0.0, 0.0), point2(1.0, 0.0), point2(1.0, 1.0)],
        vec![point2(0.0, 1.0), point2(1.0, 0.0), point2(1.0, 1.0)],
        vec![point2(2.0, 0.0), point2(4.0, 0.0), point2(2.0, 2.0)],
        vec![point2(4.0, 1.0), point2(4.0, 2.0), point2(3.0, 2.0)],
    ];
    assert_eq!(find_intersecting_hulls(2, 4, &hulls).unwrap(), vec![(0, 1)]);
}

#[test]
fn touching_hulls_count_as_intersecting() {
    let hulls: Vec<Vec<Point2>> = vec![
        vec![
            point2(0.0, 0.0),
            point2(1.0, 0.0),
            point2(1.0, 1.0),
            point2(0.0, 1.0),
        ],
        vec![
            point2(1.0, 0.0),
            point2(2.0, 0.0),
            point2(2.0, 1.0),
            point2(1.0, 1.0),
        ],
    ];
    assert_eq!(find_intersecting_hulls(1, 2, &hulls).unwrap(), vec![(0, 1)]);
}

#[test]
fn no_hulls_no_pairs() {
    assert_eq!(find_intersecting_hulls(2, 4, &[]).unwrap(), vec![]);
}

#[test]
fn branching_parameters_are_validated() {
    let entries = [IndexedBox::new(0, 0.0, 0.0, 1.0, 1.0)];
    for (min_children, max_children) in vec![(0, 4), (2, 1), (3, 4), (5, 8)] {
        match build_index(min_children, max_children, &entries) {
            Err(Error::InvalidBranching { .. }) => {}
            other => panic!(
                "({}, {}) should be rejected, got {:?}",
                min_children, max_children, other
            ),
        }
    }
    // The original driver runs the index as small as it gets.
    assert!(build_index(1, 2, &entries).is_ok());
    assert!(build_index(5, 10, &entries).is_ok());
}

#[test]
fn entries_are_validated() {
    match build_index(2, 4, &[]) {
        Err(Error::NoEntries) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let inverted = [IndexedBox::new(0, 1.0, 0.0, 0.0, 1.0)];
    match build_index(2, 4, &inverted) {
        Err(Error::InvalidEntry { index: 0 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let entries = [IndexedBox::new(0, 0.0, 0.0, 1.0, 1.0)];
    match search_overlaps(2, 4, &entries, &[[0.0, 0.0, -1.0, 1.0]]) {
        Err(Error::InvalidQuery { index: 0 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn singleton_index_serializes_to_a_leaf_root() {
    let entries = [IndexedBox::new(7, 0.0, 0.0, 1.0, 2.0)];
    let tree = build_index(2, 4, &entries).unwrap();
    assert_eq!(tree.value, INTERIOR_NODE);
    assert_eq!(tree.bb, [0.0, 0.0, 1.0, 2.0]);
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].value, 7);
    assert_eq!(tree.children[0].bb, [0.0, 0.0, 1.0, 2.0]);
    assert!(tree.children[0].children.is_empty());
}

#[test]
fn serialized_tree_round_trips_through_json() {
    let entries = [
        IndexedBox::new(0, 0.0, 0.0, 1.0, 1.0),
        IndexedBox::new(1, 1.0, 1.0, 2.0, 2.0),
        IndexedBox::new(2, 2.0, 2.0, 3.0, 3.0),
    ];
    let tree = build_index(1, 2, &entries).unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    let back: TreeNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value["value"], serde_json::json!(-1));
    assert_eq!(value["bb"], serde_json::json!([0.0, 0.0, 3.0, 3.0]));
}

#[test]
fn bulk_insert_stability() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let entries: Vec<IndexedBox> = (0..100i64)
        .map(|i| {
            let x = rng.gen_range(0.0, 90.0);
            let y = rng.gen_range(0.0, 90.0);
            let w = rng.gen_range(0.0, 10.0);
            let h = rng.gen_range(0.0, 10.0);
            IndexedBox::new(i, x, y, x + w, y + h)
        })
        .collect();

    let pairs = find_overlapping_pairs(5, 10, &entries).unwrap();
    assert_eq!(pairs, brute_force_pairs(&entries));

    // Probing with each entry's own box always finds at least that entry.
    let queries: Vec<[f64; 4]> = entries
        .iter()
        .map(|e| [e.min_x, e.min_y, e.max_x, e.max_y])
        .collect();
    let results = search_overlaps(5, 10, &entries, &queries).unwrap();
    for (i, found) in results.iter().enumerate() {
        assert!(found.contains(&entries[i].id));
    }

    let tree = build_index(5, 10, &entries).unwrap();
    let mut depths = Vec::new();
    entry_depths(&tree, 0, &mut depths);
    assert_eq!(depths.len(), entries.len());
    assert!(depths.windows(2).all(|w| w[0] == w[1]));
    check_leaf_fanout(&tree, 10);
}

#[derive(Clone, Debug)]
struct ArbitraryEntry(IndexedBox);

impl quickcheck::Arbitrary for ArbitraryEntry {
    fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> ArbitraryEntry {
        let x = g.gen_range(-50.0, 50.0);
        let y = g.gen_range(-50.0, 50.0);
        let w = g.gen_range(0.0, 10.0);
        let h = g.gen_range(0.0, 10.0);
        ArbitraryEntry(IndexedBox::new(g.gen_range(0, 1000), x, y, x + w, y + h))
    }
}

quickcheck! {
    fn pair_search_matches_brute_force(entries: Vec<ArbitraryEntry>) -> bool {
        let entries: Vec<IndexedBox> = entries.into_iter().map(|e| e.0).collect();
        find_overlapping_pairs(2, 4, &entries).unwrap() == brute_force_pairs(&entries)
    }
}
