//! Small utility types shared by the `cull` crates.

#![deny(missing_docs)]

use std::cmp;

/// Turn a `T: PartialOrd` and/or `T: PartialEq` into `Ord` and/or `Eq`.
///
/// Geometry code orders floating point keys all over the place: choosing the
/// cheapest subtree to descend into, sorting vertices around a pivot. `f64`
/// is only `PartialOrd`, so wrap the keys in `NoMorePartial`, which asserts
/// that the wrapped values really are comparable. That holds for every key
/// built from finite coordinates.
///
/// # Example
///
/// ```
/// use cull_utils::NoMorePartial;
///
/// let mut keys = vec![NoMorePartial(2.0), NoMorePartial(0.5), NoMorePartial(1.0)];
/// keys.sort();
/// assert_eq!(keys, vec![NoMorePartial(0.5), NoMorePartial(1.0), NoMorePartial(2.0)]);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq, Hash)]
pub struct NoMorePartial<T>(pub T);

impl<T: PartialOrd> cmp::Ord for NoMorePartial<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl<T: PartialEq> cmp::Eq for NoMorePartial<T> {}
