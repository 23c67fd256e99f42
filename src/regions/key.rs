//! Axis keys, position maps and the broadcasting rules shared by every region.

use super::error::RegionError;
use ndarray::{ArrayView1, Zip};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier naming a coordinate axis (a motor, a dimension, ...).
///
/// Automatically implemented for every type that is comparable, hashable,
/// printable and shareable across threads, so `&'static str`, `String` or a
/// user enum can all be used as keys.
pub trait AxisKey: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<K> AxisKey for K where K: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

/// Candidate coordinates, one array per axis.
pub type PositionMap<K> = HashMap<K, ndarray::Array1<f64>>;

/// One boolean per candidate sample.
pub type Mask = ndarray::Array1<bool>;

/// Looks up the coordinates for `key`, failing if the axis is absent.
pub(crate) fn lookup<'a, K: AxisKey>(
    positions: &'a PositionMap<K>,
    key: &K,
    region: impl Fn() -> String,
) -> Result<ArrayView1<'a, f64>, RegionError> {
    positions
        .get(key)
        .map(|values| values.view())
        .ok_or_else(|| RegionError::MissingAxisKey {
            region: region(),
            key: format!("{key:?}"),
        })
}

/// Length two operands broadcast to: equal lengths, or one side of length 1.
pub(crate) fn broadcast_len(left: usize, right: usize) -> Option<usize> {
    match (left, right) {
        (l, r) if l == r => Some(l),
        (1, r) => Some(r),
        (l, 1) => Some(l),
        _ => None,
    }
}

/// Applies `f` element-wise over two broadcast-compatible arrays.
pub(crate) fn zip_with<A, B, F>(
    left: ArrayView1<'_, A>,
    right: ArrayView1<'_, B>,
    region: impl Fn() -> String,
    f: F,
) -> Result<Mask, RegionError>
where
    A: Copy,
    B: Copy,
    F: Fn(A, B) -> bool,
{
    let mismatch = || RegionError::ShapeMismatch {
        region: region(),
        left: left.len(),
        right: right.len(),
    };
    let len = broadcast_len(left.len(), right.len()).ok_or_else(mismatch)?;
    let left_b = left.broadcast(len).ok_or_else(mismatch)?;
    let right_b = right.broadcast(len).ok_or_else(mismatch)?;

    Ok(Zip::from(left_b)
        .and(right_b)
        .map_collect(|&a, &b| f(a, b)))
}

/// Largest array length among the axes in `keys`; used to size parallel work.
pub(crate) fn sample_count<'k, K: AxisKey>(
    positions: &PositionMap<K>,
    keys: impl IntoIterator<Item = &'k K>,
) -> usize {
    keys.into_iter()
        .filter_map(|key| positions.get(key))
        .map(|values| values.len())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn lookup_present_key() {
        let positions = PositionMap::from([("x", array![1.0, 2.0])]);
        let x = lookup(&positions, &"x", || "test".to_string()).unwrap();
        assert_eq!(x.len(), 2);
    }

    #[test]
    fn lookup_missing_key_names_region_and_key() {
        let positions = PositionMap::from([("x", array![1.0])]);
        let err = lookup(&positions, &"z", || "Rect".to_string()).unwrap_err();
        assert_eq!(
            err,
            RegionError::MissingAxisKey {
                region: "Rect".to_string(),
                key: "\"z\"".to_string(),
            }
        );
    }

    #[test]
    fn broadcast_rules() {
        assert_eq!(broadcast_len(3, 3), Some(3));
        assert_eq!(broadcast_len(1, 4), Some(4));
        assert_eq!(broadcast_len(4, 1), Some(4));
        assert_eq!(broadcast_len(0, 0), Some(0));
        assert_eq!(broadcast_len(2, 3), None);
    }

    #[test]
    fn zip_with_broadcasts_scalar_operand() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![2.0];
        let mask = zip_with(a.view(), b.view(), || "test".to_string(), |x: f64, y: f64| x >= y).unwrap();
        assert_eq!(mask, array![false, true, true]);
    }

    #[test]
    fn zip_with_rejects_incompatible_lengths() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![1.0, 2.0];
        let err = zip_with(a.view(), b.view(), || "test".to_string(), |x: f64, y: f64| x == y).unwrap_err();
        assert!(matches!(
            err,
            RegionError::ShapeMismatch {
                left: 3,
                right: 2,
                ..
            }
        ));
    }

    #[test]
    fn sample_count_takes_longest_read_axis() {
        let positions = PositionMap::from([
            ("x", array![1.0, 2.0, 3.0]),
            ("y", array![1.0]),
            ("unused", ndarray::Array1::from_elem(100, 0.0)),
        ]);
        assert_eq!(sample_count(&positions, &["x", "y"]), 3);
        assert_eq!(sample_count(&positions, &["y", "missing"]), 1);
        assert_eq!(sample_count(&PositionMap::<&str>::new(), &["x"]), 0);
    }
}
