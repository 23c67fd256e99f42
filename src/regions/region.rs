//! Core region trait for computing membership masks.

use super::config::MaskConfig;
use super::error::RegionError;
use super::key::{AxisKey, Mask, PositionMap};
use std::fmt::Debug;

/// Computes which candidate samples fall inside a two-dimensional area.
///
/// Regions compose via combinators ([`RegionNode`](crate::regions::RegionNode))
/// to form trees of union, intersection and difference logic.
///
/// # Contract
///
/// Implementations should:
/// - Return one boolean per sample, after broadcasting the axes they read
/// - Be deterministic for identical inputs and keep no state between calls
/// - Fail with [`RegionError::MissingAxisKey`] rather than assume a default
pub trait Region<K: AxisKey>: Send + Sync + Debug {
    /// Computes the membership mask for every sample in `positions`.
    fn mask(&self, positions: &PositionMap<K>) -> Result<Mask, RegionError>;

    /// Computes the mask as part of a larger tree evaluated with `config`.
    ///
    /// Leaf shapes ignore the config; regions that are themselves trees
    /// override this to carry the caller's settings down.
    fn mask_with(&self, positions: &PositionMap<K>, _config: &MaskConfig) -> Result<Mask, RegionError> {
        self.mask(positions)
    }

    /// Axis keys this region reads from a position map.
    fn axis_keys(&self) -> Vec<K>;

    /// Returns a string representation of this region.
    fn stringify(&self) -> String;

    /// Prints this region to stdout.
    fn print(&self) {
        println!("{}", self.stringify());
    }
}
