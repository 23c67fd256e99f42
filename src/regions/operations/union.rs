use crate::regions::error::RegionError;
use crate::regions::key::{zip_with, Mask};

/// Samples selected by either mask.
pub fn combine_union(
    left: &Mask,
    right: &Mask,
    region: impl Fn() -> String,
) -> Result<Mask, RegionError> {
    zip_with(left.view(), right.view(), region, |l: bool, r: bool| l || r)
}
