use crate::regions::error::RegionError;
use crate::regions::key::{zip_with, Mask};

/// Samples selected by exactly one of the masks.
pub fn combine_symmetric_difference(
    left: &Mask,
    right: &Mask,
    region: impl Fn() -> String,
) -> Result<Mask, RegionError> {
    zip_with(left.view(), right.view(), region, |l: bool, r: bool| l ^ r)
}
