use crate::regions::error::RegionError;
use crate::regions::key::{zip_with, Mask};

/// Samples selected by `left` and not by `right`.
///
/// `right` is only consulted where `left` is set; everywhere else the result
/// is `false` whatever `right` holds.
pub fn combine_difference(
    left: &Mask,
    right: &Mask,
    region: impl Fn() -> String,
) -> Result<Mask, RegionError> {
    zip_with(left.view(), right.view(), region, |l: bool, r: bool| {
        l && !r
    })
}
