use thiserror::Error;

/// Errors raised while building or evaluating a region tree.
///
/// `region` fields carry the textual form of the region that failed, so a
/// malformed tree or mismatched position data can be traced back to its node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("{region} reads axis {key}, which is missing from the positions")]
    MissingAxisKey { region: String, key: String },

    #[error("{region}: arrays of length {left} and {right} cannot be broadcast together")]
    ShapeMismatch {
        region: String,
        left: usize,
        right: usize,
    },

    #[error("{region} has no parameter named {name:?}")]
    UnknownParameter { region: String, name: String },

    #[error("{region} requires parameter {name:?}")]
    MissingParameter { region: String, name: String },
}
