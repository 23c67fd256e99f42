//! scanregions - composable two-dimensional regions for filtering scan points.
//!
//! Regions are built once from geometric leaves ([`Rectangle`], [`Circle`])
//! combined with set operators, then evaluated against any number of
//! position maps to produce a boolean [`Mask`] per candidate sample.
//!
//! ```ignore
//! use ndarray::array;
//! use scanregions::{Circle, PositionMap, Rectangle};
//!
//! let area = Rectangle::new("x", "y", 0.0, 10.0, 0.0, 5.0) - Circle::new("x", "y", 5.0, 2.5, 1.0);
//! let positions = PositionMap::from([("x", array![1.0, 5.0]), ("y", array![1.0, 2.5])]);
//! assert_eq!(area.mask(&positions)?, array![true, false]);
//! ```

pub mod regions;
pub mod units;

pub use regions::{
    AxisKey, Circle, Mask, MaskConfig, PositionMap, Rectangle, Region, RegionError, RegionNode,
};
