//! Unit conversion for angular quantities.
//!
//! Region parameters that carry a physical dimension are typed with [`qtty`]
//! quantities. Rectangles take their rotation in degrees, while the
//! trigonometry runs on radians; the helpers here convert between units of
//! the same dimension with the mismatch caught at compile time.

use qtty::{Degree, Quantity, Radian, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// Automatically implemented for any pair of units where
/// `From::Dim == To::Dim`.
///
/// # Example
///
/// ```ignore
/// use qtty::{Degree, Radian};
/// use scanregions::units::SameDim;
///
/// fn accepts_same_dim<From, To>()
/// where
///     From: SameDim<To>,
/// {}
///
/// accepts_same_dim::<Degree, Radian>(); // OK
/// // accepts_same_dim::<Degree, Meter>(); // Error: different dimensions
/// ```
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Builds an angle from a raw value in degrees.
#[inline]
pub fn degrees(value: f64) -> Quantity<Degree> {
    Quantity::new(value)
}

/// Radian value of an angle, ready for `f64` trigonometry.
#[inline]
pub fn radians_of(angle: Quantity<Degree>) -> f64 {
    convert::<Degree, Radian>(angle).value()
}
