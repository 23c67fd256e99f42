use super::Params;
use crate::regions::error::RegionError;
use crate::regions::key::{lookup, zip_with, AxisKey, Mask, PositionMap};
use crate::regions::region::Region;
use crate::units::{degrees, radians_of};
use qtty::{Degree, Quantity};
use std::fmt::Display;

/// Axis-aligned box with inclusive bounds, optionally rotated clockwise.
///
/// The rotation pivots on the minimum corner `(x_min, y_min)`, not on the
/// centre of the box. Bounds are taken as given: if `x_min > x_max` the
/// rectangle selects nothing.
#[derive(Debug, Clone)]
pub struct Rectangle<K: AxisKey> {
    x_key: K,
    y_key: K,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    angle: Quantity<Degree>,
}

impl<K: AxisKey> Rectangle<K> {
    const FIELDS: &'static [&'static str] = &["x_min", "x_max", "y_min", "y_max", "angle"];

    pub fn new(x_key: K, y_key: K, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_key,
            y_key,
            x_min,
            x_max,
            y_min,
            y_max,
            angle: degrees(0.0),
        }
    }

    /// Builds a rectangle from named parameters; `angle` defaults to 0.
    pub fn from_params<'a>(
        x_key: K,
        y_key: K,
        params: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, RegionError> {
        let params = Params::resolve("Rectangle", Self::FIELDS, &[], params)?;
        Ok(Self::new(
            x_key,
            y_key,
            params.required("x_min")?,
            params.required("x_max")?,
            params.required("y_min")?,
            params.required("y_max")?,
        )
        .with_angle(degrees(params.optional("angle", 0.0))))
    }

    /// Sets the clockwise rotation about the minimum corner.
    pub fn with_angle(mut self, angle: Quantity<Degree>) -> Self {
        self.angle = angle;
        self
    }

    pub fn x_key(&self) -> &K {
        &self.x_key
    }

    pub fn y_key(&self) -> &K {
        &self.y_key
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    pub fn angle(&self) -> Quantity<Degree> {
        self.angle
    }
}

impl<K: AxisKey> Region<K> for Rectangle<K> {
    fn mask(&self, positions: &PositionMap<K>) -> Result<Mask, RegionError> {
        let label = || self.stringify();
        let xs = lookup(positions, &self.x_key, label)?;
        let ys = lookup(positions, &self.y_key, label)?;

        let (x_min, y_min) = (self.x_min, self.y_min);
        let width = self.x_max - self.x_min;
        let height = self.y_max - self.y_min;
        let inside = move |x: f64, y: f64| (0.0..=width).contains(&x) && (0.0..=height).contains(&y);

        let mask = if self.angle.value() == 0.0 {
            zip_with(xs, ys, label, |x, y| inside(x - x_min, y - y_min))?
        } else {
            // Map world coordinates into the unrotated local frame.
            let (sin, cos) = radians_of(degrees(-self.angle.value())).sin_cos();
            zip_with(xs, ys, label, |x, y| {
                let (dx, dy) = (x - x_min, y - y_min);
                inside(dx * cos - dy * sin, dx * sin + dy * cos)
            })?
        };

        tracing::trace!(
            x_key = ?self.x_key,
            y_key = ?self.y_key,
            samples = mask.len(),
            "evaluated rectangle"
        );
        Ok(mask)
    }

    fn axis_keys(&self) -> Vec<K> {
        vec![self.x_key.clone(), self.y_key.clone()]
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl<K: AxisKey> Display for Rectangle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rectangle({:?} ∈ [{:.3}, {:.3}], {:?} ∈ [{:.3}, {:.3}]",
            self.x_key, self.x_min, self.x_max, self.y_key, self.y_min, self.y_max
        )?;
        if self.angle.value() != 0.0 {
            write!(f, ", angle {:.3}°", self.angle.value())?;
        }
        write!(f, ")")
    }
}
