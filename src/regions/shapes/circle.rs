use super::Params;
use crate::regions::error::RegionError;
use crate::regions::key::{lookup, zip_with, AxisKey, Mask, PositionMap};
use crate::regions::region::Region;
use std::fmt::Display;

/// Disc of a given radius; samples on the circumference are inside.
#[derive(Debug, Clone)]
pub struct Circle<K: AxisKey> {
    x_key: K,
    y_key: K,
    x_centre: f64,
    y_centre: f64,
    radius: f64,
}

impl<K: AxisKey> Circle<K> {
    const FIELDS: &'static [&'static str] = &["x_centre", "y_centre", "radius"];

    /// Alternate spellings accepted by [`Circle::from_params`].
    const ALIASES: &'static [(&'static str, &'static str)] =
        &[("x_center", "x_centre"), ("y_center", "y_centre")];

    pub fn new(x_key: K, y_key: K, x_centre: f64, y_centre: f64, radius: f64) -> Self {
        Self {
            x_key,
            y_key,
            x_centre,
            y_centre,
            radius,
        }
    }

    /// Builds a circle from named parameters.
    ///
    /// `x_center` and `y_center` are accepted in place of `x_centre` and
    /// `y_centre`. If both spellings are given, the `center` value is used.
    pub fn from_params<'a>(
        x_key: K,
        y_key: K,
        params: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, RegionError> {
        let params = Params::resolve("Circle", Self::FIELDS, Self::ALIASES, params)?;
        Ok(Self::new(
            x_key,
            y_key,
            params.required("x_centre")?,
            params.required("y_centre")?,
            params.required("radius")?,
        ))
    }

    pub fn x_key(&self) -> &K {
        &self.x_key
    }

    pub fn y_key(&self) -> &K {
        &self.y_key
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.x_centre, self.y_centre)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl<K: AxisKey> Region<K> for Circle<K> {
    fn mask(&self, positions: &PositionMap<K>) -> Result<Mask, RegionError> {
        let label = || self.stringify();
        let xs = lookup(positions, &self.x_key, label)?;
        let ys = lookup(positions, &self.y_key, label)?;

        let (cx, cy) = (self.x_centre, self.y_centre);
        let radius_sq = self.radius * self.radius;
        let mask = zip_with(xs, ys, label, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= radius_sq
        })?;

        tracing::trace!(
            x_key = ?self.x_key,
            y_key = ?self.y_key,
            samples = mask.len(),
            "evaluated circle"
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

impl<K: AxisKey> Display for Circle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Circle(({:?}, {:?}) centre ({:.3}, {:.3}), radius {:.3})",
            self.x_key, self.y_key, self.x_centre, self.y_centre, self.radius
        )
    }
}
