//! Geometric leaf regions.
//!
//! | Shape         | Parameters                                        | Boundary  |
//! |---------------|---------------------------------------------------|-----------|
//! | [`Rectangle`] | `x_min`, `x_max`, `y_min`, `y_max`, `angle` (deg) | inclusive |
//! | [`Circle`]    | `x_centre`, `y_centre`, `radius`                  | inclusive |
//!
//! Both can be built directly with `new`, or from named parameters with
//! `from_params`, which resolves alternate field spellings once through an
//! alias table.

mod circle;
mod rectangle;

pub use circle::Circle;
pub use rectangle::Rectangle;

use super::error::RegionError;
use std::collections::HashMap;

/// Named scalar parameters resolved against a shape's canonical field names.
#[derive(Debug)]
pub(crate) struct Params {
    shape: &'static str,
    values: HashMap<&'static str, f64>,
}

impl Params {
    /// Resolves `raw` names through `aliases` and checks each against `fields`.
    ///
    /// A value given under an alias takes precedence over one given under the
    /// canonical name, in whatever order they appear.
    pub(crate) fn resolve<'a>(
        shape: &'static str,
        fields: &[&'static str],
        aliases: &[(&str, &'static str)],
        raw: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, RegionError> {
        // (value, set through an alias)
        let mut resolved: HashMap<&'static str, (f64, bool)> = HashMap::new();
        for (name, value) in raw {
            let (canonical, via_alias) = aliases
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, field)| (*field, true))
                .or_else(|| {
                    fields
                        .iter()
                        .copied()
                        .find(|field| *field == name)
                        .map(|field| (field, false))
                })
                .ok_or_else(|| RegionError::UnknownParameter {
                    region: shape.to_string(),
                    name: name.to_string(),
                })?;
            match resolved.get(canonical) {
                Some(&(_, true)) if !via_alias => {}
                _ => {
                    resolved.insert(canonical, (value, via_alias));
                }
            }
        }
        let values = resolved
            .into_iter()
            .map(|(field, (value, _))| (field, value))
            .collect();
        Ok(Self { shape, values })
    }

    pub(crate) fn required(&self, name: &'static str) -> Result<f64, RegionError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| RegionError::MissingParameter {
                region: self.shape.to_string(),
                name: name.to_string(),
            })
    }

    pub(crate) fn optional(&self, name: &'static str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }
}
