//! Material Layers
//!
//! A layer is one material or finish applied to some subset of the room's
//! surfaces. Coverage of walls is a count (0-4), not an assignment to
//! particular walls.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::input::{coerce_non_negative, coerce_wall_count, NumberInput};
use crate::config::LayerDefaults;

/// Stable identity of a layer, assigned from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// A material layer with its price and surface coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    pub id: LayerId,
    /// Display-only free text
    pub name: String,
    /// Price per square meter
    pub unit_price: f64,
    /// How many of the four walls this layer covers (0..=4)
    pub wall_count: u8,
    pub applies_floor: bool,
    pub applies_ceiling: bool,
    /// Price of one package, used with `package_area` to derive `unit_price`
    pub package_unit_price: Option<f64>,
    /// Area covered by one package
    pub package_area: Option<f64>,
    /// Openings (doors, windows) subtracted from the covered area
    pub exclusion_area: f64,
}

impl MaterialLayer {
    /// Build a layer from the configured defaults, then apply `initial`.
    pub(crate) fn new(id: LayerId, defaults: &LayerDefaults, initial: &LayerPatch) -> Self {
        let mut layer = Self {
            id,
            name: defaults.name.clone(),
            unit_price: 0.0,
            wall_count: defaults.wall_count.min(4),
            applies_floor: defaults.applies_floor,
            applies_ceiling: defaults.applies_ceiling,
            package_unit_price: None,
            package_area: None,
            exclusion_area: 0.0,
        };
        layer.apply(initial);
        layer
    }

    /// Apply a patch, sanitizing every numeric field.
    ///
    /// When a positive package area is set afterwards, `unit_price` is
    /// re-derived from the package fields and any manual price is replaced.
    pub fn apply(&mut self, patch: &LayerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = &patch.unit_price {
            self.unit_price = price.coerce();
        }
        if let Some(count) = &patch.wall_count {
            self.wall_count = coerce_wall_count(count);
        }
        if let Some(floor) = patch.applies_floor {
            self.applies_floor = floor;
        }
        if let Some(ceiling) = patch.applies_ceiling {
            self.applies_ceiling = ceiling;
        }
        if let Some(price) = &patch.package_unit_price {
            self.package_unit_price = Some(price.coerce());
        }
        if let Some(area) = &patch.package_area {
            self.package_area = Some(area.coerce());
        }
        if let Some(area) = &patch.exclusion_area {
            self.exclusion_area = area.coerce();
        }
        self.derive_unit_price();
    }

    /// True when `unit_price` comes from the package fields.
    pub fn is_package_priced(&self) -> bool {
        self.package_area.is_some_and(|area| area > 0.0)
    }

    fn derive_unit_price(&mut self) {
        if let Some(area) = self.package_area.filter(|area| *area > 0.0) {
            let package_price = self.package_unit_price.unwrap_or(0.0);
            self.unit_price = coerce_non_negative(package_price / area);
        }
    }
}

/// A partial update of a layer's fields
///
/// Unset fields are left untouched. Also used as the initial value
/// for a newly added layer. Numeric fields take raw input, so a JSON
/// patch with `"12"` or `"abc"` still parses and coerces on apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub unit_price: Option<NumberInput>,
    /// Fractional counts are truncated, then clamped to 0..=4
    pub wall_count: Option<NumberInput>,
    pub applies_floor: Option<bool>,
    pub applies_ceiling: Option<bool>,
    pub package_unit_price: Option<NumberInput>,
    pub package_area: Option<NumberInput>,
    pub exclusion_area: Option<NumberInput>,
}

impl LayerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price.into());
        self
    }

    pub fn wall_count(mut self, count: i64) -> Self {
        self.wall_count = Some(NumberInput::Number(count as f64));
        self
    }

    pub fn applies_floor(mut self, floor: bool) -> Self {
        self.applies_floor = Some(floor);
        self
    }

    pub fn applies_ceiling(mut self, ceiling: bool) -> Self {
        self.applies_ceiling = Some(ceiling);
        self
    }

    pub fn package(mut self, unit_price: f64, area: f64) -> Self {
        self.package_unit_price = Some(unit_price.into());
        self.package_area = Some(area.into());
        self
    }

    pub fn exclusion_area(mut self, area: f64) -> Self {
        self.exclusion_area = Some(area.into());
        self
    }
}
