//! Room Model
//!
//! Holds the three room dimensions and the ordered list of material
//! layers. Every write path sanitizes its input, so the model can never
//! hold a negative dimension, price or area. No operation fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::input::{coerce_non_negative, NumberInput};
use super::layer::{LayerId, LayerPatch, MaterialLayer};
use crate::config::LayerDefaults;

/// One of the three room dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Width,
    Height,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Length, Dimension::Width, Dimension::Height];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Length => write!(f, "length"),
            Dimension::Width => write!(f, "width"),
            Dimension::Height => write!(f, "height"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" | "l" => Ok(Dimension::Length),
            "width" | "w" => Ok(Dimension::Width),
            "height" | "h" => Ok(Dimension::Height),
            other => Err(format!("unknown dimension '{}'", other)),
        }
    }
}

/// The room: dimensions in meters plus material layers in insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomModel {
    length: f64,
    width: f64,
    height: f64,
    layers: Vec<MaterialLayer>,
    #[serde(skip)]
    next_id: u64,
    #[serde(skip)]
    defaults: LayerDefaults,
}

impl Default for RoomModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomModel {
    /// Create an empty room with zero dimensions and no layers
    pub fn new() -> Self {
        Self::with_layer_defaults(LayerDefaults::default())
    }

    /// Create an empty room whose new layers start from `defaults`
    pub fn with_layer_defaults(defaults: LayerDefaults) -> Self {
        Self {
            length: 0.0,
            width: 0.0,
            height: 0.0,
            layers: Vec::new(),
            next_id: 1,
            defaults,
        }
    }

    // ========================================================================
    // Dimensions
    // ========================================================================

    /// Set one dimension; negative or non-finite values become 0
    pub fn set_dimension(&mut self, which: Dimension, value: f64) {
        let value = coerce_non_negative(value);
        match which {
            Dimension::Length => self.length = value,
            Dimension::Width => self.width = value,
            Dimension::Height => self.height = value,
        }
        tracing::debug!(dimension = %which, value, "dimension set");
    }

    /// Set one dimension from raw form or JSON input
    pub fn set_dimension_input(&mut self, which: Dimension, value: &NumberInput) {
        self.set_dimension(which, value.coerce());
    }

    pub fn dimension(&self, which: Dimension) -> f64 {
        match which {
            Dimension::Length => self.length,
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Largest of the three dimensions
    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Append a layer built from the defaults plus `initial`
    ///
    /// # Returns
    /// The id assigned to the new layer
    pub fn add_layer(&mut self, initial: LayerPatch) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers
            .push(MaterialLayer::new(id, &self.defaults, &initial));
        tracing::debug!(%id, count = self.layers.len(), "layer added");
        id
    }

    /// Apply a patch to the layer with the given id
    ///
    /// # Returns
    /// `false` if no such layer exists (the model is unchanged)
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.apply(patch);
                tracing::debug!(%id, unit_price = layer.unit_price, "layer updated");
                true
            }
            None => {
                tracing::debug!(%id, "update ignored: unknown layer");
                false
            }
        }
    }

    /// Remove a layer by id, keeping the remaining layers in order
    pub fn remove_layer(&mut self, id: LayerId) -> Option<MaterialLayer> {
        let index = self.index_of(id)?;
        let removed = self.layers.remove(index);
        tracing::debug!(%id, count = self.layers.len(), "layer removed");
        Some(removed)
    }

    pub fn layer(&self, id: LayerId) -> Option<&MaterialLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Position of a layer in the list
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// All layers in insertion order
    pub fn layers(&self) -> &[MaterialLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// A room as described in a JSON input file
///
/// Building goes through the model's own operations, so the file cannot
/// smuggle in values the model would reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSpec {
    pub length: NumberInput,
    pub width: NumberInput,
    pub height: NumberInput,
    pub layers: Vec<LayerPatch>,
}

impl RoomSpec {
    pub fn build(&self, defaults: LayerDefaults) -> RoomModel {
        let mut room = RoomModel::with_layer_defaults(defaults);
        room.set_dimension_input(Dimension::Length, &self.length);
        room.set_dimension_input(Dimension::Width, &self.width);
        room.set_dimension_input(Dimension::Height, &self.height);
        for layer in &self.layers {
            room.add_layer(layer.clone());
        }
        room
    }
}
