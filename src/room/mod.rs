//! Room Model Module
//!
//! Dimensions, material layers, and the fail-soft input rules that
//! keep every stored value non-negative.

mod input;
mod layer;
mod model;

pub use input::{
    clamp_wall_count, coerce_non_negative, coerce_wall_count, parse_non_negative, NumberInput,
};
pub use layer::{LayerId, LayerPatch, MaterialLayer};
pub use model::{Dimension, RoomModel, RoomSpec};
