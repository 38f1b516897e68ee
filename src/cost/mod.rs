//! Cost Engine
//!
//! Derives the room's surface areas and prices every material layer.
//!
//! Per layer, in list order:
//! 1. `raw = wall_count * avg_wall + floor? + ceiling?`
//! 2. `effective = max(0, raw - exclusion)`
//! 3. `cost = effective * unit_price`
//!
//! Wall coverage is a count of the four walls, so the average wall area
//! stands in for "this many walls". Exclusions are subtracted once from the
//! aggregate, which lumps several openings into a single value.
//!
//! Every area, cost and total saturates at `f64::MAX`, so huge rooms stay
//! finite and a zero price never meets an infinite area.

use serde::{Deserialize, Serialize};

use crate::room::{LayerId, MaterialLayer, RoomModel};

/// Clamp to `[0, f64::MAX]`, mapping NaN to 0
#[inline]
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

/// Surface areas derived from the room dimensions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedAreas {
    /// Sum of all four walls
    pub wall_area: f64,
    pub floor_area: f64,
    pub ceiling_area: f64,
    /// One quarter of `wall_area`
    pub avg_wall_area: f64,
}

impl DerivedAreas {
    pub fn from_dimensions(length: f64, width: f64, height: f64) -> Self {
        let wall_area = saturate(2.0 * length * height + 2.0 * width * height);
        let floor_area = saturate(length * width);
        Self {
            wall_area,
            floor_area,
            ceiling_area: floor_area,
            avg_wall_area: wall_area / 4.0,
        }
    }

    pub fn from_room(room: &RoomModel) -> Self {
        Self::from_dimensions(room.length(), room.width(), room.height())
    }

    /// Area a layer covers before exclusions
    pub fn covered_area(&self, layer: &MaterialLayer) -> f64 {
        let mut area = f64::from(layer.wall_count) * self.avg_wall_area;
        if layer.applies_floor {
            area += self.floor_area;
        }
        if layer.applies_ceiling {
            area += self.ceiling_area;
        }
        saturate(area)
    }
}

/// Area and cost of one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownEntry {
    pub layer_id: LayerId,
    /// Covered area after exclusions, never negative
    pub area: f64,
    pub cost: f64,
}

/// Result of one cost pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostReport {
    pub areas: DerivedAreas,
    /// One entry per layer, in layer order
    pub breakdown: Vec<CostBreakdownEntry>,
    pub grand_total: f64,
}

impl CostReport {
    pub fn entry(&self, id: LayerId) -> Option<&CostBreakdownEntry> {
        self.breakdown.iter().find(|e| e.layer_id == id)
    }
}

/// Stateless area and cost calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEngine;

impl CostEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price a single layer against precomputed areas
    pub fn price_layer(&self, areas: &DerivedAreas, layer: &MaterialLayer) -> CostBreakdownEntry {
        let raw = areas.covered_area(layer);
        let area = saturate(raw - layer.exclusion_area);
        CostBreakdownEntry {
            layer_id: layer.id,
            area,
            cost: saturate(area * layer.unit_price),
        }
    }

    /// Compute areas, the per-layer breakdown and the grand total
    pub fn compute(&self, room: &RoomModel) -> CostReport {
        let areas = DerivedAreas::from_room(room);
        let mut breakdown = Vec::with_capacity(room.len());
        let mut grand_total = 0.0;

        for layer in room.layers() {
            let entry = self.price_layer(&areas, layer);
            tracing::trace!(
                layer = %entry.layer_id,
                area = entry.area,
                cost = entry.cost,
                "priced layer"
            );
            grand_total = saturate(grand_total + entry.cost);
            breakdown.push(entry);
        }

        CostReport {
            areas,
            breakdown,
            grand_total,
        }
    }
}
