//! Layout Engine
//!
//! Derives text size, label spacing, label anchors, the floor grid and the
//! room box transform from the room's dimensions. Everything is recomputed
//! from scratch on each call; nothing is patched incrementally.
//!
//! Sizing rules:
//! - `text = max_dim * text_scale`, capped at `height * height_cap_ratio`
//!   so floor and ceiling labels do not collide in flat rooms, then raised
//!   to `min_text_size` so tiny rooms stay legible.
//! - `gap = text * gap_ratio`.
//!
//! No formula divides by a dimension, so an all-zero room is well defined.

mod labels;

pub use labels::{ColorRole, Label, LabelKind, LabelSpec, NumberFormatter, PlainFormatter};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::{GridConfig, LayoutConfig};
use crate::cost::CostReport;
use crate::room::RoomModel;

/// Floor grid size and subdivision count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtent {
    pub size: f64,
    pub divisions: u32,
}

/// Everything the renderer needs to place the room and its labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub text_size: f64,
    pub gap: f64,
    /// Room box scale as `(length, height, width)`
    pub box_scale: DVec3,
    /// The box sits on the floor, so its center is at half height
    pub box_origin_y: f64,
    pub grid: GridExtent,
    /// Catalog entries in fixed order
    pub labels: Vec<LabelSpec>,
}

impl Layout {
    /// Render every catalog entry to display text
    pub fn render_labels(&self, formatter: &dyn NumberFormatter) -> Vec<Label> {
        self.labels
            .iter()
            .map(|spec| spec.render(self.text_size, formatter))
            .collect()
    }

    pub fn label(&self, kind: LabelKind) -> Option<&LabelSpec> {
        self.labels.iter().find(|l| l.kind == kind)
    }
}

/// Computes [`Layout`]s from room dimensions and cost results
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    layout: LayoutConfig,
    grid: GridConfig,
}

impl LayoutEngine {
    pub fn new(layout: LayoutConfig, grid: GridConfig) -> Self {
        Self { layout, grid }
    }

    /// Clamped text size for the given dimensions
    pub fn text_size(&self, length: f64, width: f64, height: f64) -> f64 {
        let max_dim = length.max(width).max(height);
        (max_dim * self.layout.text_scale)
            .min(height * self.layout.height_cap_ratio)
            .max(self.layout.min_text_size)
    }

    /// Grid covering twice the room footprint, in whole cells
    pub fn grid_extent(&self, length: f64, width: f64) -> GridExtent {
        let cell = self.grid.cell_size;
        let footprint = length.max(width);
        let size = (2.0 * (footprint / cell).ceil() * cell).max(self.grid.min_size);
        let divisions = (size / cell)
            .round()
            .clamp(1.0, f64::from(self.grid.max_divisions.max(1))) as u32;
        GridExtent { size, divisions }
    }

    pub fn compute(&self, room: &RoomModel, report: &CostReport) -> Layout {
        let (length, width, height) = (room.length(), room.width(), room.height());
        let text_size = self.text_size(length, width, height);
        let gap = text_size * self.layout.gap_ratio;
        let areas = &report.areas;

        let entry = |kind: LabelKind, value: f64, position: DVec3, size_multiplier: f64| {
            LabelSpec {
                kind,
                template: kind.template().to_string(),
                value,
                position,
                color: kind.color_role(),
                size_multiplier,
            }
        };

        let labels = vec![
            entry(
                LabelKind::Length,
                length,
                DVec3::new(0.0, 0.0, width / 2.0 + gap),
                1.0,
            ),
            entry(
                LabelKind::Width,
                width,
                DVec3::new(length / 2.0 + gap, 0.0, 0.0),
                1.0,
            ),
            entry(
                LabelKind::Height,
                height,
                DVec3::new(-length / 2.0 - gap, height / 2.0, -width / 2.0),
                1.0,
            ),
            entry(
                LabelKind::FloorArea,
                areas.floor_area,
                DVec3::new(0.0, gap, 0.0),
                1.0,
            ),
            entry(
                LabelKind::CeilingArea,
                areas.ceiling_area,
                DVec3::new(0.0, height - gap, 0.0),
                1.0,
            ),
            entry(
                LabelKind::WallArea,
                areas.wall_area,
                DVec3::new(0.0, height / 2.0, -width / 2.0 + gap),
                1.0,
            ),
            entry(
                LabelKind::TotalCost,
                report.grand_total,
                DVec3::new(0.0, height + 2.0 * text_size, 0.0),
                self.layout.total_size_multiplier,
            ),
        ];

        tracing::debug!(text_size, gap, labels = labels.len(), "layout computed");

        Layout {
            text_size,
            gap,
            box_scale: DVec3::new(length, height, width),
            box_origin_y: height / 2.0,
            grid: self.grid_extent(length, width),
            labels,
        }
    }
}
