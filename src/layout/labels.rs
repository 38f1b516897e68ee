//! Label Catalog
//!
//! The fixed set of floating labels drawn around the room, and the
//! formatting seam used to turn their raw values into text.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Which quantity a label shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Length,
    Width,
    Height,
    FloorArea,
    CeilingArea,
    WallArea,
    TotalCost,
}

impl LabelKind {
    /// Catalog order
    pub const ALL: [LabelKind; 7] = [
        LabelKind::Length,
        LabelKind::Width,
        LabelKind::Height,
        LabelKind::FloorArea,
        LabelKind::CeilingArea,
        LabelKind::WallArea,
        LabelKind::TotalCost,
    ];

    pub fn template(self) -> &'static str {
        match self {
            LabelKind::Length | LabelKind::Width | LabelKind::Height => "{value}m",
            LabelKind::FloorArea => "Floor: {area}m²",
            LabelKind::CeilingArea => "Ceiling: {area}m²",
            LabelKind::WallArea => "Walls: {area}m²",
            LabelKind::TotalCost => "Total: {cost}",
        }
    }

    pub fn color_role(self) -> ColorRole {
        match self {
            LabelKind::Length | LabelKind::Width | LabelKind::Height => ColorRole::Dimension,
            LabelKind::FloorArea | LabelKind::CeilingArea | LabelKind::WallArea => ColorRole::Area,
            LabelKind::TotalCost => ColorRole::Total,
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelKind::Length => "length",
            LabelKind::Width => "width",
            LabelKind::Height => "height",
            LabelKind::FloorArea => "floor_area",
            LabelKind::CeilingArea => "ceiling_area",
            LabelKind::WallArea => "wall_area",
            LabelKind::TotalCost => "total_cost",
        };
        f.write_str(name)
    }
}

/// Color slot the renderer maps to an actual color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Dimension,
    Area,
    Total,
}

/// One catalog entry: what to show, where, and how large
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub kind: LabelKind,
    pub template: String,
    /// Raw value substituted into the template
    pub value: f64,
    pub position: DVec3,
    pub color: ColorRole,
    /// Multiplier on the layout's text size
    pub size_multiplier: f64,
}

impl LabelSpec {
    /// Substitute the formatted value into the template
    pub fn render(&self, text_size: f64, formatter: &dyn NumberFormatter) -> Label {
        let text = match self.kind {
            LabelKind::Length | LabelKind::Width | LabelKind::Height => self
                .template
                .replace("{value}", &formatter.format_length(self.value)),
            LabelKind::FloorArea | LabelKind::CeilingArea | LabelKind::WallArea => self
                .template
                .replace("{area}", &formatter.format_area(self.value)),
            LabelKind::TotalCost => self
                .template
                .replace("{cost}", &formatter.format_currency(self.value)),
        };
        Label {
            kind: self.kind,
            text,
            position: self.position,
            color: self.color,
            size: text_size * self.size_multiplier,
        }
    }
}

/// A label ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
    pub position: DVec3,
    pub color: ColorRole,
    pub size: f64,
}

/// Turns raw numbers into on-screen text
pub trait NumberFormatter {
    fn format_length(&self, meters: f64) -> String;
    fn format_area(&self, square_meters: f64) -> String;
    fn format_currency(&self, amount: f64) -> String;
}

/// Two-decimal formatting with no currency symbol
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl NumberFormatter for PlainFormatter {
    fn format_length(&self, meters: f64) -> String {
        format!("{:.2}", meters)
    }

    fn format_area(&self, square_meters: f64) -> String {
        format!("{:.2}", square_meters)
    }

    fn format_currency(&self, amount: f64) -> String {
        format!("{:.2}", amount)
    }
}
