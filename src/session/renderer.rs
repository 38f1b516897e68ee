//! Rendering Collaborator
//!
//! The capability the session drives. Scene graph, meshes and glyphs live
//! behind this trait; the core only hands over scales, extents, labels and
//! camera positions.

use glam::DVec3;

use crate::layout::{GridExtent, Label};

/// What the session needs from a 3D renderer
pub trait SceneRenderer {
    /// Scale the unit room box to `(length, height, width)`
    fn set_room_box_scale(&mut self, length: f64, height: f64, width: f64);

    /// Place the box center at height `y`
    fn set_room_box_origin(&mut self, y: f64);

    fn set_grid_extent(&mut self, size: f64, divisions: u32);

    /// Drop every label currently in the scene
    fn clear_labels(&mut self);

    fn add_label(&mut self, label: &Label);

    fn set_camera_position(&mut self, position: DVec3);

    fn camera_position(&self) -> DVec3;

    /// Whether text meshes can be built yet
    fn is_font_ready(&self) -> bool;
}

/// In-memory renderer that records what it was asked to draw
///
/// Used by the CLI and by tests in place of a real scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessRenderer {
    pub box_scale: DVec3,
    pub box_origin_y: f64,
    pub grid: Option<GridExtent>,
    pub labels: Vec<Label>,
    pub camera: DVec3,
    pub font_ready: bool,
    /// Number of times the label set was cleared
    pub label_passes: usize,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(DVec3::new(5.0, 5.0, 5.0))
    }
}

impl HeadlessRenderer {
    pub fn new(camera: DVec3) -> Self {
        Self {
            box_scale: DVec3::ONE,
            box_origin_y: 0.0,
            grid: None,
            labels: Vec::new(),
            camera,
            font_ready: true,
            label_passes: 0,
        }
    }

    /// A renderer whose font has not finished loading
    pub fn without_font(camera: DVec3) -> Self {
        Self {
            font_ready: false,
            ..Self::new(camera)
        }
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn set_room_box_scale(&mut self, length: f64, height: f64, width: f64) {
        self.box_scale = DVec3::new(length, height, width);
    }

    fn set_room_box_origin(&mut self, y: f64) {
        self.box_origin_y = y;
    }

    fn set_grid_extent(&mut self, size: f64, divisions: u32) {
        self.grid = Some(GridExtent { size, divisions });
    }

    fn clear_labels(&mut self) {
        self.labels.clear();
        self.label_passes += 1;
    }

    fn add_label(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }

    fn set_camera_position(&mut self, position: DVec3) {
        self.camera = position;
    }

    fn camera_position(&self) -> DVec3 {
        self.camera
    }

    fn is_font_ready(&self) -> bool {
        self.font_ready
    }
}
