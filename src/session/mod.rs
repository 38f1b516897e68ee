//! Room Session
//!
//! The single owner of the room model. Every edit runs the full pipeline:
//! model update, cost pass, layout pass, camera evaluation, and a redraw
//! pushed to the renderer. Recomputation is synchronous and starts from
//! scratch each time; the only state kept across frames is the camera
//! controller's pending target.

mod command;
mod renderer;

pub use command::Command;
pub use renderer::{HeadlessRenderer, SceneRenderer};

use serde::{Deserialize, Serialize};

use crate::camera::{CameraFitController, FitState};
use crate::config::EngineConfig;
use crate::cost::{CostEngine, CostReport};
use crate::layout::{Label, Layout, LayoutEngine, NumberFormatter, PlainFormatter};
use crate::room::{Dimension, LayerId, LayerPatch, RoomModel};

/// Derived state after a recompute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub report: CostReport,
    pub layout: Layout,
    /// Labels with their display text, in catalog order
    pub labels: Vec<Label>,
}

/// Owns the room and drives a renderer
pub struct RoomSession<R: SceneRenderer> {
    model: RoomModel,
    cost: CostEngine,
    layout: LayoutEngine,
    camera: CameraFitController,
    formatter: Box<dyn NumberFormatter>,
    renderer: R,
    /// Set while a label pass was skipped for lack of a font
    labels_pending: bool,
}

impl<R: SceneRenderer> RoomSession<R> {
    /// Create a session with an empty room
    pub fn new(config: EngineConfig, renderer: R) -> Self {
        let model = RoomModel::with_layer_defaults(config.layer_defaults.clone());
        Self::with_model(config, model, renderer)
    }

    /// Create a session around an existing room
    pub fn with_model(config: EngineConfig, model: RoomModel, renderer: R) -> Self {
        Self {
            model,
            cost: CostEngine::new(),
            layout: LayoutEngine::new(config.layout, config.grid),
            camera: CameraFitController::new(config.camera),
            formatter: Box::new(PlainFormatter),
            renderer,
            labels_pending: false,
        }
    }

    /// Replace the number formatter used for label text
    pub fn with_formatter(mut self, formatter: Box<dyn NumberFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Apply one command and run the full recompute-and-redraw cycle
    pub fn apply(&mut self, command: Command) -> SceneSnapshot {
        match command {
            Command::SetDimension { which, value } => {
                self.model.set_dimension_input(which, &value);
            }
            Command::AddLayer { initial } => {
                self.model.add_layer(initial);
            }
            Command::UpdateLayer { id, patch } => {
                self.model.update_layer(id, &patch);
            }
            Command::RemoveLayer { id } => {
                self.model.remove_layer(id);
            }
        }
        self.refresh()
    }

    pub fn set_dimension(&mut self, which: Dimension, value: f64) -> SceneSnapshot {
        self.model.set_dimension(which, value);
        self.refresh()
    }

    pub fn add_layer(&mut self, initial: LayerPatch) -> (LayerId, SceneSnapshot) {
        let id = self.model.add_layer(initial);
        (id, self.refresh())
    }

    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) -> SceneSnapshot {
        self.model.update_layer(id, patch);
        self.refresh()
    }

    pub fn remove_layer(&mut self, id: LayerId) -> SceneSnapshot {
        self.model.remove_layer(id);
        self.refresh()
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Derive costs, layout and label text from the current model
    ///
    /// Pure with respect to the session: calling it twice without an edit
    /// in between yields identical snapshots.
    pub fn recompute(&self) -> SceneSnapshot {
        let report = self.cost.compute(&self.model);
        let layout = self.layout.compute(&self.model, &report);
        let labels = layout.render_labels(self.formatter.as_ref());
        SceneSnapshot {
            report,
            layout,
            labels,
        }
    }

    /// Recompute, redraw, and let the camera controller react
    pub fn refresh(&mut self) -> SceneSnapshot {
        let snapshot = self.recompute();
        self.redraw(&snapshot);
        self.camera
            .evaluate(self.model.max_dimension(), self.renderer.camera_position());
        snapshot
    }

    /// Push a snapshot to the renderer
    ///
    /// Labels are replaced wholesale. Without a font the old labels are
    /// still cleared, and the new set is marked pending until
    /// [`RoomSession::notify_font_ready`].
    pub fn redraw(&mut self, snapshot: &SceneSnapshot) {
        let layout = &snapshot.layout;
        self.renderer.set_room_box_scale(
            layout.box_scale.x,
            layout.box_scale.y,
            layout.box_scale.z,
        );
        self.renderer.set_room_box_origin(layout.box_origin_y);
        self.renderer
            .set_grid_extent(layout.grid.size, layout.grid.divisions);

        self.renderer.clear_labels();
        if !self.renderer.is_font_ready() {
            tracing::debug!("font not ready, label pass deferred");
            self.labels_pending = true;
            return;
        }

        for label in &snapshot.labels {
            self.renderer.add_label(label);
        }
        self.labels_pending = false;
    }

    /// Re-run the full pass once the font has become available
    ///
    /// # Returns
    /// The fresh snapshot, or `None` if nothing was pending or the font is
    /// still missing
    pub fn notify_font_ready(&mut self) -> Option<SceneSnapshot> {
        if !self.labels_pending || !self.renderer.is_font_ready() {
            return None;
        }
        tracing::debug!("font ready, running deferred label pass");
        Some(self.refresh())
    }

    /// Per-frame hook: finish a deferred label pass and ease the camera
    pub fn frame(&mut self, dt: f64) -> FitState {
        self.notify_font_ready();

        if self.camera.is_retargeting() {
            let position = self.camera.tick(self.renderer.camera_position(), dt);
            self.renderer.set_camera_position(position);
        }
        self.camera.state()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn model(&self) -> &RoomModel {
        &self.model
    }

    pub fn camera(&self) -> &CameraFitController {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access, e.g. for user orbit or font loading
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn labels_pending(&self) -> bool {
        self.labels_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn session() -> RoomSession<HeadlessRenderer> {
        RoomSession::new(EngineConfig::default(), HeadlessRenderer::default())
    }

    #[test]
    fn test_every_edit_redraws() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 5.0);
        session.set_dimension(Dimension::Width, 4.0);
        session.set_dimension(Dimension::Height, 3.0);

        let renderer = session.renderer();
        assert_eq!(renderer.box_scale, DVec3::new(5.0, 3.0, 4.0));
        assert_eq!(renderer.box_origin_y, 1.5);
        assert_eq!(renderer.labels.len(), 7);
        assert_eq!(renderer.label_passes, 3);
    }

    #[test]
    fn test_labels_replaced_wholesale() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 5.0);
        let (id, _) = session.add_layer(LayerPatch::new().unit_price(10.0));
        session.remove_layer(id);

        // Never accumulates stale labels
        assert_eq!(session.renderer().labels.len(), 7);
    }

    #[test]
    fn test_apply_matches_direct_calls() {
        let mut via_commands = session();
        via_commands.apply(Command::SetDimension {
            which: Dimension::Length,
            value: 6.0.into(),
        });
        via_commands.apply(Command::AddLayer {
            initial: LayerPatch::new().unit_price(3.0),
        });

        let mut direct = session();
        direct.set_dimension(Dimension::Length, 6.0);
        direct.add_layer(LayerPatch::new().unit_price(3.0));

        assert_eq!(via_commands.recompute(), direct.recompute());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 7.3);
        session.add_layer(LayerPatch::new().package(45.0, 2.2));
        assert_eq!(session.recompute(), session.recompute());
    }

    #[test]
    fn test_deferred_label_pass() {
        let renderer = HeadlessRenderer::without_font(DVec3::new(5.0, 5.0, 5.0));
        let mut session = RoomSession::new(EngineConfig::default(), renderer);

        session.set_dimension(Dimension::Length, 5.0);
        assert!(session.labels_pending());
        assert!(session.renderer().labels.is_empty());
        // Geometry is still pushed
        assert_eq!(session.renderer().box_scale.x, 5.0);

        // Nothing happens while the font is still missing
        assert!(session.notify_font_ready().is_none());

        session.renderer_mut().font_ready = true;
        let snapshot = session.notify_font_ready().unwrap();
        assert!(!session.labels_pending());
        assert_eq!(session.renderer().labels, snapshot.labels);

        // Only once
        assert!(session.notify_font_ready().is_none());
    }

    #[test]
    fn test_font_loss_clears_stale_labels() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 5.0);
        session.add_layer(LayerPatch::new().unit_price(10.0));
        assert_eq!(session.renderer().labels.len(), 7);

        session.renderer_mut().font_ready = false;
        session.set_dimension(Dimension::Width, 4.0);

        // The old total no longer matches the room, so nothing is shown
        assert!(session.renderer().labels.is_empty());
        assert!(session.labels_pending());

        session.renderer_mut().font_ready = true;
        let snapshot = session.notify_font_ready().unwrap();
        assert_eq!(session.renderer().labels, snapshot.labels);
    }

    #[test]
    fn test_text_layer_fields_through_session() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 5.0);
        session.set_dimension(Dimension::Width, 4.0);
        session.set_dimension(Dimension::Height, 3.0);

        let script = r#"[
            {"op": "add_layer", "initial": {"applies_floor": false, "unit_price": "12"}},
            {"op": "update_layer", "id": 1, "patch": {"exclusion_area": "2.5", "wall_count": "4"}}
        ]"#;
        let mut snapshot = session.recompute();
        for command in Command::parse_script(script).unwrap() {
            snapshot = session.apply(command);
        }
        assert_eq!(snapshot.report.grand_total, 858.0);
    }

    #[test]
    fn test_frame_runs_pending_label_pass() {
        let renderer = HeadlessRenderer::without_font(DVec3::new(5.0, 5.0, 5.0));
        let mut session = RoomSession::new(EngineConfig::default(), renderer);
        session.set_dimension(Dimension::Height, 2.5);

        session.renderer_mut().font_ready = true;
        session.frame(1.0 / 60.0);
        assert_eq!(session.renderer().labels.len(), 7);
    }

    #[test]
    fn test_growing_room_pulls_camera_out() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 40.0);
        session.set_dimension(Dimension::Width, 30.0);
        session.set_dimension(Dimension::Height, 3.0);

        // Camera at ~8.66 is well inside 0.4 * 60
        assert!(session.camera().is_retargeting());

        let mut frames = 0;
        while session.frame(1.0 / 60.0) == FitState::Retargeting && frames < 2000 {
            frames += 1;
        }
        let distance = session.renderer().camera.length();
        assert!(distance > 24.0 && distance <= 60.0 + 1e-9, "distance {distance}");
    }

    #[test]
    fn test_user_orbit_inside_band_is_left_alone() {
        let mut session = session();
        session.set_dimension(Dimension::Length, 5.0);
        session.set_dimension(Dimension::Width, 4.0);
        session.set_dimension(Dimension::Height, 3.0);
        assert!(!session.camera().is_retargeting());

        session.renderer_mut().camera = DVec3::new(-6.0, 2.0, 1.0);
        session.set_dimension(Dimension::Height, 3.1);
        assert!(!session.camera().is_retargeting());

        let before = session.renderer().camera;
        session.frame(1.0 / 60.0);
        assert_eq!(session.renderer().camera, before);
    }

    #[test]
    fn test_custom_formatter() {
        struct Cents;
        impl NumberFormatter for Cents {
            fn format_length(&self, meters: f64) -> String {
                format!("{meters}")
            }
            fn format_area(&self, square_meters: f64) -> String {
                format!("{square_meters}")
            }
            fn format_currency(&self, amount: f64) -> String {
                format!("{}c", (amount * 100.0).round())
            }
        }

        let mut session = RoomSession::new(EngineConfig::default(), HeadlessRenderer::default())
            .with_formatter(Box::new(Cents));
        let snapshot = session.set_dimension(Dimension::Length, 2.0);
        assert_eq!(snapshot.labels[0].text, "2m");
        assert_eq!(snapshot.labels[6].text, "Total: 0c");
    }
}
