//! Integration Tests
//!
//! End-to-end tests for the Roomcalc pipeline: room edits through cost,
//! layout, camera framing and the renderer.

use approx::assert_relative_eq;
use glam::DVec3;
use pretty_assertions::assert_eq;

use roomcalc::camera::{CameraFitController, FitState};
use roomcalc::cost::CostEngine;
use roomcalc::layout::{LabelKind, LayoutEngine};
use roomcalc::room::{Dimension, LayerPatch, RoomModel, RoomSpec};
use roomcalc::session::{Command, HeadlessRenderer, RoomSession};
use roomcalc::EngineConfig;

/// Helper to create the 5 x 4 x 3 reference room
fn reference_room() -> RoomModel {
    let mut room = RoomModel::new();
    room.set_dimension(Dimension::Length, 5.0);
    room.set_dimension(Dimension::Width, 4.0);
    room.set_dimension(Dimension::Height, 3.0);
    room
}

/// Walls plus ceiling, minus a door
fn reference_layer() -> LayerPatch {
    LayerPatch::new()
        .wall_count(4)
        .applies_floor(false)
        .applies_ceiling(true)
        .exclusion_area(2.5)
}

// === Cost Examples ===

#[test]
fn test_reference_geometry() {
    let report = CostEngine::new().compute(&reference_room());
    assert_relative_eq!(report.areas.wall_area, 54.0);
    assert_relative_eq!(report.areas.floor_area, 20.0);
    assert_relative_eq!(report.areas.ceiling_area, 20.0);
    assert_relative_eq!(report.areas.avg_wall_area, 13.5);
}

#[test]
fn test_reference_layer_cost() {
    let mut room = reference_room();
    room.add_layer(reference_layer().unit_price(12.0));

    let report = CostEngine::new().compute(&room);
    assert_relative_eq!(report.breakdown[0].area, 71.5);
    assert_relative_eq!(report.breakdown[0].cost, 858.0);
    assert_relative_eq!(report.grand_total, 858.0);
}

#[test]
fn test_oversized_exclusion_costs_nothing() {
    let mut room = reference_room();
    room.add_layer(reference_layer().unit_price(12.0).exclusion_area(100.0));

    let report = CostEngine::new().compute(&room);
    assert_eq!(report.breakdown[0].area, 0.0);
    assert_eq!(report.grand_total, 0.0);
}

#[test]
fn test_package_pricing_matches_manual() {
    let mut room = reference_room();
    let id = room.add_layer(reference_layer().package(60.0, 5.0));
    assert_relative_eq!(room.layer(id).unwrap().unit_price, 12.0);

    let report = CostEngine::new().compute(&room);
    assert_relative_eq!(report.grand_total, 858.0);
}

#[test]
fn test_totals_never_negative() {
    let mut room = RoomModel::new();
    room.set_dimension(Dimension::Length, -5.0);
    room.set_dimension(Dimension::Width, f64::NAN);
    room.set_dimension(Dimension::Height, 2.0);
    for count in [-3, 0, 2, 7] {
        room.add_layer(
            LayerPatch::new()
                .wall_count(count)
                .unit_price(-10.0)
                .exclusion_area(-4.0),
        );
    }

    let report = CostEngine::new().compute(&room);
    assert!(report.grand_total >= 0.0);
    assert!(report.breakdown.iter().all(|e| e.area >= 0.0 && e.cost >= 0.0));
}

// === Layout Examples ===

#[test]
fn test_flat_room_text_size_capped() {
    let mut room = RoomModel::new();
    room.set_dimension(Dimension::Length, 50.0);
    room.set_dimension(Dimension::Width, 50.0);
    room.set_dimension(Dimension::Height, 2.0);

    let report = CostEngine::new().compute(&room);
    let layout = LayoutEngine::default().compute(&room, &report);
    assert_relative_eq!(layout.text_size, 0.3, epsilon = 1e-12);
    assert_relative_eq!(layout.gap, 0.36, epsilon = 1e-12);
}

#[test]
fn test_label_catalog_order() {
    let room = reference_room();
    let report = CostEngine::new().compute(&room);
    let layout = LayoutEngine::default().compute(&room, &report);

    let kinds: Vec<LabelKind> = layout.labels.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, LabelKind::ALL.to_vec());
}

// === Camera Examples ===

#[test]
fn test_camera_hysteresis() {
    let mut controller = CameraFitController::default();
    assert_relative_eq!(controller.fit_distance(10.0), 15.0);

    // Distance 20 is inside [6, 37.5]
    assert_eq!(
        controller.evaluate(10.0, DVec3::new(12.0, 16.0, 0.0)),
        FitState::Stable
    );

    // Distance 5 is below 6
    assert_eq!(
        controller.evaluate(10.0, DVec3::new(5.0, 0.0, 0.0)),
        FitState::Retargeting
    );
    let target = controller.target().unwrap();
    assert!(target.y >= 4.5);
    assert_relative_eq!(target.x, 15.0);
}

// === Session ===

#[test]
fn test_script_replay() {
    let script = r#"[
        {"op": "set_dimension", "which": "length", "value": 5},
        {"op": "set_dimension", "which": "width", "value": "4"},
        {"op": "set_dimension", "which": "height", "value": 3},
        {"op": "add_layer", "initial": {"applies_floor": false, "exclusion_area": 2.5}},
        {"op": "update_layer", "id": 1, "patch": {"package_unit_price": 60, "package_area": 5}},
        {"op": "add_layer", "initial": {"name": "scrap", "unit_price": 1000}},
        {"op": "remove_layer", "id": 2}
    ]"#;

    let mut session = RoomSession::new(EngineConfig::default(), HeadlessRenderer::default());
    let mut snapshot = session.refresh();
    for command in Command::parse_script(script).unwrap() {
        snapshot = session.apply(command);
    }

    assert_eq!(session.model().len(), 1);
    assert_relative_eq!(snapshot.report.grand_total, 858.0);

    let total = snapshot
        .labels
        .iter()
        .find(|l| l.kind == LabelKind::TotalCost)
        .unwrap();
    assert_eq!(total.text, "Total: 858.00");
    assert_eq!(session.renderer().labels, snapshot.labels);
}

#[test]
fn test_room_spec_with_config_defaults() {
    let config = EngineConfig::from_json_str(
        r#"{"layer_defaults": {"applies_floor": false, "wall_count": 2}}"#,
    )
    .unwrap();
    let spec: RoomSpec = serde_json::from_str(
        r#"{"length": 5, "width": 4, "height": 3, "layers": [{"unit_price": 1}]}"#,
    )
    .unwrap();
    let room = spec.build(config.layer_defaults.clone());

    let report = CostEngine::new().compute(&room);
    // Two average walls plus the ceiling
    assert_relative_eq!(report.grand_total, 27.0 + 20.0);
}

#[test]
fn test_scale_change_across_magnitudes() {
    let mut session = RoomSession::new(
        EngineConfig::default(),
        HeadlessRenderer::new(DVec3::new(0.0, 1.0, 2.0)),
    );

    for (length, width, height) in [(0.5, 0.4, 0.3), (5.0, 4.0, 3.0), (40.0, 25.0, 4.0)] {
        session.set_dimension(Dimension::Length, length);
        session.set_dimension(Dimension::Width, width);
        let snapshot = session.set_dimension(Dimension::Height, height);

        let mut frames = 0;
        while session.frame(1.0 / 60.0) == FitState::Retargeting && frames < 5000 {
            frames += 1;
        }

        let fit = session.camera().fit_distance(session.model().max_dimension());
        let distance = session.renderer().camera.length();
        assert!(
            distance >= 0.4 * fit && distance <= 2.5 * fit,
            "camera at {distance} not framed for fit {fit}"
        );
        assert!(snapshot.layout.text_size >= 0.15);
        assert!(snapshot.layout.text_size <= (height * 0.15).max(0.15));
    }
}

#[test]
fn test_huge_room_keeps_total_and_camera_finite() {
    let mut session = RoomSession::new(EngineConfig::default(), HeadlessRenderer::default());
    session.set_dimension(Dimension::Length, 1e200);
    session.set_dimension(Dimension::Height, 1e200);
    let (_, snapshot) = session.add_layer(LayerPatch::new().unit_price(0.0));

    assert_eq!(snapshot.report.grand_total, 0.0);
    assert!(snapshot.report.areas.wall_area.is_finite());
    let total = snapshot
        .labels
        .iter()
        .find(|l| l.kind == LabelKind::TotalCost)
        .unwrap();
    assert_eq!(total.text, "Total: 0.00");
    assert!(session.camera().target().unwrap().is_finite());
}
