//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use anyhow::{Context, Result};
use glam::DVec3;
use log::{info, warn};

use crate::camera::{CameraFitController, FitState};
use crate::config::EngineConfig;
use crate::cost::CostEngine;
use crate::error;
use crate::layout::{LabelKind, LayoutEngine, PlainFormatter};
use crate::room::{Dimension, RoomModel, RoomSpec};
use crate::session::{Command, HeadlessRenderer, RoomSession};

/// Resolve the engine configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration: {}", path.display());
            EngineConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Read a room description and build the model through its own operations.
pub fn load_room(path: &Path, config: &EngineConfig) -> Result<RoomModel> {
    info!("Loading room: {}", path.display());
    let text = error::read_to_string(path)?;
    let spec: RoomSpec = serde_json::from_str(&text)
        .with_context(|| format!("invalid room description {}", path.display()))?;
    Ok(spec.build(config.layer_defaults.clone()))
}

/// Print areas, per-layer costs and the grand total.
pub fn quote(path: &Path, config: &EngineConfig, json: bool) -> Result<()> {
    let room = load_room(path, config)?;
    let report = CostEngine::new().compute(&room);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let dimensions: Vec<String> = Dimension::ALL
        .iter()
        .map(|which| format!("{:.2}", room.dimension(*which)))
        .collect();
    println!("Room: {} m", dimensions.join(" x "));
    println!("{:-<60}", "");
    println!("Walls:   {:>10.2} m²", report.areas.wall_area);
    println!("Floor:   {:>10.2} m²", report.areas.floor_area);
    println!("Ceiling: {:>10.2} m²", report.areas.ceiling_area);
    println!("{:-<60}", "");

    if room.is_empty() {
        println!("No material layers.");
    }
    for (layer, entry) in room.layers().iter().zip(&report.breakdown) {
        let source = if layer.is_package_priced() {
            " (package)"
        } else {
            ""
        };
        println!(
            "{:<20} {:>10.2} m² x {:>8.2}{} = {:>10.2}",
            layer.name, entry.area, layer.unit_price, source, entry.cost
        );
    }

    println!("{:-<60}", "");
    println!("Total: {:.2}", report.grand_total);

    Ok(())
}

/// Print text size, grid extent and label placement.
pub fn layout(path: &Path, config: &EngineConfig, json: bool) -> Result<()> {
    let room = load_room(path, config)?;
    let report = CostEngine::new().compute(&room);
    let layout = LayoutEngine::new(config.layout, config.grid).compute(&room, &report);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("Text size: {:.3}", layout.text_size);
    println!("Gap:       {:.3}", layout.gap);
    println!(
        "Grid:      {:.1} m, {} divisions",
        layout.grid.size, layout.grid.divisions
    );
    println!("{:-<60}", "");

    for label in layout.render_labels(&PlainFormatter) {
        println!(
            "{:<14} {:<22} ({:>7.3}, {:>7.3}, {:>7.3}) size {:.3}",
            label.kind.to_string(),
            label.text,
            label.position.x,
            label.position.y,
            label.position.z,
            label.size
        );
    }

    Ok(())
}

/// Simulate the camera controller for a room of the given size.
pub fn fit(config: &EngineConfig, max_dim: f64, camera: &[f64], ticks: u32, dt: f64) -> Result<()> {
    let mut position = match camera {
        [x, y, z] => DVec3::new(*x, *y, *z),
        _ => anyhow::bail!("camera position needs exactly three components"),
    };

    let mut controller = CameraFitController::new(config.camera);
    let fit = controller.fit_distance(max_dim);
    let state = controller.evaluate(max_dim, position);

    println!("Fit distance: {:.3}", fit);
    println!("Start:        {:.3} ({})", position.length(), state);

    if state == FitState::Stable {
        println!("Camera is within the framing band, nothing to do.");
        return Ok(());
    }

    if let Some(target) = controller.target() {
        println!(
            "Target:       ({:.3}, {:.3}, {:.3})",
            target.x, target.y, target.z
        );
    }

    let mut frames = 0;
    while controller.is_retargeting() && frames < ticks {
        position = controller.tick(position, dt);
        frames += 1;
    }

    if controller.is_retargeting() {
        warn!("Camera still retargeting after {} frames", frames);
    }
    println!(
        "End:          ({:.3}, {:.3}, {:.3}) after {} frames ({})",
        position.x,
        position.y,
        position.z,
        frames,
        controller.state()
    );

    Ok(())
}

/// Replay a command script and print the final snapshot.
pub fn run(room_path: &Path, script_path: &Path, config: &EngineConfig) -> Result<()> {
    let room = load_room(room_path, config)?;
    let script = error::read_to_string(script_path)?;
    let commands = Command::parse_script(&script)
        .with_context(|| format!("invalid command script {}", script_path.display()))?;

    info!("Replaying {} commands", commands.len());

    let mut session = RoomSession::with_model(config.clone(), room, HeadlessRenderer::default());
    let mut snapshot = session.refresh();
    for command in commands {
        snapshot = session.apply(command);
    }

    if let Some(total) = snapshot.layout.label(LabelKind::TotalCost) {
        info!("Final total: {:.2}", total.value);
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Print the effective configuration as JSON.
pub fn show_config(config: &EngineConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
