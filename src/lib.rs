//! Roomcalc - Room Area, Material Cost and Adaptive Layout Engine
//!
//! Roomcalc turns three room dimensions and a list of material layers into
//! surface areas and costs, then derives everything a 3D view needs to show
//! the room legibly at any scale: text size, label anchors, grid extent and
//! camera framing.
//!
//! # Architecture
//!
//! The pipeline runs leaf-first on every edit:
//! - `room`: dimensions and material layers, sanitized on write
//! - `cost`: derived areas, per-layer breakdown and grand total
//! - `layout`: text sizing, label catalog, grid and room box
//! - `camera`: hysteresis-based camera retargeting with per-tick easing
//! - `session`: the single owner that runs the pipeline and drives a renderer

pub mod camera;
pub mod cli;
pub mod config;
pub mod cost;
pub mod error;
pub mod layout;
pub mod room;
pub mod session;

pub use config::EngineConfig;
pub use error::{Result, RoomError};
