//! Camera Module
//!
//! Hysteresis-based camera framing for the room view.

pub mod fit;

pub use fit::{CameraFitController, FitState};
