//! Locomotion Control
//!
//! Per-character glue around the blending core:
//! - [`LocomotionController`]: blend space + motion blender + action pool
//! - [`LocomotionSettings`]: setup-time configuration
//! - intent helpers turning movement into a blend-plane point
//! - [`BlendDebugSink`]: observer hook for diagnostic plots

pub mod controller;
pub mod debug;
pub mod intent;
pub mod settings;

pub use controller::LocomotionController;
pub use debug::{BlendDebugSink, BlendSnapshot};
pub use intent::{clamp_intent, intent_from_velocity, planar_intent};
pub use settings::LocomotionSettings;
