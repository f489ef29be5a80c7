//! Locomotion Settings
//!
//! ```rust,ignore
//! use myth_locomotion::LocomotionSettings;
//!
//! let settings = LocomotionSettings {
//!     mirrored: vec!["running_back".into()],
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::blend_space::DEFAULT_DEGENERATE_EPSILON;

/// Setup-time configuration for a [`LocomotionController`](super::LocomotionController).
///
/// Deserializes with every field optional, so a JSON document only needs
/// to list what differs from the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Minimum doubled triangle area for three poses to form a blend triangle.
    pub degenerate_epsilon: f32,
    /// Intents longer than this are scaled down before querying.
    pub max_intent_length: f32,
    /// Motions exempt from phase lock.
    pub neutral: Vec<String>,
    /// Motions that play backwards (time scale `-1`) from setup on.
    pub mirrored: Vec<String>,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
            max_intent_length: 1.0,
            neutral: vec!["idle".to_owned()],
            mirrored: Vec::new(),
        }
    }
}

impl LocomotionSettings {
    #[must_use]
    pub fn is_neutral(&self, name: &str) -> bool {
        self.neutral.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_mirrored(&self, name: &str) -> bool {
        self.mirrored.iter().any(|n| n == name)
    }
}
