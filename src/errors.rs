//! Error Types
//!
//! This module defines the error types used by the locomotion blending core.
//!
//! # Overview
//!
//! [`LocomotionError`] separates two kinds of failure:
//! - **Configuration errors**: the pose layout cannot form a triangle, a pose
//!   was registered with a non-finite position, or a weight references a
//!   motion that was never bound. These surface immediately.
//! - Per-frame numerical degeneracies (zero-length intents, an all-zero
//!   weight sum) are *not* errors. They produce an all-zero weight set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_locomotion::errors::{LocomotionError, Result};
//!
//! fn blend(space: &BlendSpace2D) -> Result<()> {
//!     let weights = space.query(Vec2::new(0.0, 0.5))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the locomotion core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocomotionError {
    // ========================================================================
    // Blend Space Configuration Errors
    // ========================================================================
    /// Fewer than three usable (non-coincident, non-collinear) poses exist,
    /// so no triangle can be formed around the query point.
    #[error("Degenerate blend space: no valid triangle among {pose_count} registered pose(s)")]
    DegenerateBlendSpace {
        /// Number of poses registered at query time
        pose_count: usize,
    },

    /// A pose was registered with a NaN or infinite coordinate.
    #[error("Invalid pose '{name}': position must be finite")]
    InvalidPose {
        /// Name of the rejected pose
        name: String,
    },

    // ========================================================================
    // Motion Blender Errors
    // ========================================================================
    /// A weight entry names a motion with no bound track.
    #[error("Unknown track: {0}")]
    UnknownTrack(String),
}

/// Alias for `Result<T, LocomotionError>`.
pub type Result<T> = std::result::Result<T, LocomotionError>;
