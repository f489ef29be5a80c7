//! # Myth Locomotion
//!
//! 2D locomotion blending: pick the motions nearest to a movement intent in
//! a 2D parameter plane, weight them barycentrically, and keep motions of
//! different lengths phase-aligned while they blend.
//!
//! ```rust,ignore
//! use glam::Vec2;
//! use myth_locomotion::{AnimationClip, BlendPose, LocomotionController, LocomotionSettings};
//!
//! let clips = [
//!     AnimationClip::shared("idle", 2.0),
//!     AnimationClip::shared("running", 0.8),
//!     AnimationClip::shared("strafe_left", 1.0),
//!     AnimationClip::shared("strafe_right", 1.0),
//! ];
//! let mut character = LocomotionController::from_clips(clips, LocomotionSettings::default());
//! character.add_poses([
//!     BlendPose::new("idle", Vec2::ZERO),
//!     BlendPose::new("running", Vec2::Y),
//!     BlendPose::new("strafe_left", Vec2::X),
//!     BlendPose::new("strafe_right", Vec2::NEG_X),
//! ])?;
//!
//! // every frame
//! character.set_intent(Vec2::new(0.2, 0.7))?;
//! character.update(1.0 / 60.0);
//! ```

pub mod animation;
pub mod errors;
pub mod locomotion;

pub use animation::{
    ActionKey, AnimationAction, AnimationClip, AnimationMixer, BlendPose, BlendSpace2D,
    BlendWeights, LoopMode, MotionBlender, MotionTrack, TrackProvider, WeightEntry,
};
pub use errors::{LocomotionError, Result};
pub use locomotion::{BlendDebugSink, BlendSnapshot, LocomotionController, LocomotionSettings};
