//! Animation Blending
//!
//! - [`BlendSpace2D`]: nearest-triangle barycentric weights over 2D poses
//! - [`MotionBlender`]: driver selection, time-warp and phase lock
//! - [`AnimationMixer`] / [`AnimationAction`]: the in-crate track provider
//! - [`MotionTrack`] / [`TrackProvider`]: the boundary to any other runtime

pub mod action;
pub mod blend_space;
pub mod blender;
pub mod clip;
pub mod mixer;
pub mod track;

pub use action::{AnimationAction, LoopMode};
pub use blend_space::{BlendPose, BlendSpace2D, BlendWeights, WeightEntry, compute_weights};
pub use blender::MotionBlender;
pub use clip::AnimationClip;
pub use mixer::{ActionKey, AnimationMixer};
pub use track::{MotionTrack, TrackProvider};
