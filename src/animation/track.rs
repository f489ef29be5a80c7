//! Track boundary between the blending core and the animation runtime.
//!
//! [`MotionBlender`](super::MotionBlender) never owns tracks. It holds
//! handles and reaches the playable units through a [`TrackProvider`].

use crate::animation::mixer::ActionKey;

/// A playable motion as seen by the blender.
///
/// `effective_rate` is signed: a negative rate plays the motion backwards,
/// which is how a single captured motion serves the opposite travel
/// direction.
pub trait MotionTrack {
    /// Native length of one cycle, in seconds.
    fn duration(&self) -> f32;

    fn weight(&self) -> f32;
    fn set_weight(&mut self, weight: f32);

    fn effective_rate(&self) -> f32;
    fn set_effective_rate(&mut self, rate: f32);

    /// Current playback position in seconds.
    fn local_time(&self) -> f32;
    fn set_local_time(&mut self, time: f32);

    /// Steps the track clock by `dt * effective_rate`.
    fn advance(&mut self, dt: f32);
}

/// Owner of the tracks a blender drives.
pub trait TrackProvider {
    type Track: MotionTrack;

    fn track(&self, key: ActionKey) -> Option<&Self::Track>;
    fn track_mut(&mut self, key: ActionKey) -> Option<&mut Self::Track>;
}

/// Returns `-1.0` for negative rates and `1.0` otherwise.
///
/// A stopped track (rate `0.0`) counts as forward playback.
#[inline]
#[must_use]
pub fn rate_sign(rate: f32) -> f32 {
    if rate < 0.0 { -1.0 } else { 1.0 }
}
