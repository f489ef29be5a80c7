use std::sync::Arc;

use glam::Vec2;

use crate::animation::action::AnimationAction;
use crate::animation::blend_space::{BlendPose, BlendSpace2D, BlendWeights};
use crate::animation::blender::MotionBlender;
use crate::animation::clip::AnimationClip;
use crate::animation::mixer::{ActionKey, AnimationMixer};
use crate::errors::Result;
use crate::locomotion::debug::BlendDebugSink;
use crate::locomotion::intent::clamp_intent;
use crate::locomotion::settings::LocomotionSettings;

/// Per-character locomotion state.
///
/// Composes a [`BlendSpace2D`], a [`MotionBlender`] and the
/// [`AnimationMixer`] that owns the playing actions. Each character owns
/// its own controller; nothing is shared between instances.
///
/// Per frame: [`set_intent`](Self::set_intent) then [`update`](Self::update).
#[derive(Debug)]
pub struct LocomotionController {
    blend_space: BlendSpace2D,
    blender: MotionBlender,
    mixer: AnimationMixer,
    settings: LocomotionSettings,
    /// Last weight set that reached the tracks.
    weights: BlendWeights,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionSettings::default())
    }
}

impl LocomotionController {
    #[must_use]
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            blend_space: BlendSpace2D::with_epsilon(settings.degenerate_epsilon),
            blender: MotionBlender::new(),
            mixer: AnimationMixer::new(),
            settings,
            weights: BlendWeights::default(),
        }
    }

    /// Creates a controller with one playing, zero-weight action per clip.
    #[must_use]
    pub fn from_clips(clips: impl IntoIterator<Item = Arc<AnimationClip>>, settings: LocomotionSettings) -> Self {
        let mut controller = Self::new(settings);
        for clip in clips {
            controller.add_clip(clip);
        }
        controller
    }

    /// Starts a zero-weight action for `clip` and binds it by clip name.
    ///
    /// Mirrored clips start at time scale `-1`.
    pub fn add_clip(&mut self, clip: Arc<AnimationClip>) -> ActionKey {
        let name = clip.name.clone();

        let mut action = AnimationAction::new(clip);
        action.weight = 0.0;
        if self.settings.is_mirrored(&name) {
            action.time_scale = -1.0;
        }

        let key = self.mixer.add_action(action);
        self.blender.bind(name.as_str(), key);
        if self.settings.is_neutral(&name) {
            self.blender.set_neutral(name.as_str(), true);
        }
        log::debug!("LocomotionController: bound motion '{name}'");
        key
    }

    pub fn add_poses(&mut self, poses: impl IntoIterator<Item = BlendPose>) -> Result<()> {
        self.blend_space.add_poses(poses)
    }

    /// Removes poses and silences their tracks.
    ///
    /// The tracks stay bound, so re-adding a pose brings the motion back.
    pub fn remove_poses<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        let names: Vec<S> = names.into_iter().collect();
        for name in &names {
            if let Some(action) = self.mixer.action_mut(name.as_ref()) {
                action.weight = 0.0;
            }
        }
        self.blend_space.remove_poses(names);
    }

    /// Blends towards `intent` for this frame.
    ///
    /// On error nothing is written to the tracks and the previous weights
    /// stay in effect.
    pub fn set_intent(&mut self, intent: Vec2) -> Result<&BlendWeights> {
        let p = clamp_intent(intent, self.settings.max_intent_length);
        let weights = self.blend_space.query(p)?;
        self.blender.apply(&weights, &mut self.mixer)?;
        if weights.is_blending() {
            self.weights = weights;
        }
        Ok(&self.weights)
    }

    /// [`set_intent`](Self::set_intent), reporting a successful frame to `sink`.
    pub fn set_intent_observed(&mut self, intent: Vec2, sink: &mut impl BlendDebugSink) -> Result<&BlendWeights> {
        let p = clamp_intent(intent, self.settings.max_intent_length);
        self.set_intent(p)?;
        sink.observe(self.blend_space.poses(), p, &self.weights);
        Ok(&self.weights)
    }

    /// Advances every bound action by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.blender.advance(dt, &mut self.mixer);
    }

    #[must_use]
    pub fn weights(&self) -> &BlendWeights {
        &self.weights
    }

    #[must_use]
    pub fn blend_space(&self) -> &BlendSpace2D {
        &self.blend_space
    }

    #[must_use]
    pub fn blender(&self) -> &MotionBlender {
        &self.blender
    }

    pub fn blender_mut(&mut self) -> &mut MotionBlender {
        &mut self.blender
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut AnimationMixer {
        &mut self.mixer
    }

    #[must_use]
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }
}
