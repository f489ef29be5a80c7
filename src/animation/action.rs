use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::track::MotionTrack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// A playing instance of an [`AnimationClip`].
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    /// Normalized position within the cycle, in `[0, 1]`.
    #[must_use]
    pub fn phase(&self) -> f32 {
        if self.clip.duration > 0.0 {
            self.time / self.clip.duration
        } else {
            0.0
        }
    }

    /// Core logic: advance time.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        // 1. Accumulate time
        self.time += dt * self.time_scale;

        // 2. Handle loop mode
        match self.loop_mode {
            LoopMode::Once => {
                // Play once, stop at end or start
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true; // Auto-pause
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                // Standard loop: modulo
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Handle reverse playback loop
                    self.time = duration + (self.time % duration);
                    // An exact multiple of the duration lands on the end
                    if self.time >= duration {
                        self.time = 0.0;
                    }
                }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                // Normalize time into [0, 2*duration) cycle
                let mut t = self.time % double_duration;
                if t < 0.0 {
                    t += double_duration;
                }
                // In the second half of the cycle, reverse direction
                if t > duration {
                    t = double_duration - t;
                }
                self.time = t;
            }
        }
    }
}

impl MotionTrack for AnimationAction {
    fn duration(&self) -> f32 {
        self.clip.duration
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    fn effective_rate(&self) -> f32 {
        self.time_scale
    }

    fn set_effective_rate(&mut self, rate: f32) {
        self.time_scale = rate;
    }

    fn local_time(&self) -> f32 {
        self.time
    }

    fn set_local_time(&mut self, time: f32) {
        self.time = time;
    }

    fn advance(&mut self, dt: f32) {
        self.update(dt);
    }
}
