use glam::Vec2;

use crate::animation::blend_space::{BlendPose, BlendWeights};

/// Observer for blend results, e.g. a 2D diagnostic plot.
///
/// Purely observational: nothing a sink does feeds back into blending.
pub trait BlendDebugSink {
    fn observe(&mut self, layout: &[BlendPose], intent: Vec2, weights: &BlendWeights);
}

/// Keeps the most recent frame handed to it.
#[derive(Debug, Clone, Default)]
pub struct BlendSnapshot {
    pub layout: Vec<BlendPose>,
    pub intent: Vec2,
    pub weights: BlendWeights,
    pub frames: u64,
}

impl BlendDebugSink for BlendSnapshot {
    fn observe(&mut self, layout: &[BlendPose], intent: Vec2, weights: &BlendWeights) {
        if self.layout != layout {
            self.layout = layout.to_vec();
        }
        self.intent = intent;
        self.weights.clone_from(weights);
        self.frames += 1;
    }
}
