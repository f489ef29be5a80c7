use std::sync::Arc;

/// A named motion with a fixed native duration.
///
/// Keyframe data stays with the renderer; the blending core only needs to
/// know how long one cycle of the motion lasts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    #[must_use]
    pub fn shared(name: impl Into<String>, duration: f32) -> Arc<Self> {
        Arc::new(Self::new(name, duration))
    }
}
