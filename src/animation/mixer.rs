use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::animation::action::AnimationAction;
use crate::animation::track::TrackProvider;

new_key_type! {
    pub struct ActionKey;
}

/// Pool of playing actions for one character.
///
/// Acts as the [`TrackProvider`] for a [`MotionBlender`](super::MotionBlender):
/// the blender stores [`ActionKey`]s, the mixer owns the actions.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionKey, AnimationAction>,
    by_name: FxHashMap<String, ActionKey>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action, indexed by its clip name.
    ///
    /// A later action with the same clip name shadows the earlier one in
    /// name lookups; both keep playing.
    pub fn add_action(&mut self, action: AnimationAction) -> ActionKey {
        let name = action.name().to_owned();
        let key = self.actions.insert(action);
        if self.by_name.insert(name.clone(), key).is_some() {
            log::warn!("AnimationMixer: action '{name}' shadows an existing action");
        }
        key
    }

    pub fn remove_action(&mut self, key: ActionKey) -> Option<AnimationAction> {
        let action = self.actions.remove(key)?;
        if self.by_name.get(action.name()) == Some(&key) {
            self.by_name.remove(action.name());
        }
        Some(action)
    }

    #[must_use]
    pub fn key_of(&self, name: &str) -> Option<ActionKey> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        self.actions.get(self.key_of(name)?)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut AnimationAction> {
        let key = self.key_of(name)?;
        self.actions.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionKey, &AnimationAction)> {
        self.actions.iter()
    }

    /// Advances every action by `dt`.
    pub fn update(&mut self, dt: f32) {
        for action in self.actions.values_mut() {
            action.update(dt);
        }
    }
}

impl TrackProvider for AnimationMixer {
    type Track = AnimationAction;

    fn track(&self, key: ActionKey) -> Option<&AnimationAction> {
        self.actions.get(key)
    }

    fn track_mut(&mut self, key: ActionKey) -> Option<&mut AnimationAction> {
        self.actions.get_mut(key)
    }
}
