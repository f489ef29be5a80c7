//! Motion Blender
//!
//! Turns [`BlendWeights`] into per-track weights and keeps tracks of
//! different native durations in step.
//!
//! The highest-weight entry becomes the timing **driver**: it plays at unit
//! rate and every other weighted track is time-warped by
//! `own_duration / driver_duration` and hard phase-locked to the driver's
//! normalized phase each frame. Neutral tracks (idle and similar non-cyclic
//! motions) are time-warped but never phase-locked.
//!
//! Rates are signed. A track configured to play backwards keeps its negative
//! sign through every rate the blender writes.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::animation::blend_space::{BlendWeights, WeightEntry};
use crate::animation::mixer::ActionKey;
use crate::animation::track::{MotionTrack, TrackProvider, rate_sign};
use crate::errors::{LocomotionError, Result};

/// Drives a set of named tracks from blend space output.
///
/// Holds handles only; the tracks themselves live in a [`TrackProvider`].
#[derive(Debug, Clone, Default)]
pub struct MotionBlender {
    bindings: FxHashMap<String, ActionKey>,
    neutral: FxHashSet<String>,
    driver: Option<String>,
}

impl MotionBlender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to a track handle, returning the handle it replaced.
    pub fn bind(&mut self, name: impl Into<String>, key: ActionKey) -> Option<ActionKey> {
        self.bindings.insert(name.into(), key)
    }

    pub fn unbind(&mut self, name: &str) -> Option<ActionKey> {
        if self.driver.as_deref() == Some(name) {
            self.driver = None;
        }
        self.bindings.remove(name)
    }

    #[must_use]
    pub fn binding(&self, name: &str) -> Option<ActionKey> {
        self.bindings.get(name).copied()
    }

    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Marks `name` as neutral (exempt from phase lock), or clears the mark.
    pub fn set_neutral(&mut self, name: impl Into<String>, neutral: bool) {
        let name = name.into();
        if neutral {
            self.neutral.insert(name);
        } else {
            self.neutral.remove(&name);
        }
    }

    #[must_use]
    pub fn is_neutral(&self, name: &str) -> bool {
        self.neutral.contains(name)
    }

    /// Name of the track that drove the last successful [`apply`](Self::apply).
    #[must_use]
    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    /// Writes weights, rates and phases for one frame.
    ///
    /// Every entry is resolved before any track is touched, so an
    /// [`LocomotionError::UnknownTrack`] leaves all tracks as they were.
    /// An empty or all-zero weight set is a no-op: the previous frame holds.
    /// Otherwise every bound track missing from `weights` drops to weight 0.
    pub fn apply<P: TrackProvider>(&mut self, weights: &BlendWeights, tracks: &mut P) -> Result<()> {
        let mut resolved: SmallVec<[(ActionKey, &WeightEntry); 8]> = SmallVec::with_capacity(weights.len());
        for entry in weights {
            let key = self
                .bindings
                .get(&entry.name)
                .copied()
                .filter(|&key| tracks.track(key).is_some())
                .ok_or_else(|| LocomotionError::UnknownTrack(entry.name.clone()))?;
            resolved.push((key, entry));
        }

        let Some(&(driver_key, driver_entry)) = resolved.first() else {
            return Ok(());
        };
        if driver_entry.weight <= 0.0 {
            log::trace!("MotionBlender: all-zero weights, holding previous frame");
            return Ok(());
        }

        let Some(driver) = tracks.track_mut(driver_key) else {
            return Err(LocomotionError::UnknownTrack(driver_entry.name.clone()));
        };
        driver.set_effective_rate(rate_sign(driver.effective_rate()));
        driver.set_weight(driver_entry.weight);
        let driver_duration = driver.duration();
        let driver_phase = if driver_duration > 0.0 {
            driver.local_time() / driver_duration
        } else {
            0.0
        };

        for &(key, entry) in &resolved[1..] {
            let Some(track) = tracks.track_mut(key) else {
                continue;
            };
            track.set_weight(entry.weight);

            let own_duration = track.duration();
            let ratio = if driver_duration > 0.0 && own_duration > 0.0 {
                own_duration / driver_duration
            } else {
                1.0
            };
            track.set_effective_rate(ratio * rate_sign(track.effective_rate()));

            // Lock normalized phase, not seconds: clip lengths differ.
            if !self.neutral.contains(&entry.name) {
                track.set_local_time(driver_phase * own_duration);
            }
        }

        // Bound tracks absent from this frame (removed poses, pose-less
        // extras) must not keep a stale weight.
        for (name, &key) in &self.bindings {
            if resolved.iter().any(|&(weighted, _)| weighted == key) {
                continue;
            }
            if let Some(track) = tracks.track_mut(key)
                && track.weight() != 0.0
            {
                log::trace!("MotionBlender: silencing unweighted track '{name}'");
                track.set_weight(0.0);
            }
        }

        if self.driver.as_deref() != Some(driver_entry.name.as_str()) {
            log::debug!(
                "MotionBlender: driver {:?} -> '{}' (weight {:.3})",
                self.driver,
                driver_entry.name,
                driver_entry.weight
            );
            self.driver = Some(driver_entry.name.clone());
        }
        Ok(())
    }

    /// Steps every bound track by `dt * effective_rate`.
    pub fn advance<P: TrackProvider>(&self, dt: f32, tracks: &mut P) {
        for (name, &key) in &self.bindings {
            match tracks.track_mut(key) {
                Some(track) => track.advance(dt),
                None => log::warn!("MotionBlender: track '{name}' is no longer available"),
            }
        }
    }
}
