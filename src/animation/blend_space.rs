//! 2D Blend Space
//!
//! Maps a point in a 2D parameter plane (typically a normalized planar
//! velocity) to blend weights over a set of named poses.
//!
//! # Algorithm
//!
//! 1. Rank every pose by squared distance to the query point.
//! 2. Take the two nearest poses, then the nearest remaining pose that forms
//!    a triangle of non-zero area with them.
//! 3. Compute the barycentric coordinates of the query point in that
//!    triangle, clamp negative coordinates to zero and renormalize.
//!
//! Points outside the triangle therefore hug its nearest edge instead of
//! extrapolating, and querying exactly at a pose yields weight `1.0` for it.
//!
//! ```rust,ignore
//! use glam::Vec2;
//! use myth_locomotion::animation::{BlendPose, BlendSpace2D};
//!
//! let mut space = BlendSpace2D::new();
//! space.add_poses([
//!     BlendPose::new("idle", Vec2::ZERO),
//!     BlendPose::new("run", Vec2::Y),
//!     BlendPose::new("strafe_left", Vec2::X),
//!     BlendPose::new("strafe_right", Vec2::NEG_X),
//! ])?;
//!
//! let weights = space.query(Vec2::new(0.0, 0.75))?;
//! assert_eq!(weights.dominant().map(|e| e.name.as_str()), Some("run"));
//! ```

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::errors::{LocomotionError, Result};

/// Minimum `|cross(v2 - v1, v3 - v1)|` (twice the triangle area) for three
/// poses to count as a usable triangle.
pub const DEFAULT_DEGENERATE_EPSILON: f32 = 1e-6;

/// A named sample point in the blend plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendPose {
    pub name: String,
    pub position: Vec2,
}

impl BlendPose {
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub name: String,
    pub weight: f32,
}

/// Output of a blend space query.
///
/// Holds one entry per registered pose, sorted by weight descending. Ties
/// keep pose registration order. Non-zero weights sum to `1.0`, or every
/// weight is zero for a degenerate query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlendWeights {
    entries: Vec<WeightEntry>,
}

impl BlendWeights {
    /// Builds a weight set from arbitrary entries, restoring the descending
    /// order (stable, so equal weights keep their given order).
    #[must_use]
    pub fn from_entries(mut entries: Vec<WeightEntry>) -> Self {
        entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest-weight entry.
    #[must_use]
    pub fn dominant(&self) -> Option<&WeightEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn weight_of(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.weight)
    }

    #[must_use]
    pub fn total(&self) -> f32 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    /// `false` when every weight is zero ("no blend" this frame).
    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.entries.iter().any(|entry| entry.weight > 0.0)
    }
}

impl<'a> IntoIterator for &'a BlendWeights {
    type Item = &'a WeightEntry;
    type IntoIter = std::slice::Iter<'a, WeightEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A set of named poses in a 2D parameter plane.
///
/// Poses keep their registration order, which breaks ranking and output
/// ties deterministically.
#[derive(Debug, Clone)]
pub struct BlendSpace2D {
    poses: Vec<BlendPose>,
    index: FxHashMap<String, usize>,
    degenerate_epsilon: f32,
}

impl Default for BlendSpace2D {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendSpace2D {
    #[must_use]
    pub fn new() -> Self {
        Self::with_epsilon(DEFAULT_DEGENERATE_EPSILON)
    }

    #[must_use]
    pub fn with_epsilon(degenerate_epsilon: f32) -> Self {
        Self {
            poses: Vec::new(),
            index: FxHashMap::default(),
            degenerate_epsilon: degenerate_epsilon.abs(),
        }
    }

    /// Inserts or overwrites poses by name.
    ///
    /// An overwritten pose keeps its registration slot. The whole batch is
    /// rejected if any pose has a non-finite position.
    pub fn add_poses(&mut self, poses: impl IntoIterator<Item = BlendPose>) -> Result<()> {
        let poses: Vec<BlendPose> = poses.into_iter().collect();

        if let Some(invalid) = poses.iter().find(|pose| !pose.position.is_finite()) {
            return Err(LocomotionError::InvalidPose {
                name: invalid.name.clone(),
            });
        }

        for pose in poses {
            if let Some(&slot) = self.index.get(&pose.name) {
                log::debug!("BlendSpace2D: overwriting pose '{}'", pose.name);
                self.poses[slot] = pose;
            } else {
                self.index.insert(pose.name.clone(), self.poses.len());
                self.poses.push(pose);
            }
        }
        Ok(())
    }

    /// Removes poses by name. Unknown names are ignored.
    pub fn remove_poses<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        let before = self.poses.len();
        for name in names {
            if let Some(slot) = self.index.remove(name.as_ref()) {
                self.poses.remove(slot);
                for other in self.index.values_mut() {
                    if *other > slot {
                        *other -= 1;
                    }
                }
            }
        }
        if self.poses.len() != before {
            log::debug!(
                "BlendSpace2D: removed {} pose(s), {} remaining",
                before - self.poses.len(),
                self.poses.len()
            );
        }
    }

    pub fn clear(&mut self) {
        self.poses.clear();
        self.index.clear();
    }

    /// Registered poses in registration order.
    #[must_use]
    pub fn poses(&self) -> &[BlendPose] {
        &self.poses
    }

    #[must_use]
    pub fn pose(&self, name: &str) -> Option<&BlendPose> {
        self.index.get(name).map(|&slot| &self.poses[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[must_use]
    pub fn degenerate_epsilon(&self) -> f32 {
        self.degenerate_epsilon
    }

    /// Computes blend weights for the query point `p`.
    ///
    /// Fails with [`LocomotionError::DegenerateBlendSpace`] when the poses
    /// cannot form a triangle around the point.
    pub fn query(&self, p: Vec2) -> Result<BlendWeights> {
        compute_weights(&self.poses, p, self.degenerate_epsilon)
    }
}

/// Pure weight computation behind [`BlendSpace2D::query`].
///
/// `poses` order is the registration order used for tie breaking.
pub fn compute_weights(poses: &[BlendPose], p: Vec2, degenerate_epsilon: f32) -> Result<BlendWeights> {
    let degenerate = || LocomotionError::DegenerateBlendSpace {
        pose_count: poses.len(),
    };

    if poses.len() < 3 {
        return Err(degenerate());
    }

    // Squared distance only ranks; it never feeds the weights.
    let mut ranked: SmallVec<[(usize, f32); 16]> = poses
        .iter()
        .enumerate()
        .map(|(slot, pose)| (slot, pose.position.distance_squared(p)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let i1 = ranked[0].0;
    let i2 = ranked[1].0;
    let v1 = poses[i1].position;
    let v2 = poses[i2].position;
    let edge = v2 - v1;

    let i3 = ranked[2..]
        .iter()
        .map(|&(slot, _)| slot)
        .find(|&slot| edge.perp_dot(poses[slot].position - v1).abs() > degenerate_epsilon)
        .ok_or_else(degenerate)?;
    let v3 = poses[i3].position;

    let weights = normalize(barycentric(p, v1, v2, v3));

    let mut entries: Vec<WeightEntry> = poses
        .iter()
        .map(|pose| WeightEntry {
            name: pose.name.clone(),
            weight: 0.0,
        })
        .collect();
    entries[i1].weight = weights[0];
    entries[i2].weight = weights[1];
    entries[i3].weight = weights[2];

    log::trace!(
        "BlendSpace2D: p={p} -> {}={:.3} {}={:.3} {}={:.3}",
        poses[i1].name,
        weights[0],
        poses[i2].name,
        weights[1],
        poses[i3].name,
        weights[2]
    );

    Ok(BlendWeights::from_entries(entries))
}

/// Barycentric coordinates of `p` in triangle `(v1, v2, v3)`.
///
/// The caller guarantees a non-zero triangle area.
#[inline]
fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> [f32; 3] {
    let denom = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    let w1 = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / denom;
    let w2 = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / denom;
    [w1, w2, 1.0 - w1 - w2]
}

/// Clamps negative (and NaN) coordinates to zero and rescales to sum to one.
/// An all-zero triple stays all zero.
#[inline]
fn normalize(raw: [f32; 3]) -> [f32; 3] {
    let clamped = raw.map(|w| if w > 0.0 { w } else { 0.0 });
    let sum: f32 = clamped.iter().sum();
    if sum > 0.0 {
        clamped.map(|w| w / sum)
    } else {
        [0.0; 3]
    }
}
