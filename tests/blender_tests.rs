//! Motion Blender Tests
//!
//! Tests for:
//! - Driver selection, unit rate and sign preservation
//! - Duration-ratio time-warp of non-driver tracks
//! - Hard phase lock and the neutral exemption
//! - Silencing bound tracks absent from the weight list
//! - UnknownTrack failures leaving tracks untouched
//! - Time advance across bound tracks

use myth_locomotion::animation::action::AnimationAction;
use myth_locomotion::animation::blend_space::{BlendWeights, WeightEntry};
use myth_locomotion::animation::blender::MotionBlender;
use myth_locomotion::animation::clip::AnimationClip;
use myth_locomotion::animation::mixer::AnimationMixer;
use myth_locomotion::errors::LocomotionError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn weights(entries: &[(&str, f32)]) -> BlendWeights {
    BlendWeights::from_entries(
        entries
            .iter()
            .map(|&(name, weight)| WeightEntry {
                name: name.to_owned(),
                weight,
            })
            .collect(),
    )
}

/// running 1s, running_back 1s (reversed), strafe_left 2s, idle 4s (neutral).
fn setup() -> (MotionBlender, AnimationMixer) {
    let mut mixer = AnimationMixer::new();
    let mut blender = MotionBlender::new();

    for (name, duration, rate) in [
        ("running", 1.0, 1.0),
        ("running_back", 1.0, -1.0),
        ("strafe_left", 2.0, 1.0),
        ("idle", 4.0, 1.0),
    ] {
        let mut action = AnimationAction::new(AnimationClip::shared(name, duration));
        action.weight = 0.0;
        action.time_scale = rate;
        let key = mixer.add_action(action);
        blender.bind(name, key);
    }
    blender.set_neutral("idle", true);

    (blender, mixer)
}

fn action<'a>(mixer: &'a AnimationMixer, name: &str) -> &'a AnimationAction {
    mixer
        .action(name)
        .unwrap_or_else(|| panic!("missing action '{name}'"))
}

// ============================================================================
// Driver
// ============================================================================

#[test]
fn driver_is_highest_weight_at_unit_rate() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    if let Some(running) = mixer.action_mut("running") {
        running.time_scale = 0.5;
    }

    blender.apply(&weights(&[("strafe_left", 0.3), ("running", 0.7)]), &mut mixer)?;

    assert_eq!(blender.driver(), Some("running"));
    let running = action(&mixer, "running");
    assert!(approx(running.time_scale, 1.0));
    assert!(approx(running.weight, 0.7));
    Ok(())
}

#[test]
fn reversed_driver_keeps_its_sign() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();

    blender.apply(&weights(&[("running_back", 0.9), ("strafe_left", 0.1)]), &mut mixer)?;

    let back = action(&mixer, "running_back");
    assert!(approx(back.time_scale, -1.0));
    assert!(approx(back.weight, 0.9));
    Ok(())
}

#[test]
fn driver_change_is_tracked() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();

    blender.apply(&weights(&[("running", 1.0)]), &mut mixer)?;
    assert_eq!(blender.driver(), Some("running"));

    blender.apply(&weights(&[("strafe_left", 0.6), ("running", 0.4)]), &mut mixer)?;
    assert_eq!(blender.driver(), Some("strafe_left"));
    Ok(())
}

// ============================================================================
// Time-Warp & Phase Lock
// ============================================================================

#[test]
fn non_driver_rate_is_duration_ratio() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();

    blender.apply(
        &weights(&[("running", 0.6), ("strafe_left", 0.4), ("idle", 0.0)]),
        &mut mixer,
    )?;

    let strafe = action(&mixer, "strafe_left");
    assert!(approx(strafe.time_scale, 2.0), "got {}", strafe.time_scale);
    assert!(approx(strafe.weight, 0.4));

    let idle = action(&mixer, "idle");
    assert!(approx(idle.time_scale, 4.0));
    assert!(approx(idle.weight, 0.0));
    Ok(())
}

#[test]
fn reversed_non_driver_keeps_negative_rate() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();

    blender.apply(
        &weights(&[("strafe_left", 0.7), ("running_back", 0.3)]),
        &mut mixer,
    )?;

    // 1s / 2s, reversed
    let back = action(&mixer, "running_back");
    assert!(approx(back.time_scale, -0.5), "got {}", back.time_scale);
    assert!(approx(action(&mixer, "strafe_left").time_scale, 1.0));
    Ok(())
}

#[test]
fn repeated_apply_does_not_compound_rates() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    let frame = weights(&[("running", 0.6), ("strafe_left", 0.4)]);

    for _ in 0..5 {
        blender.apply(&frame, &mut mixer)?;
    }

    assert!(approx(action(&mixer, "strafe_left").time_scale, 2.0));
    assert!(approx(action(&mixer, "running").time_scale, 1.0));
    Ok(())
}

#[test]
fn non_driver_tracks_lock_to_driver_phase() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    if let Some(running) = mixer.action_mut("running") {
        running.time = 0.3;
    }
    if let Some(strafe) = mixer.action_mut("strafe_left") {
        strafe.time = 1.5;
    }
    if let Some(back) = mixer.action_mut("running_back") {
        back.time = 0.9;
    }

    blender.apply(
        &weights(&[("running", 0.5), ("strafe_left", 0.3), ("running_back", 0.2)]),
        &mut mixer,
    )?;

    // Driver phase 0.3 of a 1s clip; the 2s strafe lands on the same phase.
    assert!(approx(action(&mixer, "running").time, 0.3));
    assert!(approx(action(&mixer, "strafe_left").time, 0.6));
    assert!(approx(action(&mixer, "strafe_left").phase(), 0.3));
    assert!(approx(action(&mixer, "running_back").time, 0.3));
    Ok(())
}

#[test]
fn longer_driver_keeps_locked_track_inside_its_cycle() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    if let Some(idle) = mixer.action_mut("idle") {
        idle.time = 3.0;
    }

    blender.apply(&weights(&[("idle", 0.7), ("running", 0.3)]), &mut mixer)?;

    assert_eq!(blender.driver(), Some("idle"));
    let running = action(&mixer, "running");
    assert!(
        running.time >= 0.0 && running.time < 1.0,
        "locked time should stay within the 1s clip, got {}",
        running.time
    );
    assert!(approx(running.time, 0.75));
    assert!(approx(running.phase(), action(&mixer, "idle").phase()));
    // 1s clip against a 4s driver
    assert!(approx(running.time_scale, 0.25));
    Ok(())
}

#[test]
fn bound_tracks_missing_from_weights_are_silenced() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&weights(&[("running", 0.6), ("strafe_left", 0.4)]), &mut mixer)?;
    if let Some(back) = mixer.action_mut("running_back") {
        back.weight = 0.7;
    }

    // strafe_left dropped out of the layout; running_back never had a pose.
    blender.apply(&weights(&[("running", 0.8), ("idle", 0.2)]), &mut mixer)?;

    assert!(approx(action(&mixer, "strafe_left").weight, 0.0));
    assert!(approx(action(&mixer, "running_back").weight, 0.0));
    let total: f32 = mixer.iter().map(|(_, a)| a.weight).sum();
    assert!(approx(total, 1.0), "track weights sum to {total}");
    Ok(())
}

#[test]
fn unweighted_tracks_keep_weight_when_frame_is_held() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&weights(&[("running", 0.6), ("strafe_left", 0.4)]), &mut mixer)?;

    blender.apply(&weights(&[("idle", 0.0)]), &mut mixer)?;

    assert!(approx(action(&mixer, "strafe_left").weight, 0.4));
    Ok(())
}

#[test]
fn neutral_tracks_are_not_phase_locked() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    if let Some(running) = mixer.action_mut("running") {
        running.time = 0.3;
    }
    if let Some(idle) = mixer.action_mut("idle") {
        idle.time = 2.5;
    }

    blender.apply(&weights(&[("running", 0.6), ("idle", 0.4)]), &mut mixer)?;

    let idle = action(&mixer, "idle");
    assert!(approx(idle.time, 2.5), "idle should keep its own clock, got {}", idle.time);
    assert!(approx(idle.weight, 0.4));
    Ok(())
}

#[test]
fn neutral_flag_can_be_cleared() {
    let (mut blender, _mixer) = setup();
    assert!(blender.is_neutral("idle"));
    blender.set_neutral("idle", false);
    assert!(!blender.is_neutral("idle"));
}

// ============================================================================
// Degenerate Input & Failures
// ============================================================================

#[test]
fn all_zero_weights_hold_previous_frame() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&weights(&[("running", 0.6), ("strafe_left", 0.4)]), &mut mixer)?;

    blender.apply(&weights(&[("running", 0.0), ("strafe_left", 0.0)]), &mut mixer)?;

    assert!(approx(action(&mixer, "running").weight, 0.6));
    assert!(approx(action(&mixer, "strafe_left").weight, 0.4));
    assert_eq!(blender.driver(), Some("running"));
    Ok(())
}

#[test]
fn empty_weights_are_a_no_op() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&BlendWeights::default(), &mut mixer)?;
    assert!(blender.driver().is_none());
    Ok(())
}

#[test]
fn unknown_track_fails_without_side_effects() {
    let (mut blender, mut mixer) = setup();
    if let Some(strafe) = mixer.action_mut("strafe_left") {
        strafe.time = 1.5;
    }

    let err = blender
        .apply(
            &weights(&[("running", 0.5), ("strafe_left", 0.3), ("jump", 0.2)]),
            &mut mixer,
        )
        .unwrap_err();

    assert_eq!(err, LocomotionError::UnknownTrack("jump".to_owned()));
    let strafe = action(&mixer, "strafe_left");
    assert!(approx(strafe.weight, 0.0));
    assert!(approx(strafe.time_scale, 1.0));
    assert!(approx(strafe.time, 1.5));
    assert!(blender.driver().is_none());
}

#[test]
fn stale_handle_is_an_unknown_track() {
    let (mut blender, mut mixer) = setup();
    let key = mixer.key_of("strafe_left").expect("bound");
    mixer.remove_action(key);

    let err = blender
        .apply(&weights(&[("strafe_left", 1.0)]), &mut mixer)
        .unwrap_err();
    assert_eq!(err, LocomotionError::UnknownTrack("strafe_left".to_owned()));
}

#[test]
fn unbind_forgets_track_and_driver() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&weights(&[("running", 1.0)]), &mut mixer)?;

    assert!(blender.unbind("running").is_some());
    assert!(blender.driver().is_none());
    assert!(blender.binding("running").is_none());
    assert_eq!(blender.bound_count(), 3);
    Ok(())
}

// ============================================================================
// Time Advance
// ============================================================================

#[test]
fn advance_steps_by_effective_rate() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    blender.apply(&weights(&[("running", 0.6), ("strafe_left", 0.4)]), &mut mixer)?;

    blender.advance(0.25, &mut mixer);

    assert!(approx(action(&mixer, "running").time, 0.25));
    assert!(approx(action(&mixer, "strafe_left").time, 0.5));
    // reversed: 0.0 - 0.25 wraps to 0.75
    assert!(approx(action(&mixer, "running_back").time, 0.75));
    assert!(approx(action(&mixer, "idle").time, 0.25));
    Ok(())
}

#[test]
fn phase_lock_survives_advance_cycles() -> anyhow::Result<()> {
    let (mut blender, mut mixer) = setup();
    let frame = weights(&[("running", 0.6), ("strafe_left", 0.4)]);

    for _ in 0..10 {
        blender.apply(&frame, &mut mixer)?;
        let driver_phase = action(&mixer, "running").phase();
        assert!(approx(action(&mixer, "strafe_left").phase(), driver_phase));
        blender.advance(1.0 / 60.0, &mut mixer);
    }
    Ok(())
}
