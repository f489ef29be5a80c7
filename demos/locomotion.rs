//! Headless locomotion demo.
//!
//! Walks a character around a square of waypoints and prints the blend each
//! half second. Run with `RUST_LOG=debug` to see driver switches.

use glam::{Vec2, Vec3};
use myth_locomotion::locomotion::{BlendSnapshot, planar_intent};
use myth_locomotion::{AnimationClip, BlendPose, LocomotionController, LocomotionSettings};

const DT: f32 = 1.0 / 60.0;
const SPEED: f32 = 1.5;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = LocomotionSettings {
        mirrored: vec!["running_back".into()],
        ..Default::default()
    };
    let clips = [
        AnimationClip::shared("idle", 2.4),
        AnimationClip::shared("running", 0.76),
        AnimationClip::shared("running_back", 0.76),
        AnimationClip::shared("strafe_left", 0.9),
        AnimationClip::shared("strafe_right", 0.9),
    ];
    let mut character = LocomotionController::from_clips(clips, settings);
    character.add_poses([
        BlendPose::new("idle", Vec2::ZERO),
        BlendPose::new("running", Vec2::Y),
        BlendPose::new("running_back", Vec2::NEG_Y),
        BlendPose::new("strafe_left", Vec2::X),
        BlendPose::new("strafe_right", Vec2::NEG_X),
    ])?;

    let waypoints = [
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(4.0, 0.0, 4.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::ZERO,
    ];

    let mut position = Vec3::ZERO;
    let mut plot = BlendSnapshot::default();
    let mut frame = 0_u32;

    for target in waypoints {
        println!("-> heading to {target}");
        loop {
            let remaining = target.distance(position);
            let intent = if remaining > 0.05 {
                planar_intent(position, target)
            } else {
                Vec2::ZERO
            };

            if let Err(err) = character.set_intent_observed(intent, &mut plot) {
                log::warn!("blend skipped this frame: {err}");
            }
            character.update(DT);

            if frame % 30 == 0 {
                let blend: Vec<String> = plot
                    .weights
                    .iter()
                    .filter(|e| e.weight > 0.0)
                    .map(|e| format!("{}={:.2}", e.name, e.weight))
                    .collect();
                println!(
                    "  t={:5.2}s pos=({:5.2}, {:5.2}) driver={:<13} {}",
                    frame as f32 * DT,
                    position.x,
                    position.z,
                    character.blender().driver().unwrap_or("-"),
                    blend.join(" ")
                );
            }
            frame += 1;

            if remaining <= 0.05 {
                break;
            }
            let step = (SPEED * DT).min(remaining);
            position += (target - position).normalize_or_zero() * step;
        }
    }

    Ok(())
}
