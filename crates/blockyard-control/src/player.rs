//! Per-frame player controller: smoothed intents to body velocity and camera follow.
//!
//! `step` is pure. The host reads the body, calls `step`, then writes the
//! commanded velocity back to the body and the camera position to the camera.

use blockyard_geom::{Euler, Vec3, frame_factor, lerp, lerp_angle};
use blockyard_world::ViewMode;
use serde::{Deserialize, Serialize};

use crate::input::MoveIntents;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed in units per second.
    pub speed: f32,
    pub jump_speed: f32,
    /// Vertical speed below which the body counts as grounded.
    pub jump_epsilon: f32,
    /// Per-60Hz-frame blend toward a held intent.
    pub blend_in: f32,
    /// Per-60Hz-frame blend toward zero after release.
    pub decay: f32,
    pub zero_threshold: f32,
    pub camera_lerp: f32,
    pub rotation_lerp: f32,
    pub third_person_distance: f32,
    pub third_person_height: f32,
    /// Walk cycle rate in radians per second.
    pub walk_rate: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            jump_speed: 4.0,
            jump_epsilon: 0.05,
            blend_in: 0.2,
            decay: 0.1,
            zero_threshold: 0.01,
            camera_lerp: 0.3,
            rotation_lerp: 0.15,
            third_person_distance: 4.0,
            third_person_height: 2.0,
            walk_rate: 8.0,
        }
    }
}

/// Directional intents smoothed into `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedIntents {
    pub forward: f32,
    pub backward: f32,
    pub left: f32,
    pub right: f32,
}

impl SmoothedIntents {
    fn approach(current: f32, held: bool, t: &PlayerTuning, dt: f32) -> f32 {
        let (target, f) = if held {
            (1.0, t.blend_in)
        } else {
            (0.0, t.decay)
        };
        let next = lerp(current, target, frame_factor(f, dt));
        if next.abs() < t.zero_threshold { 0.0 } else { next }
    }

    pub fn advance(self, m: &MoveIntents, t: &PlayerTuning, dt: f32) -> Self {
        Self {
            forward: Self::approach(self.forward, m.forward, t, dt),
            backward: Self::approach(self.backward, m.backward, t, dt),
            left: Self::approach(self.left, m.left, t, dt),
            right: Self::approach(self.right, m.right, t, dt),
        }
    }

    /// Camera-space planar direction; -z is forward.
    pub fn planar(&self) -> Vec3 {
        Vec3::new(self.right - self.left, 0.0, self.backward - self.forward)
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.backward == 0.0 && self.left == 0.0 && self.right == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub intents: SmoothedIntents,
    /// Velocity the body should take this frame.
    pub velocity: Vec3,
    pub camera_position: Vec3,
    /// Model facing around +Y, radians.
    pub facing: f32,
    pub walk_clock: f32,
    pub moving: bool,
}

impl PlayerState {
    pub fn spawn(position: Vec3) -> Self {
        Self {
            intents: SmoothedIntents::default(),
            velocity: Vec3::ZERO,
            camera_position: position,
            facing: 0.0,
            walk_clock: 0.0,
            moving: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub movement: MoveIntents,
    pub look: Euler,
    pub view_mode: ViewMode,
    pub body_position: Vec3,
    pub body_velocity: Vec3,
}

pub fn step(
    tuning: &PlayerTuning,
    prev: &PlayerState,
    input: &FrameInput,
    dt: f32,
) -> PlayerState {
    let intents = prev.intents.advance(&input.movement, tuning, dt);

    let planar = intents.planar();
    let dir = if planar.length() > tuning.zero_threshold {
        input.look.rotate(planar.normalized() * tuning.speed)
    } else {
        Vec3::ZERO
    };
    let moving = dir.x != 0.0 || dir.z != 0.0;

    let mut vy = input.body_velocity.y;
    if input.movement.jump && vy.abs() < tuning.jump_epsilon {
        vy = tuning.jump_speed;
    }
    let velocity = Vec3::new(dir.x, vy, dir.z);

    let target = match input.view_mode {
        ViewMode::FirstPerson => input.body_position,
        ViewMode::ThirdPerson => {
            let predicted = input.body_position + input.body_velocity * dt;
            let back = input.look.forward() * tuning.third_person_distance;
            predicted - back + Vec3::new(0.0, tuning.third_person_height, 0.0)
        }
    };
    let camera_position = prev
        .camera_position
        .lerp(target, frame_factor(tuning.camera_lerp, dt));

    let (facing, walk_clock) = if moving {
        let want = dir.x.atan2(dir.z);
        (
            lerp_angle(prev.facing, want, frame_factor(tuning.rotation_lerp, dt)),
            prev.walk_clock + dt * tuning.walk_rate,
        )
    } else {
        (prev.facing, 0.0)
    };

    PlayerState {
        intents,
        velocity,
        camera_position,
        facing,
        walk_clock,
        moving,
    }
}
