//! Aim, impulse and ballistic preview math.
//!
//! Everything here is a pure function of its inputs: the drag controller calls
//! these once per tick and never keeps intermediate results around.

use bevy::prelude::*;

use crate::config::LaunchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AimPolicy {
    /// Launch where the pointer was dragged to.
    SameAsDrag,
    /// Slingshot: pull back to launch forward.
    #[default]
    OppositeOfDrag,
}

/// Applies the direction policy to a raw drag vector and clamps its length.
pub fn compute_aim_vector(raw: Vec2, policy: AimPolicy, max_distance: f32) -> Vec2 {
    let directed = match policy {
        AimPolicy::SameAsDrag => raw,
        AimPolicy::OppositeOfDrag => -raw,
    };
    directed.clamp_length_max(max_distance.max(0.0))
}

pub fn compute_impulse(aim_vector: Vec2, power_per_unit: f32) -> Vec2 {
    aim_vector * power_per_unit
}

/// Normalized drag strength in `[0, 1]`.
pub fn drag_progress(aim_vector: Vec2, max_distance: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    (aim_vector.length() / max_distance).clamp(0.0, 1.0)
}

pub fn aim_angle_deg(aim_vector: Vec2) -> f32 {
    if aim_vector == Vec2::ZERO {
        return 0.0;
    }
    aim_vector.y.atan2(aim_vector.x).to_degrees()
}

/// Velocity change produced by an impulse. Non-positive masses count as 1.
pub fn velocity_from_impulse(impulse: Vec2, mass: f32) -> Vec2 {
    let mass = if mass > 0.0 { mass } else { 1.0 };
    impulse / mass
}

/// Closed-form projectile positions at `time_step, 2 * time_step, ..`, excluding the start.
pub fn predict_trajectory(
    start: Vec2,
    initial_velocity: Vec2,
    gravity: Vec2,
    point_count: usize,
    time_step: f32,
) -> Vec<Vec2> {
    (1..=point_count)
        .map(|i| {
            let t = time_step * i as f32;
            start + initial_velocity * t + gravity * (0.5 * t * t)
        })
        .collect()
}

/// State of a drag at one tick. Built fresh every tick and handed out by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSnapshot {
    start_world: Vec3,
    current_world: Vec3,
    drag_vector: Vec2,
    aim_vector: Vec2,
    t: f32,
    aim_angle_deg: f32,
    impulse: Vec2,
}

impl DragSnapshot {
    pub fn new(start_world: Vec3, current_world: Vec3, config: &LaunchConfig) -> Self {
        let drag_vector = (current_world - start_world).truncate();
        let aim_vector =
            compute_aim_vector(drag_vector, config.aim_policy(), config.max_drag_distance);

        Self {
            start_world,
            current_world,
            drag_vector,
            aim_vector,
            t: drag_progress(aim_vector, config.max_drag_distance),
            aim_angle_deg: aim_angle_deg(aim_vector),
            impulse: compute_impulse(aim_vector, config.power_per_unit),
        }
    }

    /// Snapshot of a drag that has not moved yet.
    pub fn at_rest(start_world: Vec3, config: &LaunchConfig) -> Self {
        Self::new(start_world, start_world, config)
    }

    pub const fn start_world(&self) -> Vec3 {
        self.start_world
    }

    pub const fn current_world(&self) -> Vec3 {
        self.current_world
    }

    pub const fn drag_vector(&self) -> Vec2 {
        self.drag_vector
    }

    pub const fn aim_vector(&self) -> Vec2 {
        self.aim_vector
    }

    pub const fn t(&self) -> f32 {
        self.t
    }

    pub const fn aim_angle_deg(&self) -> f32 {
        self.aim_angle_deg
    }

    pub const fn impulse(&self) -> Vec2 {
        self.impulse
    }
}
