//! Fake collaborators shared by the unit tests.

use bevy::prelude::*;

use crate::body::{HoldRig, InputSurface, PhysicsBody, Visualization};
use crate::mapper::Viewpoint;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeBody {
    pub position: Vec3,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub mass: f32,
    pub gravity_scale: f32,
    pub simulated: bool,
    pub impulses: Vec<Vec2>,
    /// Simulation state at the time of each impulse.
    pub simulated_on_impulse: Vec<bool>,
}

impl Default for FakeBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass: 1.0,
            gravity_scale: 1.0,
            simulated: true,
            impulses: Vec::new(),
            simulated_on_impulse: Vec::new(),
        }
    }
}

impl PhysicsBody for FakeBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn simulation_enabled(&self) -> bool {
        self.simulated
    }

    fn set_simulation_enabled(&mut self, enabled: bool) {
        self.simulated = enabled;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        let mass = if self.mass > 0.0 { self.mass } else { 1.0 };
        self.velocity += impulse / mass;
        self.impulses.push(impulse);
        self.simulated_on_impulse.push(self.simulated);
    }
}

/// Pointer over a 100x100 surface.
#[derive(Debug, Clone, Default)]
pub struct FakeInput {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
    pub position: Option<Vec2>,
}

impl FakeInput {
    pub fn press(position: Vec2) -> Self {
        Self {
            pressed: true,
            released: false,
            held: true,
            position: Some(position),
        }
    }

    pub fn hold(position: Vec2) -> Self {
        Self {
            pressed: false,
            released: false,
            held: true,
            position: Some(position),
        }
    }

    /// Pointer up and moving over the surface.
    pub fn hover(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..default()
        }
    }

    /// Down and up within the same tick.
    pub fn tap(position: Vec2) -> Self {
        Self {
            pressed: true,
            released: true,
            held: false,
            position: Some(position),
        }
    }

    pub fn release(position: Vec2) -> Self {
        Self {
            pressed: false,
            released: true,
            held: false,
            position: Some(position),
        }
    }
}

impl InputSurface for FakeInput {
    fn pointer_pressed(&self) -> bool {
        self.pressed
    }

    fn pointer_released(&self) -> bool {
        self.released
    }

    fn pointer_held(&self) -> bool {
        self.held
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.position
    }

    fn contains(&self, screen_position: Vec2) -> bool {
        (0.0..=100.0).contains(&screen_position.x) && (0.0..=100.0).contains(&screen_position.y)
    }
}

/// Orthographic view straight down the z axis; screen y grows downwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeViewpoint;

impl Viewpoint for FakeViewpoint {
    fn screen_ray(&self, screen_position: Vec2) -> Option<Ray3d> {
        Some(Ray3d {
            origin: Vec3::new(screen_position.x, -screen_position.y, 1000.0),
            direction: Dir3::NEG_Z,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingLine {
    pub enabled: bool,
    pub toggles: Vec<bool>,
    pub points: Vec<Vec2>,
}

impl Visualization for RecordingLine {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.toggles.push(enabled);
    }

    fn set_points(&mut self, points: &[Vec2]) {
        self.points = points.to_vec();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeRig {
    pub anchor: bool,
    pub attached: Option<(Vec2, f32)>,
    pub collision_enabled: bool,
    pub attach_count: usize,
    pub detach_count: usize,
}

impl Default for FakeRig {
    fn default() -> Self {
        Self {
            anchor: true,
            attached: None,
            collision_enabled: true,
            attach_count: 0,
            detach_count: 0,
        }
    }
}

impl HoldRig for FakeRig {
    fn has_anchor(&self) -> bool {
        self.anchor
    }

    fn attach(&mut self, local_offset: Vec2, local_rotation: f32) {
        self.attached = Some((local_offset, local_rotation));
        self.attach_count += 1;
    }

    fn detach_in_place(&mut self) {
        self.attached = None;
        self.detach_count += 1;
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }
}
