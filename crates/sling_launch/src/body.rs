//! Collaborators the launcher drives but does not own.

use bevy::prelude::*;

/// The rigid body being launched, as seen by the drag and hold controllers.
pub trait PhysicsBody {
    /// World position; `z` is the depth plane pointer positions are mapped onto.
    fn position(&self) -> Vec3;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_angular_velocity(&mut self, angular_velocity: f32);
    fn mass(&self) -> f32;
    fn gravity_scale(&self) -> f32;
    fn simulation_enabled(&self) -> bool;
    fn set_simulation_enabled(&mut self, enabled: bool);
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Pointer events for the current tick.
pub trait InputSurface {
    /// The pointer went down this tick.
    fn pointer_pressed(&self) -> bool;
    /// The pointer went up this tick.
    fn pointer_released(&self) -> bool;
    /// The pointer is down at the end of this tick.
    fn pointer_held(&self) -> bool;
    fn pointer_position(&self) -> Option<Vec2>;
    fn contains(&self, screen_position: Vec2) -> bool;
}

/// A line drawn from computed points, e.g. the aim line or the trajectory preview.
pub trait Visualization {
    fn set_enabled(&mut self, enabled: bool);
    fn set_points(&mut self, points: &[Vec2]);
}

/// Scene-graph side of holding: parenting the body under the hand anchor.
pub trait HoldRig {
    fn has_anchor(&self) -> bool;
    fn attach(&mut self, local_offset: Vec2, local_rotation: f32);
    /// Clears the parent while keeping the body where it is in the world.
    fn detach_in_place(&mut self);
    fn set_collision_enabled(&mut self, enabled: bool);
}
