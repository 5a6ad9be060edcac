use bevy::prelude::*;
use strum::Display;
use tracing::debug;

use crate::body::{HoldRig, PhysicsBody};
use crate::config::HoldConfig;
use crate::error::HoldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Display)]
pub enum HoldState {
    /// Parented to the hand, simulation suspended.
    Held,
    #[default]
    Free,
}

/// Owns the held/free state of the launchable body.
#[derive(Debug, Default)]
pub struct HoldController {
    config: HoldConfig,
    state: HoldState,
}

impl HoldController {
    pub fn new(config: HoldConfig) -> Self {
        Self {
            config,
            state: HoldState::Free,
        }
    }

    pub const fn state(&self) -> HoldState {
        self.state
    }

    pub const fn is_held(&self) -> bool {
        matches!(self.state, HoldState::Held)
    }

    pub const fn config(&self) -> &HoldConfig {
        &self.config
    }

    /// Puts the body in the hand: motion is zeroed, simulation suspended and the
    /// body parented under the anchor.
    ///
    /// Attaching while already held resets the body in place the same way.
    pub fn attach_to_hold(
        &mut self,
        body: &mut dyn PhysicsBody,
        rig: &mut dyn HoldRig,
    ) -> Result<(), HoldError> {
        if !rig.has_anchor() {
            return Err(HoldError::NoAnchor);
        }

        if self.is_held() {
            debug!("Body already held, resetting it in the hand");
        }

        body.set_velocity(Vec2::ZERO);
        body.set_angular_velocity(0.0);
        body.set_simulation_enabled(false);

        if self.config.disable_collider_while_held {
            rig.set_collision_enabled(false);
        }
        rig.attach(self.config.local_offset, self.config.local_rotation);

        self.state = HoldState::Held;
        Ok(())
    }

    /// Lets go of the body, keeping its world position. Returns `false` when it
    /// was not held.
    pub fn detach_from_hold(&mut self, body: &mut dyn PhysicsBody, rig: &mut dyn HoldRig) -> bool {
        if !self.is_held() {
            return false;
        }

        rig.detach_in_place();
        if self.config.disable_collider_while_held {
            rig.set_collision_enabled(true);
        }
        body.set_simulation_enabled(true);

        self.state = HoldState::Free;
        true
    }
}
