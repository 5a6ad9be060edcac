//! Tuning for the launcher, set once at startup and read-only afterwards.
//!
//! Every section deserializes with `#[serde(default)]`, so a RON file only needs
//! to list the values it overrides:
//!
//! ```ron
//! (
//!     launch: (power_per_unit: 7.5, same_direction_as_drag: true),
//!     hold: (start_held: false),
//! )
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::arm::ArmPose;
use crate::error::ConfigError;
use crate::trajectory::AimPolicy;

pub const PIXELS_PER_METER: f32 = 100.0;

/// Environment variable holding the path of an optional RON config file.
pub const CONFIG_ENV: &str = "SLING_LAUNCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Resource, Reflect, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct LaunchConfig {
    /// Impulse per world unit of aim vector.
    pub power_per_unit: f32,
    /// Aim vectors are clamped to this length.
    pub max_drag_distance: f32,
    /// Releases below this impulse magnitude are discarded.
    pub min_launch_impulse: f32,
    /// A drag may only start while the body is slower than this.
    pub ready_speed_threshold: f32,
    /// `false` is slingshot mode: pull back to throw forward.
    pub same_direction_as_drag: bool,
    pub trajectory_point_count: usize,
    pub trajectory_time_step: f32,
    /// World gravity, written into the physics context at startup.
    pub gravity: Vec2,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            power_per_unit: 6.0,
            max_drag_distance: 150.0,
            min_launch_impulse: 60.0,
            ready_speed_threshold: 5.0,
            same_direction_as_drag: false,
            trajectory_point_count: 30,
            trajectory_time_step: 0.05,
            // Rapier's default gravity at `pixels_per_meter(PIXELS_PER_METER)`.
            gravity: Vec2::new(0.0, -9.81 * PIXELS_PER_METER),
        }
    }
}

impl LaunchConfig {
    pub const fn aim_policy(&self) -> AimPolicy {
        if self.same_direction_as_drag {
            AimPolicy::SameAsDrag
        } else {
            AimPolicy::OppositeOfDrag
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("power_per_unit", self.power_per_unit)?;
        positive("max_drag_distance", self.max_drag_distance)?;
        positive("trajectory_time_step", self.trajectory_time_step)?;
        non_negative("min_launch_impulse", self.min_launch_impulse)?;
        non_negative("ready_speed_threshold", self.ready_speed_threshold)?;

        if self.trajectory_point_count == 0 {
            return Err(ConfigError::NoTrajectoryPoints);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Resource, Reflect, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct HoldConfig {
    pub disable_collider_while_held: bool,
    /// Body position relative to the hand anchor while held.
    pub local_offset: Vec2,
    /// Body rotation relative to the hand anchor while held, in radians.
    pub local_rotation: f32,
    /// Attach the body to the hand as soon as the scene is spawned.
    pub start_held: bool,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            disable_collider_while_held: true,
            local_offset: Vec2::new(0.0, 18.0),
            local_rotation: 0.0,
            start_held: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Resource, Reflect, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct ArmConfig {
    pub rest: ArmPose,
    /// Pose reached when the drag is at full strength.
    pub wind_up: ArmPose,
    /// Pose the arm snaps to right after the release.
    pub follow_through: ArmPose,
    pub snap_duration: f32,
    pub settle_duration: f32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            rest: ArmPose::new(-0.4, 0.6, 0.2),
            wind_up: ArmPose::new(-2.2, 1.4, 0.6),
            follow_through: ArmPose::new(0.9, -0.3, -0.4),
            snap_duration: 0.08,
            settle_duration: 0.35,
        }
    }
}

impl ArmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("snap_duration", self.snap_duration)?;
        non_negative("settle_duration", self.settle_duration)
    }
}

/// Everything the launcher bit can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlingConfig {
    pub launch: LaunchConfig,
    pub hold: HoldConfig,
    pub arm: ArmConfig,
}

impl SlingConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.launch.validate()?;
        self.arm.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
