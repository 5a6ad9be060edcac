//! Drag lifecycle: idle, dragging, release.
//!
//! The controller is ticked once per frame with the collaborators of that
//! frame. Entering a drag needs a fresh pointer press inside the input surface
//! while the body is (almost) at rest. While dragging, a snapshot is built and
//! published every tick. Releasing frees a held body first, then applies the
//! impulse unless it falls inside the dead-zone, then publishes the final
//! snapshot and hides the previews.
//!
//! A drag ends on the first tick the pointer is up, including the tick it was
//! pressed on, so a tap never leaves a drag running.

use bevy::prelude::*;
use strum::Display;
use tracing::{debug, info, warn};

use crate::body::{HoldRig, InputSurface, PhysicsBody, Visualization};
use crate::config::LaunchConfig;
use crate::error::DragError;
use crate::events::{DragEventKind, DragEvents};
use crate::hold::HoldController;
use crate::mapper::{self, Viewpoint};
use crate::trajectory::{DragSnapshot, predict_trajectory, velocity_from_impulse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Display)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Everything the controller touches during one tick.
pub struct Collaborators<'a> {
    pub body: &'a mut dyn PhysicsBody,
    pub input: &'a dyn InputSurface,
    pub viewpoint: Option<&'a dyn Viewpoint>,
    pub aim_line: &'a mut dyn Visualization,
    pub trajectory_line: &'a mut dyn Visualization,
    pub hold_rig: &'a mut dyn HoldRig,
    /// World gravity the simulation runs with, before the body's gravity scale.
    pub gravity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub snapshot: DragSnapshot,
    /// `false` when the impulse fell inside the dead-zone.
    pub launched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Idle,
    Started(DragSnapshot),
    Updated(DragSnapshot),
    Released(Release),
}

#[derive(Debug, Default)]
pub struct DragController {
    config: LaunchConfig,
    phase: DragPhase,
    start_world: Vec3,
    current_world: Vec3,
    events: DragEvents,
}

impl DragController {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    pub const fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub const fn events_mut(&mut self) -> &mut DragEvents {
        &mut self.events
    }

    pub fn tick(
        &mut self,
        hold: &mut HoldController,
        io: &mut Collaborators<'_>,
    ) -> Result<TickOutcome, DragError> {
        match self.phase {
            DragPhase::Idle => {
                let outcome = self.try_start(io)?;
                if matches!(outcome, TickOutcome::Started(_)) && pointer_up(io.input) {
                    debug!("Pointer lifted on the press tick");
                    return Ok(TickOutcome::Released(self.release(hold, io)));
                }
                Ok(outcome)
            }
            DragPhase::Dragging if pointer_up(io.input) => {
                Ok(TickOutcome::Released(self.release(hold, io)))
            }
            DragPhase::Dragging => self.update(io),
        }
    }

    fn try_start(&mut self, io: &mut Collaborators<'_>) -> Result<TickOutcome, DragError> {
        if !io.input.pointer_pressed() {
            return Ok(TickOutcome::Idle);
        }
        let Some(screen_position) = io.input.pointer_position() else {
            return Ok(TickOutcome::Idle);
        };
        if !io.input.contains(screen_position) {
            debug!("Drag ignored: pointer at {screen_position} is outside the input surface");
            return Ok(TickOutcome::Idle);
        }

        let speed_squared = io.body.velocity().length_squared();
        let threshold = self.config.ready_speed_threshold;
        if speed_squared > threshold * threshold {
            debug!(
                "Drag denied: body moving at {:.1}, ready below {threshold:.1}",
                speed_squared.sqrt()
            );
            return Ok(TickOutcome::Idle);
        }

        let viewpoint = io.viewpoint.ok_or(DragError::NoViewpoint)?;
        let Some(world) = mapper::map(viewpoint, screen_position, io.body.position().z) else {
            debug!("Drag ignored: pointer ray misses the body's plane");
            return Ok(TickOutcome::Idle);
        };

        self.phase = DragPhase::Dragging;
        self.start_world = world;
        self.current_world = world;

        let snapshot = DragSnapshot::at_rest(world, &self.config);
        debug!("Drag started at {world}");
        self.events.emit(DragEventKind::Start, snapshot);

        io.aim_line.set_enabled(true);
        io.trajectory_line.set_enabled(true);
        self.publish_preview(&snapshot, io);

        Ok(TickOutcome::Started(snapshot))
    }

    fn update(&mut self, io: &mut Collaborators<'_>) -> Result<TickOutcome, DragError> {
        let viewpoint = io.viewpoint.ok_or(DragError::NoViewpoint)?;
        self.track_pointer(viewpoint, io);

        let snapshot = DragSnapshot::new(self.start_world, self.current_world, &self.config);
        self.events.emit(DragEventKind::Update, snapshot);
        self.publish_preview(&snapshot, io);

        Ok(TickOutcome::Updated(snapshot))
    }

    fn release(&mut self, hold: &mut HoldController, io: &mut Collaborators<'_>) -> Release {
        // The release must happen even without a viewpoint; the last tracked position is used then.
        if let Some(viewpoint) = io.viewpoint {
            self.track_pointer(viewpoint, io);
        }
        let snapshot = DragSnapshot::new(self.start_world, self.current_world, &self.config);
        self.phase = DragPhase::Idle;

        // Free the body before pushing it, a suspended body ignores impulses.
        if hold.detach_from_hold(io.body, io.hold_rig) {
            debug!("Body released from the hand");
        }
        if !io.body.simulation_enabled() {
            warn!("Body still suspended at release, resuming its simulation");
            io.body.set_simulation_enabled(true);
        }

        let impulse = snapshot.impulse();
        let min_impulse = self.config.min_launch_impulse;
        let launched = impulse.length_squared() >= min_impulse * min_impulse;
        if launched {
            io.body.apply_impulse(impulse);
            info!(
                "Launched with impulse {impulse} ({:.0}% strength, {:.1} deg)",
                snapshot.t() * 100.0,
                snapshot.aim_angle_deg()
            );
        } else {
            debug!(
                "Release discarded: impulse {:.1} below {min_impulse:.1}",
                impulse.length()
            );
        }

        self.events.emit(DragEventKind::Release, snapshot);

        io.aim_line.set_enabled(false);
        io.trajectory_line.set_enabled(false);

        Release { snapshot, launched }
    }

    /// Keeps the previous position when the pointer is gone or misses the plane.
    fn track_pointer(&mut self, viewpoint: &dyn Viewpoint, io: &Collaborators<'_>) {
        let Some(screen_position) = io.input.pointer_position() else {
            return;
        };
        if let Some(world) = mapper::map(viewpoint, screen_position, io.body.position().z) {
            self.current_world = world;
        }
    }

    fn publish_preview(&self, snapshot: &DragSnapshot, io: &mut Collaborators<'_>) {
        let origin = io.body.position().truncate();
        io.aim_line.set_points(&[origin, origin + snapshot.aim_vector()]);

        let initial_velocity = velocity_from_impulse(snapshot.impulse(), io.body.mass());
        let gravity = io.gravity * io.body.gravity_scale();
        let points = predict_trajectory(
            origin,
            initial_velocity,
            gravity,
            self.config.trajectory_point_count,
            self.config.trajectory_time_step,
        );
        io.trajectory_line.set_points(&points);
    }
}

/// A release edge, or a pointer no longer down because its release was missed.
fn pointer_up(input: &dyn InputSurface) -> bool {
    input.pointer_released() || !input.pointer_held()
}
