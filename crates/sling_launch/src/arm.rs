//! Cosmetic throwing arm that reacts to drag events.
//!
//! The arm never reads input. While a drag is live it blends from its rest
//! pose towards the wind-up pose by the drag strength; on release it snaps
//! forward to the follow-through pose and settles back to rest.

use bevy::prelude::*;
use serde::Deserialize;
use strum::{Display, EnumIter};

use crate::config::ArmConfig;
use crate::events::DragEventKind;
use crate::trajectory::DragSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Display, EnumIter)]
pub enum ArmSegment {
    Shoulder,
    Forearm,
    Hand,
}

/// Local rotation of each segment, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Deserialize)]
pub struct ArmPose {
    pub shoulder: f32,
    pub forearm: f32,
    pub hand: f32,
}

impl ArmPose {
    pub const fn new(shoulder: f32, forearm: f32, hand: f32) -> Self {
        Self {
            shoulder,
            forearm,
            hand,
        }
    }

    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            shoulder: (target.shoulder - self.shoulder).mul_add(t, self.shoulder),
            forearm: (target.forearm - self.forearm).mul_add(t, self.forearm),
            hand: (target.hand - self.hand).mul_add(t, self.hand),
        }
    }

    pub const fn angle(&self, segment: ArmSegment) -> f32 {
        match segment {
            ArmSegment::Shoulder => self.shoulder,
            ArmSegment::Forearm => self.forearm,
            ArmSegment::Hand => self.hand,
        }
    }
}

/// Snap-then-settle interpolation, advanced by hand once per frame.
#[derive(Debug, Clone, PartialEq)]
struct SnapTask {
    from: ArmPose,
    elapsed: f32,
}

impl SnapTask {
    const fn new(from: ArmPose) -> Self {
        Self { from, elapsed: 0.0 }
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    fn finished(&self, config: &ArmConfig) -> bool {
        self.elapsed >= config.snap_duration + config.settle_duration
    }

    fn pose(&self, config: &ArmConfig) -> ArmPose {
        if self.elapsed < config.snap_duration {
            return self
                .from
                .lerp(config.follow_through, self.elapsed / config.snap_duration);
        }

        let settled = self.elapsed - config.snap_duration;
        if settled < config.settle_duration {
            return config
                .follow_through
                .lerp(config.rest, settled / config.settle_duration);
        }

        config.rest
    }
}

#[derive(Debug, Default)]
pub struct ArmAnimator {
    config: ArmConfig,
    pose: ArmPose,
    task: Option<SnapTask>,
}

impl ArmAnimator {
    pub fn new(config: ArmConfig) -> Self {
        Self {
            pose: config.rest,
            config,
            task: None,
        }
    }

    pub const fn pose(&self) -> ArmPose {
        self.pose
    }

    pub const fn is_animating(&self) -> bool {
        self.task.is_some()
    }

    pub fn handle(&mut self, kind: DragEventKind, snapshot: &DragSnapshot) {
        match kind {
            DragEventKind::Start => self.on_drag_start(snapshot),
            DragEventKind::Update => self.on_drag_update(snapshot),
            DragEventKind::Release => self.on_drag_release(snapshot),
        }
    }

    pub fn on_drag_start(&mut self, snapshot: &DragSnapshot) {
        self.task = None;
        self.follow(snapshot);
    }

    pub fn on_drag_update(&mut self, snapshot: &DragSnapshot) {
        self.task = None;
        self.follow(snapshot);
    }

    /// Starts the snap from wherever the arm is now, dropping any running one.
    pub fn on_drag_release(&mut self, _snapshot: &DragSnapshot) {
        self.task = Some(SnapTask::new(self.pose));
    }

    /// Moves the running snap forward by `dt` seconds and returns the pose to show.
    pub fn advance(&mut self, dt: f32) -> ArmPose {
        let Some(task) = &mut self.task else {
            return self.pose;
        };

        task.advance(dt);
        self.pose = task.pose(&self.config);
        if task.finished(&self.config) {
            self.task = None;
        }
        self.pose
    }

    fn follow(&mut self, snapshot: &DragSnapshot) {
        self.pose = self.config.rest.lerp(self.config.wind_up, snapshot.t());
    }
}
