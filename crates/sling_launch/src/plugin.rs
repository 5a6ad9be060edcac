//! Bevy side of the launcher: adapters from ECS data to the controller's
//! collaborators, and the systems that tick everything once per frame.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::transform::commands::BuildChildrenTransformExt;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;
use bits_helpers::input::{PointerSample, surface_contains};
use parking_lot::Mutex;
use strum::IntoEnumIterator;

use crate::arm::{ArmAnimator, ArmSegment};
use crate::body::{HoldRig, InputSurface, PhysicsBody, Visualization};
use crate::config::{ArmConfig, HoldConfig, LaunchConfig, SlingConfig};
use crate::drag::{Collaborators, DragController, DragPhase};
use crate::events::{DragEventKind, DragEvents, SubscriberId};
use crate::hold::HoldController;
use crate::mapper::{CameraViewpoint, Viewpoint};
use crate::trajectory::DragSnapshot;

const AIM_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const TRAJECTORY_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);

/// Height of a held body above its anchor, so it is drawn over the hand.
const HELD_DEPTH: f32 = 1.0;

#[derive(Default)]
pub struct SlingLaunchPlugin {
    pub config: SlingConfig,
}

impl Plugin for SlingLaunchPlugin {
    fn build(&self, app: &mut App) {
        let mut launcher = Launcher::new(&self.config);
        let queue = DragEventQueue::default();
        queue.subscribe_to(launcher.drag.events_mut());

        app.register_type::<LaunchConfig>()
            .register_type::<HoldConfig>()
            .register_type::<ArmConfig>()
            .insert_resource(self.config.launch.clone())
            .insert_resource(self.config.hold.clone())
            .insert_resource(self.config.arm.clone())
            .insert_resource(launcher)
            .insert_resource(queue)
            .insert_resource(ThrowingArm(ArmAnimator::new(self.config.arm.clone())))
            .init_resource::<AimPreview>()
            .add_event::<DragEvent>()
            .add_systems(Startup, apply_world_gravity)
            .add_systems(PostStartup, hold_on_spawn)
            .add_systems(
                Update,
                (
                    reset_on_key_r,
                    drive_launcher,
                    forward_drag_events,
                    animate_arm,
                    draw_previews,
                )
                    .chain(),
            );
    }
}

/// The body being launched. Exactly one is expected.
#[derive(Component, Debug, Default)]
pub struct Launchable;

/// Parent of the body while it is held.
#[derive(Component, Debug, Default)]
pub struct HandAnchor;

#[derive(Component, Debug, Clone, Copy)]
pub struct ArmJoint(pub ArmSegment);

/// Camera used to map pointer positions into the world.
#[derive(Component, Debug, Default)]
pub struct MainCamera;

#[derive(Resource, Debug, Default)]
pub struct Launcher {
    pub drag: DragController,
    pub hold: HoldController,
}

impl Launcher {
    pub fn new(config: &SlingConfig) -> Self {
        Self {
            drag: DragController::new(config.launch.clone()),
            hold: HoldController::new(config.hold.clone()),
        }
    }
}

#[derive(Resource, Debug)]
pub struct ThrowingArm(pub ArmAnimator);

/// Drag lifecycle republished for other systems.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub kind: DragEventKind,
    pub snapshot: DragSnapshot,
}

/// Collects what the controller's subscribers receive until the next
/// [`forward_drag_events`] run.
#[derive(Resource, Debug, Clone, Default)]
pub struct DragEventQueue(Arc<Mutex<Vec<DragEvent>>>);

impl DragEventQueue {
    pub fn subscribe_to(&self, events: &mut DragEvents) -> Vec<SubscriberId> {
        DragEventKind::iter()
            .map(|kind| {
                let queue = Arc::clone(&self.0);
                events.subscribe(kind, move |snapshot| {
                    queue.lock().push(DragEvent { kind, snapshot });
                })
            })
            .collect()
    }

    fn drain(&self) -> Vec<DragEvent> {
        core::mem::take(&mut *self.0.lock())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewLine {
    pub enabled: bool,
    pub points: Vec<Vec2>,
}

impl Visualization for PreviewLine {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.points.clear();
        }
    }

    fn set_points(&mut self, points: &[Vec2]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }
}

#[derive(Resource, Debug, Default)]
pub struct AimPreview {
    pub aim: PreviewLine,
    pub trajectory: PreviewLine,
}

/// Pointer sampled from the primary window.
struct WindowInput {
    sample: PointerSample,
    size: Vec2,
}

impl WindowInput {
    fn new(sample: PointerSample, window: &Window) -> Self {
        Self {
            sample,
            size: Vec2::new(window.width(), window.height()),
        }
    }
}

impl InputSurface for WindowInput {
    fn pointer_pressed(&self) -> bool {
        self.sample.just_pressed
    }

    fn pointer_released(&self) -> bool {
        self.sample.just_released
    }

    fn pointer_held(&self) -> bool {
        self.sample.pressed
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.sample.position
    }

    fn contains(&self, screen_position: Vec2) -> bool {
        surface_contains(self.size, screen_position)
    }
}

/// Rapier components of the launchable body. Enabling or disabling the
/// simulation is recorded and applied through [`Commands`] afterwards.
struct RapierBody<'w> {
    position: Vec3,
    velocity: Mut<'w, Velocity>,
    impulse: Mut<'w, ExternalImpulse>,
    mass: f32,
    gravity_scale: f32,
    was_simulated: bool,
    simulated: bool,
}

impl RapierBody<'_> {
    fn apply(&self, commands: &mut Commands, entity: Entity) {
        if self.simulated == self.was_simulated {
            return;
        }
        if self.simulated {
            commands.entity(entity).remove::<RigidBodyDisabled>();
        } else {
            commands.entity(entity).insert(RigidBodyDisabled);
        }
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.linvel = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.velocity.angvel = angular_velocity;
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
        self.impulse.impulse += impulse;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RigOp {
    Attach { offset: Vec2, rotation: f32 },
    DetachInPlace,
    Collision(bool),
}

/// Records hierarchy and collider changes to apply through [`Commands`].
#[derive(Debug, Default)]
struct EntityRig {
    anchor: Option<Entity>,
    ops: Vec<RigOp>,
}

impl EntityRig {
    fn new(anchor: Option<Entity>) -> Self {
        Self {
            anchor,
            ops: Vec::new(),
        }
    }

    fn apply(self, commands: &mut Commands, body: Entity) {
        for op in self.ops {
            match op {
                RigOp::Attach { offset, rotation } => {
                    let Some(anchor) = self.anchor else {
                        continue;
                    };
                    commands.entity(body).set_parent(anchor).insert(
                        Transform::from_translation(offset.extend(HELD_DEPTH))
                            .with_rotation(Quat::from_rotation_z(rotation)),
                    );
                }
                RigOp::DetachInPlace => {
                    commands.entity(body).remove_parent_in_place();
                }
                RigOp::Collision(true) => {
                    commands.entity(body).remove::<ColliderDisabled>();
                }
                RigOp::Collision(false) => {
                    commands.entity(body).insert(ColliderDisabled);
                }
            }
        }
    }
}

impl HoldRig for EntityRig {
    fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    fn attach(&mut self, local_offset: Vec2, local_rotation: f32) {
        self.ops.push(RigOp::Attach {
            offset: local_offset,
            rotation: local_rotation,
        });
    }

    fn detach_in_place(&mut self) {
        self.ops.push(RigOp::DetachInPlace);
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.ops.push(RigOp::Collision(enabled));
    }
}

type LaunchableQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static GlobalTransform,
        &'static mut Velocity,
        &'static mut ExternalImpulse,
        &'static ReadMassProperties,
        Option<&'static GravityScale>,
        Has<RigidBodyDisabled>,
    ),
    With<Launchable>,
>;

fn drive_launcher(
    mut commands: Commands,
    mut launcher: ResMut<Launcher>,
    mut preview: ResMut<AimPreview>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut bodies: LaunchableQuery,
    anchors: Query<Entity, With<HandAnchor>>,
    rapier_configs: Query<&RapierConfiguration, With<DefaultRapierContext>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((entity, transform, velocity, impulse, mass, gravity_scale, disabled)) =
        bodies.get_single_mut()
    else {
        warn_once!("Expected exactly one launchable body");
        return;
    };

    let input = WindowInput::new(PointerSample::from_window(&buttons, &touches, window), window);
    let viewpoint = cameras
        .get_single()
        .ok()
        .map(|(camera, camera_transform)| CameraViewpoint {
            camera,
            transform: camera_transform,
        });
    let mut body = RapierBody {
        position: transform.translation(),
        velocity,
        impulse,
        mass: mass.get().mass,
        gravity_scale: gravity_scale.map_or(1.0, |scale| scale.0),
        was_simulated: !disabled,
        simulated: !disabled,
    };
    let mut rig = EntityRig::new(anchors.get_single().ok());

    let gravity = rapier_configs
        .get_single()
        .map_or(launcher.drag.config().gravity, |config| config.gravity);

    let launcher = &mut *launcher;
    let preview = &mut *preview;
    let mut io = Collaborators {
        body: &mut body,
        input: &input,
        viewpoint: viewpoint.as_ref().map(|view| view as &dyn Viewpoint),
        aim_line: &mut preview.aim,
        trajectory_line: &mut preview.trajectory,
        hold_rig: &mut rig,
        gravity,
    };
    if let Err(error) = launcher.drag.tick(&mut launcher.hold, &mut io) {
        warn_once!("Launcher cannot run: {error}");
    }

    rig.apply(&mut commands, entity);
    body.apply(&mut commands, entity);
}

/// Makes the simulation fall the way the trajectory preview expects.
fn apply_world_gravity(
    launch: Res<LaunchConfig>,
    mut rapier_configs: Query<&mut RapierConfiguration, With<DefaultRapierContext>>,
) {
    let Ok(mut rapier_config) = rapier_configs.get_single_mut() else {
        warn!("No physics context to set gravity on");
        return;
    };
    rapier_config.gravity = launch.gravity;
    debug!("World gravity set to {}", launch.gravity);
}

/// Puts the launchable body in the hand, zeroing whatever motion it had.
fn attach_launchable(
    commands: &mut Commands,
    launcher: &mut Launcher,
    bodies: &mut LaunchableQuery,
    anchors: &Query<Entity, With<HandAnchor>>,
) {
    let Ok((entity, transform, velocity, impulse, mass, gravity_scale, disabled)) =
        bodies.get_single_mut()
    else {
        warn!("Nothing to put in the hand");
        return;
    };

    let mut body = RapierBody {
        position: transform.translation(),
        velocity,
        impulse,
        mass: mass.get().mass,
        gravity_scale: gravity_scale.map_or(1.0, |scale| scale.0),
        was_simulated: !disabled,
        simulated: !disabled,
    };
    let mut rig = EntityRig::new(anchors.get_single().ok());

    match launcher.hold.attach_to_hold(&mut body, &mut rig) {
        Ok(()) => info!("Body placed in the hand"),
        Err(error) => warn!("Cannot hold the body: {error}"),
    }

    rig.apply(commands, entity);
    body.apply(commands, entity);
}

fn hold_on_spawn(
    mut commands: Commands,
    hold_config: Res<HoldConfig>,
    mut launcher: ResMut<Launcher>,
    mut bodies: LaunchableQuery,
    anchors: Query<Entity, With<HandAnchor>>,
) {
    if hold_config.start_held {
        attach_launchable(&mut commands, &mut launcher, &mut bodies, &anchors);
    }
}

fn reset_on_key_r(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut launcher: ResMut<Launcher>,
    mut bodies: LaunchableQuery,
    anchors: Query<Entity, With<HandAnchor>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    if launcher.drag.phase() == DragPhase::Dragging {
        debug!("Reset ignored while dragging");
        return;
    }
    attach_launchable(&mut commands, &mut launcher, &mut bodies, &anchors);
}

fn forward_drag_events(queue: Res<DragEventQueue>, mut drag_events: EventWriter<DragEvent>) {
    drag_events.send_batch(queue.drain());
}

fn animate_arm(
    time: Res<Time>,
    mut drag_events: EventReader<DragEvent>,
    mut arm: ResMut<ThrowingArm>,
    mut joints: Query<(&ArmJoint, &mut Transform)>,
) {
    for event in drag_events.read() {
        arm.0.handle(event.kind, &event.snapshot);
    }

    let pose = arm.0.advance(time.delta_secs());
    for (joint, mut transform) in &mut joints {
        transform.rotation = Quat::from_rotation_z(pose.angle(joint.0));
    }
}

fn draw_previews(preview: Res<AimPreview>, mut gizmos: Gizmos) {
    for (line, color) in [
        (&preview.aim, AIM_COLOR),
        (&preview.trajectory, TRAJECTORY_COLOR),
    ] {
        if line.enabled && line.points.len() > 1 {
            gizmos.linestrip_2d(line.points.iter().copied(), color);
        }
    }
}
