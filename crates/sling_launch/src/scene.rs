use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bits_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::arm::ArmSegment;
use crate::plugin::{ArmJoint, HandAnchor, Launchable, MainCamera};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, spawn_bounds, spawn_arm, spawn_ball));
    }
}

const WALL_THICKNESS: f32 = 20.0;
const GROUND_COLOR: Color = Color::srgb(0.25, 0.3, 0.35);

const SHOULDER_POSITION: Vec2 = Vec2::new(-110.0, -220.0);
const UPPER_ARM_LENGTH: f32 = 48.0;
const FOREARM_LENGTH: f32 = 40.0;
const HAND_LENGTH: f32 = 14.0;
const ARM_WIDTH: f32 = 10.0;
const ARM_COLOR: Color = Color::srgb(0.85, 0.65, 0.5);

const BALL_RADIUS: f32 = 12.0;
const BALL_COLOR: Color = Color::srgb(0.9, 0.3, 0.25);
const BALL_RESTITUTION: f32 = 0.4;
const BALL_FRICTION: f32 = 0.6;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Ground plus side walls and a ceiling so the ball stays on screen.
fn spawn_bounds(mut commands: Commands) {
    let half_width = WINDOW_WIDTH / 2.0;
    let half_height = WINDOW_HEIGHT / 2.0;

    commands.spawn((
        Sprite::from_color(GROUND_COLOR, Vec2::new(WINDOW_WIDTH, WALL_THICKNESS)),
        Transform::from_xyz(0.0, -half_height + WALL_THICKNESS / 2.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(half_width, WALL_THICKNESS / 2.0),
    ));

    for (position, half_extents) in [
        (
            Vec2::new(-half_width - WALL_THICKNESS / 2.0, 0.0),
            Vec2::new(WALL_THICKNESS / 2.0, half_height),
        ),
        (
            Vec2::new(half_width + WALL_THICKNESS / 2.0, 0.0),
            Vec2::new(WALL_THICKNESS / 2.0, half_height),
        ),
        (
            Vec2::new(0.0, half_height + WALL_THICKNESS / 2.0),
            Vec2::new(half_width, WALL_THICKNESS / 2.0),
        ),
    ] {
        commands.spawn((
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
        ));
    }
}

/// Segment drawn from its joint along the local y axis.
fn segment_sprite(length: f32) -> impl Bundle {
    (
        Sprite::from_color(ARM_COLOR, Vec2::new(ARM_WIDTH, length)),
        Transform::from_xyz(0.0, length / 2.0, -0.1),
    )
}

/// Shoulder, forearm and hand joints chained under each other, the hand
/// doubling as the anchor the ball is held by.
fn spawn_arm(mut commands: Commands) {
    commands
        .spawn((
            ArmJoint(ArmSegment::Shoulder),
            Transform::from_translation(SHOULDER_POSITION.extend(1.0)),
            Visibility::default(),
        ))
        .with_children(|shoulder| {
            shoulder.spawn(segment_sprite(UPPER_ARM_LENGTH));
            shoulder
                .spawn((
                    ArmJoint(ArmSegment::Forearm),
                    Transform::from_xyz(0.0, UPPER_ARM_LENGTH, 0.1),
                    Visibility::default(),
                ))
                .with_children(|forearm| {
                    forearm.spawn(segment_sprite(FOREARM_LENGTH));
                    forearm
                        .spawn((
                            ArmJoint(ArmSegment::Hand),
                            HandAnchor,
                            Transform::from_xyz(0.0, FOREARM_LENGTH, 0.1),
                            Visibility::default(),
                        ))
                        .with_children(|hand| {
                            hand.spawn(segment_sprite(HAND_LENGTH));
                        });
                });
        });
}

fn spawn_ball(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let start = SHOULDER_POSITION + Vec2::new(0.0, UPPER_ARM_LENGTH + FOREARM_LENGTH + 40.0);

    commands.spawn((
        Launchable,
        Mesh2d(meshes.add(Circle::new(BALL_RADIUS))),
        MeshMaterial2d(materials.add(BALL_COLOR)),
        Transform::from_translation(start.extend(2.0)),
        RigidBody::Dynamic,
        Collider::ball(BALL_RADIUS),
        ColliderMassProperties::Mass(1.0),
        Restitution::coefficient(BALL_RESTITUTION),
        Friction::coefficient(BALL_FRICTION),
        Ccd::enabled(),
        (
            Velocity::zero(),
            ExternalImpulse::default(),
            ReadMassProperties::default(),
            GravityScale(1.0),
        ),
    ));
}
