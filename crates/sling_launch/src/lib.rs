//! Drag-to-launch for a 2D physics body, with a throwing arm that winds up
//! while the player drags and snaps forward on release.

pub mod arm;
pub mod body;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod hold;
pub mod mapper;
pub mod plugin;
pub mod scene;
pub mod trajectory;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bits_helpers::BitWindow;

use crate::config::{PIXELS_PER_METER, SlingConfig};
use crate::plugin::SlingLaunchPlugin;
use crate::scene::ScenePlugin;

pub fn run(config: SlingConfig) -> AppExit {
    let window = BitWindow::default().with_log_filter(concat!(env!("CARGO_CRATE_NAME"), "=debug"));

    bits_helpers::get_default_app(env!("CARGO_PKG_NAME"), &window)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
        // .add_plugins(RapierDebugRenderPlugin::default()) // Activate when you need to debug physics
        .add_plugins(SlingLaunchPlugin { config })
        .add_plugins(ScenePlugin)
        .run()
}
