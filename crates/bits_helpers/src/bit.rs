use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{Backends, RenderCreation, WgpuSettings, WgpuSettingsPriority};
use bevy::window::{PresentMode, WindowMode, WindowResolution};

// typical smartphone screen ratio (9:16)
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

/// Filter applied to the log output of every bit, extended with [`BitWindow::log_filter`].
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

/// Window and logging settings a bit can tweak before the app is built.
#[derive(Debug, Clone)]
pub struct BitWindow {
    pub width: f32,
    pub height: f32,
    pub clear_color: Color,
    /// Extra `tracing` directives appended to [`DEFAULT_LOG_FILTER`], e.g. `"my_bit=debug"`.
    pub log_filter: Option<String>,
}

impl Default for BitWindow {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            clear_color: Color::BLACK,
            log_filter: None,
        }
    }
}

impl BitWindow {
    #[must_use]
    pub fn with_log_filter(mut self, directives: impl Into<String>) -> Self {
        self.log_filter = Some(directives.into());
        self
    }

    /// Full `tracing` filter string handed to the log plugin.
    pub fn log_filter(&self) -> String {
        match &self.log_filter {
            Some(extra) if !extra.is_empty() => format!("{DEFAULT_LOG_FILTER},{extra}"),
            _ => DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

// Creates a Bevy app with the settings shared by every bit
// This prevent duplication / errors accross different bits
pub fn get_default_app(bit_name: &str, window: &BitWindow) -> App {
    let mut app = App::new();

    let asset_plugin = AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,
        file_path: "assets".to_owned(),
        processed_file_path: "imported_assets/Default".to_owned(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: bit_name.to_owned(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(window.width, window.height),
            canvas: Some("#bit".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            backends: Some(Backends::BROWSER_WEBGPU | Backends::GL | Backends::PRIMARY),
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    };

    let log_plugin = LogPlugin {
        filter: window.log_filter(),
        level: Level::INFO,
        ..default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin)
            .set(log_plugin),
    );

    // This plugin is useful to preserve battery life on mobile.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(window.clear_color));

    app
}
