use anyhow::Result;
use bevy::{
    log::LogPlugin,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, WindowPosition},
};
use clap::Parser;

use client::{
    constants::LOG_FILTER,
    markers::{GameSceneMarker, MenuMarker},
    resources::{MenuStatus, PlayerSettings, SessionEventChannel},
    session::{QuicSessionManager, SessionSettings},
    spawning::{spawn_local_player_system, spawn_world_system},
    states::AppState,
    systems::{
        input::{cursor_apply_system, input_cursor_toggle_system, input_look_system, input_movement_system},
        menu::{menu_button_system, menu_keyboard_system, menu_status_system, setup_menu_system},
        players::local_player_hide_model_system,
        scene::{despawn_scene_system, release_cursor_system},
        session::session_events_system,
    },
};
use common::{
    config::{DEFAULT_CERT_PATH, DEFAULT_KEY_PATH, TlsPaths},
    constants::{DEFAULT_SERVER_ADDR, GAME_SCENE, LOOK_CLAMP_ANGLE, LOOK_SENSITIVITY},
    cursor::CursorLock,
    look::LookSettings,
    movement::MovementSettings,
    session::SessionLauncher,
};

// ============================================================================
// CLI Arguments
// ============================================================================

fn get_login_name() -> String {
    whoami::username()
}

#[derive(Parser, Debug)]
#[command(author, version, about = "First-person game client", long_about = None)]
struct Args {
    // Host address to join
    #[arg(short, long, default_value = DEFAULT_SERVER_ADDR)]
    server: String,

    // Address to listen on when hosting
    #[arg(short, long, default_value = DEFAULT_SERVER_ADDR)]
    bind: String,

    // Scene the host loads after starting
    #[arg(long, default_value = GAME_SCENE)]
    scene: String,

    // Player name announced to the host
    #[arg(short, long, default_value_t = get_login_name())]
    name: String,

    // PEM certificate chain (trusted root when joining, served when hosting)
    #[arg(long, default_value = DEFAULT_CERT_PATH)]
    cert: String,

    // PEM private key, only needed when hosting
    #[arg(long, default_value = DEFAULT_KEY_PATH)]
    key: String,

    // Mouse sensitivity in degrees per axis unit per second
    #[arg(long, default_value_t = LOOK_SENSITIVITY)]
    sensitivity: f32,

    // Maximum pitch above and below the horizon in degrees
    #[arg(long, default_value_t = LOOK_CLAMP_ANGLE)]
    clamp_angle: f32,

    // Invert vertical mouse look
    #[arg(long, default_value_t = false)]
    invert_y: bool,

    // Enable look smoothing with this factor in (0, 1]
    #[arg(long)]
    smoothing: Option<f32>,

    // Window X position
    #[arg(long)]
    window_x: Option<i32>,

    // Window Y position
    #[arg(long)]
    window_y: Option<i32>,

    // Window width
    #[arg(long, default_value = "1200")]
    window_width: u32,

    // Window height
    #[arg(long, default_value = "800")]
    window_height: u32,
}

impl Args {
    fn player_settings(&self) -> PlayerSettings {
        let mut look = LookSettings::default();
        look.sensitivity = self.sensitivity;
        look.clamp_angle = self.clamp_angle;
        look.invert_y = self.invert_y;
        if let Some(factor) = self.smoothing {
            look = look.with_smoothing(factor);
        }

        PlayerSettings {
            look,
            movement: MovementSettings::default(),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    // Create tokio runtime for network I/O
    let rt = tokio::runtime::Runtime::new()?;

    // Channel for sending from the network tasks to the client
    let (to_client, from_session) = tokio::sync::mpsc::unbounded_channel();

    let manager = QuicSessionManager::new(
        rt.handle().clone(),
        SessionSettings {
            server_addr: args.server.clone(),
            bind_addr: args.bind.clone(),
            player_name: args.name.clone(),
            tls: TlsPaths {
                cert: args.cert.clone(),
                key: args.key.clone(),
            },
        },
        to_client,
    );
    let launcher = SessionLauncher::with_manager(manager, args.scene.clone());

    // Configure window position
    let window_position = if let (Some(x), Some(y)) = (args.window_x, args.window_y) {
        WindowPosition::At(IVec2::new(x, y))
    } else {
        WindowPosition::Automatic
    };

    // Start Bevy app
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "First Person".to_string(),
                    resolution: (args.window_width, args.window_height).into(),
                    position: window_position,
                    ..default()
                }),
                // The menu needs a free cursor; it is locked when the player spawns
                primary_cursor_options: Some(CursorOptions {
                    visible: true,
                    grab_mode: CursorGrabMode::None,
                    hit_test: true,
                }),
                ..default()
            })
            .set(LogPlugin {
                level: bevy::log::Level::INFO,
                filter: LOG_FILTER.to_string(),
                ..default()
            }),
    )
    .init_state::<AppState>()
    .insert_resource(launcher)
    .insert_resource(SessionEventChannel::new(from_session))
    .insert_resource(args.player_settings())
    .insert_resource(CursorLock::free())
    .insert_resource(MenuStatus::default())
    .add_systems(OnEnter(AppState::Menu), setup_menu_system)
    .add_systems(OnExit(AppState::Menu), despawn_scene_system::<MenuMarker>)
    .add_systems(
        OnEnter(AppState::InGame),
        (spawn_world_system, spawn_local_player_system),
    )
    .add_systems(
        OnExit(AppState::InGame),
        (despawn_scene_system::<GameSceneMarker>, release_cursor_system),
    )
    .add_systems(
        Update,
        (
            // Process session events from the network tasks
            session_events_system,
            // Host/join buttons and shortcuts
            (menu_button_system, menu_keyboard_system, menu_status_system).run_if(in_state(AppState::Menu)),
            (
                // Toggle cursor lock with Escape
                input_cursor_toggle_system,
                // Mouse look for the local player
                input_look_system,
                // WASD movement and gravity for the local player
                input_movement_system,
                // Hide the local player's own model
                local_player_hide_model_system,
            )
                .chain()
                .run_if(in_state(AppState::InGame)),
            // Mirror the cursor lock onto the window
            cursor_apply_system,
        ),
    )
    .run();

    Ok(())
}
