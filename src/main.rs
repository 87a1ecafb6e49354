//! Solar-system explorer binary.
//!
//! Fly around with WASD + mouse, Q/E for altitude. Click a planet to focus
//! it and read about it; Escape returns. Tab opens the world inspector.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use solar_focus::input::{InputBindings, InputSamplerPlugin};
use solar_focus::interaction::{FocusConfig, InteractionPlugin};
use solar_focus::locomotion::{LocomotionConfig, LocomotionPlugin};
use solar_focus::pause::PausePlugin;
use solar_focus::reveal::{RevealConfig, RevealPlugin};
use solar_focus::scene::{SceneConfig, ScenePlugin};
use solar_focus::{ExplorePlugin, GameState};

/// Command-line overrides for the numeric tuning knobs.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "First-person solar-system explorer")]
struct Args {
    /// Horizontal movement speed (units/s).
    #[arg(long)]
    move_speed: Option<f32>,
    /// Q/E vertical speed (units/s).
    #[arg(long)]
    vertical_speed: Option<f32>,
    /// Mouse look sensitivity (degrees per pixel-second).
    #[arg(long)]
    mouse_sensitivity: Option<f32>,
    /// Pitch limit above/below the horizon (degrees).
    #[arg(long)]
    pitch_limit: Option<f32>,
    /// Camera distance from a focused body's surface.
    #[arg(long)]
    camera_distance: Option<f32>,
    /// Delay between revealed characters (milliseconds).
    #[arg(long)]
    reveal_delay_ms: Option<u64>,
}

#[cfg(feature = "native")]
impl Args {
    fn apply(self, loco: &mut LocomotionConfig, focus: &mut FocusConfig, reveal: &mut RevealConfig) {
        if let Some(v) = self.move_speed {
            loco.move_speed = v;
        }
        if let Some(v) = self.vertical_speed {
            loco.vertical_speed = v;
        }
        if let Some(v) = self.mouse_sensitivity {
            loco.mouse_sensitivity = v;
        }
        if let Some(v) = self.pitch_limit {
            loco.pitch_limit = v.abs();
        }
        if let Some(v) = self.camera_distance {
            focus.camera_distance = v;
        }
        if let Some(ms) = self.reveal_delay_ms {
            reveal.char_delay = std::time::Duration::from_millis(ms);
        }
    }
}

#[cfg(feature = "native")]
fn load_configs() -> (LocomotionConfig, FocusConfig, RevealConfig) {
    let mut loco = LocomotionConfig::default();
    let mut focus = FocusConfig::default();
    let mut reveal = RevealConfig::default();
    <Args as clap::Parser>::parse().apply(&mut loco, &mut focus, &mut reveal);
    (loco, focus, reveal)
}

#[cfg(not(feature = "native"))]
fn load_configs() -> (LocomotionConfig, FocusConfig, RevealConfig) {
    Default::default()
}

fn main() {
    let (loco, focus, reveal) = load_configs();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Solar Focus".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(ExplorePlugin)
    .add_plugins(PausePlugin)
    .add_plugins(InputSamplerPlugin(InputBindings::default()))
    .add_plugins(LocomotionPlugin(loco))
    .add_plugins(InteractionPlugin(focus))
    .add_plugins(RevealPlugin(reveal))
    .add_plugins(ScenePlugin(SceneConfig::default()))
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(bevy::remote::RemotePlugin::default())
        .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
    mut cursors: Query<&mut CursorOptions>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }
    let new_state = match state.get() {
        GameState::Running => GameState::Debugging,
        GameState::Debugging => GameState::Running,
    };
    // The inspector needs a free cursor; locomotion re-locks it on return.
    if new_state == GameState::Debugging {
        for mut opts in &mut cursors {
            opts.visible = true;
            opts.grab_mode = CursorGrabMode::None;
        }
    }
    next.set(new_state);
}
