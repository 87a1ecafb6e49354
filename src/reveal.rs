//! Text reveal: types a focused body's description into the info panel one
//! character at a time.
//!
//! Driven by real time so it keeps typing while the pause gate has frozen
//! scaled time.

mod entities;
mod systems;

pub use entities::{InfoPanel, RevealTask};

use std::time::Duration;

use bevy::prelude::*;

use crate::ExploreSet;

/// Per-plugin configuration for the text reveal.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct RevealConfig {
    /// Real-time delay between two revealed characters.
    pub char_delay: Duration,
    /// Width of the info panel in logical pixels.
    pub panel_width: f32,
    /// Font size of the description text.
    pub font_size: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(30),
            panel_width: 360.0,
            font_size: 16.0,
        }
    }
}

/// Info panel with a progressive description reveal.
pub struct RevealPlugin(pub RevealConfig);

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RevealConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<InfoPanel>()
            .add_systems(Update, systems::advance_reveal.in_set(ExploreSet::Reveal))
            .add_systems(bevy_egui::EguiPrimaryContextPass, systems::draw_info_panel);
    }
}
