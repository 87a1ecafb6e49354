//! Click-to-focus interaction state machine.
//!
//! Idle → Focused on a click that resolves to a focusable body; Focused →
//! Idle on the cancel key. While focused the machine owns the rig, the
//! pause gate is raised and everything but the focused body is hidden.

mod entities;
mod systems;

pub use entities::{
    FocusContext, FocusMachine, FocusSession, FocusStage, InteractionState, SceneStage, vantage_pose,
};

use bevy::prelude::*;

use crate::{ExploreSet, GameState};
use crate::focus::{BodyCollider, BodyInfo, Focusable};

/// Per-plugin configuration for the focus interaction.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct FocusConfig {
    /// Camera distance from the focused body's surface.
    pub camera_distance: f32,
    /// Height the rig is snapped to before the camera cut.
    pub overview_altitude: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            camera_distance: 20.0,
            overview_altitude: 404.0,
        }
    }
}

/// Click-to-focus on tagged bodies, Escape to return.
pub struct InteractionPlugin(pub FocusConfig);

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FocusConfig>()
            .register_type::<Focusable>()
            .register_type::<BodyInfo>()
            .register_type::<BodyCollider>()
            .insert_resource(self.0.clone())
            .init_resource::<FocusMachine>()
            .add_systems(
                Update,
                systems::handle_focus_input
                    .in_set(ExploreSet::Interact)
                    .before(crate::pause::sync_time_scale)
                    .run_if(in_state(GameState::Running)),
            );
    }
}
