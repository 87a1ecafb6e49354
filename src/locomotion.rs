//! First-person locomotion controller.
//!
//! WASD + mouse look + Q/E altitude on a yawing rig with a pitching child
//! camera. Suspended while the [`PauseGate`](crate::pause::PauseGate) is set,
//! in which case the cursor is released for the UI.

mod entities;
mod systems;

pub use entities::{CharacterBody, PlayerRig, RigCamera, RigPose, RigStatus, SetupError};
pub use systems::pitch_rotation;

use bevy::prelude::*;

use crate::{ExploreSet, GameState};

/// Per-plugin configuration for the locomotion controller.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct LocomotionConfig {
    /// Horizontal movement speed in world-units per second.
    pub move_speed: f32,
    /// Q/E vertical speed in world-units per second.
    pub vertical_speed: f32,
    /// Look speed in degrees per pixel of mouse motion per second.
    pub mouse_sensitivity: f32,
    /// Maximum pitch above or below the horizon (degrees).
    pub pitch_limit: f32,
    /// Radius of the rig's collision sphere.
    pub body_radius: f32,
    /// Where the rig spawns.
    pub spawn_position: Vec3,
    /// Point the rig initially faces.
    pub spawn_look_at: Vec3,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            vertical_speed: 5.0,
            mouse_sensitivity: 10.0,
            pitch_limit: 85.0,
            body_radius: 1.0,
            spawn_position: Vec3::new(0.0, 20.0, 160.0),
            spawn_look_at: Vec3::new(0.0, 20.0, 0.0),
            bloom_intensity: 0.3,
        }
    }
}

/// First-person rig controller with WASD, mouse look and altitude control.
pub struct LocomotionPlugin(pub LocomotionConfig);

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlayerRig>()
            .register_type::<RigCamera>()
            .register_type::<CharacterBody>()
            .register_type::<RigStatus>()
            .register_type::<LocomotionConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<RigStatus>()
            .add_systems(Startup, (systems::spawn_rig, systems::validate_rig).chain())
            .add_systems(
                Update,
                (
                    systems::locomote.run_if(resource_equals(RigStatus::Ready)),
                    systems::assert_cursor,
                )
                    .in_set(ExploreSet::Locomote)
                    .run_if(in_state(GameState::Running)),
            );
    }
}
