use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use thiserror::Error;

use super::LocomotionConfig;
use crate::focus::BodyCollider;
use crate::input::InputSample;
use crate::pause::PauseGate;

/// The player rig: yaw lives in its `Transform`, pitch in [`PlayerRig::pitch`].
#[derive(Component, Default, Reflect)]
pub struct PlayerRig {
    /// Clamped pitch accumulator in degrees, positive looking up.
    pub pitch: f32,
}

/// Marker for the camera parented to the [`PlayerRig`].
#[derive(Component, Reflect)]
pub struct RigCamera;

/// Spherical collision volume of the rig used by the collision-aware move.
#[derive(Component, Reflect)]
pub struct CharacterBody {
    /// Body radius in world units.
    pub radius: f32,
}

/// Whether the locomotion controller found everything it needs at startup.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum RigStatus {
    /// Rig, body and camera present.
    Ready,
    /// Something is missing; per-tick updates are no-ops.
    #[default]
    Inert,
}

/// Startup configuration failures of the rig.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// No entity carries [`PlayerRig`].
    #[error("no player rig in the scene")]
    MissingRig,
    /// More than one entity carries [`PlayerRig`].
    #[error("more than one player rig in the scene")]
    MultipleRigs,
    /// The rig has no [`CharacterBody`] to move with.
    #[error("player rig {0:?} has no CharacterBody")]
    MissingBody(Entity),
    /// No [`RigCamera`] is parented to the rig.
    #[error("player rig {0:?} has no child RigCamera")]
    MissingCamera(Entity),
}

/// Full pose of the rig: position, yaw-bearing rotation and camera pitch.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct RigPose {
    /// Rig world position.
    pub translation: Vec3,
    /// Rig rotation.
    pub rotation: Quat,
    /// Camera pitch in degrees.
    pub pitch: f32,
}

impl RigPose {
    /// World position of a camera sitting at `eye` in rig-local space.
    pub fn camera_position(&self, eye: Vec3) -> Vec3 {
        self.translation + self.rotation * eye
    }
}

/// Bundled read-only inputs of [`super::systems::locomote`].
#[derive(SystemParam)]
pub struct LocomotionInput<'w, 's> {
    pub(super) time: Res<'w, Time>,
    pub(super) sample: Res<'w, InputSample>,
    pub(super) gate: Res<'w, PauseGate>,
    pub(super) cfg: Res<'w, LocomotionConfig>,
    pub(super) obstacles: Query<'w, 's, (&'static GlobalTransform, &'static BodyCollider)>,
}
