//! Pause gate: the single suspend signal coupling interaction state to
//! game time.
//!
//! Systems read the gate as an ordinary resource; only the focus state
//! machine writes it. [`sync_time_scale`] mirrors it into `Time<Virtual>` so
//! scaled time stops while a body is focused, while `Time<Real>` keeps
//! running for the text reveal.

use bevy::prelude::*;

use crate::ExploreSet;

/// Suspend flag plus the time-scale multiplier tied to it.
///
/// `time_scale` is `0.0` exactly when `paused` is set.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
pub struct PauseGate {
    paused: bool,
    time_scale: f32,
}

impl Default for PauseGate {
    fn default() -> Self {
        Self {
            paused: false,
            time_scale: 1.0,
        }
    }
}

impl PauseGate {
    /// Suspends locomotion and freezes scaled time.
    pub fn raise(&mut self) {
        self.paused = true;
        self.time_scale = 0.0;
    }

    /// Resumes locomotion at normal speed.
    pub fn clear(&mut self) {
        self.paused = false;
        self.time_scale = 1.0;
    }

    /// Whether the gate is currently set.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Global multiplier for scaled game time.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

/// Owns the [`PauseGate`] and keeps virtual time in step with it.
pub struct PausePlugin;

impl Plugin for PausePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PauseGate>()
            .init_resource::<PauseGate>()
            .add_systems(
                Update,
                sync_time_scale
                    .in_set(ExploreSet::Interact)
                    .run_if(resource_changed::<PauseGate>),
            );
    }
}

/// Copies the gate's time scale into `Time<Virtual>`.
pub fn sync_time_scale(gate: Res<PauseGate>, mut time: ResMut<Time<Virtual>>) {
    if time.relative_speed() != gate.time_scale() {
        time.set_relative_speed(gate.time_scale());
    }
}
