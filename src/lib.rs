#![warn(missing_docs)]
//! First-person solar-system explorer with click-to-focus.
//!
//! Free flight with WASD + mouse look + Q/E altitude. Clicking a planet cuts
//! the camera to a vantage point in front of it, hides the rest of the scene,
//! pauses game time and types the planet's description into a panel.
//! Escape restores everything exactly as it was.

pub mod focus;
pub mod input;
pub mod interaction;
pub mod locomotion;
pub mod math;
pub mod pause;
pub mod reveal;
pub mod scene;

use bevy::prelude::*;

/// Application-wide debug state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal exploration: locomotion and focus interaction.
    #[default]
    Running,
    /// World inspector open (Tab to toggle); the cursor is left free.
    Debugging,
}

/// Per-frame pipeline ordering shared by every plugin.
///
/// Input is sampled first, the focus state machine reacts to its edges and
/// updates the pause gate, then locomotion and the text reveal consume the
/// result within the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExploreSet {
    /// Builds [`input::InputSample`] from raw devices.
    Sample,
    /// Click/cancel handling and pause-gate updates.
    Interact,
    /// Rig movement, look and cursor assertion.
    Locomote,
    /// Progressive description text.
    Reveal,
}

/// Registers shared state and the [`ExploreSet`] ordering.
pub struct ExplorePlugin;

impl Plugin for ExplorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameState>()
            .init_state::<GameState>()
            .configure_sets(
                Update,
                (
                    ExploreSet::Sample,
                    ExploreSet::Interact,
                    ExploreSet::Locomote,
                    ExploreSet::Reveal,
                )
                    .chain(),
            );
    }
}
