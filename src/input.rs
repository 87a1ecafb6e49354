//! Input sampler: folds raw keyboard/mouse state into one frame-local
//! [`InputSample`] that locomotion and the focus state machine read.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::ExploreSet;

/// Key and button bindings for the explorer.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct InputBindings {
    /// Move along the camera's planar forward axis.
    pub forward: KeyCode,
    /// Move against the planar forward axis.
    pub back: KeyCode,
    /// Strafe left.
    pub left: KeyCode,
    /// Strafe right.
    pub right: KeyCode,
    /// Climb.
    pub ascend: KeyCode,
    /// Sink.
    pub descend: KeyCode,
    /// Focus the body under the cursor.
    pub focus: MouseButton,
    /// Leave the focused view.
    pub cancel: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            ascend: KeyCode::KeyE,
            descend: KeyCode::KeyQ,
            focus: MouseButton::Left,
            cancel: KeyCode::Escape,
        }
    }
}

/// One frame of sampled input.
#[derive(Resource, Default, Clone, Debug, PartialEq, Reflect)]
pub struct InputSample {
    /// Strafe axis in `[-1, 1]`, positive to the right.
    pub move_x: f32,
    /// Forward axis in `[-1, 1]`, positive forward.
    pub move_z: f32,
    /// Ascend key held.
    pub ascend: bool,
    /// Descend key held.
    pub descend: bool,
    /// Summed mouse motion this frame, in pixels (y grows downward).
    pub mouse_delta: Vec2,
    /// Focus button went down this frame.
    pub primary_click: bool,
    /// Cancel key went down this frame.
    pub cancel: bool,
    /// Cursor position in viewport pixels; `None` without a window.
    pub cursor: Option<Vec2>,
}

/// Samples devices into [`InputSample`] at the start of every frame.
pub struct InputSamplerPlugin(pub InputBindings);

impl Plugin for InputSamplerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<InputBindings>()
            .register_type::<InputSample>()
            .insert_resource(self.0.clone())
            .init_resource::<InputSample>()
            .add_systems(Update, sample_input.in_set(ExploreSet::Sample));
    }
}

/// Viewport point the click ray passes through.
///
/// A grabbed or hidden cursor aims through the window centre: a `Confined`
/// fallback grab still moves the invisible pointer.
fn aim_point(window: &Window, cursor: Option<&CursorOptions>) -> Vec2 {
    let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
    let captured = cursor.is_some_and(|opts| opts.grab_mode != CursorGrabMode::None || !opts.visible);
    if captured {
        center
    } else {
        window.cursor_position().unwrap_or(center)
    }
}

fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Rebuilds [`InputSample`]. Mouse motion is drained every frame, paused or
/// not, so no stale delta is replayed when control returns.
pub fn sample_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    windows: Query<(&Window, Option<&CursorOptions>), With<PrimaryWindow>>,
    bindings: Res<InputBindings>,
    mut sample: ResMut<InputSample>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|ev| ev.delta).sum();

    let cursor = windows
        .single()
        .ok()
        .map(|(window, opts)| aim_point(window, opts));

    *sample = InputSample {
        move_x: axis(&keys, bindings.right, bindings.left),
        move_z: axis(&keys, bindings.forward, bindings.back),
        ascend: keys.pressed(bindings.ascend),
        descend: keys.pressed(bindings.descend),
        mouse_delta,
        primary_click: buttons.just_pressed(bindings.focus),
        cancel: keys.just_pressed(bindings.cancel),
        cursor,
    };
}
