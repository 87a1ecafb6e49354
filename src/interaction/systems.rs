use bevy::prelude::*;

use super::entities::{FocusContext, FocusInput, FocusMachine, SceneStage};
use crate::focus::ScenePicker;
use crate::pause::PauseGate;
use crate::reveal::InfoPanel;

/// Feeds click and cancel edges into the [`FocusMachine`].
///
/// The click has priority: see [`FocusMachine::apply_edges`] for what a click
/// and an Escape in the same frame do.
pub fn handle_focus_input(
    input: FocusInput,
    mut machine: ResMut<FocusMachine>,
    mut panel: ResMut<InfoPanel>,
    mut gate: ResMut<PauseGate>,
    mut picker: ScenePicker,
    mut stage: SceneStage,
) {
    let sample = &input.sample;
    let mut cx = FocusContext {
        stage: &mut stage,
        panel: &mut *panel,
        gate: &mut *gate,
        now: input.time.elapsed(),
        cadence: input.reveal.char_delay,
    };

    let ray = sample.primary_click.then(|| {
        let ray = sample.cursor.and_then(|cursor| {
            let (camera, gt) = input.cameras.single().ok()?;
            camera.viewport_to_world(gt, cursor).ok()
        });
        if ray.is_none() {
            debug!("no camera ray for click");
        }
        ray
    });

    let (clicked, exited) = machine.apply_edges(&mut picker, ray.flatten(), sample.cancel, &mut cx, &input.cfg);
    match clicked {
        Some(Ok(false)) => debug!("click ignored or hit nothing focusable"),
        Some(Err(err)) => error!("{err}"),
        Some(Ok(true)) | None => {}
    }
    if sample.cancel && !exited {
        debug!("cancel ignored while idle");
    }
}
