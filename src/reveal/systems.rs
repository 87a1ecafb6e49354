use bevy::prelude::*;
use bevy_egui::egui;

use super::RevealConfig;
use super::entities::InfoPanel;

/// Steps the active reveal against unscaled time.
pub fn advance_reveal(time: Res<Time<Real>>, mut panel: ResMut<InfoPanel>) {
    if let Some(len) = panel.advance(time.elapsed())
        && !panel.is_revealing()
    {
        debug!(len, "reveal finished");
    }
}

/// Draws the info panel anchored to the right edge of the window.
pub fn draw_info_panel(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    panel: Res<InfoPanel>,
    cfg: Res<RevealConfig>,
) {
    if !panel.is_shown() {
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::Window::new(panel.title())
        .id(egui::Id::new("info_panel"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .default_width(cfg.panel_width)
        .collapsible(false)
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.label(egui::RichText::new(panel.visible_text()).size(cfg.font_size));
            ui.separator();
            ui.small("Esc to return");
        });
}
