use crate::app::HubApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut HubApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Strategy Hub").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Multi-year strategy scenarios");
                ui.label("and a draggable project roadmap.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Ask before deleting the active scenario.
pub fn show_delete_scenario_dialog(app: &mut HubApp, ctx: &Context) {
    let mut should_close = false;
    let title = app.workspace.active().title.clone();
    let last = app.workspace.scenarios.len() <= 1;

    Window::new(RichText::new("Delete Scenario").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            if last {
                ui.label("The last scenario cannot be deleted.");
            } else {
                ui.label(format!("Delete '{}' and all of its projects?", title));
            }
            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let delete_btn = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                    .fill(theme::TODAY_LINE)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(!last, delete_btn).clicked() {
                    app.delete_active_scenario();
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.confirm_delete_scenario = false;
    }
}
