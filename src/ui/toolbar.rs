use crate::app::HubApp;
use crate::timeline::LayoutMode;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut HubApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  New Workspace", icons::FILE_PLUS)).clicked() {
                app.new_workspace();
                ui.close_menu();
            }
            if ui.button(format!("{}  Open...", icons::FOLDER_OPEN)).clicked() {
                app.open_workspace();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Save          Ctrl+S", icons::FLOPPY_DISK)).clicked() {
                app.save_workspace();
                ui.close_menu();
            }
            if ui.button("     Save As...").clicked() {
                app.save_workspace_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Roadmap").small().weak());
            let mut mode = app.settings.layout_mode;
            let flat = ui.radio_value(&mut mode, LayoutMode::Flat, "One row per project");
            let lanes = ui.radio_value(&mut mode, LayoutMode::Swimlane, "Swimlanes by area");
            if flat.clicked() || lanes.clicked() {
                app.set_layout_mode(mode);
                ui.close_menu();
            }
            ui.separator();
            let mut editable = app.settings.editable;
            if ui.checkbox(&mut editable, "Allow dragging bars").changed() {
                app.set_editable(editable);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Scenario  ").font(theme::font_menu()), |ui| {
            let active = app.workspace.active_scenario;
            let scenarios: Vec<_> = app
                .workspace
                .scenarios
                .iter()
                .map(|s| (s.id, s.title.clone()))
                .collect();
            for (id, title) in scenarios {
                if ui.radio(id == active, title).clicked() {
                    app.switch_scenario(id);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button(format!("{}  New Scenario", icons::PLUS)).clicked() {
                app.add_scenario();
                ui.close_menu();
            }
            let can_delete = app.workspace.scenarios.len() > 1;
            if ui
                .add_enabled(can_delete, egui::Button::new(format!("{}  Delete Scenario", icons::TRASH)))
                .clicked()
            {
                app.confirm_delete_scenario = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned workspace and scenario name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!(
                    "{}{} · {}",
                    app.workspace.name,
                    modified,
                    app.workspace.active().title
                ))
                .size(11.0)
                .weak(),
            );
        });
    });
}
