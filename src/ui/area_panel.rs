use crate::app::View;
use crate::model::{Workspace, AREAS};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

/// Actions that the navigation panel can request.
pub enum NavAction {
    None,
    Open(View),
    SwitchScenario(Uuid),
    AddScenario,
    DeleteScenario,
    /// Scenario title or description was edited in place.
    Changed,
}

/// Render the left-side panel: scenario picker, scenario details and the
/// list of pages.
pub fn show_area_panel(workspace: &mut Workspace, view: View, ui: &mut Ui) -> NavAction {
    let mut action = NavAction::None;

    ui.add_space(2.0);
    ui.label(
        RichText::new("Scenario")
            .strong()
            .size(15.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let active_id = workspace.active_scenario;
    let active_title = workspace.active().title.clone();
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("scenario_picker")
            .selected_text(active_title)
            .width(ui.available_width() - 64.0)
            .show_ui(ui, |ui| {
                for scenario in &workspace.scenarios {
                    if ui
                        .selectable_label(scenario.id == active_id, &scenario.title)
                        .clicked()
                    {
                        action = NavAction::SwitchScenario(scenario.id);
                    }
                }
            });
        if ui.button(icons::PLUS).on_hover_text("New scenario").clicked() {
            action = NavAction::AddScenario;
        }
        let can_delete = workspace.scenarios.len() > 1;
        if ui
            .add_enabled(can_delete, egui::Button::new(icons::TRASH))
            .on_hover_text("Delete scenario")
            .clicked()
        {
            action = NavAction::DeleteScenario;
        }
    });

    ui.add_space(4.0);
    let scenario = workspace.active_mut();
    let title = ui.add(
        egui::TextEdit::singleline(&mut scenario.title)
            .hint_text("Scenario title")
            .desired_width(f32::INFINITY),
    );
    let description = ui.add(
        egui::TextEdit::multiline(&mut scenario.description)
            .hint_text("What this scenario assumes...")
            .desired_rows(2)
            .desired_width(f32::INFINITY),
    );
    if (title.changed() || description.changed()) && matches!(action, NavAction::None) {
        action = NavAction::Changed;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        let dashboard = ui.add_sized(
            [ui.available_width(), 26.0],
            egui::SelectableLabel::new(
                view == View::Dashboard,
                RichText::new(format!("{}  Dashboard", icons::SQUARES_FOUR)).size(12.5),
            ),
        );
        if dashboard.clicked() {
            action = NavAction::Open(View::Dashboard);
        }

        ui.add_space(6.0);
        ui.label(RichText::new("AREAS").size(10.0).color(theme::TEXT_DIM));
        ui.add_space(2.0);

        for area in AREAS {
            let plan = scenario.areas.get(area.key);
            let count = plan.map(|p| p.projects.len()).unwrap_or(0);
            let importance = plan.map(|p| p.importance).unwrap_or(1);
            let color = theme::hex_or_accent(area.color_hex);
            let is_open = view == View::Area(area.key);

            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 26.0),
                egui::Sense::click(),
            );
            let painter = ui.painter_at(rect);
            if is_open {
                painter.rect_filled(rect, 4.0, theme::BG_SELECTED);
            } else if response.hovered() {
                painter.rect_filled(rect, 4.0, Color32::from_white_alpha(8));
            }
            painter.circle_filled(egui::pos2(rect.left() + 10.0, rect.center().y), 4.0, color);
            painter.text(
                egui::pos2(rect.left() + 22.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                area.label,
                theme::font_label(),
                theme::TEXT_PRIMARY,
            );
            painter.text(
                egui::pos2(rect.right() - 6.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                format!("{}  ·  {}", importance, count),
                theme::font_sub(),
                theme::TEXT_DIM,
            );
            let response = response.on_hover_text(format!(
                "Importance {} · {} project{}",
                importance,
                count,
                if count == 1 { "" } else { "s" }
            ));
            if response.clicked() {
                action = NavAction::Open(View::Area(area.key));
            }
        }
    });

    action
}
