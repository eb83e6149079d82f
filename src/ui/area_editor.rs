use crate::model::{area, Ksm, Scenario};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

/// Actions that the area page can request.
pub enum AreaAction {
    None,
    Changed,
    AddProject,
    Select(Uuid),
}

/// Render one area's plan: weight, budget, narrative fields, metrics and
/// the list of its projects.
pub fn show_area_editor(
    key: &str,
    scenario: &mut Scenario,
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> AreaAction {
    let mut action = AreaAction::None;
    let mut changed = false;
    let (label, color) = match area::find_area(key) {
        Some(a) => (a.label, theme::hex_or_accent(a.color_hex)),
        None => (key, theme::ACCENT),
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new("■").color(color).size(17.0));
        ui.label(RichText::new(label).strong().size(17.0).color(theme::TEXT_PRIMARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  Add Project", icons::PLUS))
                    .color(Color32::WHITE)
                    .size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = AreaAction::AddProject;
            }
        });
    });
    ui.add_space(4.0);

    let plan = scenario.area_mut(key);

    egui::CollapsingHeader::new(RichText::new("Plan").color(theme::TEXT_SECONDARY))
        .id_salt(("area_plan", key))
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new(("area_plan_grid", key))
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Importance").color(theme::TEXT_SECONDARY));
                    changed |= ui.add(egui::Slider::new(&mut plan.importance, 1..=10)).changed();
                    ui.end_row();

                    ui.label(RichText::new("Budget").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add(egui::DragValue::new(&mut plan.budget).speed(1000.0).range(0..=u64::MAX))
                        .changed();
                    ui.end_row();

                    ui.label(RichText::new("Objectives").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add(egui::TextEdit::multiline(&mut plan.objectives).desired_rows(2))
                        .changed();
                    ui.end_row();

                    for (i, text) in plan.evolution.iter_mut().enumerate() {
                        ui.label(
                            RichText::new(format!("Year {}", i + 1)).color(theme::TEXT_SECONDARY),
                        );
                        changed |= ui.text_edit_singleline(text).changed();
                        ui.end_row();
                    }

                    ui.label(RichText::new("Routine").color(theme::TEXT_SECONDARY));
                    changed |= ui.text_edit_singleline(&mut plan.routine).changed();
                    ui.end_row();

                    ui.label(RichText::new("Comments").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add(egui::TextEdit::multiline(&mut plan.comments).desired_rows(2))
                        .changed();
                    ui.end_row();
                });
        });

    egui::CollapsingHeader::new(
        RichText::new(format!("Key success metrics ({})", plan.ksms.len()))
            .color(theme::TEXT_SECONDARY),
    )
    .id_salt(("area_ksms", key))
    .default_open(false)
    .show(ui, |ui| {
        let mut remove = None;
        for (i, ksm) in plan.ksms.iter_mut().enumerate() {
            ui.push_id(ksm.id, |ui| {
                ui.horizontal(|ui| {
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut ksm.abbreviation).hint_text("Abbr.").desired_width(56.0))
                        .changed();
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut ksm.name).hint_text("Name").desired_width(160.0))
                        .changed();
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut ksm.guard_rail).hint_text("Guard rail").desired_width(90.0))
                        .changed();
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut ksm.alert_level).hint_text("Alert").desired_width(90.0))
                        .changed();
                    if ui.button(icons::TRASH).on_hover_text("Remove metric").clicked() {
                        remove = Some(i);
                    }
                });
                ui.horizontal(|ui| {
                    ui.add_space(60.0);
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut ksm.formula).hint_text("Formula").desired_width(160.0))
                        .changed();
                    changed |= ui
                        .add(
                            egui::TextEdit::multiline(&mut ksm.description)
                                .hint_text("Description")
                                .desired_rows(2)
                                .desired_width(188.0),
                        )
                        .changed();
                });
                ui.add_space(4.0);
            });
        }
        if let Some(i) = remove {
            plan.ksms.remove(i);
            changed = true;
        }
        if ui.button(format!("{}  Add metric", icons::PLUS)).clicked() {
            plan.ksms.push(Ksm::default());
            changed = true;
        }
    });

    egui::CollapsingHeader::new(
        RichText::new(format!("Projects ({})", plan.projects.len())).color(theme::TEXT_SECONDARY),
    )
    .id_salt(("area_projects", key))
    .default_open(false)
    .show(ui, |ui| {
        if plan.projects.is_empty() {
            ui.label(RichText::new("No projects yet").color(theme::TEXT_DIM));
        }
        for project in &plan.projects {
            let title = if project.title.trim().is_empty() {
                "Untitled project"
            } else {
                project.title.as_str()
            };
            let text = format!("{}   {} → {}", title, project.start, project.end);
            if ui.selectable_label(selected == Some(project.id), text).clicked() {
                action = AreaAction::Select(project.id);
            }
        }
    });

    if changed && matches!(action, AreaAction::None) {
        action = AreaAction::Changed;
    }
    action
}
