use crate::model::{BudgetRange, Project};
use crate::timeline::{CalendarWindow, YearMonth};
use crate::ui::theme;
use egui::{RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    Delete(Uuid),
    Close,
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Month picker over every month of `window`. Returns true if a new month
/// was picked.
fn month_picker(ui: &mut Ui, id: &str, value: &mut YearMonth, window: &CalendarWindow) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.to_string())
        .width(110.0)
        .height(260.0)
        .show_ui(ui, |ui| {
            for month in window.months() {
                if ui.selectable_value(value, month, month.to_string()).clicked() {
                    changed = true;
                }
            }
        });
    changed
}

/// Render the editor for the selected project.
pub fn show_project_editor(project: &mut Project, window: &CalendarWindow, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;
    let mut changed = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Edit Project")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(icons::X).on_hover_text("Close").clicked() {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame::default()
        .fill(theme::BG_DARK)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE));

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "TITLE");
        changed |= ui
            .add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut project.title).hint_text("Untitled project"),
            )
            .changed();

        // Both pickers edit copies so an inverted range collapses the same
        // way a drag commit does.
        let mut start = project.start;
        let mut end = project.end;
        let mut dates_changed = false;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "START");
                dates_changed |= month_picker(ui, "project_start", &mut start, window);
            });
            ui.vertical(|ui| {
                field_label(ui, "END");
                dates_changed |= month_picker(ui, "project_end", &mut end, window);
            });
        });
        if dates_changed {
            project.set_dates(start, end);
            changed = true;
        }

        ui.add_space(2.0);
        field_label(ui, "IMPACT");
        changed |= ui.add(egui::Slider::new(&mut project.impact, 1..=10)).changed();
        field_label(ui, "EFFORT");
        changed |= ui.add(egui::Slider::new(&mut project.effort, 1..=10)).changed();

        ui.add_space(2.0);
        let mut has_budget = project.budget.is_some();
        if ui.checkbox(&mut has_budget, "Budget estimate").changed() {
            project.budget = has_budget.then(BudgetRange::default);
            changed = true;
        }
        if let Some(mut budget) = project.budget {
            let mut budget_changed = false;
            ui.horizontal(|ui| {
                ui.label(RichText::new("from").color(theme::TEXT_SECONDARY));
                budget_changed |= ui.add(egui::DragValue::new(&mut budget.min).speed(1000.0)).changed();
                ui.label(RichText::new("to").color(theme::TEXT_SECONDARY));
                budget_changed |= ui.add(egui::DragValue::new(&mut budget.max).speed(1000.0)).changed();
            });
            if budget_changed {
                project.set_budget(Some(budget));
                changed = true;
            }
        }

        ui.add_space(2.0);
        field_label(ui, "ENABLERS");
        let mut remove = None;
        for (i, enabler) in project.enablers.iter_mut().enumerate() {
            ui.push_id(i, |ui| {
                ui.horizontal(|ui| {
                    changed |= ui
                        .add(egui::TextEdit::singleline(enabler).desired_width(ui.available_width() - 32.0))
                        .changed();
                    if ui.button(icons::TRASH).clicked() {
                        remove = Some(i);
                    }
                });
            });
        }
        if let Some(i) = remove {
            project.enablers.remove(i);
            changed = true;
        }
        if ui.button(format!("{}  Add enabler", icons::PLUS)).clicked() {
            project.enablers.push(String::new());
            changed = true;
        }
    });

    ui.add_space(8.0);
    let delete_btn = egui::Button::new(
        RichText::new(format!("{}  Delete Project", icons::TRASH)).color(theme::TODAY_LINE),
    );
    if ui.add_sized([ui.available_width(), 28.0], delete_btn).clicked() {
        action = EditorAction::Delete(project.id);
    }

    if changed && matches!(action, EditorAction::None) {
        action = EditorAction::Changed;
    }
    action
}
