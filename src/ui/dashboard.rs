use crate::app::View;
use crate::model::{Scenario, AREAS};
use crate::ui::area_panel::NavAction;
use crate::ui::theme;
use egui::{Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

const RADAR_SIZE: f32 = 380.0;
const RADAR_RADIUS: f32 = 120.0;
const RADAR_SCALE: f32 = 10.0;
const RADAR_LEVELS: [u8; 5] = [2, 4, 6, 8, 10];

/// Group digits in threes: `1250000` reads as `1 250 000`.
pub fn format_amount(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Point on spoke `index` of `count` at `value` on the 0..=10 scale. The
/// first spoke points straight up and the rest follow clockwise.
pub fn radar_point(center: Pos2, radius: f32, value: f32, index: usize, count: usize) -> Pos2 {
    let angle = index as f32 * TAU / count.max(1) as f32 - FRAC_PI_2;
    let r = radius * value / RADAR_SCALE;
    center + Vec2::new(r * angle.cos(), r * angle.sin())
}

fn figure(ui: &mut Ui, label: &str, value: String) -> egui::Response {
    egui::Frame::default()
        .fill(theme::BG_PANEL)
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(label).size(10.0).color(theme::TEXT_DIM));
                ui.label(RichText::new(value).size(18.0).strong().color(theme::TEXT_PRIMARY));
            });
        })
        .response
}

/// Importance of every area drawn as a filled polygon over a ten-spoke grid.
fn radar_chart(scenario: &Scenario, ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(RADAR_SIZE), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, theme::BG_PANEL);

    let center = rect.center();
    let count = AREAS.len();
    let grid = Stroke::new(1.0, Color32::from_white_alpha(26));

    for level in RADAR_LEVELS {
        let value = f32::from(level);
        let ring = (0..count)
            .map(|i| radar_point(center, RADAR_RADIUS, value, i, count))
            .collect();
        painter.add(Shape::closed_line(ring, grid));
        painter.text(
            center - Vec2::new(0.0, RADAR_RADIUS * value / RADAR_SCALE),
            egui::Align2::CENTER_CENTER,
            level.to_string(),
            egui::FontId::proportional(9.0),
            Color32::from_white_alpha(77),
        );
    }

    for (i, area) in AREAS.iter().enumerate() {
        painter.line_segment([center, radar_point(center, RADAR_RADIUS, 10.5, i, count)], grid);
        painter.text(
            radar_point(center, RADAR_RADIUS, 12.5, i, count),
            egui::Align2::CENTER_CENTER,
            area.label.replace(' ', "\n"),
            egui::FontId::proportional(11.0),
            theme::TEXT_PRIMARY,
        );
    }

    let outline: Vec<Pos2> = AREAS
        .iter()
        .enumerate()
        .map(|(i, area)| {
            let importance = scenario.areas.get(area.key).map_or(0, |plan| plan.importance);
            radar_point(center, RADAR_RADIUS, f32::from(importance), i, count)
        })
        .collect();
    let fill = Color32::from_rgba_unmultiplied(
        theme::ACCENT.r(),
        theme::ACCENT.g(),
        theme::ACCENT.b(),
        64,
    );
    // The outline is generally not convex, so fill it as a fan around the centre.
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, fill);
    for point in &outline {
        mesh.colored_vertex(*point, fill);
    }
    for i in 0..count as u32 {
        mesh.add_triangle(0, i + 1, (i + 1) % count as u32 + 1);
    }
    painter.add(Shape::mesh(mesh));
    for point in &outline {
        painter.circle_filled(*point, 3.0, theme::ACCENT);
    }
    painter.add(Shape::closed_line(outline, Stroke::new(2.0, theme::ACCENT)));
}

/// Window listing every project of the scenario under its area. Picking an
/// area opens its page.
fn project_index(scenario: &Scenario, open: &mut bool, ctx: &egui::Context) -> NavAction {
    let mut action = NavAction::None;
    egui::Window::new("Project index")
        .open(open)
        .collapsible(false)
        .default_size([360.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for area in AREAS {
                    let Some(plan) = scenario.areas.get(area.key) else {
                        continue;
                    };
                    if plan.projects.is_empty() {
                        continue;
                    }
                    let heading = RichText::new(format!("{}  ({})", area.label, plan.projects.len()))
                        .strong()
                        .color(theme::hex_or_accent(area.color_hex));
                    if ui.link(heading).on_hover_text("Open area").clicked() {
                        action = NavAction::Open(View::Area(area.key));
                    }
                    for project in &plan.projects {
                        let title = if project.title.trim().is_empty() {
                            "Untitled project"
                        } else {
                            project.title.as_str()
                        };
                        ui.label(
                            RichText::new(format!("    {}   {} → {}", title, project.start, project.end))
                                .color(theme::TEXT_SECONDARY),
                        );
                    }
                    ui.add_space(4.0);
                }
                if scenario.project_count() == 0 {
                    ui.label(RichText::new("No projects yet").color(theme::TEXT_DIM));
                }
            });
        });
    if matches!(action, NavAction::Open(_)) {
        *open = false;
    }
    action
}

/// Headline figures, the importance radar and per-area weights of a
/// scenario. `show_index` toggles the project index window.
pub fn show_dashboard(scenario: &Scenario, show_index: &mut bool, ui: &mut Ui) -> NavAction {
    ui.label(
        RichText::new(&scenario.title)
            .strong()
            .size(17.0)
            .color(theme::TEXT_PRIMARY),
    );
    if !scenario.description.is_empty() {
        ui.label(RichText::new(&scenario.description).color(theme::TEXT_SECONDARY));
    }
    ui.add_space(6.0);

    let ksm_count: usize = scenario.areas.values().map(|a| a.ksms.len()).sum();
    ui.horizontal_wrapped(|ui| {
        figure(ui, "TOTAL BUDGET", format_amount(scenario.total_budget()));
        let projects = figure(ui, "PROJECTS", scenario.project_count().to_string())
            .interact(Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Show all projects");
        if projects.clicked() {
            *show_index = !*show_index;
        }
        figure(ui, "KEY SUCCESS METRICS", ksm_count.to_string());
    });

    ui.add_space(6.0);
    egui::CollapsingHeader::new(RichText::new("Importance").color(theme::TEXT_SECONDARY))
        .id_salt("dashboard_radar")
        .default_open(true)
        .show(ui, |ui| radar_chart(scenario, ui));

    ui.add_space(6.0);
    egui::CollapsingHeader::new(RichText::new("Areas").color(theme::TEXT_SECONDARY))
        .id_salt("dashboard_areas")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("dashboard_area_grid")
                .num_columns(4)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Area").underline());
                    ui.label(RichText::new("Importance").underline());
                    ui.label(RichText::new("Budget").underline());
                    ui.label(RichText::new("Metrics").underline());
                    ui.end_row();

                    for area in AREAS {
                        let Some(plan) = scenario.areas.get(area.key) else {
                            continue;
                        };
                        ui.label(
                            RichText::new(area.label).color(theme::hex_or_accent(area.color_hex)),
                        );
                        ui.add(
                            egui::ProgressBar::new(f32::from(plan.importance) / 10.0)
                                .desired_width(120.0)
                                .text(plan.importance.to_string()),
                        );
                        ui.label(format_amount(plan.budget));
                        let names: Vec<&str> = plan
                            .ksms
                            .iter()
                            .map(|k| if k.abbreviation.is_empty() { k.name.as_str() } else { k.abbreviation.as_str() })
                            .collect();
                        ui.label(if names.is_empty() { "—".to_string() } else { names.join(", ") });
                        ui.end_row();
                    }
                });
        });

    if *show_index {
        project_index(scenario, show_index, ui.ctx())
    } else {
        NavAction::None
    }
}
