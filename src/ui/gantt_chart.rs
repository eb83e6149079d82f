use crate::timeline::layout::{BarLayout, PxRect};
use crate::timeline::{
    CommitRequest, DragMode, GestureController, ItemId, LayoutMetrics, TimelineHost, TimelineLayout,
    TimelineProps, YearMonth,
};
use crate::ui::theme;
use egui::{Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

/// What happened in the chart this frame, collected through the
/// [`TimelineHost`] callbacks.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub selected: Option<ItemId>,
    pub commits: Vec<CommitRequest>,
    /// Pointer pressed on empty timeline space.
    pub clicked_background: bool,
}

impl TimelineHost for ChartInteraction {
    fn on_select(&mut self, item_id: ItemId) {
        self.selected = Some(item_id);
    }

    fn on_commit(&mut self, request: CommitRequest) {
        self.commits.push(request);
    }
}

/// Render the roadmap and feed pointer input to `controller`.
pub fn show_gantt_chart(
    props: &TimelineProps<'_>,
    controller: &mut GestureController,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let metrics = LayoutMetrics::default();
    let mut layout = TimelineLayout::build(props, controller.gesture(), &metrics);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let size = Vec2::new(
                theme::LABEL_WIDTH + layout.width as f32,
                layout.height as f32 + 24.0,
            );
            let (response, painter) = ui.allocate_painter(size, Sense::click());
            let origin = response.rect.min;
            let timeline_origin = Pos2::new(origin.x + theme::LABEL_WIDTH, origin.y);
            let to_local = |pos: Pos2| {
                (
                    (pos.x - timeline_origin.x).round() as i32,
                    (pos.y - timeline_origin.y).round() as i32,
                )
            };

            let clip = ui.clip_rect();
            let layer = ui.layer_id();
            if handle_pointer(props, controller, &layout, &response, clip, layer, &to_local, &mut interaction) {
                layout = TimelineLayout::build(props, controller.gesture(), &metrics);
                ui.ctx().request_repaint();
            }

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_rows(&painter, origin, &layout, response.rect.width());
            draw_grid(&painter, timeline_origin, &layout);
            draw_today_line(&painter, timeline_origin, props, &layout);

            let hovered = response
                .hover_pos()
                .filter(|_| !controller.is_dragging())
                .and_then(|pos| {
                    let (x, y) = to_local(pos);
                    layout.hit_test(x, y)
                });

            for bar in layout.rows.iter().flat_map(|r| r.bars.iter()) {
                let hover_mode = hovered.filter(|(id, _)| *id == bar.item_id).map(|(_, mode)| mode);
                draw_bar(&painter, timeline_origin, bar, hover_mode);
            }

            draw_header(&painter, origin, timeline_origin, &layout, props);

            // Cursor feedback
            if let Some(gesture) = controller.gesture() {
                ui.ctx().set_cursor_icon(cursor_for(gesture.mode, true));
            } else if let Some((id, mode)) = hovered {
                ui.ctx().set_cursor_icon(cursor_for(mode, false));
                if let Some(bar) = layout.bar(id) {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("bar-tip", id)),
                        |ui| {
                            ui.strong(&bar.title);
                            ui.label(format!("{} → {}", bar.start, bar.end));
                        },
                    );
                }
            }
        });

    interaction
}

/// Route this frame's pointer input. Returns true if gesture state changed.
///
/// A press only reaches the chart if it lands on the visible part of the
/// scroll area (`clip`) and no window or popup sits above `layer` there.
#[allow(clippy::too_many_arguments)]
fn handle_pointer(
    props: &TimelineProps<'_>,
    controller: &mut GestureController,
    layout: &TimelineLayout,
    response: &egui::Response,
    clip: Rect,
    layer: egui::LayerId,
    to_local: impl Fn(Pos2) -> (i32, i32),
    interaction: &mut ChartInteraction,
) -> bool {
    let ctx = &response.ctx;
    let (pressed, released, down, latest, escape) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
            i.pointer.latest_pos(),
            i.key_pressed(egui::Key::Escape),
        )
    });

    if controller.is_dragging() {
        // The controller owns the pointer: positions are read window-wide,
        // wherever the cursor currently is.
        if escape {
            return controller.cancel();
        }
        let x = latest.map(|p| to_local(p).0);
        if released || !down {
            match x {
                Some(x) => controller.pointer_up(x, interaction),
                None => controller.release(interaction),
            };
            return true;
        }
        return x.map_or(false, |x| controller.pointer_move(x));
    }

    if !props.editable || !pressed {
        return false;
    }
    let Some(pos) = ctx.input(|i| i.pointer.press_origin()) else {
        return false;
    };
    let visible = response.rect.contains(pos) && clip.contains(pos);
    let on_top = ctx.layer_id_at(pos).map_or(true, |top| top == layer);
    if !visible || !on_top {
        return false;
    }

    let (x, y) = to_local(pos);
    match layout.hit_test(x, y) {
        Some((id, mode)) => match props.items.iter().find(|item| item.id == id) {
            Some(item) => controller.pointer_down(item, mode, x, interaction),
            None => false,
        },
        None => {
            interaction.clicked_background = y >= layout.header_height;
            false
        }
    }
}

fn cursor_for(mode: DragMode, active: bool) -> CursorIcon {
    match (mode, active) {
        (DragMode::Move, true) => CursorIcon::Grabbing,
        (DragMode::Move, false) => CursorIcon::Grab,
        (DragMode::ResizeStart | DragMode::ResizeEnd, _) => CursorIcon::ResizeHorizontal,
    }
}

fn to_rect(base: Pos2, r: &PxRect) -> Rect {
    Rect::from_min_size(
        Pos2::new(base.x + r.left as f32, base.y + r.top as f32),
        Vec2::new(r.width as f32, r.height as f32),
    )
}

fn draw_rows(painter: &egui::Painter, origin: Pos2, layout: &TimelineLayout, width: f32) {
    for (i, row) in layout.rows.iter().enumerate() {
        let top = origin.y + row.top as f32;
        let row_rect = Rect::from_min_size(Pos2::new(origin.x, top), Vec2::new(width, row.height as f32));
        let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
        painter.rect_filled(row_rect, 0.0, row_bg);
        painter.line_segment(
            [row_rect.left_bottom(), row_rect.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );

        // Label column
        let label_rect = Rect::from_min_size(row_rect.min, Vec2::new(theme::LABEL_WIDTH, row_rect.height()));
        painter.rect_filled(label_rect, 0.0, theme::BG_HEADER);
        let mut text_x = label_rect.left() + 10.0;
        if let Some(hex) = &row.color_hex {
            painter.circle_filled(
                Pos2::new(text_x + 3.0, label_rect.center().y),
                4.0,
                theme::hex_or_accent(hex),
            );
            text_x += 14.0;
        }
        let galley = painter.layout_no_wrap(row.label.clone(), theme::font_label(), theme::TEXT_PRIMARY);
        let clipped = painter.with_clip_rect(label_rect.shrink(2.0));
        clipped.galley(
            Pos2::new(text_x, label_rect.center().y - galley.size().y / 2.0),
            galley,
            Color32::TRANSPARENT,
        );
        painter.line_segment(
            [label_rect.right_top(), label_rect.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_grid(painter: &egui::Painter, timeline_origin: Pos2, layout: &TimelineLayout) {
    let top = timeline_origin.y + layout.header_height as f32;
    let bottom = timeline_origin.y + layout.height as f32;
    for year in &layout.years {
        for cell in &year.months {
            let x = timeline_origin.x + cell.left as f32;
            let (width, color) = if cell.left == year.left {
                (1.0, theme::GRID_LINE_YEAR)
            } else {
                (0.5, theme::GRID_LINE)
            };
            painter.line_segment([Pos2::new(x, top), Pos2::new(x, bottom)], Stroke::new(width, color));
        }
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    timeline_origin: Pos2,
    layout: &TimelineLayout,
    props: &TimelineProps<'_>,
) {
    let metrics = LayoutMetrics::default();
    let year_h = metrics.year_header_height as f32;
    let month_h = metrics.month_header_height as f32;

    let corner = Rect::from_min_size(origin, Vec2::new(theme::LABEL_WIDTH, year_h + month_h));
    painter.rect_filled(corner, 0.0, theme::BG_HEADER);
    let caption = match props.mode {
        crate::timeline::LayoutMode::Flat => "PROJECT",
        crate::timeline::LayoutMode::Swimlane => "AREA",
    };
    painter.text(
        Pos2::new(corner.left() + 10.0, corner.center().y),
        egui::Align2::LEFT_CENTER,
        caption,
        theme::font_sub(),
        theme::TEXT_DIM,
    );

    for year in &layout.years {
        let year_rect = Rect::from_min_size(
            Pos2::new(timeline_origin.x + year.left as f32, timeline_origin.y),
            Vec2::new(year.width as f32, year_h),
        );
        painter.rect_filled(year_rect, 0.0, theme::BG_HEADER_YEAR);
        painter.text(
            year_rect.center(),
            egui::Align2::CENTER_CENTER,
            year.year.to_string(),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        painter.line_segment(
            [year_rect.right_top(), Pos2::new(year_rect.right(), year_rect.bottom() + month_h)],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        for cell in &year.months {
            let cell_rect = Rect::from_min_size(
                Pos2::new(timeline_origin.x + cell.left as f32, year_rect.bottom()),
                Vec2::new(cell.width as f32, month_h),
            );
            painter.rect_filled(cell_rect, 0.0, theme::BG_HEADER);
            painter.text(
                cell_rect.center(),
                egui::Align2::CENTER_CENTER,
                cell.label,
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    let bottom = origin.y + year_h + month_h;
    painter.line_segment(
        [
            Pos2::new(origin.x, bottom),
            Pos2::new(timeline_origin.x + layout.width as f32, bottom),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_today_line(
    painter: &egui::Painter,
    timeline_origin: Pos2,
    props: &TimelineProps<'_>,
    layout: &TimelineLayout,
) {
    let today = YearMonth::current();
    if !props.window.contains(today) {
        return;
    }
    let x = timeline_origin.x + props.window.to_pixel(today) as f32;
    painter.line_segment(
        [
            Pos2::new(x, timeline_origin.y + layout.header_height as f32),
            Pos2::new(x, timeline_origin.y + layout.height as f32),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_bar(painter: &egui::Painter, timeline_origin: Pos2, bar: &BarLayout, hover: Option<DragMode>) {
    let rect = to_rect(timeline_origin, &bar.rect);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::hex_or_accent(&bar.color_hex);

    // Soft shadow, stronger while dragging
    let shadow_alpha = if bar.dragging { 70 } else { 35 };
    painter.rect_filled(
        rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(shadow_alpha),
    );
    painter.rect_filled(rect, rounding, color);
    painter.rect_stroke(rect, rounding, Stroke::new(1.0, Color32::from_white_alpha(50)));

    if bar.selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::ACCENT),
        );
    }

    if rect.width() > 24.0 {
        let galley = painter.layout_no_wrap(bar.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(rect.shrink(1.0));
        clipped.galley(
            Pos2::new(rect.left() + 8.0, rect.center().y - galley.size().y / 2.0),
            galley,
            Color32::TRANSPARENT,
        );
    }

    if let Some([left, right]) = &bar.handles {
        for (handle, mode) in [(left, DragMode::ResizeStart), (right, DragMode::ResizeEnd)] {
            let fill = if hover == Some(mode) {
                theme::HANDLE_HOVER
            } else {
                theme::HANDLE_IDLE
            };
            let r = to_rect(timeline_origin, handle).shrink2(Vec2::new(2.5, 5.0));
            painter.rect_filled(r, Rounding::same(2.0), fill);
        }
    }
}
