//! Geometry of the roadmap view: header cells, rows and bars in integer
//! pixels. Painting lives in `ui::gantt_chart`; everything here is plain data
//! so hit-testing and row stacking can be checked without a window.
//!
//! Coordinates: `x` is measured from the first month of the window, `y` from
//! the top of the header.

use serde::{Deserialize, Serialize};

use super::{CalendarWindow, DragGesture, DragMode, GroupDescriptor, ItemId, TimelineItem, YearMonth};

const MONTH_LABELS: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

/// Bar colour used when an item's group has no descriptor.
pub const FALLBACK_BAR_HEX: &str = "#02192C";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One row per item.
    #[default]
    Flat,
    /// One row per group, items stacked inside it.
    Swimlane,
}

/// Fixed pixel metrics of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub year_header_height: i32,
    pub month_header_height: i32,
    pub flat_row_height: i32,
    /// Vertical slot each item gets inside a swimlane.
    pub slot_height: i32,
    pub lane_padding: i32,
    pub bar_height: i32,
    pub handle_width: i32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            year_header_height: 22,
            month_header_height: 18,
            flat_row_height: 44,
            slot_height: 30,
            lane_padding: 7,
            bar_height: 24,
            handle_width: 8,
        }
    }
}

impl LayoutMetrics {
    pub fn header_height(&self) -> i32 {
        self.year_header_height + self.month_header_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PxRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PxRect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Half-open on the right and bottom edges.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub month: YearMonth,
    pub label: &'static str,
    pub left: i32,
    pub width: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearHeader {
    pub year: i32,
    pub left: i32,
    pub width: i32,
    pub months: Vec<MonthCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLayout {
    pub item_id: ItemId,
    pub group_key: String,
    pub title: String,
    pub start: YearMonth,
    pub end: YearMonth,
    pub rect: PxRect,
    pub color_hex: String,
    pub selected: bool,
    pub dragging: bool,
    /// Left and right resize handles; only present in editable mode.
    pub handles: Option<[PxRect; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub label: String,
    pub group_key: Option<String>,
    pub color_hex: Option<String>,
    pub top: i32,
    pub height: i32,
    pub bars: Vec<BarLayout>,
}

/// Everything the host hands the view for one frame.
#[derive(Debug, Clone, Copy)]
pub struct TimelineProps<'a> {
    pub items: &'a [TimelineItem],
    pub groups: &'a [GroupDescriptor],
    pub mode: LayoutMode,
    pub editable: bool,
    pub selected: Option<ItemId>,
    pub window: CalendarWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    pub years: Vec<YearHeader>,
    pub rows: Vec<RowLayout>,
    pub width: i32,
    pub height: i32,
    pub header_height: i32,
    pub editable: bool,
}

impl TimelineLayout {
    /// Lay out `props`. The bar of the item under `live` is drawn at its live
    /// gesture position instead of its stored dates.
    pub fn build(props: &TimelineProps<'_>, live: Option<&DragGesture>, metrics: &LayoutMetrics) -> Self {
        let window = props.window;
        let header_height = metrics.header_height();
        let bars = BarBuilder {
            props,
            live,
            metrics,
        };

        let mut rows = Vec::new();
        let mut top = header_height;

        match props.mode {
            LayoutMode::Flat => {
                for item in props.items {
                    let height = metrics.flat_row_height;
                    let bar_top = top + (height - metrics.bar_height) / 2;
                    let group = find_group(props.groups, &item.group_key);
                    rows.push(RowLayout {
                        label: display_title(&item.title),
                        group_key: Some(item.group_key.clone()),
                        color_hex: group.map(|g| g.color_hex.clone()),
                        top,
                        height,
                        bars: vec![bars.bar(item, bar_top)],
                    });
                    top += height;
                }
            }
            LayoutMode::Swimlane => {
                for group in props.groups {
                    let members: Vec<&TimelineItem> = props
                        .items
                        .iter()
                        .filter(|item| item.group_key == group.group_key)
                        .collect();
                    let height =
                        metrics.lane_padding * 2 + members.len().max(1) as i32 * metrics.slot_height;
                    let slot_offset = (metrics.slot_height - metrics.bar_height) / 2;
                    let lane_bars = members
                        .iter()
                        .enumerate()
                        .map(|(slot, item)| {
                            let bar_top =
                                top + metrics.lane_padding + slot as i32 * metrics.slot_height + slot_offset;
                            bars.bar(item, bar_top)
                        })
                        .collect();
                    rows.push(RowLayout {
                        label: group.display_label.clone(),
                        group_key: Some(group.group_key.clone()),
                        color_hex: Some(group.color_hex.clone()),
                        top,
                        height,
                        bars: lane_bars,
                    });
                    top += height;
                }

                let orphans = props
                    .items
                    .iter()
                    .filter(|item| find_group(props.groups, &item.group_key).is_none())
                    .count();
                if orphans > 0 {
                    tracing::debug!(orphans, "items without a group descriptor hidden in swimlane mode");
                }
            }
        }

        Self {
            years: header(&window),
            rows,
            width: window.total_width(),
            height: top,
            header_height,
            editable: props.editable,
        }
    }

    /// The draggable surface under `(x, y)`. Edge handles take precedence
    /// over the bar body; later bars are on top. Read-only layouts never hit.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<(ItemId, DragMode)> {
        if !self.editable {
            return None;
        }
        let bars = self.rows.iter().flat_map(|r| r.bars.iter()).rev();
        for bar in bars {
            if let Some([left, right]) = bar.handles {
                if left.contains(x, y) {
                    return Some((bar.item_id, DragMode::ResizeStart));
                }
                if right.contains(x, y) {
                    return Some((bar.item_id, DragMode::ResizeEnd));
                }
            }
            if bar.rect.contains(x, y) {
                return Some((bar.item_id, DragMode::Move));
            }
        }
        None
    }

    pub fn bar(&self, item_id: ItemId) -> Option<&BarLayout> {
        self.rows
            .iter()
            .flat_map(|r| r.bars.iter())
            .find(|b| b.item_id == item_id)
    }
}

struct BarBuilder<'p, 'a> {
    props: &'p TimelineProps<'a>,
    live: Option<&'p DragGesture>,
    metrics: &'p LayoutMetrics,
}

impl BarBuilder<'_, '_> {
    fn bar(&self, item: &TimelineItem, top: i32) -> BarLayout {
        let window = self.props.window;
        let live = self
            .live
            .filter(|g| g.item_id == item.id)
            .map(|g| (g.live_left, g.live_width));
        let (left, width) = live.unwrap_or_else(|| {
            (
                window.to_pixel(item.start),
                window.bar_width(item.start, item.end),
            )
        });
        let rect = PxRect::new(left, top, width, self.metrics.bar_height);

        let handles = self.props.editable.then(|| {
            let w = self.metrics.handle_width.min(width / 2);
            [
                PxRect::new(rect.left, rect.top, w, rect.height),
                PxRect::new(rect.right() - w, rect.top, w, rect.height),
            ]
        });

        BarLayout {
            item_id: item.id,
            group_key: item.group_key.clone(),
            title: display_title(&item.title),
            start: item.start,
            end: item.end,
            rect,
            color_hex: find_group(self.props.groups, &item.group_key)
                .map(|g| g.color_hex.clone())
                .unwrap_or_else(|| FALLBACK_BAR_HEX.to_string()),
            selected: self.props.selected == Some(item.id),
            dragging: live.is_some(),
            handles,
        }
    }
}

fn header(window: &CalendarWindow) -> Vec<YearHeader> {
    let month_width = window.month_width();
    (0..window.years() as i32)
        .map(|offset| {
            let year = window.start_year() + offset;
            let months = MONTH_LABELS
                .iter()
                .enumerate()
                .filter_map(|(i, &label)| {
                    let month = YearMonth::new(year, i as u32 + 1)?;
                    Some(MonthCell {
                        month,
                        label,
                        left: window.to_pixel(month),
                        width: month_width,
                    })
                })
                .collect();
            YearHeader {
                year,
                left: offset * 12 * month_width,
                width: 12 * month_width,
                months,
            }
        })
        .collect()
}

fn find_group<'g>(groups: &'g [GroupDescriptor], key: &str) -> Option<&'g GroupDescriptor> {
    groups.iter().find(|g| g.group_key == key)
}

fn display_title(title: &str) -> String {
    if title.trim().is_empty() {
        "Untitled project".to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn groups() -> Vec<GroupDescriptor> {
        ["ecommerce", "crm", "tech"]
            .iter()
            .map(|key| GroupDescriptor {
                group_key: key.to_string(),
                display_label: key.to_uppercase(),
                color_hex: "#2563EB".into(),
            })
            .collect()
    }

    fn items() -> Vec<TimelineItem> {
        vec![
            TimelineItem::new(Uuid::from_u128(1), "Checkout", ym("2026-01"), ym("2026-03"), "ecommerce"),
            TimelineItem::new(Uuid::from_u128(2), "CDP", ym("2027-02"), ym("2027-02"), "crm"),
            TimelineItem::new(Uuid::from_u128(3), "PIM", ym("2026-06"), ym("2026-09"), "ecommerce"),
        ]
    }

    fn props<'a>(items: &'a [TimelineItem], groups: &'a [GroupDescriptor], mode: LayoutMode) -> TimelineProps<'a> {
        TimelineProps {
            items,
            groups,
            mode,
            editable: true,
            selected: Some(Uuid::from_u128(2)),
            window: CalendarWindow::default(),
        }
    }

    #[test]
    fn header_has_twelve_cells_per_year() {
        let (items, groups) = (items(), groups());
        let layout = TimelineLayout::build(&props(&items, &groups, LayoutMode::Flat), None, &LayoutMetrics::default());
        assert_eq!(layout.years.len(), 4);
        assert_eq!(layout.years[1].year, 2027);
        assert_eq!(layout.years[1].left, 360);
        assert!(layout.years.iter().all(|y| y.months.len() == 12));
        let last = layout.years[3].months.last().unwrap();
        assert_eq!(last.left + last.width, layout.width);
    }

    #[test]
    fn flat_mode_has_one_row_per_item() {
        let (items, groups) = (items(), groups());
        let m = LayoutMetrics::default();
        let layout = TimelineLayout::build(&props(&items, &groups, LayoutMode::Flat), None, &m);
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.rows[1].top, m.header_height() + m.flat_row_height);
        let cdp = layout.bar(Uuid::from_u128(2)).unwrap();
        assert_eq!((cdp.rect.left, cdp.rect.width), (13 * 30, 30));
        assert!(cdp.selected);
        assert!(!layout.bar(Uuid::from_u128(1)).unwrap().selected);
    }

    #[test]
    fn swimlanes_stack_items_without_overlap() {
        let (items, groups) = (items(), groups());
        let m = LayoutMetrics::default();
        let layout = TimelineLayout::build(&props(&items, &groups, LayoutMode::Swimlane), None, &m);

        assert_eq!(layout.rows.len(), 3);
        let lane = &layout.rows[0];
        assert_eq!(lane.bars.len(), 2);
        assert_eq!(lane.height, m.lane_padding * 2 + 2 * m.slot_height);
        assert!(lane.bars[0].rect.bottom() <= lane.bars[1].rect.top);

        // Empty lanes still get one slot.
        assert_eq!(layout.rows[2].height, m.lane_padding * 2 + m.slot_height);
        assert_eq!(layout.height, layout.rows[2].top + layout.rows[2].height);
    }

    #[test]
    fn live_gesture_overrides_stored_dates() {
        let (items, groups) = (items(), groups());
        let gesture = DragGesture {
            item_id: Uuid::from_u128(1),
            group_key: "ecommerce".into(),
            mode: DragMode::Move,
            pointer_origin_x: 0,
            committed_left: 0,
            committed_width: 90,
            live_left: 120,
            live_width: 90,
        };
        let layout = TimelineLayout::build(
            &props(&items, &groups, LayoutMode::Flat),
            Some(&gesture),
            &LayoutMetrics::default(),
        );
        let bar = layout.bar(Uuid::from_u128(1)).unwrap();
        assert_eq!(bar.rect.left, 120);
        assert!(bar.dragging);
    }

    #[test]
    fn hit_test_prefers_handles() {
        let (items, groups) = (items(), groups());
        let layout = TimelineLayout::build(&props(&items, &groups, LayoutMode::Flat), None, &LayoutMetrics::default());
        let bar = layout.bar(Uuid::from_u128(1)).unwrap().clone();
        let y = bar.rect.top + 2;
        let id = bar.item_id;
        assert_eq!(layout.hit_test(bar.rect.left + 1, y), Some((id, DragMode::ResizeStart)));
        assert_eq!(layout.hit_test(bar.rect.right() - 1, y), Some((id, DragMode::ResizeEnd)));
        assert_eq!(layout.hit_test(bar.rect.left + 40, y), Some((id, DragMode::Move)));
        assert_eq!(layout.hit_test(bar.rect.right() + 5, y), None);
    }

    #[test]
    fn read_only_layout_has_no_handles_or_hits() {
        let (items, groups) = (items(), groups());
        let mut p = props(&items, &groups, LayoutMode::Swimlane);
        p.editable = false;
        let layout = TimelineLayout::build(&p, None, &LayoutMetrics::default());
        let bar = layout.bar(Uuid::from_u128(1)).unwrap();
        assert!(bar.handles.is_none());
        assert_eq!(layout.hit_test(bar.rect.left + 20, bar.rect.top + 2), None);
    }

    #[test]
    fn unknown_groups_fall_back_in_flat_mode() {
        let items = vec![TimelineItem::new(Uuid::from_u128(9), "", ym("2026-01"), ym("2026-01"), "legal")];
        let groups = groups();
        let layout = TimelineLayout::build(&props(&items, &groups, LayoutMode::Flat), None, &LayoutMetrics::default());
        let bar = layout.bar(Uuid::from_u128(9)).unwrap();
        assert_eq!(bar.color_hex, FALLBACK_BAR_HEX);
        assert_eq!(bar.title, "Untitled project");

        let swim = TimelineLayout::build(&props(&items, &groups, LayoutMode::Swimlane), None, &LayoutMetrics::default());
        assert!(swim.bar(Uuid::from_u128(9)).is_none());
    }
}
