//! Pointer gestures against roadmap bars: move, resize from the left edge,
//! resize from the right edge.
//!
//! A gesture opens on pointer-down, follows every pointer-move while the
//! button is held and closes on pointer-up (or [`GestureController::cancel`]).
//! While open it holds a [`CaptureGuard`], which stands for the pair of
//! window-wide move/up listeners. The guard is released on every exit path,
//! including dropping the controller mid-drag.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::{CalendarWindow, CommitRequest, ItemId, TimelineHost, TimelineItem};

/// Listeners a single open gesture registers: pointer-move and pointer-up.
const LISTENERS_PER_GESTURE: usize = 2;

/// Which part of a bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Geometry of an in-progress gesture, in timeline pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub item_id: ItemId,
    pub group_key: String,
    pub mode: DragMode,
    pub pointer_origin_x: i32,
    pub committed_left: i32,
    pub committed_width: i32,
    pub live_left: i32,
    pub live_width: i32,
}

impl DragGesture {
    /// False when snapping brought the bar back to where it started.
    pub fn has_moved(&self) -> bool {
        self.live_left != self.committed_left || self.live_width != self.committed_width
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Committed(CommitRequest),
    /// Released without net movement, i.e. a plain click.
    Discarded,
}

/// Registry of window-wide pointer listeners.
#[derive(Debug, Default)]
pub struct PointerCapture {
    listeners: Rc<Cell<usize>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently installed.
    pub fn listener_count(&self) -> usize {
        self.listeners.get()
    }

    /// Install the move/up listeners until the returned guard is dropped.
    pub fn acquire(&self) -> CaptureGuard {
        self.listeners.set(self.listeners.get() + LISTENERS_PER_GESTURE);
        CaptureGuard {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

/// Scoped ownership of the window-wide listeners.
#[derive(Debug)]
pub struct CaptureGuard {
    listeners: Rc<Cell<usize>>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.listeners
            .set(self.listeners.get().saturating_sub(LISTENERS_PER_GESTURE));
    }
}

#[derive(Debug)]
struct ActiveGesture {
    gesture: DragGesture,
    _capture: CaptureGuard,
}

/// Turns raw pointer positions into snapped bar geometry and, on release,
/// into a [`CommitRequest`] for the host.
#[derive(Debug)]
pub struct GestureController {
    window: CalendarWindow,
    capture: PointerCapture,
    active: Option<ActiveGesture>,
}

impl GestureController {
    pub fn new(window: CalendarWindow) -> Self {
        Self {
            window,
            capture: PointerCapture::new(),
            active: None,
        }
    }

    pub fn window(&self) -> CalendarWindow {
        self.window
    }

    /// Switch calendars. Any open gesture is cancelled since its pixels no
    /// longer mean the same months.
    pub fn set_window(&mut self, window: CalendarWindow) {
        if window != self.window {
            self.cancel();
            self.window = window;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.active.as_ref().map(|a| &a.gesture)
    }

    pub fn listener_count(&self) -> usize {
        self.capture.listener_count()
    }

    /// Live `(left, width)` of `item_id` if it is the one being dragged.
    pub fn live_geometry(&self, item_id: ItemId) -> Option<(i32, i32)> {
        self.gesture()
            .filter(|g| g.item_id == item_id)
            .map(|g| (g.live_left, g.live_width))
    }

    /// Pointer pressed on `item`. Selects it right away and opens a gesture.
    ///
    /// Returns false, without selecting, if a gesture is already open.
    pub fn pointer_down<H: TimelineHost + ?Sized>(
        &mut self,
        item: &TimelineItem,
        mode: DragMode,
        pointer_x: i32,
        host: &mut H,
    ) -> bool {
        if let Some(active) = &self.active {
            warn!(
                open = %active.gesture.item_id,
                ignored = %item.id,
                "pointer-down while a gesture is open"
            );
            return false;
        }

        host.on_select(item.id);

        let left = self.window.to_pixel(item.start);
        let width = self.window.bar_width(item.start, item.end);
        debug!(item = %item.id, ?mode, left, width, "gesture opened");

        self.active = Some(ActiveGesture {
            gesture: DragGesture {
                item_id: item.id,
                group_key: item.group_key.clone(),
                mode,
                pointer_origin_x: pointer_x,
                committed_left: left,
                committed_width: width,
                live_left: left,
                live_width: width,
            },
            _capture: self.capture.acquire(),
        });
        true
    }

    /// Pointer moved while the button is held. Returns true if the snapped
    /// geometry changed.
    pub fn pointer_move(&mut self, pointer_x: i32) -> bool {
        let window = self.window;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let g = &mut active.gesture;
        let (left, width) = live_geometry(&window, g, pointer_x - g.pointer_origin_x);
        let changed = left != g.live_left || width != g.live_width;
        g.live_left = left;
        g.live_width = width;
        changed
    }

    /// Pointer released. Commits to the host unless the bar ended where it
    /// started. `None` if no gesture was open.
    pub fn pointer_up<H: TimelineHost + ?Sized>(
        &mut self,
        pointer_x: i32,
        host: &mut H,
    ) -> Option<GestureOutcome> {
        self.pointer_move(pointer_x);
        self.release(host)
    }

    /// Close the gesture at its current live geometry, as a pointer-up whose
    /// position is unknown (pointer left the window).
    pub fn release<H: TimelineHost + ?Sized>(&mut self, host: &mut H) -> Option<GestureOutcome> {
        let ActiveGesture { gesture, .. } = self.active.take()?;

        if !gesture.has_moved() {
            debug!(item = %gesture.item_id, "gesture discarded without movement");
            return Some(GestureOutcome::Discarded);
        }

        let request = self.commit_request(gesture);
        info!(
            item = %request.item_id,
            group = %request.group_key,
            start = %request.start,
            end = %request.end,
            "gesture committed"
        );
        host.on_commit(request.clone());
        Some(GestureOutcome::Committed(request))
    }

    /// Drop the open gesture without committing. Returns true if one was open.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                debug!(item = %active.gesture.item_id, "gesture cancelled");
                true
            }
            None => false,
        }
    }

    fn commit_request(&self, gesture: DragGesture) -> CommitRequest {
        let start = self.window.to_token(gesture.live_left);
        let end = self
            .window
            .to_token(gesture.live_left + gesture.live_width - self.window.month_width());
        CommitRequest {
            group_key: gesture.group_key,
            item_id: gesture.item_id,
            start,
            end: end.max(start),
        }
    }
}

/// Snapped `(left, width)` for a pointer displacement of `delta` pixels.
fn live_geometry(window: &CalendarWindow, g: &DragGesture, delta: i32) -> (i32, i32) {
    let month = window.month_width();
    let total = window.total_width();

    match g.mode {
        DragMode::Move => {
            let max_left = (total - g.committed_width).max(0);
            let left = window.snap(g.committed_left + delta).clamp(0, max_left);
            (left, g.committed_width)
        }
        DragMode::ResizeStart => {
            let right = g.committed_left + g.committed_width;
            let max_left = (right - month).max(0);
            let left = window.snap(g.committed_left + delta).clamp(0, max_left);
            (left, right - left)
        }
        DragMode::ResizeEnd => {
            let room = (total - g.committed_left).max(month);
            let width = window.snap(g.committed_width + delta).max(month).min(room);
            (g.committed_left, width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::YearMonth;
    use uuid::Uuid;

    #[derive(Default)]
    struct Recorder {
        selected: Vec<ItemId>,
        commits: Vec<CommitRequest>,
    }

    impl TimelineHost for Recorder {
        fn on_select(&mut self, item_id: ItemId) {
            self.selected.push(item_id);
        }

        fn on_commit(&mut self, request: CommitRequest) {
            self.commits.push(request);
        }
    }

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn item(start: &str, end: &str) -> TimelineItem {
        TimelineItem::new(Uuid::from_u128(7), "Replatform", ym(start), ym(end), "ecommerce")
    }

    fn controller() -> GestureController {
        GestureController::new(CalendarWindow::default())
    }

    #[test]
    fn pointer_down_selects_synchronously() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-01", "2026-03");
        assert!(ctl.pointer_down(&it, DragMode::Move, 100, &mut host));
        assert_eq!(host.selected, vec![it.id]);
        assert!(host.commits.is_empty());
        assert!(ctl.is_dragging());
    }

    #[test]
    fn captures_committed_geometry_with_inclusive_end() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        ctl.pointer_down(&item("2026-03", "2026-05"), DragMode::Move, 0, &mut host);
        let g = ctl.gesture().unwrap();
        assert_eq!((g.committed_left, g.committed_width), (60, 90));
        assert_eq!((g.live_left, g.live_width), (60, 90));
    }

    #[test]
    fn move_by_31_commits_next_month() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-01", "2026-01");
        ctl.pointer_down(&it, DragMode::Move, 200, &mut host);
        ctl.pointer_move(231);
        assert_eq!(ctl.live_geometry(it.id), Some((30, 30)));
        let outcome = ctl.pointer_up(231, &mut host);

        let expected = CommitRequest {
            group_key: "ecommerce".into(),
            item_id: it.id,
            start: ym("2026-02"),
            end: ym("2026-02"),
        };
        assert_eq!(outcome, Some(GestureOutcome::Committed(expected.clone())));
        assert_eq!(host.commits, vec![expected]);
    }

    #[test]
    fn sub_half_month_jitter_is_a_click() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        ctl.pointer_down(&item("2026-06", "2026-08"), DragMode::Move, 50, &mut host);
        ctl.pointer_move(60);
        ctl.pointer_move(40);
        assert_eq!(ctl.pointer_up(64, &mut host), Some(GestureOutcome::Discarded));
        assert_eq!(host.selected.len(), 1);
        assert!(host.commits.is_empty());
    }

    #[test]
    fn move_clamps_to_window_edges() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-04", "2026-06");
        ctl.pointer_down(&it, DragMode::Move, 0, &mut host);
        ctl.pointer_move(-10_000);
        assert_eq!(ctl.live_geometry(it.id), Some((0, 90)));
        ctl.pointer_move(10_000);
        assert_eq!(ctl.live_geometry(it.id), Some((1440 - 90, 90)));
        ctl.pointer_up(10_000, &mut host);
        assert_eq!(host.commits[0].start, ym("2029-10"));
        assert_eq!(host.commits[0].end, ym("2029-12"));
    }

    #[test]
    fn resize_start_keeps_right_edge_fixed() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-04", "2026-06");
        ctl.pointer_down(&it, DragMode::ResizeStart, 0, &mut host);
        ctl.pointer_move(-61);
        assert_eq!(ctl.live_geometry(it.id), Some((30, 150)));
        ctl.pointer_move(10_000);
        assert_eq!(ctl.live_geometry(it.id), Some((150, 30)));
        ctl.pointer_move(-10_000);
        assert_eq!(ctl.live_geometry(it.id), Some((0, 180)));
        ctl.pointer_up(-10_000, &mut host);
        assert_eq!(host.commits[0].start, ym("2026-01"));
        assert_eq!(host.commits[0].end, ym("2026-06"));
    }

    #[test]
    fn resize_end_never_narrower_than_a_month() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-04", "2026-06");
        ctl.pointer_down(&it, DragMode::ResizeEnd, 500, &mut host);
        ctl.pointer_move(-5_000);
        assert_eq!(ctl.live_geometry(it.id), Some((90, 30)));
        ctl.pointer_up(-5_000, &mut host);
        assert_eq!(host.commits[0].start, ym("2026-04"));
        assert_eq!(host.commits[0].end, ym("2026-04"));
    }

    #[test]
    fn resize_end_stops_at_window_end() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2029-10", "2029-11");
        ctl.pointer_down(&it, DragMode::ResizeEnd, 0, &mut host);
        ctl.pointer_up(9_999, &mut host);
        assert_eq!(host.commits[0].end, ym("2029-12"));
    }

    #[test]
    fn second_pointer_down_is_ignored_while_open() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let first = item("2026-01", "2026-02");
        let mut second = item("2027-01", "2027-02");
        second.id = Uuid::from_u128(8);

        assert!(ctl.pointer_down(&first, DragMode::Move, 0, &mut host));
        assert!(!ctl.pointer_down(&second, DragMode::Move, 0, &mut host));
        assert_eq!(host.selected, vec![first.id]);
        assert_eq!(ctl.gesture().unwrap().item_id, first.id);
        assert_eq!(ctl.listener_count(), 2);
    }

    #[test]
    fn cancel_discards_live_state() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        ctl.pointer_down(&item("2026-01", "2026-02"), DragMode::Move, 0, &mut host);
        ctl.pointer_move(300);
        assert!(ctl.cancel());
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.listener_count(), 0);
        assert_eq!(ctl.pointer_up(300, &mut host), None);
        assert!(host.commits.is_empty());
    }

    #[test]
    fn release_commits_last_live_geometry() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        ctl.pointer_down(&item("2026-01", "2026-02"), DragMode::ResizeEnd, 0, &mut host);
        ctl.pointer_move(61);
        let outcome = ctl.release(&mut host);
        assert!(matches!(outcome, Some(GestureOutcome::Committed(_))));
        assert_eq!(host.commits[0].end, ym("2026-04"));
        assert_eq!(ctl.listener_count(), 0);
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let mut ctl = controller();
        assert!(!ctl.pointer_move(400));
        assert!(!ctl.cancel());
    }

    #[test]
    fn listeners_return_to_baseline_after_many_cycles() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        let it = item("2026-01", "2026-03");
        assert_eq!(ctl.listener_count(), 0);

        for round in 0..25 {
            ctl.pointer_down(&it, DragMode::Move, 0, &mut host);
            assert_eq!(ctl.listener_count(), 2);
            match round % 3 {
                0 => {
                    ctl.pointer_up(90, &mut host);
                }
                1 => {
                    ctl.pointer_up(0, &mut host);
                }
                _ => {
                    ctl.cancel();
                }
            }
            assert_eq!(ctl.listener_count(), 0);
        }
    }

    #[test]
    fn dropping_the_controller_mid_drag_releases_listeners() {
        let listeners;
        {
            let mut ctl = controller();
            let mut host = Recorder::default();
            ctl.pointer_down(&item("2026-01", "2026-03"), DragMode::Move, 0, &mut host);
            listeners = Rc::clone(&ctl.capture.listeners);
            assert_eq!(listeners.get(), 2);
        }
        assert_eq!(listeners.get(), 0);
    }

    #[test]
    fn changing_window_cancels_gesture() {
        let mut ctl = controller();
        let mut host = Recorder::default();
        ctl.pointer_down(&item("2026-01", "2026-03"), DragMode::Move, 0, &mut host);
        ctl.set_window(CalendarWindow::new(2027, 3, 30));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.listener_count(), 0);
    }
}
