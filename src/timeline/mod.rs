//! The roadmap engine: month/pixel mapping, drag and resize gestures, and
//! view geometry. Nothing in here knows about egui or the workspace model.

pub mod gesture;
pub mod item;
pub mod layout;
pub mod window;
pub mod year_month;

pub use gesture::{CaptureGuard, DragGesture, DragMode, GestureController, GestureOutcome, PointerCapture};
pub use item::{CommitRequest, GroupDescriptor, ItemId, TimelineHost, TimelineItem};
pub use layout::{LayoutMetrics, LayoutMode, TimelineLayout, TimelineProps};
pub use window::CalendarWindow;
pub use year_month::{ParseYearMonthError, YearMonth};
