use uuid::Uuid;

use super::YearMonth;

pub type ItemId = Uuid;

/// One bar on the roadmap, as handed to the engine by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub start: YearMonth,
    pub end: YearMonth,
    pub group_key: String,
}

impl TimelineItem {
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        start: YearMonth,
        end: YearMonth,
        group_key: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            start,
            end: end.max(start),
            group_key: group_key.into(),
        }
    }
}

/// A swimlane category: the host's strategic area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescriptor {
    pub group_key: String,
    pub display_label: String,
    pub color_hex: String,
}

/// New dates proposed for an item when a drag completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub group_key: String,
    pub item_id: ItemId,
    pub start: YearMonth,
    pub end: YearMonth,
}

/// Callbacks the timeline raises towards the application that owns the data.
pub trait TimelineHost {
    /// Fired on pointer-down over an item, before any drag happens.
    fn on_select(&mut self, item_id: ItemId);

    /// Fired once per drag that moved or resized an item.
    fn on_commit(&mut self, request: CommitRequest);
}
