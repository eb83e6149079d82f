use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timeline::{CalendarWindow, YearMonth};

fn default_score() -> u8 {
    5
}

/// Estimated cost bracket of a project, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u64,
    pub max: u64,
}

impl BudgetRange {
    /// Swap the bounds if they were entered the wrong way round.
    pub fn normalized(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
        }
    }

    pub fn midpoint(&self) -> u64 {
        self.min / 2 + self.max / 2 + (self.min % 2 + self.max % 2) / 2
    }
}

/// A project on the roadmap of one strategic area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    pub start: YearMonth,
    pub end: YearMonth,
    /// Expected impact, 1 to 10.
    #[serde(default = "default_score")]
    pub impact: u8,
    /// Expected effort, 1 to 10.
    #[serde(default = "default_score")]
    pub effort: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetRange>,
    /// Capabilities the project depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enablers: Vec<String>,
}

impl Project {
    /// A blank project spanning the first four months of `window`.
    pub fn new(window: &CalendarWindow) -> Self {
        let start = window.first_month();
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            start,
            end: window.clamp(start.add_months(3)),
            impact: default_score(),
            effort: default_score(),
            budget: None,
            enablers: Vec::new(),
        }
    }

    /// Replace both dates. An end before the start collapses onto the start.
    pub fn set_dates(&mut self, start: YearMonth, end: YearMonth) {
        self.start = start;
        self.end = end.max(start);
    }

    /// Replace the budget estimate. Bounds entered the wrong way round are
    /// swapped.
    pub fn set_budget(&mut self, budget: Option<BudgetRange>) {
        self.budget = budget.map(BudgetRange::normalized);
    }

    /// Bring the record back within its invariants. Returns true if anything
    /// had to change.
    pub fn normalize(&mut self, window: &CalendarWindow) -> bool {
        let before = self.clone();
        let start = window.clamp(self.start);
        let end = window.clamp(self.end);
        self.set_dates(start, end);
        self.impact = self.impact.clamp(1, 10);
        self.effort = self.effort.clamp(1, 10);
        self.budget = self.budget.map(BudgetRange::normalized);
        *self != before
    }
}
