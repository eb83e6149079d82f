use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Ksm, Project};

/// Everything a scenario plans for one strategic area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaPlan {
    /// Strategic weight, 1 to 10.
    pub importance: u8,
    pub objectives: String,
    /// Expected evolution for each of the first three years.
    pub evolution: [String; 3],
    pub routine: String,
    pub budget: u64,
    pub comments: String,
    pub projects: Vec<Project>,
    pub ksms: Vec<Ksm>,
}

impl Default for AreaPlan {
    fn default() -> Self {
        Self {
            importance: 1,
            objectives: String::new(),
            evolution: Default::default(),
            routine: String::new(),
            budget: 0,
            comments: String::new(),
            projects: Vec::new(),
            ksms: Vec::new(),
        }
    }
}

impl AreaPlan {
    pub fn with_importance(importance: u8) -> Self {
        Self {
            importance: importance.clamp(1, 10),
            ..Default::default()
        }
    }
}

/// One alternative version of the multi-year plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Plans keyed by area key. Areas without an entry read as the empty plan.
    #[serde(default)]
    pub areas: BTreeMap<String, AreaPlan>,
}

impl Scenario {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            areas: BTreeMap::new(),
        }
    }

    /// The plan for `area`, or the empty plan if none was written yet.
    pub fn area(&self, area: &str) -> AreaPlan {
        self.areas.get(area).cloned().unwrap_or_default()
    }

    /// Mutable plan for `area`, created empty on first access.
    pub fn area_mut(&mut self, area: &str) -> &mut AreaPlan {
        self.areas.entry(area.to_string()).or_default()
    }

    pub fn total_budget(&self) -> u64 {
        self.areas.values().map(|a| a.budget).sum()
    }

    pub fn project_count(&self) -> usize {
        self.areas.values().map(|a| a.projects.len()).sum()
    }
}
