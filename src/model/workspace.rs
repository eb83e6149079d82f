use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::area::AREAS;
use super::{AreaPlan, Project, Scenario};
use crate::error::{HubError, Result};
use crate::timeline::{CalendarWindow, CommitRequest, TimelineItem};

/// Version written into every saved workspace.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn legacy_schema_version() -> u32 {
    0
}

/// All scenarios of the organisation plus which one is being looked at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub name: String,
    pub scenarios: Vec<Scenario>,
    pub active_scenario: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Workspace {
    fn default() -> Self {
        let scenarios = vec![
            seeded(
                "Scenario 1: Incremental Optimisation",
                "Improve the existing platforms and operational efficiency.",
                &[("ecommerce", 8), ("crm", 6)],
            ),
            seeded(
                "Scenario 2: Omnichannel Expansion",
                "Tight physical/digital integration, opening to new marketplaces.",
                &[("ecommerce", 9), ("social", 7)],
            ),
            seeded(
                "Scenario 3: Digital Disruption & AI",
                "Broad AI adoption, hyper-personalisation and aggressive D2C models.",
                &[("tech", 10), ("ux", 9)],
            ),
        ];
        let active_scenario = scenarios[0].id;
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            name: "Strategy Hub".to_string(),
            scenarios,
            active_scenario,
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

fn seeded(title: &str, description: &str, weights: &[(&str, u8)]) -> Scenario {
    let mut scenario = Scenario::new(title, description);
    for (area, importance) in weights {
        scenario
            .areas
            .insert(area.to_string(), AreaPlan::with_importance(*importance));
    }
    scenario
}

impl Workspace {
    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// The scenario being viewed. Falls back to the first one if the active
    /// id is stale.
    pub fn active(&self) -> &Scenario {
        self.scenarios
            .iter()
            .find(|s| s.id == self.active_scenario)
            .unwrap_or(&self.scenarios[0])
    }

    pub fn active_mut(&mut self) -> &mut Scenario {
        let idx = self
            .scenarios
            .iter()
            .position(|s| s.id == self.active_scenario)
            .unwrap_or(0);
        &mut self.scenarios[idx]
    }

    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        if !self.scenarios.iter().any(|s| s.id == id) {
            return Err(HubError::UnknownScenario(id));
        }
        self.active_scenario = id;
        Ok(())
    }

    /// Append an empty scenario and make it active.
    pub fn add_scenario(&mut self) -> Uuid {
        let scenario = Scenario::new("New Scenario", "Scenario description...");
        let id = scenario.id;
        self.scenarios.push(scenario);
        self.active_scenario = id;
        self.touch();
        id
    }

    /// Remove a scenario. The last one can't be removed; if the active one
    /// goes, the first remaining scenario becomes active.
    pub fn delete_scenario(&mut self, id: Uuid) -> Result<()> {
        if self.scenarios.len() <= 1 {
            return Err(HubError::LastScenario);
        }
        let idx = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or(HubError::UnknownScenario(id))?;
        self.scenarios.remove(idx);
        if self.active_scenario == id {
            self.active_scenario = self.scenarios[0].id;
        }
        self.touch();
        Ok(())
    }

    /// Add a blank project to `area` of the active scenario.
    pub fn add_project(&mut self, area: &str, window: &CalendarWindow) -> Uuid {
        let project = Project::new(window);
        let id = project.id;
        self.active_mut().area_mut(area).projects.push(project);
        self.touch();
        id
    }

    pub fn remove_project(&mut self, area: &str, id: Uuid) -> bool {
        let Some(plan) = self.active_mut().areas.get_mut(area) else {
            return false;
        };
        let before = plan.projects.len();
        plan.projects.retain(|p| p.id != id);
        let removed = plan.projects.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Area key and project for `id` in the active scenario.
    pub fn find_project(&self, id: Uuid) -> Option<(&str, &Project)> {
        self.active().areas.iter().find_map(|(key, plan)| {
            plan.projects
                .iter()
                .find(|p| p.id == id)
                .map(|p| (key.as_str(), p))
        })
    }

    pub fn find_project_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        self.active_mut()
            .areas
            .values_mut()
            .flat_map(|plan| plan.projects.iter_mut())
            .find(|p| p.id == id)
    }

    /// Replace the dates of the project named by a finished drag.
    pub fn apply_commit(&mut self, request: &CommitRequest) -> bool {
        let project = self
            .active_mut()
            .areas
            .get_mut(&request.group_key)
            .and_then(|plan| plan.projects.iter_mut().find(|p| p.id == request.item_id));

        match project {
            Some(project) => {
                project.set_dates(request.start, request.end);
                self.touch();
                true
            }
            None => {
                warn!(
                    group = %request.group_key,
                    item = %request.item_id,
                    "commit for unknown project ignored"
                );
                false
            }
        }
    }

    /// Roadmap items of the active scenario, in area display order. With
    /// `area` set, only that area's projects.
    pub fn timeline_items(&self, area: Option<&str>) -> Vec<TimelineItem> {
        let scenario = self.active();
        AREAS
            .iter()
            .filter(|a| area.map_or(true, |key| key == a.key))
            .filter_map(|a| scenario.areas.get(a.key).map(|plan| (a.key, plan)))
            .flat_map(|(key, plan)| {
                plan.projects
                    .iter()
                    .map(move |p| TimelineItem::new(p.id, p.title.clone(), p.start, p.end, key))
            })
            .collect()
    }

    /// Repair a freshly loaded workspace so every invariant holds again.
    /// Returns the number of projects and metrics that needed fixing.
    pub fn validate(&mut self, window: &CalendarWindow) -> Result<usize> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(HubError::SchemaVersion {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        self.schema_version = CURRENT_SCHEMA_VERSION;

        if self.scenarios.is_empty() {
            warn!("workspace without scenarios, adding an empty one");
            self.scenarios.push(Scenario::new("New Scenario", ""));
        }
        if !self.scenarios.iter().any(|s| s.id == self.active_scenario) {
            self.active_scenario = self.scenarios[0].id;
        }

        let mut fixed = 0;
        for scenario in &mut self.scenarios {
            // Ids must be unique within a scenario's roadmap.
            let mut project_ids = HashSet::new();
            let mut ksm_ids = HashSet::new();
            for plan in scenario.areas.values_mut() {
                plan.importance = plan.importance.clamp(1, 10);
                for project in &mut plan.projects {
                    let mut repaired = project.normalize(window);
                    if !project_ids.insert(project.id) {
                        warn!(id = %project.id, "duplicate project id, issuing a new one");
                        project.id = fresh_id(&project_ids);
                        project_ids.insert(project.id);
                        repaired = true;
                    }
                    if repaired {
                        fixed += 1;
                    }
                }
                for ksm in &mut plan.ksms {
                    if !ksm_ids.insert(ksm.id) {
                        warn!(id = %ksm.id, "duplicate metric id, issuing a new one");
                        ksm.id = fresh_id(&ksm_ids);
                        ksm_ids.insert(ksm.id);
                        fixed += 1;
                    }
                }
            }
        }
        if fixed > 0 {
            info!(fixed, "repaired records while loading workspace");
        }
        Ok(fixed)
    }
}

fn fresh_id(taken: &HashSet<Uuid>) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !taken.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::YearMonth;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn default_workspace_has_three_scenarios() {
        let ws = Workspace::default();
        assert_eq!(ws.scenarios.len(), 3);
        assert_eq!(ws.active().id, ws.scenarios[0].id);
        assert_eq!(ws.active().area("ecommerce").importance, 8);
        assert_eq!(ws.active().area("seo"), AreaPlan::default());
    }

    #[test]
    fn cannot_delete_last_scenario() {
        let mut ws = Workspace::default();
        let ids: Vec<Uuid> = ws.scenarios.iter().map(|s| s.id).collect();
        ws.delete_scenario(ids[0]).unwrap();
        assert_eq!(ws.active_scenario, ids[1]);
        ws.delete_scenario(ids[2]).unwrap();
        assert!(matches!(ws.delete_scenario(ids[1]), Err(HubError::LastScenario)));
        assert_eq!(ws.scenarios.len(), 1);
    }

    #[test]
    fn add_scenario_becomes_active() {
        let mut ws = Workspace::default();
        let id = ws.add_scenario();
        assert_eq!(ws.active().id, id);
        assert_eq!(ws.active().project_count(), 0);
        assert!(matches!(
            ws.set_active(Uuid::nil()),
            Err(HubError::UnknownScenario(_))
        ));
    }

    #[test]
    fn commit_replaces_only_dates() {
        let window = CalendarWindow::default();
        let mut ws = Workspace::default();
        let id = ws.add_project("crm", &window);
        ws.find_project_mut(id).unwrap().title = "Customer 360".into();

        let applied = ws.apply_commit(&CommitRequest {
            group_key: "crm".into(),
            item_id: id,
            start: ym("2027-01"),
            end: ym("2027-06"),
        });
        assert!(applied);
        let (area, p) = ws.find_project(id).unwrap();
        assert_eq!(area, "crm");
        assert_eq!((p.start, p.end), (ym("2027-01"), ym("2027-06")));
        assert_eq!(p.title, "Customer 360");

        assert!(!ws.apply_commit(&CommitRequest {
            group_key: "seo".into(),
            item_id: id,
            start: ym("2027-01"),
            end: ym("2027-06"),
        }));
    }

    #[test]
    fn timeline_items_follow_area_order() {
        let window = CalendarWindow::default();
        let mut ws = Workspace::default();
        let tech = ws.add_project("tech", &window);
        let ecommerce = ws.add_project("ecommerce", &window);

        let all: Vec<Uuid> = ws.timeline_items(None).iter().map(|i| i.id).collect();
        assert_eq!(all, vec![ecommerce, tech]);

        let only_tech = ws.timeline_items(Some("tech"));
        assert_eq!(only_tech.len(), 1);
        assert_eq!(only_tech[0].group_key, "tech");
    }

    #[test]
    fn remove_project_reports_missing() {
        let window = CalendarWindow::default();
        let mut ws = Workspace::default();
        let id = ws.add_project("ux", &window);
        assert!(!ws.remove_project("crm", id));
        assert!(ws.remove_project("ux", id));
        assert!(ws.find_project(id).is_none());
    }

    #[test]
    fn validate_rejects_future_schema() {
        let mut ws = Workspace::default();
        ws.schema_version = CURRENT_SCHEMA_VERSION + 1;
        assert!(matches!(
            ws.validate(&CalendarWindow::default()),
            Err(HubError::SchemaVersion { .. })
        ));
    }

    #[test]
    fn validate_repairs_stale_active_id() {
        let mut ws = Workspace::default();
        ws.active_scenario = Uuid::nil();
        assert_eq!(ws.validate(&CalendarWindow::default()).unwrap(), 0);
        assert_eq!(ws.active_scenario, ws.scenarios[0].id);
    }
}
