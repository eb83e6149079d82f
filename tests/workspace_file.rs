use pretty_assertions::assert_eq;
use strategy_hub::io::{load_workspace, save_workspace};
use strategy_hub::model::{BudgetRange, Ksm, Workspace};
use strategy_hub::timeline::{CalendarWindow, YearMonth};
use strategy_hub::HubError;

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

#[test]
fn saved_workspace_loads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.hub.json");
    let window = CalendarWindow::default();

    let mut ws = Workspace::default();
    ws.name = "Retail 2026".to_string();
    let id = ws.add_project("crm", &window);
    {
        let project = ws.find_project_mut(id).unwrap();
        project.title = "Customer data platform".to_string();
        project.set_dates(ym("2026-03"), ym("2027-02"));
        project.budget = Some(BudgetRange { min: 50_000, max: 120_000 });
        project.enablers.push("Consent management".to_string());
    }
    ws.active_mut().area_mut("crm").budget = 400_000;

    save_workspace(&ws, &path).unwrap();
    let loaded = load_workspace(&path, &window).unwrap();

    assert_eq!(loaded.name, ws.name);
    assert_eq!(loaded.active_scenario, ws.active_scenario);
    assert_eq!(loaded.scenarios, ws.scenarios);
}

#[test]
fn loading_repairs_out_of_range_projects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    let window = CalendarWindow::default();

    let mut ws = Workspace::default();
    let id = ws.add_project("seo", &window);
    let mut json = serde_json::to_value(&ws).unwrap();
    let active = ws.active_scenario.to_string();
    let scenario = json["scenarios"]
        .as_array_mut()
        .unwrap()
        .iter_mut()
        .find(|s| s["id"] == active.as_str())
        .unwrap();
    let project = &mut scenario["areas"]["seo"]["projects"][0];
    project["start"] = "2024-05".into();
    project["end"] = "2031-01".into();
    project["impact"] = 42.into();
    scenario["areas"]["seo"]["importance"] = 0.into();
    std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let loaded = load_workspace(&path, &window).unwrap();
    let (area, project) = loaded.find_project(id).unwrap();
    assert_eq!(area, "seo");
    assert_eq!(project.start, ym("2026-01"));
    assert_eq!(project.end, ym("2029-12"));
    assert_eq!(project.impact, 10);
    assert_eq!(loaded.active().area("seo").importance, 1);
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");
    let mut json = serde_json::to_value(Workspace::default()).unwrap();
    json["schema_version"] = 99.into();
    std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let err = load_workspace(&path, &CalendarWindow::default()).unwrap_err();
    assert!(matches!(err, HubError::SchemaVersion { found: 99, .. }));
}

#[test]
fn malformed_and_missing_files_report_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let window = CalendarWindow::default();

    let missing = dir.path().join("nope.json");
    let err = load_workspace(&missing, &window).unwrap_err();
    assert!(matches!(err, HubError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    let err = load_workspace(&garbage, &window).unwrap_err();
    assert!(matches!(err, HubError::Json { .. }));
}

#[test]
fn duplicate_ids_are_reissued_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    let window = CalendarWindow::default();

    let mut ws = Workspace::default();
    let first = ws.add_project("ecommerce", &window);
    let second = ws.add_project("logistics", &window);
    ws.find_project_mut(second).unwrap().id = first;
    {
        let plan = ws.active_mut().area_mut("crm");
        plan.ksms.push(Ksm::default());
        let twin = Ksm { name: "Twin".to_string(), ..plan.ksms[0].clone() };
        plan.ksms.push(twin);
    }
    save_workspace(&ws, &path).unwrap();

    let loaded = load_workspace(&path, &window).unwrap();
    let items = loaded.timeline_items(None);
    assert_eq!(items.len(), 2);
    assert_ne!(items[0].id, items[1].id);
    assert!(items.iter().any(|i| i.id == first));

    let ksms = &loaded.active().areas["crm"].ksms;
    assert_ne!(ksms[0].id, ksms[1].id);

    let mut again = loaded.clone();
    assert_eq!(again.validate(&window).unwrap(), 0);
}

#[test]
fn ksm_formula_and_description_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ksm.json");
    let window = CalendarWindow::default();

    let mut ws = Workspace::default();
    ws.active_mut().area_mut("seo").ksms.push(Ksm {
        abbreviation: "OTR".to_string(),
        name: "Organic traffic ratio".to_string(),
        formula: "organic sessions / all sessions".to_string(),
        description: "Share of visits that arrive through search.\nMeasured monthly.".to_string(),
        ..Ksm::default()
    });
    save_workspace(&ws, &path).unwrap();

    let loaded = load_workspace(&path, &window).unwrap();
    let ksm = loaded.active().areas["seo"].ksms.last().unwrap();
    assert_eq!(ksm.formula, "organic sessions / all sessions");
    assert_eq!(ksm.description, "Share of visits that arrive through search.\nMeasured monthly.");
}
