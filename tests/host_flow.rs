use pretty_assertions::assert_eq;
use strategy_hub::app::HubApp;
use strategy_hub::config::{HubSettings, SettingsStore};
use strategy_hub::timeline::{
    CommitRequest, DragMode, GestureOutcome, LayoutMode, YearMonth,
};
use strategy_hub::ui::gantt_chart::ChartInteraction;

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn app() -> HubApp {
    HubApp::with_settings(HubSettings::default(), None)
}

#[test]
fn dragging_a_bar_updates_the_project() {
    let mut app = app();
    app.add_project("ux");
    let id = app.selected_project.unwrap();
    app.selected_project = None;

    let items = app.workspace.timeline_items(None);
    let item = items.iter().find(|i| i.id == id).unwrap();

    // 2026-01..2026-04 dragged 31px right: one month later.
    let mut interaction = ChartInteraction::default();
    assert!(app.controller.pointer_down(item, DragMode::Move, 10, &mut interaction));
    let outcome = app.controller.pointer_up(41, &mut interaction);
    assert!(matches!(outcome, Some(GestureOutcome::Committed(_))));
    app.apply_chart(interaction);

    let (_, project) = app.workspace.find_project(id).unwrap();
    assert_eq!((project.start, project.end), (ym("2026-02"), ym("2026-05")));
    assert_eq!(app.selected_project, Some(id));
    assert_eq!(app.controller.listener_count(), 0);
}

#[test]
fn background_click_clears_selection() {
    let mut app = app();
    app.add_project("seo");
    assert!(app.selected_project.is_some());

    app.apply_chart(ChartInteraction {
        clicked_background: true,
        ..Default::default()
    });
    assert_eq!(app.selected_project, None);
}

#[test]
fn commit_for_deleted_project_is_ignored() {
    let mut app = app();
    app.add_project("tech");
    let id = app.selected_project.unwrap();
    app.delete_project(id);
    assert_eq!(app.selected_project, None);

    app.apply_chart(ChartInteraction {
        commits: vec![CommitRequest {
            group_key: "tech".to_string(),
            item_id: id,
            start: ym("2027-01"),
            end: ym("2027-03"),
        }],
        ..Default::default()
    });
    assert_eq!(app.workspace.active().project_count(), 0);
    assert_eq!(app.status_message, "Project no longer exists");
}

#[test]
fn last_scenario_survives_delete() {
    let mut app = app();
    while app.workspace.scenarios.len() > 1 {
        app.delete_active_scenario();
    }
    let remaining = app.workspace.active_scenario;
    app.delete_active_scenario();
    assert_eq!(app.workspace.scenarios.len(), 1);
    assert_eq!(app.workspace.active_scenario, remaining);
    assert_eq!(app.status_message, "cannot delete the last remaining scenario");
}

#[test]
fn switching_scenario_drops_open_gesture() {
    let mut app = app();
    app.add_project("crm");
    let id = app.selected_project.unwrap();
    let item = app
        .workspace
        .timeline_items(None)
        .into_iter()
        .find(|i| i.id == id)
        .unwrap();
    let mut interaction = ChartInteraction::default();
    app.controller.pointer_down(&item, DragMode::ResizeEnd, 0, &mut interaction);
    assert!(app.controller.is_dragging());

    let other = app.workspace.scenarios[1].id;
    app.switch_scenario(other);
    assert!(!app.controller.is_dragging());
    assert_eq!(app.controller.listener_count(), 0);
    assert_eq!(app.selected_project, None);
}

#[test]
fn view_settings_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path()).unwrap();
    let mut app = HubApp::with_settings(store.load(), Some(store.clone()));

    app.set_layout_mode(LayoutMode::Flat);
    app.set_editable(false);

    let reloaded = store.load();
    assert_eq!(reloaded.layout_mode, LayoutMode::Flat);
    assert!(!reloaded.editable);
}
