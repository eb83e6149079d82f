use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{HubSettings, SettingsStore};
use crate::model::{area, Workspace};
use crate::timeline::{GestureController, LayoutMode, TimelineProps};
use crate::ui;
use crate::ui::gantt_chart::ChartInteraction;

/// Which page the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Roadmap of every area of the active scenario.
    Dashboard,
    /// One area's plan and its projects.
    Area(&'static str),
}

/// Main application state.
pub struct HubApp {
    pub workspace: Workspace,
    pub settings: HubSettings,
    pub settings_store: Option<SettingsStore>,
    pub controller: GestureController,
    pub file_path: Option<PathBuf>,
    pub selected_project: Option<Uuid>,
    pub view: View,

    // Dialog state
    pub show_about: bool,
    pub show_project_index: bool,
    pub confirm_delete_scenario: bool,

    // Status message
    pub status_message: String,
}

impl HubApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let store = match SettingsStore::open() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "settings will not be persisted");
                None
            }
        };
        let settings = store.as_ref().map(SettingsStore::load).unwrap_or_default();
        let mut app = Self::with_settings(settings, store);

        if let Some(path) = app.settings.last_workspace.clone() {
            if path.exists() {
                app.open_path(&path);
            }
        }
        app
    }

    /// App state without a window, starting from the seed workspace.
    pub fn with_settings(settings: HubSettings, settings_store: Option<SettingsStore>) -> Self {
        Self {
            workspace: Workspace::default(),
            controller: GestureController::new(settings.window()),
            settings,
            settings_store,
            file_path: None,
            selected_project: None,
            view: View::Dashboard,
            show_about: false,
            show_project_index: false,
            confirm_delete_scenario: false,
            status_message: "Ready".to_string(),
        }
    }

    // --- File operations ---

    pub fn new_workspace(&mut self) {
        self.controller.cancel();
        self.workspace = Workspace::default();
        self.file_path = None;
        self.selected_project = None;
        self.view = View::Dashboard;
        self.status_message = "New workspace created".to_string();
    }

    pub fn open_workspace(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Strategy Hub Workspace", &["json"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }

    pub fn open_path(&mut self, path: &Path) {
        match crate::io::load_workspace(path, &self.settings.window()) {
            Ok(workspace) => {
                self.controller.cancel();
                self.workspace = workspace;
                self.file_path = Some(path.to_path_buf());
                self.selected_project = None;
                self.remember_path(path);
                self.status_message = "Workspace loaded".to_string();
            }
            Err(e) => {
                warn!(error = %e, "failed to load workspace");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_workspace(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_to(&path);
        } else {
            self.save_workspace_as();
        }
    }

    pub fn save_workspace_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Strategy Hub Workspace", &["json"])
            .set_file_name(format!("{}.hub.json", self.workspace.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_to(&path);
        }
    }

    fn write_to(&mut self, path: &Path) {
        self.workspace.touch();
        match crate::io::save_workspace(&self.workspace, path) {
            Ok(()) => {
                self.remember_path(path);
                self.status_message = "Workspace saved".to_string();
            }
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    fn remember_path(&mut self, path: &Path) {
        self.settings.last_workspace = Some(path.to_path_buf());
        self.persist_settings();
    }

    // --- Settings ---

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        if self.settings.layout_mode != mode {
            self.settings.layout_mode = mode;
            self.persist_settings();
        }
    }

    pub fn set_editable(&mut self, editable: bool) {
        if self.settings.editable != editable {
            if !editable {
                self.controller.cancel();
            }
            self.settings.editable = editable;
            self.persist_settings();
        }
    }

    pub fn persist_settings(&mut self) {
        if let Some(store) = &self.settings_store {
            if let Err(e) = store.save(&self.settings) {
                warn!(error = %e, "failed to save settings");
            }
        }
    }

    pub fn open_settings_folder(&mut self) {
        if let Some(store) = &self.settings_store {
            if let Err(e) = open::that(store.dir()) {
                self.status_message = format!("Could not open settings folder: {}", e);
            }
        }
    }

    // --- Scenario operations ---

    pub fn add_scenario(&mut self) {
        self.controller.cancel();
        self.workspace.add_scenario();
        self.selected_project = None;
        self.status_message = "Scenario added".to_string();
    }

    pub fn switch_scenario(&mut self, id: Uuid) {
        if id == self.workspace.active_scenario {
            return;
        }
        self.controller.cancel();
        match self.workspace.set_active(id) {
            Ok(()) => {
                self.selected_project = None;
                self.status_message = format!("Switched to '{}'", self.workspace.active().title);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn delete_active_scenario(&mut self) {
        let id = self.workspace.active_scenario;
        match self.workspace.delete_scenario(id) {
            Ok(()) => {
                self.controller.cancel();
                self.selected_project = None;
                self.status_message = "Scenario deleted".to_string();
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    // --- Project operations ---

    pub fn add_project(&mut self, area: &str) {
        let id = self.workspace.add_project(area, &self.settings.window());
        self.selected_project = Some(id);
        self.status_message = "Project added".to_string();
    }

    pub fn delete_project(&mut self, id: Uuid) {
        let Some(area) = self.workspace.find_project(id).map(|(area, _)| area.to_string()) else {
            return;
        };
        if self.controller.gesture().is_some_and(|g| g.item_id == id) {
            self.controller.cancel();
        }
        if self.workspace.remove_project(&area, id) {
            if self.selected_project == Some(id) {
                self.selected_project = None;
            }
            self.status_message = "Project deleted".to_string();
        }
    }

    /// Apply what the roadmap reported this frame.
    pub fn apply_chart(&mut self, interaction: ChartInteraction) {
        if let Some(id) = interaction.selected {
            self.selected_project = Some(id);
        } else if interaction.clicked_background {
            self.selected_project = None;
        }

        for request in &interaction.commits {
            if self.workspace.apply_commit(request) {
                let title = self
                    .workspace
                    .find_project(request.item_id)
                    .map(|(_, p)| p.title.clone())
                    .unwrap_or_default();
                info!(item = %request.item_id, "roadmap updated");
                self.status_message = format!(
                    "Updated '{}' ({} → {})",
                    title, request.start, request.end
                );
            } else {
                self.status_message = "Project no longer exists".to_string();
            }
        }
    }

    fn show_timeline(&mut self, ui: &mut egui::Ui, area: Option<&'static str>) {
        let items = self.workspace.timeline_items(area);
        let groups = area::group_descriptors();
        let mode = match area {
            Some(_) => LayoutMode::Flat,
            None => self.settings.layout_mode,
        };
        let props = TimelineProps {
            items: &items,
            groups: &groups,
            mode,
            editable: self.settings.editable,
            selected: self.selected_project,
            window: self.settings.window(),
        };
        self.controller.set_window(props.window);
        let interaction = ui::gantt_chart::show_gantt_chart(&props, &mut self.controller, ui);
        self.apply_chart(interaction);
    }
}

impl eframe::App for HubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_workspace();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::STATUS_BAR_BG)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mode = if self.settings.editable { "Editing" } else { "Read-only" };
                        ui.label(egui::RichText::new(mode).size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "Projects: {}",
                                self.workspace.active().project_count()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: scenario + navigation + area plan
        let mut nav_action = ui::area_panel::NavAction::None;
        egui::SidePanel::left("nav_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                nav_action = ui::area_panel::show_area_panel(&mut self.workspace, self.view, ui);
            });

        match nav_action {
            ui::area_panel::NavAction::Open(view) => {
                self.controller.cancel();
                self.view = view;
            }
            ui::area_panel::NavAction::SwitchScenario(id) => self.switch_scenario(id),
            ui::area_panel::NavAction::AddScenario => self.add_scenario(),
            ui::area_panel::NavAction::DeleteScenario => self.confirm_delete_scenario = true,
            ui::area_panel::NavAction::Changed => self.workspace.touch(),
            ui::area_panel::NavAction::None => {}
        }

        // Right panel: selected project details
        let mut editor_action = ui::project_editor::EditorAction::None;
        if let Some(id) = self.selected_project {
            let window = self.settings.window();
            egui::SidePanel::right("project_panel")
                .default_width(ui::theme::SIDE_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| match self.workspace.find_project_mut(id) {
                    Some(project) => {
                        editor_action = ui::project_editor::show_project_editor(project, &window, ui);
                    }
                    None => {
                        editor_action = ui::project_editor::EditorAction::Close;
                    }
                });
        }
        match editor_action {
            ui::project_editor::EditorAction::Changed => {
                self.workspace.touch();
                self.status_message = "Project updated".to_string();
            }
            ui::project_editor::EditorAction::Delete(id) => self.delete_project(id),
            ui::project_editor::EditorAction::Close => self.selected_project = None,
            ui::project_editor::EditorAction::None => {}
        }

        // Central panel: dashboard or area page
        let central_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(10.0));
        egui::CentralPanel::default().frame(central_frame).show(ctx, |ui| match self.view {
            View::Dashboard => {
                let action = ui::dashboard::show_dashboard(
                    self.workspace.active(),
                    &mut self.show_project_index,
                    ui,
                );
                if let ui::area_panel::NavAction::Open(view) = action {
                    self.controller.cancel();
                    self.view = view;
                    return;
                }
                ui.add_space(8.0);
                self.show_timeline(ui, None);
            }
            View::Area(key) => {
                let action = ui::area_editor::show_area_editor(
                    key,
                    self.workspace.active_mut(),
                    self.selected_project,
                    ui,
                );
                match action {
                    ui::area_editor::AreaAction::AddProject => self.add_project(key),
                    ui::area_editor::AreaAction::Select(id) => self.selected_project = Some(id),
                    ui::area_editor::AreaAction::Changed => self.workspace.touch(),
                    ui::area_editor::AreaAction::None => {}
                }
                ui.add_space(8.0);
                self.show_timeline(ui, Some(key));
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.confirm_delete_scenario {
            ui::dialogs::show_delete_scenario_dialog(self, ctx);
        }
    }
}
