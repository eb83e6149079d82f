pub mod area_editor;
pub mod area_panel;
pub mod dashboard;
pub mod dialogs;
pub mod gantt_chart;
pub mod project_editor;
pub mod theme;
pub mod toolbar;
