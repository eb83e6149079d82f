#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use strategy_hub::app::HubApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strategy_hub=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 860.0])
            .with_min_inner_size([960.0, 540.0])
            .with_title("Strategy Hub"),
        ..Default::default()
    };

    eframe::run_native(
        "Strategy Hub",
        options,
        Box::new(|cc| Ok(Box::new(HubApp::new(cc)))),
    )
}
